use super::PortfolioImportError;
use crate::portfolio::domain::{Building, BuildingId, Lease, LeaseStatus, TenantTemplate};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub(crate) fn parse_buildings<R: Read>(reader: R) -> Result<Vec<Building>, PortfolioImportError> {
    let mut buildings = Vec::new();
    for record in csv_reader(reader).deserialize::<BuildingRow>() {
        let row = record?;
        buildings.push(Building {
            id: BuildingId(row.id),
            name: row.name,
            city: row.city.unwrap_or_default(),
            state: row.state.unwrap_or_default(),
            region: row.region,
            total_rentable_area: row.total_rentable_area,
            floors: row.floors.unwrap_or(0),
        });
    }
    Ok(buildings)
}

pub(crate) fn parse_leases<R: Read>(reader: R) -> Result<Vec<Lease>, PortfolioImportError> {
    let mut leases = Vec::new();
    for record in csv_reader(reader).deserialize::<LeaseRow>() {
        let row = record?;
        let expiration_date = row.expiration_date.as_deref().and_then(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                debug!(lease_id = %row.lease_id, value = raw, "unparseable lease expiration date");
            }
            parsed
        });

        leases.push(Lease {
            lease_id: row.lease_id,
            building_id: BuildingId(row.building_id),
            tenant_name: row.tenant_name,
            expiration_date,
        });
    }
    Ok(leases)
}

pub(crate) fn parse_tenants<R: Read>(
    reader: R,
) -> Result<Vec<TenantTemplate>, PortfolioImportError> {
    let mut tenants = Vec::new();
    for (index, record) in csv_reader(reader).deserialize::<TenantRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        let line = index + 2;
        let lease_start = required_date(&row.lease_start, "lease_start", line)?;
        let lease_end = required_date(&row.lease_end, "lease_end", line)?;
        let status = match row.status.as_deref() {
            None => LeaseStatus::Active,
            Some(raw) => LeaseStatus::parse(raw).ok_or_else(|| PortfolioImportError::InvalidField {
                field: "status",
                line,
                value: raw.to_string(),
            })?,
        };

        tenants.push(TenantTemplate {
            tenant_id: row.tenant_id,
            name: row.name,
            industry: row.industry.unwrap_or_default(),
            lease_start,
            lease_end,
            annual_rent_psf: row.annual_rent_psf.unwrap_or(0.0),
            status,
        });
    }
    Ok(tenants)
}

fn required_date(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<NaiveDate, PortfolioImportError> {
    parse_date(value).ok_or_else(|| PortfolioImportError::InvalidField {
        field,
        line,
        value: value.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct BuildingRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    region: Option<String>,
    #[serde(default)]
    total_rentable_area: Option<u64>,
    #[serde(default)]
    floors: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LeaseRow {
    lease_id: String,
    building_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tenant_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    expiration_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TenantRow {
    tenant_id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    lease_start: String,
    lease_end: String,
    #[serde(default)]
    annual_rent_psf: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY` or an RFC 3339 timestamp.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
