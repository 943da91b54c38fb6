use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub String);

impl BuildingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Building record as supplied by the portfolio data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rentable_area: Option<u64>,
    #[serde(default)]
    pub floors: u32,
}

impl Building {
    /// Rentable square footage, if the record carries a usable value.
    ///
    /// A zero area is reported as missing; callers decide whether to fall
    /// back to a default or drop the record.
    pub fn rentable_area(&self) -> Option<u64> {
        self.total_rentable_area.filter(|area| *area > 0)
    }

    pub fn envelope(&self) -> Option<BuildingEnvelope> {
        self.rentable_area().map(|square_foot| BuildingEnvelope {
            floors: self.floors,
            square_foot,
        })
    }
}

/// Physical dimensions a stacking plan is laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingEnvelope {
    pub floors: u32,
    pub square_foot: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub lease_id: String,
    pub building_id: BuildingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaseStatus {
    Active,
    ExpiringSoon,
}

impl LeaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "active" => Some(Self::Active),
            "expiring-soon" | "expiring" => Some(Self::ExpiringSoon),
            _ => None,
        }
    }
}

/// Tenant roster entry available for placement on a stacking plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantTemplate {
    pub tenant_id: String,
    pub name: String,
    pub industry: String,
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
    pub annual_rent_psf: f64,
    pub status: LeaseStatus,
}

impl TenantTemplate {
    pub fn monthly_rent_for(&self, rsf: u64) -> u64 {
        let monthly = (rsf as f64) * self.annual_rent_psf / 12.0;
        monthly.max(0.0).round() as u64
    }
}

/// In-memory record set the analytics operate on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub buildings: Vec<Building>,
    pub leases: Vec<Lease>,
    pub tenant_pool: Vec<TenantTemplate>,
}

impl Portfolio {
    pub fn building(&self, id: &BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|building| &building.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(area: Option<u64>) -> Building {
        Building {
            id: BuildingId::new("b-1"),
            name: "Tower One".to_string(),
            city: "Greensboro".to_string(),
            state: "NC".to_string(),
            region: None,
            total_rentable_area: area,
            floors: 12,
        }
    }

    #[test]
    fn zero_area_is_reported_missing() {
        assert_eq!(building(Some(0)).rentable_area(), None);
        assert_eq!(building(None).rentable_area(), None);
        assert_eq!(building(Some(240_000)).rentable_area(), Some(240_000));
    }

    #[test]
    fn envelope_requires_rentable_area() {
        assert!(building(None).envelope().is_none());
        let envelope = building(Some(240_000)).envelope().expect("envelope");
        assert_eq!(envelope.floors, 12);
        assert_eq!(envelope.square_foot, 240_000);
    }

    #[test]
    fn lease_status_parses_common_spellings() {
        assert_eq!(LeaseStatus::parse("Active"), Some(LeaseStatus::Active));
        assert_eq!(
            LeaseStatus::parse("expiring_soon"),
            Some(LeaseStatus::ExpiringSoon)
        );
        assert_eq!(LeaseStatus::parse("vacant"), None);
    }

    #[test]
    fn monthly_rent_uses_annual_rate() {
        let template = TenantTemplate {
            tenant_id: "t-1".to_string(),
            name: "Acme".to_string(),
            industry: "Legal".to_string(),
            lease_start: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid"),
            lease_end: NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid"),
            annual_rent_psf: 30.0,
            status: LeaseStatus::Active,
        };
        assert_eq!(template.monthly_rent_for(12_000), 30_000);
    }
}
