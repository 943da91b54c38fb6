use crate::portfolio::domain::{LeaseStatus, TenantTemplate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Narrowest rendered share of a floor, in percent.
pub const MIN_DISPLAY_WIDTH_PCT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccupancyStatus {
    Active,
    ExpiringSoon,
    Vacant,
}

impl OccupancyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => LeaseStatus::Active.label(),
            Self::ExpiringSoon => LeaseStatus::ExpiringSoon.label(),
            Self::Vacant => "Vacant",
        }
    }
}

impl From<LeaseStatus> for OccupancyStatus {
    fn from(value: LeaseStatus) -> Self {
        match value {
            LeaseStatus::Active => Self::Active,
            LeaseStatus::ExpiringSoon => Self::ExpiringSoon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantOccupancy {
    pub tenant_id: String,
    pub name: String,
    pub industry: String,
    pub rsf: u64,
    pub lease_start: Option<NaiveDate>,
    pub lease_end: Option<NaiveDate>,
    pub monthly_rent: u64,
    pub status: OccupancyStatus,
    pub suite: String,
}

impl TenantOccupancy {
    pub(crate) fn leased(template: &TenantTemplate, rsf: u64, suite: String) -> Self {
        Self {
            tenant_id: template.tenant_id.clone(),
            name: template.name.clone(),
            industry: template.industry.clone(),
            rsf,
            lease_start: Some(template.lease_start),
            lease_end: Some(template.lease_end),
            monthly_rent: template.monthly_rent_for(rsf),
            status: template.status.into(),
            suite,
        }
    }

    pub(crate) fn vacant(floor: u32, slot: usize, rsf: u64, suite: String) -> Self {
        Self {
            tenant_id: format!("vacant-{floor}-{slot}"),
            name: "Available".to_string(),
            industry: String::new(),
            rsf,
            lease_start: None,
            lease_end: None,
            monthly_rent: 0,
            status: OccupancyStatus::Vacant,
            suite,
        }
    }

    pub fn is_vacant(&self) -> bool {
        self.status == OccupancyStatus::Vacant
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub number: u32,
    pub total_rsf: u64,
    pub tenants: Vec<TenantOccupancy>,
    pub available_rsf: u64,
    pub occupancy_rate: f64,
}

impl Floor {
    /// `tenants` must not exceed `total_rsf` in aggregate; availability is
    /// clamped at zero otherwise.
    pub(crate) fn new(number: u32, total_rsf: u64, tenants: Vec<TenantOccupancy>) -> Self {
        let committed = saturating_sum(tenants.iter().map(|tenant| tenant.rsf));
        let occupied = saturating_sum(
            tenants
                .iter()
                .filter(|tenant| !tenant.is_vacant())
                .map(|tenant| tenant.rsf),
        );
        let occupancy_rate = if total_rsf == 0 {
            0.0
        } else {
            occupied as f64 / total_rsf as f64 * 100.0
        };

        Self {
            number,
            total_rsf,
            available_rsf: total_rsf.saturating_sub(committed),
            tenants,
            occupancy_rate,
        }
    }

    pub fn occupied_rsf(&self) -> u64 {
        saturating_sum(
            self.tenants
                .iter()
                .filter(|tenant| !tenant.is_vacant())
                .map(|tenant| tenant.rsf),
        )
    }

    pub fn committed_rsf(&self) -> u64 {
        saturating_sum(self.tenants.iter().map(|tenant| tenant.rsf))
    }

    pub fn display_width_pct(&self, tenant: &TenantOccupancy) -> f64 {
        display_width_pct(tenant.rsf, self.total_rsf)
    }
}

/// Areas near `u64::MAX` pin at the maximum instead of wrapping.
pub(crate) fn saturating_sum(areas: impl IntoIterator<Item = u64>) -> u64 {
    areas.into_iter().fold(0, u64::saturating_add)
}

/// Rendered share of a floor for a tenant, bounded to `[15, 100]` percent.
pub fn display_width_pct(rsf: u64, floor_rsf: u64) -> f64 {
    if floor_rsf == 0 {
        return 100.0;
    }
    let share = rsf as f64 / floor_rsf as f64 * 100.0;
    share.clamp(MIN_DISPLAY_WIDTH_PCT, 100.0)
}
