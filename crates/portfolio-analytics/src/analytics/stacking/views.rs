use super::domain::{Floor, OccupancyStatus, TenantOccupancy};
use super::StackingPlan;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TenantSlotView {
    #[serde(flatten)]
    pub occupancy: TenantOccupancy,
    pub status_label: &'static str,
    pub display_width_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloorView {
    pub number: u32,
    pub total_rsf: u64,
    pub available_rsf: u64,
    pub occupancy_rate: f64,
    pub tenants: Vec<TenantSlotView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StackingPlanView {
    pub total_rsf: u64,
    pub occupied_rsf: u64,
    pub occupancy_rate: f64,
    pub tenants_placed: usize,
    pub pool_remaining: usize,
    pub floors: Vec<FloorView>,
}

impl Floor {
    pub fn to_view(&self) -> FloorView {
        let tenants = self
            .tenants
            .iter()
            .map(|tenant| TenantSlotView {
                occupancy: tenant.clone(),
                status_label: tenant.status.label(),
                display_width_pct: self.display_width_pct(tenant),
            })
            .collect();

        FloorView {
            number: self.number,
            total_rsf: self.total_rsf,
            available_rsf: self.available_rsf,
            occupancy_rate: self.occupancy_rate,
            tenants,
        }
    }
}

impl StackingPlan {
    pub fn to_view(&self) -> StackingPlanView {
        StackingPlanView {
            total_rsf: self.total_rsf(),
            occupied_rsf: self.occupied_rsf(),
            occupancy_rate: self.occupancy_rate(),
            tenants_placed: self.tenants_placed,
            pool_remaining: self.pool_remaining,
            floors: self.floors.iter().map(Floor::to_view).collect(),
        }
    }

    /// Floors whose leased tenants include at least one expiring soon.
    pub fn rollover_floors(&self) -> Vec<u32> {
        self.floors
            .iter()
            .filter(|floor| {
                floor
                    .tenants
                    .iter()
                    .any(|tenant| tenant.status == OccupancyStatus::ExpiringSoon)
            })
            .map(|floor| floor.number)
            .collect()
    }
}
