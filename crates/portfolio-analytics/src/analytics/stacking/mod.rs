//! Floor-by-floor tenant layout for a building.
//!
//! Layouts are synthetic: tenant counts and footprints are drawn from the
//! caller's random source following the rules in [`FloorTier`]. Passing a
//! seeded generator reproduces a plan exactly.

mod config;
mod cursor;
mod domain;
mod policy;
pub mod views;

pub use config::StackingConfig;
pub use cursor::TenantCursor;
pub use domain::{
    display_width_pct, Floor, OccupancyStatus, TenantOccupancy, MIN_DISPLAY_WIDTH_PCT,
};

/// Tallest envelope the service lays out.
pub const MAX_FLOORS: u32 = 250;
pub use policy::FloorTier;

use crate::portfolio::domain::{BuildingEnvelope, TenantTemplate};
use config::probability;
use domain::saturating_sum;
use policy::draw_footprint;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackingPlan {
    /// Highest floor first.
    pub floors: Vec<Floor>,
    pub tenants_placed: usize,
    pub pool_remaining: usize,
}

impl StackingPlan {
    pub fn floor(&self, number: u32) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.number == number)
    }

    pub fn total_rsf(&self) -> u64 {
        saturating_sum(self.floors.iter().map(|floor| floor.total_rsf))
    }

    pub fn occupied_rsf(&self) -> u64 {
        saturating_sum(self.floors.iter().map(Floor::occupied_rsf))
    }

    /// Building-wide occupancy in percent.
    pub fn occupancy_rate(&self) -> f64 {
        match self.total_rsf() {
            0 => 0.0,
            total => self.occupied_rsf() as f64 / total as f64 * 100.0,
        }
    }
}

enum Placement<'a> {
    Leased(&'a TenantTemplate),
    Vacant,
}

/// Rentable area of one floor; the ground floor carries the configured bonus.
pub fn floor_rsf(number: u32, envelope: BuildingEnvelope, config: &StackingConfig) -> u64 {
    let average = match envelope.floors {
        0 => 0,
        floors => envelope.square_foot / u64::from(floors),
    };
    if number == 1 {
        average.saturating_add(config.ground_floor_bonus_rsf)
    } else {
        average
    }
}

pub fn generate_stacking_plan<R>(
    envelope: BuildingEnvelope,
    tenant_pool: &[TenantTemplate],
    config: &StackingConfig,
    rng: &mut R,
) -> StackingPlan
where
    R: Rng + ?Sized,
{
    let mut cursor = TenantCursor::new(tenant_pool);
    let mut floors = Vec::with_capacity(envelope.floors.min(MAX_FLOORS) as usize);

    for number in (1..=envelope.floors).rev() {
        let (floor, advanced) = stack_floor(number, envelope, cursor, config, rng);
        floors.push(floor);
        cursor = advanced;
    }

    debug!(
        floors = floors.len(),
        tenants_placed = cursor.consumed(),
        pool_remaining = cursor.remaining(),
        "stacking plan generated"
    );

    StackingPlan {
        floors,
        tenants_placed: cursor.consumed(),
        pool_remaining: cursor.remaining(),
    }
}

/// Floors only, top-down.
pub fn generate_floors<R>(
    envelope: BuildingEnvelope,
    tenant_pool: &[TenantTemplate],
    config: &StackingConfig,
    rng: &mut R,
) -> Vec<Floor>
where
    R: Rng + ?Sized,
{
    generate_stacking_plan(envelope, tenant_pool, config, rng).floors
}

/// Lays out a single floor, returning it with the cursor advanced past the
/// tenants it placed.
pub fn stack_floor<'a, R>(
    number: u32,
    envelope: BuildingEnvelope,
    mut cursor: TenantCursor<'a>,
    config: &StackingConfig,
    rng: &mut R,
) -> (Floor, TenantCursor<'a>)
where
    R: Rng + ?Sized,
{
    let total_rsf = floor_rsf(number, envelope, config);
    let tier = FloorTier::for_floor(number, envelope.floors, config);

    let mut placements: Vec<(Placement<'a>, u64)> = Vec::new();
    for cap in tier.placement_caps(total_rsf, config, rng) {
        if cap == 0 {
            continue;
        }
        let Some(template) = cursor.next_tenant() else {
            break;
        };
        placements.push((Placement::Leased(template), draw_footprint(cap, rng)));
    }

    if rng.gen_bool(probability(config.vacancy_probability)) {
        let (low, high) = config.vacancy_range();
        placements.push((Placement::Vacant, rng.gen_range(low..=high)));
    }

    settle_overcommit(number, &mut placements, total_rsf);

    let tenants = placements
        .into_iter()
        .filter(|(_, rsf)| *rsf > 0)
        .enumerate()
        .map(|(slot, (placement, rsf))| {
            let suite = suite_label(number, slot);
            match placement {
                Placement::Leased(template) => TenantOccupancy::leased(template, rsf, suite),
                Placement::Vacant => TenantOccupancy::vacant(number, slot + 1, rsf, suite),
            }
        })
        .collect();

    (Floor::new(number, total_rsf, tenants), cursor)
}

/// Shrinks the most recently placed entries until the floor fits.
fn settle_overcommit(number: u32, placements: &mut Vec<(Placement<'_>, u64)>, total_rsf: u64) {
    let total_rsf = u128::from(total_rsf);
    let mut committed: u128 = placements.iter().map(|(_, rsf)| u128::from(*rsf)).sum();
    if committed <= total_rsf {
        return;
    }

    debug!(
        floor = number,
        committed,
        total_rsf,
        "floor overcommitted; trimming last placement"
    );

    while committed > total_rsf {
        let Some((_, last)) = placements.last_mut() else {
            break;
        };
        let excess = committed - total_rsf;
        match u64::try_from(excess) {
            Ok(excess) if *last > excess => {
                *last -= excess;
                committed = total_rsf;
            }
            _ => {
                committed -= u128::from(*last);
                placements.pop();
            }
        }
    }
}

fn suite_label(floor: u32, slot: usize) -> String {
    format!("{floor}{:02}", slot + 1)
}
