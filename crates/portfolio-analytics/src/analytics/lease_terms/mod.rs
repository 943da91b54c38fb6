//! Remaining-term distribution of a lease portfolio.
//!
//! Leases in scope are grouped into five fixed bands by the years left until
//! expiration, weighted by the rentable area of the building they sit in.

mod buckets;
mod scope;

pub use buckets::{illustrative_buckets, TermBucket, TermBucketEntry};
pub use scope::{LeaseScope, RegionDirectory, RegionMatch};

use crate::portfolio::domain::{Building, BuildingId, Lease};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Area assumed for a building whose record carries no rentable area.
pub const DEFAULT_BUILDING_RSF: u64 = 50_000;

const DAYS_PER_YEAR: f64 = 365.25;

/// What to do with a lease whose building (or its rentable area) is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRsfPolicy {
    UseDefault(u64),
    Exclude,
}

impl Default for MissingRsfPolicy {
    fn default() -> Self {
        Self::UseDefault(DEFAULT_BUILDING_RSF)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeaseTermOptions {
    pub region_match: RegionMatch,
    pub missing_rsf: MissingRsfPolicy,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaseTermSummary {
    pub scope_label: String,
    pub buckets: [TermBucketEntry; TermBucket::COUNT],
    pub total_rsf: u64,
    pub total_rsf_millions: f64,
    /// Leases that landed in a bucket.
    pub lease_count: usize,
    /// In-scope leases without an expiration date.
    pub unclassified_leases: usize,
    /// Bucketed leases whose area came from the default.
    pub defaulted_rsf_leases: usize,
    pub excluded_missing_rsf: usize,
}

impl LeaseTermSummary {
    pub fn bucket(&self, bucket: TermBucket) -> &TermBucketEntry {
        &self.buckets[bucket.index()]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LeaseTermDistribution {
    Data(LeaseTermSummary),
    Empty {
        scope_label: String,
        unclassified_leases: usize,
        excluded_missing_rsf: usize,
    },
}

impl LeaseTermDistribution {
    pub fn scope_label(&self) -> &str {
        match self {
            Self::Data(summary) => &summary.scope_label,
            Self::Empty { scope_label, .. } => scope_label,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn summary(&self) -> Option<&LeaseTermSummary> {
        match self {
            Self::Data(summary) => Some(summary),
            Self::Empty { .. } => None,
        }
    }

    /// Buckets for chart rendering, substituting the illustrative preset for
    /// an empty scope.
    pub fn buckets_or_illustrative(&self) -> Vec<TermBucketEntry> {
        match self {
            Self::Data(summary) => summary.buckets.to_vec(),
            Self::Empty { .. } => illustrative_buckets(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct BucketTally {
    rsf: u64,
    leases: usize,
}

pub fn years_remaining(expiration: NaiveDate, now: NaiveDate) -> f64 {
    (expiration - now).num_days() as f64 / DAYS_PER_YEAR
}

pub fn bucket_lease_terms(
    leases: &[Lease],
    buildings: &[Building],
    scope: &LeaseScope,
    options: &LeaseTermOptions,
    now: NaiveDate,
) -> LeaseTermDistribution {
    let index: HashMap<&BuildingId, &Building> = buildings
        .iter()
        .map(|building| (&building.id, building))
        .collect();

    let scope_label = match scope {
        LeaseScope::Building(id) => scope.label(index.get(id).copied()),
        _ => scope.label(None),
    };

    let mut tallies = [BucketTally::default(); TermBucket::COUNT];
    let mut unclassified_leases = 0;
    let mut defaulted_rsf_leases = 0;
    let mut excluded_missing_rsf = 0;

    for lease in leases {
        let building = index.get(&lease.building_id).copied();
        if !scope.includes(lease, building, &options.region_match) {
            continue;
        }

        let Some(expiration) = lease.expiration_date else {
            unclassified_leases += 1;
            continue;
        };

        let rsf = match building.and_then(Building::rentable_area) {
            Some(rsf) => rsf,
            None => match options.missing_rsf {
                MissingRsfPolicy::UseDefault(default_rsf) => {
                    warn!(
                        lease_id = %lease.lease_id,
                        building_id = %lease.building_id,
                        default_rsf,
                        "building rentable area unknown; substituting default"
                    );
                    defaulted_rsf_leases += 1;
                    default_rsf
                }
                MissingRsfPolicy::Exclude => {
                    debug!(
                        lease_id = %lease.lease_id,
                        building_id = %lease.building_id,
                        "building rentable area unknown; lease excluded"
                    );
                    excluded_missing_rsf += 1;
                    continue;
                }
            },
        };

        let bucket = TermBucket::for_years(years_remaining(expiration, now));
        let tally = &mut tallies[bucket.index()];
        tally.rsf = tally.rsf.saturating_add(rsf);
        tally.leases += 1;
    }

    let total_rsf = tallies
        .iter()
        .fold(0u64, |sum, tally| sum.saturating_add(tally.rsf));
    let lease_count: usize = tallies.iter().map(|tally| tally.leases).sum();

    debug!(
        scope = %scope_label,
        total_rsf,
        lease_count,
        unclassified_leases,
        "lease term distribution computed"
    );

    if total_rsf == 0 {
        return LeaseTermDistribution::Empty {
            scope_label,
            unclassified_leases,
            excluded_missing_rsf,
        };
    }

    let buckets = TermBucket::ordered().map(|bucket| {
        let tally = tallies[bucket.index()];
        TermBucketEntry::new(bucket, tally.rsf, tally.leases, total_rsf)
    });

    LeaseTermDistribution::Data(LeaseTermSummary {
        scope_label,
        buckets,
        total_rsf,
        total_rsf_millions: total_rsf as f64 / 1_000_000.0,
        lease_count,
        unclassified_leases,
        defaulted_rsf_leases,
        excluded_missing_rsf,
    })
}
