use serde::{Deserialize, Serialize};

/// Remaining-term bands used for rollover exposure, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermBucket {
    UnderOneYear,
    OneToThreeYears,
    ThreeToFiveYears,
    FiveToTenYears,
    TenPlusYears,
}

impl TermBucket {
    pub const COUNT: usize = 5;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::UnderOneYear,
            Self::OneToThreeYears,
            Self::ThreeToFiveYears,
            Self::FiveToTenYears,
            Self::TenPlusYears,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderOneYear => "<1 Year",
            Self::OneToThreeYears => "1–3 Years",
            Self::ThreeToFiveYears => "3–5 Years",
            Self::FiveToTenYears => "5–10 Years",
            Self::TenPlusYears => "10+ Years",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::UnderOneYear => 0,
            Self::OneToThreeYears => 1,
            Self::ThreeToFiveYears => 2,
            Self::FiveToTenYears => 3,
            Self::TenPlusYears => 4,
        }
    }

    /// Inclusive lower bound in years. The first band also absorbs leases
    /// that have already expired.
    pub const fn lower_bound(self) -> f64 {
        match self {
            Self::UnderOneYear => 0.0,
            Self::OneToThreeYears => 1.0,
            Self::ThreeToFiveYears => 3.0,
            Self::FiveToTenYears => 5.0,
            Self::TenPlusYears => 10.0,
        }
    }

    /// Exclusive upper bound in years; `None` for the open-ended band.
    pub const fn upper_bound(self) -> Option<f64> {
        match self {
            Self::UnderOneYear => Some(1.0),
            Self::OneToThreeYears => Some(3.0),
            Self::ThreeToFiveYears => Some(5.0),
            Self::FiveToTenYears => Some(10.0),
            Self::TenPlusYears => None,
        }
    }

    pub fn for_years(years_remaining: f64) -> Self {
        Self::ordered()
            .into_iter()
            .find(|bucket| match bucket.upper_bound() {
                Some(upper) => years_remaining < upper,
                None => true,
            })
            .unwrap_or(Self::TenPlusYears)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermBucketEntry {
    pub bucket: TermBucket,
    pub label: &'static str,
    pub aggregate_rsf: u64,
    pub aggregate_rsf_millions: f64,
    pub percent_of_scope: f64,
    pub lease_count: usize,
}

impl TermBucketEntry {
    pub(crate) fn new(
        bucket: TermBucket,
        aggregate_rsf: u64,
        lease_count: usize,
        total_rsf: u64,
    ) -> Self {
        let percent_of_scope = if total_rsf == 0 {
            0.0
        } else {
            aggregate_rsf as f64 / total_rsf as f64 * 100.0
        };

        Self {
            bucket,
            label: bucket.label(),
            aggregate_rsf,
            aggregate_rsf_millions: aggregate_rsf as f64 / 1_000_000.0,
            percent_of_scope,
            lease_count,
        }
    }
}

/// Placeholder distribution for charts that must render something when a
/// scope has no data. Never returned by the bucketer itself.
pub fn illustrative_buckets() -> Vec<TermBucketEntry> {
    const PRESET: [(u64, usize); TermBucket::COUNT] = [
        (400_000, 4),
        (1_200_000, 11),
        (1_000_000, 8),
        (1_000_000, 6),
        (400_000, 2),
    ];
    let total: u64 = PRESET.iter().map(|(rsf, _)| rsf).sum();

    TermBucket::ordered()
        .into_iter()
        .zip(PRESET)
        .map(|(bucket, (rsf, count))| TermBucketEntry::new(bucket, rsf, count, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_half_open() {
        assert_eq!(TermBucket::for_years(0.0), TermBucket::UnderOneYear);
        assert_eq!(TermBucket::for_years(0.999), TermBucket::UnderOneYear);
        assert_eq!(TermBucket::for_years(1.0), TermBucket::OneToThreeYears);
        assert_eq!(TermBucket::for_years(3.0), TermBucket::ThreeToFiveYears);
        assert_eq!(TermBucket::for_years(5.0), TermBucket::FiveToTenYears);
        assert_eq!(TermBucket::for_years(9.99), TermBucket::FiveToTenYears);
        assert_eq!(TermBucket::for_years(10.0), TermBucket::TenPlusYears);
        assert_eq!(TermBucket::for_years(42.0), TermBucket::TenPlusYears);
    }

    #[test]
    fn expired_leases_land_in_first_bucket() {
        assert_eq!(TermBucket::for_years(-2.5), TermBucket::UnderOneYear);
    }

    #[test]
    fn ranges_are_contiguous() {
        let ordered = TermBucket::ordered();
        for pair in ordered.windows(2) {
            assert_eq!(pair[0].upper_bound(), Some(pair[1].lower_bound()));
        }
        for (position, bucket) in ordered.iter().enumerate() {
            assert_eq!(bucket.index(), position);
        }
    }

    #[test]
    fn illustrative_buckets_sum_to_one_hundred_percent() {
        let buckets = illustrative_buckets();
        assert_eq!(buckets.len(), TermBucket::COUNT);
        let percent: f64 = buckets.iter().map(|entry| entry.percent_of_scope).sum();
        assert!((percent - 100.0).abs() < 1e-9);
        assert_eq!(buckets[0].label, "<1 Year");
    }
}
