use super::config::{probability, StackingConfig};
use rand::Rng;
use serde::Serialize;

/// Layout rule applied to a floor based on its height in the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorTier {
    /// Top floors: at most one tenant, leaving a reserve free.
    Executive,
    /// Mid-rise floors shared by one or two tenants.
    Split,
    /// Low floors held by a single large tenant.
    Anchor,
}

impl FloorTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Executive => "Executive",
            Self::Split => "Split",
            Self::Anchor => "Anchor",
        }
    }

    /// The executive tier wins when tiers overlap in short buildings.
    pub fn for_floor(number: u32, floors: u32, config: &StackingConfig) -> Self {
        let floors_above = floors.saturating_sub(number);
        if floors_above < config.executive_floor_count {
            Self::Executive
        } else if number >= config.split_floor_start {
            Self::Split
        } else {
            Self::Anchor
        }
    }

    /// Maximum footprint of each tenant to place, in placement order.
    pub(crate) fn placement_caps<R>(
        self,
        floor_rsf: u64,
        config: &StackingConfig,
        rng: &mut R,
    ) -> Vec<u64>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Executive => {
                if rng.gen_bool(probability(config.executive_occupancy_probability)) {
                    vec![floor_rsf.saturating_sub(config.executive_reserve_rsf)]
                } else {
                    Vec::new()
                }
            }
            Self::Split => {
                let primary = share_of(floor_rsf, config.primary_share);
                if rng.gen_bool(probability(config.split_floor_probability)) {
                    vec![primary, share_of(floor_rsf, config.secondary_share)]
                } else {
                    vec![primary]
                }
            }
            Self::Anchor => vec![share_of(floor_rsf, config.anchor_share)],
        }
    }
}

fn share_of(floor_rsf: u64, share: f64) -> u64 {
    (floor_rsf as f64 * probability(share)).floor() as u64
}

/// Draws a footprint between half the cap and the cap, rounded down to the
/// nearest 100 sq ft when that leaves something to place.
pub(crate) fn draw_footprint<R>(cap: u64, rng: &mut R) -> u64
where
    R: Rng + ?Sized,
{
    let low = (cap / 2).max(1);
    let drawn = rng.gen_range(low..=cap.max(low));
    match drawn / 100 * 100 {
        0 => drawn,
        rounded => rounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn tiers_follow_floor_height() {
        let config = StackingConfig::default();
        assert_eq!(FloorTier::for_floor(20, 20, &config), FloorTier::Executive);
        assert_eq!(FloorTier::for_floor(19, 20, &config), FloorTier::Executive);
        assert_eq!(FloorTier::for_floor(18, 20, &config), FloorTier::Split);
        assert_eq!(FloorTier::for_floor(6, 20, &config), FloorTier::Split);
        assert_eq!(FloorTier::for_floor(5, 20, &config), FloorTier::Anchor);
        assert_eq!(FloorTier::for_floor(1, 20, &config), FloorTier::Anchor);
    }

    #[test]
    fn short_buildings_prefer_executive_tier() {
        let config = StackingConfig::default();
        assert_eq!(FloorTier::for_floor(1, 1, &config), FloorTier::Executive);
        assert_eq!(FloorTier::for_floor(2, 3, &config), FloorTier::Executive);
        assert_eq!(FloorTier::for_floor(1, 3, &config), FloorTier::Anchor);
    }

    #[test]
    fn executive_cap_leaves_reserve() {
        let config = StackingConfig {
            executive_occupancy_probability: 1.0,
            ..StackingConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let caps = FloorTier::Executive.placement_caps(12_000, &config, &mut rng);
        assert_eq!(caps, vec![10_000]);

        let config = StackingConfig {
            executive_occupancy_probability: 0.0,
            ..config
        };
        assert!(FloorTier::Executive
            .placement_caps(12_000, &config, &mut rng)
            .is_empty());
    }

    #[test]
    fn split_floor_caps_use_configured_shares() {
        let config = StackingConfig {
            split_floor_probability: 1.0,
            ..StackingConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let caps = FloorTier::Split.placement_caps(20_000, &config, &mut rng);
        assert_eq!(caps, vec![16_000, 8_000]);

        let anchor = FloorTier::Anchor.placement_caps(20_000, &config, &mut rng);
        assert_eq!(anchor, vec![18_000]);
    }

    #[test]
    fn footprints_stay_within_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for cap in [1, 99, 150, 2_000, 18_000] {
            for _ in 0..50 {
                let footprint = draw_footprint(cap, &mut rng);
                assert!(footprint >= 1 && footprint <= cap, "{footprint} > {cap}");
            }
        }
    }
}
