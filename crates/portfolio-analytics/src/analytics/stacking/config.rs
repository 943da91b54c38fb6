use serde::{Deserialize, Serialize};

/// Tunables for synthetic stacking plan layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackingConfig {
    pub ground_floor_bonus_rsf: u64,
    /// Number of floors at the top of the building treated as executive.
    pub executive_floor_count: u32,
    pub executive_occupancy_probability: f64,
    pub executive_reserve_rsf: u64,
    /// Lowest floor number laid out as a split floor.
    pub split_floor_start: u32,
    pub split_floor_probability: f64,
    pub primary_share: f64,
    pub secondary_share: f64,
    pub anchor_share: f64,
    pub vacancy_probability: f64,
    pub vacancy_min_rsf: u64,
    pub vacancy_max_rsf: u64,
}

impl Default for StackingConfig {
    fn default() -> Self {
        Self {
            ground_floor_bonus_rsf: 5_000,
            executive_floor_count: 2,
            executive_occupancy_probability: 0.7,
            executive_reserve_rsf: 2_000,
            split_floor_start: 6,
            split_floor_probability: 0.5,
            primary_share: 0.8,
            secondary_share: 0.4,
            anchor_share: 0.9,
            vacancy_probability: 0.3,
            vacancy_min_rsf: 2_000,
            vacancy_max_rsf: 10_000,
        }
    }
}

impl StackingConfig {
    pub fn without_vacancies(mut self) -> Self {
        self.vacancy_probability = 0.0;
        self
    }

    pub(crate) fn vacancy_range(&self) -> (u64, u64) {
        let low = self.vacancy_min_rsf.min(self.vacancy_max_rsf);
        let high = self.vacancy_min_rsf.max(self.vacancy_max_rsf);
        (low, high)
    }
}

/// Probability usable with `Rng::gen_bool`.
pub(crate) fn probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
