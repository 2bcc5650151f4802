use super::weights::WeightProfile;

/// Constants driving weight derivation. Built once and handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub base_weights: WeightProfile,
    /// Lowest weight a derived profile may carry.
    pub derivation_floor: f64,
    /// Lowest weight a caller override may set. Looser than the derivation floor.
    pub override_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_weights: WeightProfile::from_values([
                1.0, 1.1, 1.2, 1.0, 1.0, 0.9, 1.0, 1.0, 0.8, 0.9, 0.6,
            ]),
            derivation_floor: 0.2,
            override_floor: 0.1,
        }
    }
}
