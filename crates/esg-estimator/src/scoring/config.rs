use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative contribution of each sub-score to the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub energy: f64,
    pub waste: f64,
    pub materials: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            energy: 0.4,
            waste: 0.3,
            materials: 0.3,
        }
    }
}

/// Offset rate granted when the total score is strictly above `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetTier {
    pub threshold: f64,
    pub rate: f64,
}

/// Rubric configuration for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Ordered from the highest threshold down.
    pub offset_tiers: Vec<OffsetTier>,
    /// Sub-scores strictly below this trigger their recommendation.
    pub recommendation_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            offset_tiers: vec![
                OffsetTier {
                    threshold: 85.0,
                    rate: 0.05,
                },
                OffsetTier {
                    threshold: 70.0,
                    rate: 0.03,
                },
                OffsetTier {
                    threshold: 50.0,
                    rate: 0.015,
                },
            ],
            recommendation_threshold: 60.0,
        }
    }
}

impl ScoringConfig {
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let ScoringWeights {
            energy,
            waste,
            materials,
        } = self.weights;

        for (name, value) in [("energy", energy), ("waste", waste), ("materials", materials)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringConfigError::InvalidWeight { name, value });
            }
        }

        let sum = energy + waste + materials;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringConfigError::WeightSum(sum));
        }

        for tier in &self.offset_tiers {
            if !tier.threshold.is_finite() {
                return Err(ScoringConfigError::InvalidTierThreshold(tier.threshold));
            }
            if !tier.rate.is_finite() || tier.rate < 0.0 {
                return Err(ScoringConfigError::InvalidRate(tier.rate));
            }
        }

        if self
            .offset_tiers
            .windows(2)
            .any(|pair| pair[0].threshold <= pair[1].threshold)
        {
            return Err(ScoringConfigError::TierOrder);
        }

        if !self.recommendation_threshold.is_finite() {
            return Err(ScoringConfigError::InvalidThreshold(
                self.recommendation_threshold,
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("{name} weight must be a non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("scoring weights must sum to 1.0, got {0}")]
    WeightSum(f64),
    #[error("offset rate must be a non-negative number, got {0}")]
    InvalidRate(f64),
    #[error("offset tier threshold must be finite, got {0}")]
    InvalidTierThreshold(f64),
    #[error("offset tiers must be listed by strictly descending threshold")]
    TierOrder,
    #[error("recommendation threshold must be finite, got {0}")]
    InvalidThreshold(f64),
}
