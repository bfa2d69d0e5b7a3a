//! Sustainability scoring and tax offset projection.
//!
//! The engine is a pure function of its inputs and the tables it was built
//! with: no I/O, no interior mutability, safe to share across threads.

pub mod baseline;
mod config;
pub mod domain;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use baseline::{
    BaselineError, BaselineRow, BaselineTables, BenchmarkComparison, BenchmarkMetric,
    BenchmarkPair, IndustryBaseline,
};
pub use config::{OffsetTier, ScoringConfig, ScoringConfigError, ScoringWeights};
pub use domain::{
    BusinessSize, FleetType, Industry, Location, OnboardingData, SustainabilityResult,
};
pub use policy::{IncentiveLevel, ScoreBand};
pub use rules::{
    ENERGY_RECOMMENDATION, FLEET_RECOMMENDATION, LEADER_RECOMMENDATION, MATERIALS_RECOMMENDATION,
    WASTE_RECOMMENDATION,
};

use serde::Serialize;

/// Stateless scorer holding the baseline tables and rubric it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringEngine {
    baselines: BaselineTables,
    config: ScoringConfig,
}

impl ScoringEngine {
    /// The config is expected to have passed [`ScoringConfig::validate`].
    pub fn new(baselines: BaselineTables, config: ScoringConfig) -> Self {
        Self { baselines, config }
    }

    pub fn standard() -> Self {
        Self::new(BaselineTables::standard(), ScoringConfig::default())
    }

    pub fn baselines(&self) -> &BaselineTables {
        &self.baselines
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn calculate(&self, data: &OnboardingData) -> SustainabilityResult {
        self.evaluate(data).result
    }

    /// Score plus the presentation extras the dashboard shows next to it.
    pub fn report(&self, data: &OnboardingData) -> ScoreReport {
        let Evaluation { result, tier } = self.evaluate(data);

        ScoreReport {
            company_name: data.company_name.clone(),
            band: ScoreBand::from_tier(tier),
            incentive: IncentiveLevel::from_tier(tier, &self.config.offset_tiers),
            benchmark: self.baselines.benchmark(data),
            result,
        }
    }

    fn evaluate(&self, data: &OnboardingData) -> Evaluation {
        let scores = rules::score_components(data, &self.baselines);
        let total = scores.weighted_total(&self.config.weights);

        let tier = policy::tier_index(total, &self.config.offset_tiers);
        let offset_rate = policy::offset_rate(total, &self.config.offset_tiers);
        let estimated_tax_offset = data.annual_revenue * offset_rate;

        let recommendations = rules::recommendations(&scores, data.fleet_type, &self.config);

        Evaluation {
            result: SustainabilityResult {
                score: round_score(total),
                energy_score: round_score(scores.energy),
                waste_score: round_score(scores.waste),
                material_score: round_score(scores.materials),
                estimated_tax_offset,
                recommendations,
            },
            tier,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Score `data` against the standard tables and default weights.
pub fn calculate_sustainability(data: &OnboardingData) -> SustainabilityResult {
    ScoringEngine::standard().calculate(data)
}

struct Evaluation {
    result: SustainabilityResult,
    tier: Option<usize>,
}

/// Half away from zero. Saturates for values outside the `i64` range.
fn round_score(value: f64) -> i64 {
    value.round() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub company_name: String,
    pub result: SustainabilityResult,
    pub band: ScoreBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incentive: Option<IncentiveLevel>,
    pub benchmark: BenchmarkComparison,
}
