use super::baseline::BaselineTables;
use super::config::{ScoringConfig, ScoringWeights};
use super::domain::{FleetType, OnboardingData};

pub const ENERGY_RECOMMENDATION: &str = "Upgrade to High-Efficiency Smart Lighting & HVAC systems.";
pub const WASTE_RECOMMENDATION: &str = "Implement a Zero-Waste circular logistics program.";
pub const MATERIALS_RECOMMENDATION: &str =
    "Increase bio-sourced materials in your primary supply chain.";
pub const FLEET_RECOMMENDATION: &str =
    "Transition core fleet to 100% EV by Q4 2026 for maximum credits.";
pub const LEADER_RECOMMENDATION: &str =
    "Excellent work! Consider applying for the Platinum EcoSeal 2026 Certification.";

/// Unrounded component scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SubScores {
    pub energy: f64,
    pub waste: f64,
    pub materials: f64,
}

impl SubScores {
    pub(crate) fn weighted_total(&self, weights: &ScoringWeights) -> f64 {
        (self.energy * weights.energy)
            + (self.waste * weights.waste)
            + (self.materials * weights.materials)
    }
}

/// 100 at zero consumption, 0 at twice the baseline and beyond, linear between.
pub(crate) fn efficiency_score(consumption: f64, baseline: f64) -> f64 {
    let efficiency = (1.0 - consumption / (baseline * 2.0)).max(0.0);
    efficiency * 100.0
}

pub(crate) fn score_components(data: &OnboardingData, baselines: &BaselineTables) -> SubScores {
    let baseline = baselines.baseline(data.industry);

    SubScores {
        energy: efficiency_score(data.monthly_kwh, baseline.monthly_kwh),
        waste: efficiency_score(data.waste_volume, baseline.waste_kg),
        materials: data.sustainable_materials,
    }
}

pub(crate) fn recommendations(
    scores: &SubScores,
    fleet: FleetType,
    config: &ScoringConfig,
) -> Vec<String> {
    let threshold = config.recommendation_threshold;
    let checks = [
        (scores.energy < threshold, ENERGY_RECOMMENDATION),
        (scores.waste < threshold, WASTE_RECOMMENDATION),
        (scores.materials < threshold, MATERIALS_RECOMMENDATION),
        (!fleet.is_fully_electric(), FLEET_RECOMMENDATION),
    ];

    let mut triggered: Vec<String> = checks
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, message)| message.to_string())
        .collect();

    if triggered.is_empty() {
        triggered.push(LEADER_RECOMMENDATION.to_string());
    }

    triggered
}
