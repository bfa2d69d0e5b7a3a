use crate::scoring::{
    BaselineTables, FleetType, Industry, IndustryBaseline, OnboardingData, ScoringConfig,
    ScoringEngine,
};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::standard()
}

/// Technology company: 2000 kWh and 100 kg baselines.
pub(super) fn technology(
    monthly_kwh: f64,
    waste_volume: f64,
    sustainable_materials: f64,
    fleet_type: FleetType,
) -> OnboardingData {
    OnboardingData {
        company_name: "Northwind Labs".to_string(),
        industry: Industry::Technology,
        monthly_kwh,
        waste_volume,
        fleet_type,
        sustainable_materials,
        annual_revenue: 1_000_000.0,
        ..OnboardingData::default()
    }
}

pub(super) fn flat_baselines(monthly_kwh: f64, waste_kg: f64) -> BaselineTables {
    BaselineTables::from_entries(Industry::ALL.into_iter().map(|industry| {
        (
            industry,
            IndustryBaseline {
                monthly_kwh,
                waste_kg,
            },
        )
    }))
    .expect("flat baselines valid")
}

pub(super) fn engine_with(baselines: BaselineTables) -> ScoringEngine {
    ScoringEngine::new(baselines, ScoringConfig::default())
}
