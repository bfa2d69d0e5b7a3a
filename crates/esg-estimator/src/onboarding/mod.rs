//! Three-step onboarding flow feeding the scoring engine.
//!
//! Every field edit recomputes the live preview, so the results panel always
//! reflects the data currently entered.

use std::sync::Arc;

use serde::Serialize;

use crate::scoring::{
    BusinessSize, FleetType, Industry, Location, OnboardingData, ScoreReport, ScoringEngine,
    SustainabilityResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    CompanyProfile,
    Operations,
    Financials,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::CompanyProfile => 1,
            WizardStep::Operations => 2,
            WizardStep::Financials => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::CompanyProfile => "Company profile",
            WizardStep::Operations => "Operations",
            WizardStep::Financials => "Financials",
        }
    }

    fn next(self) -> Self {
        match self {
            WizardStep::CompanyProfile => WizardStep::Operations,
            WizardStep::Operations | WizardStep::Financials => WizardStep::Financials,
        }
    }

    fn previous(self) -> Self {
        match self {
            WizardStep::CompanyProfile | WizardStep::Operations => WizardStep::CompanyProfile,
            WizardStep::Financials => WizardStep::Operations,
        }
    }
}

/// A single form edit.
#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingField {
    CompanyName(String),
    Industry(Industry),
    Size(BusinessSize),
    Location(Location),
    MonthlyKwh(f64),
    WasteVolume(f64),
    FleetType(FleetType),
    SustainableMaterials(f64),
    AnnualRevenue(f64),
    TaxBracket(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("a company name is required before continuing")]
    CompanyNameRequired,
    #[error("the report can only be generated from the final step (currently on {0:?})")]
    NotOnFinalStep(WizardStep),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOnboarding {
    pub data: OnboardingData,
    pub report: ScoreReport,
}

#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    engine: Arc<ScoringEngine>,
    step: WizardStep,
    data: OnboardingData,
    preview: SustainabilityResult,
}

impl OnboardingWizard {
    pub fn new(engine: Arc<ScoringEngine>) -> Self {
        Self::with_data(engine, OnboardingData::default())
    }

    pub fn with_data(engine: Arc<ScoringEngine>, data: OnboardingData) -> Self {
        let preview = engine.calculate(&data);
        Self {
            engine,
            step: WizardStep::CompanyProfile,
            data,
            preview,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn data(&self) -> &OnboardingData {
        &self.data
    }

    pub fn preview(&self) -> &SustainabilityResult {
        &self.preview
    }

    pub fn update(&mut self, field: OnboardingField) -> &SustainabilityResult {
        let data = &mut self.data;
        match field {
            OnboardingField::CompanyName(value) => data.company_name = value,
            OnboardingField::Industry(value) => data.industry = value,
            OnboardingField::Size(value) => data.size = value,
            OnboardingField::Location(value) => data.location = value,
            OnboardingField::MonthlyKwh(value) => data.monthly_kwh = value,
            OnboardingField::WasteVolume(value) => data.waste_volume = value,
            OnboardingField::FleetType(value) => data.fleet_type = value,
            OnboardingField::SustainableMaterials(value) => data.sustainable_materials = value,
            OnboardingField::AnnualRevenue(value) => data.annual_revenue = value,
            OnboardingField::TaxBracket(value) => data.tax_bracket = value,
        }

        self.preview = self.engine.calculate(&self.data);
        &self.preview
    }

    pub fn can_advance(&self) -> bool {
        self.step != WizardStep::CompanyProfile || !self.data.company_name.trim().is_empty()
    }

    /// Move forward one step, staying put on the last one.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        if !self.can_advance() {
            return Err(WizardError::CompanyNameRequired);
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    pub fn finish(self) -> Result<CompletedOnboarding, WizardError> {
        if self.step != WizardStep::Financials {
            return Err(WizardError::NotOnFinalStep(self.step));
        }

        let report = self.engine.report(&self.data);
        Ok(CompletedOnboarding {
            data: self.data,
            report,
        })
    }
}
