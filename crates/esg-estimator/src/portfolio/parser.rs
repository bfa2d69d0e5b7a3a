use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::PortfolioImportError;
use crate::scoring::{BusinessSize, FleetType, Industry, Location, OnboardingData};

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<OnboardingData>, PortfolioImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<PortfolioRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = record?;
        rows.push(row.into_onboarding(line)?);
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct PortfolioRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Industry")]
    industry: String,
    #[serde(rename = "Size", default, deserialize_with = "empty_string_as_none")]
    size: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(rename = "Monthly kWh")]
    monthly_kwh: f64,
    #[serde(rename = "Waste kg")]
    waste_kg: f64,
    #[serde(rename = "Fleet")]
    fleet: String,
    #[serde(rename = "Sustainable Materials %")]
    sustainable_materials: f64,
    #[serde(rename = "Annual Revenue")]
    annual_revenue: f64,
    #[serde(rename = "Tax Bracket %", default)]
    tax_bracket: Option<f64>,
}

impl PortfolioRow {
    fn into_onboarding(self, line: usize) -> Result<OnboardingData, PortfolioImportError> {
        let defaults = OnboardingData::default();

        let industry = Industry::parse_label(&self.industry)
            .ok_or_else(|| invalid(line, "Industry", &self.industry))?;
        let fleet_type =
            FleetType::parse_label(&self.fleet).ok_or_else(|| invalid(line, "Fleet", &self.fleet))?;
        let size = match self.size.as_deref() {
            Some(raw) => BusinessSize::parse_label(raw).ok_or_else(|| invalid(line, "Size", raw))?,
            None => defaults.size,
        };
        let location = match self.location.as_deref() {
            Some(raw) => Location::parse_label(raw).ok_or_else(|| invalid(line, "Location", raw))?,
            None => defaults.location,
        };

        Ok(OnboardingData {
            company_name: self.company,
            industry,
            size,
            location,
            monthly_kwh: self.monthly_kwh,
            waste_volume: self.waste_kg,
            fleet_type,
            sustainable_materials: self.sustainable_materials,
            annual_revenue: self.annual_revenue,
            tax_bracket: self.tax_bracket.unwrap_or(defaults.tax_bracket),
        })
    }
}

fn invalid(line: usize, field: &'static str, value: &str) -> PortfolioImportError {
    PortfolioImportError::InvalidField {
        line,
        field,
        value: value.to_string(),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
