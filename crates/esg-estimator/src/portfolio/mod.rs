//! Batch scoring of several companies from a CSV export.

mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::scoring::{OnboardingData, ScoringEngine, SustainabilityResult};

#[derive(Debug)]
pub enum PortfolioImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for PortfolioImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioImportError::Io(err) => write!(f, "failed to read portfolio export: {}", err),
            PortfolioImportError::Csv(err) => write!(f, "invalid portfolio CSV data: {}", err),
            PortfolioImportError::InvalidField { line, field, value } => write!(
                f,
                "line {}: unrecognised {} value '{}'",
                line, field, value
            ),
        }
    }
}

impl std::error::Error for PortfolioImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortfolioImportError::Io(err) => Some(err),
            PortfolioImportError::Csv(err) => Some(err),
            PortfolioImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for PortfolioImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PortfolioImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub company_name: String,
    pub result: SustainabilityResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub entries: Vec<PortfolioEntry>,
    /// Mean of the rounded scores; `None` for an empty portfolio.
    pub average_score: Option<f64>,
    pub total_estimated_offset: f64,
}

impl PortfolioSummary {
    fn from_entries(entries: Vec<PortfolioEntry>) -> Self {
        let average_score = if entries.is_empty() {
            None
        } else {
            let sum: i64 = entries.iter().map(|entry| entry.result.score).sum();
            Some(sum as f64 / entries.len() as f64)
        };
        let total_estimated_offset = entries
            .iter()
            .map(|entry| entry.result.estimated_tax_offset)
            .sum();

        Self {
            entries,
            average_score,
            total_estimated_offset,
        }
    }
}

pub struct PortfolioImporter;

impl PortfolioImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        engine: &ScoringEngine,
    ) -> Result<PortfolioSummary, PortfolioImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, engine)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        engine: &ScoringEngine,
    ) -> Result<PortfolioSummary, PortfolioImportError> {
        let entries = Self::read_companies(reader)?
            .into_iter()
            .map(|data| PortfolioEntry {
                result: engine.calculate(&data),
                company_name: data.company_name,
            })
            .collect();

        Ok(PortfolioSummary::from_entries(entries))
    }

    pub fn read_companies<R: Read>(reader: R) -> Result<Vec<OnboardingData>, PortfolioImportError> {
        parser::parse_rows(reader)
    }
}
