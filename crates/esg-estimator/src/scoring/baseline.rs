use serde::{Deserialize, Serialize};

use super::domain::{Industry, OnboardingData};

/// Typical monthly resource consumption for one industry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBaseline {
    pub monthly_kwh: f64,
    pub waste_kg: f64,
}

/// Immutable industry reference table. Every [`Industry`] has an entry, so
/// lookups never fall back to a default.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTables {
    entries: [IndustryBaseline; 5],
}

impl BaselineTables {
    pub fn standard() -> Self {
        Self {
            entries: [
                IndustryBaseline {
                    monthly_kwh: 10_000.0,
                    waste_kg: 5_000.0,
                },
                IndustryBaseline {
                    monthly_kwh: 2_000.0,
                    waste_kg: 100.0,
                },
                IndustryBaseline {
                    monthly_kwh: 3_000.0,
                    waste_kg: 800.0,
                },
                IndustryBaseline {
                    monthly_kwh: 5_000.0,
                    waste_kg: 1_200.0,
                },
                IndustryBaseline {
                    monthly_kwh: 7_000.0,
                    waste_kg: 4_000.0,
                },
            ],
        }
    }

    /// Build an alternate table, rejecting gaps, duplicates and baselines
    /// that would make the efficiency formula divide by zero.
    pub fn from_entries<I>(entries: I) -> Result<Self, BaselineError>
    where
        I: IntoIterator<Item = (Industry, IndustryBaseline)>,
    {
        let mut slots: [Option<IndustryBaseline>; 5] = [None; 5];

        for (industry, baseline) in entries {
            check_positive(industry, "monthly_kwh", baseline.monthly_kwh)?;
            check_positive(industry, "waste_kg", baseline.waste_kg)?;

            let slot = &mut slots[industry.index()];
            if slot.is_some() {
                return Err(BaselineError::Duplicate(industry));
            }
            *slot = Some(baseline);
        }

        let mut resolved = [IndustryBaseline {
            monthly_kwh: 0.0,
            waste_kg: 0.0,
        }; 5];
        for industry in Industry::ALL {
            resolved[industry.index()] =
                slots[industry.index()].ok_or(BaselineError::Missing(industry))?;
        }

        Ok(Self { entries: resolved })
    }

    pub fn baseline(&self, industry: Industry) -> IndustryBaseline {
        self.entries[industry.index()]
    }

    pub fn energy_kwh(&self, industry: Industry) -> f64 {
        self.baseline(industry).monthly_kwh
    }

    pub fn waste_kg(&self, industry: Industry) -> f64 {
        self.baseline(industry).waste_kg
    }

    pub fn rows(&self) -> Vec<BaselineRow> {
        Industry::ALL
            .into_iter()
            .map(|industry| BaselineRow {
                industry,
                baseline: self.baseline(industry),
            })
            .collect()
    }

    /// "Yours vs. industry" pairs for the benchmark chart. Derived from the raw
    /// inputs, independent of any computed score.
    pub fn benchmark(&self, data: &OnboardingData) -> BenchmarkComparison {
        let baseline = self.baseline(data.industry);
        BenchmarkComparison {
            industry: data.industry,
            pairs: vec![
                BenchmarkPair {
                    metric: BenchmarkMetric::Energy,
                    yours: data.monthly_kwh,
                    industry: baseline.monthly_kwh,
                },
                BenchmarkPair {
                    metric: BenchmarkMetric::Waste,
                    yours: data.waste_volume,
                    industry: baseline.waste_kg,
                },
            ],
        }
    }
}

impl Default for BaselineTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_positive(
    industry: Industry,
    metric: &'static str,
    value: f64,
) -> Result<(), BaselineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BaselineError::NonPositive {
            industry,
            metric,
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineRow {
    pub industry: Industry,
    #[serde(flatten)]
    pub baseline: IndustryBaseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BenchmarkMetric {
    #[serde(rename = "Energy (kWh)")]
    Energy,
    #[serde(rename = "Waste (kg)")]
    Waste,
}

impl BenchmarkMetric {
    pub fn label(self) -> &'static str {
        match self {
            BenchmarkMetric::Energy => "Energy (kWh)",
            BenchmarkMetric::Waste => "Waste (kg)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkPair {
    pub metric: BenchmarkMetric,
    pub yours: f64,
    pub industry: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub industry: Industry,
    pub pairs: Vec<BenchmarkPair>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BaselineError {
    #[error("baseline table has no entry for {0}")]
    Missing(Industry),
    #[error("baseline table lists {0} more than once")]
    Duplicate(Industry),
    #[error("baseline {metric} for {industry} must be positive, got {value}")]
    NonPositive {
        industry: Industry,
        metric: &'static str,
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(kwh: f64, waste: f64) -> Vec<(Industry, IndustryBaseline)> {
        Industry::ALL
            .into_iter()
            .map(|industry| {
                (
                    industry,
                    IndustryBaseline {
                        monthly_kwh: kwh,
                        waste_kg: waste,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn standard_table_matches_reference_values() {
        let tables = BaselineTables::standard();
        assert_eq!(tables.energy_kwh(Industry::Manufacturing), 10_000.0);
        assert_eq!(tables.energy_kwh(Industry::Technology), 2_000.0);
        assert_eq!(tables.energy_kwh(Industry::Retail), 3_000.0);
        assert_eq!(tables.energy_kwh(Industry::Logistics), 5_000.0);
        assert_eq!(tables.energy_kwh(Industry::Construction), 7_000.0);
        assert_eq!(tables.waste_kg(Industry::Manufacturing), 5_000.0);
        assert_eq!(tables.waste_kg(Industry::Technology), 100.0);
        assert_eq!(tables.waste_kg(Industry::Retail), 800.0);
        assert_eq!(tables.waste_kg(Industry::Logistics), 1_200.0);
        assert_eq!(tables.waste_kg(Industry::Construction), 4_000.0);
    }

    #[test]
    fn from_entries_requires_every_industry() {
        let mut entries = uniform(1_000.0, 100.0);
        entries.retain(|(industry, _)| *industry != Industry::Retail);

        let err = BaselineTables::from_entries(entries).expect_err("retail missing");
        assert_eq!(err, BaselineError::Missing(Industry::Retail));
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let mut entries = uniform(1_000.0, 100.0);
        entries.push((
            Industry::Logistics,
            IndustryBaseline {
                monthly_kwh: 10.0,
                waste_kg: 10.0,
            },
        ));

        let err = BaselineTables::from_entries(entries).expect_err("duplicate");
        assert_eq!(err, BaselineError::Duplicate(Industry::Logistics));
    }

    #[test]
    fn from_entries_rejects_zero_and_negative_baselines() {
        let err = BaselineTables::from_entries(uniform(0.0, 100.0)).expect_err("zero kwh");
        assert!(matches!(
            err,
            BaselineError::NonPositive {
                metric: "monthly_kwh",
                ..
            }
        ));

        let err = BaselineTables::from_entries(uniform(100.0, -5.0)).expect_err("negative waste");
        assert!(matches!(
            err,
            BaselineError::NonPositive {
                metric: "waste_kg",
                ..
            }
        ));
    }

    #[test]
    fn benchmark_pairs_follow_inputs_not_scores() {
        let tables = BaselineTables::standard();
        let data = OnboardingData {
            industry: Industry::Retail,
            monthly_kwh: 4_200.0,
            waste_volume: 650.0,
            ..OnboardingData::default()
        };

        let comparison = tables.benchmark(&data);
        assert_eq!(comparison.industry, Industry::Retail);
        assert_eq!(comparison.pairs.len(), 2);
        assert_eq!(comparison.pairs[0].metric, BenchmarkMetric::Energy);
        assert_eq!(comparison.pairs[0].yours, 4_200.0);
        assert_eq!(comparison.pairs[0].industry, 3_000.0);
        assert_eq!(comparison.pairs[1].metric, BenchmarkMetric::Waste);
        assert_eq!(comparison.pairs[1].industry, 800.0);
    }
}
