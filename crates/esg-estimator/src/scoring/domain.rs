use std::fmt;

use serde::{Deserialize, Serialize};

/// Industry category used as the key into the baseline tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Industry {
    Manufacturing,
    Technology,
    Retail,
    Logistics,
    Construction,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Manufacturing,
        Industry::Technology,
        Industry::Retail,
        Industry::Logistics,
        Industry::Construction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::Manufacturing => "Manufacturing",
            Industry::Technology => "Technology",
            Industry::Retail => "Retail",
            Industry::Logistics => "Logistics",
            Industry::Construction => "Construction",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Industry::Manufacturing => 0,
            Industry::Technology => 1,
            Industry::Retail => 2,
            Industry::Logistics => 3,
            Industry::Construction => 4,
        }
    }

    pub fn parse_label(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|industry| normalize_label(industry.label()) == wanted)
    }
}

/// Headcount band selected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessSize {
    #[serde(rename = "1-10", alias = "Startup")]
    Startup,
    #[serde(rename = "11-250", alias = "SME", alias = "Sme")]
    Sme,
    #[serde(rename = "250+", alias = "Enterprise")]
    Enterprise,
}

impl BusinessSize {
    pub const ALL: [BusinessSize; 3] = [
        BusinessSize::Startup,
        BusinessSize::Sme,
        BusinessSize::Enterprise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BusinessSize::Startup => "1-10",
            BusinessSize::Sme => "11-250",
            BusinessSize::Enterprise => "250+",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            BusinessSize::Startup => "startup",
            BusinessSize::Sme => "sme",
            BusinessSize::Enterprise => "enterprise",
        }
    }

    pub fn parse_label(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|size| normalize_label(size.label()) == wanted || size.alias() == wanted)
    }
}

/// Regulatory region the business reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "European Union", alias = "EU")]
    Eu,
    #[serde(rename = "United States", alias = "US")]
    Us,
    #[serde(rename = "Global/Other", alias = "Other")]
    Other,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Eu, Location::Us, Location::Other];

    pub fn label(self) -> &'static str {
        match self {
            Location::Eu => "European Union",
            Location::Us => "United States",
            Location::Other => "Global/Other",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            Location::Eu => "eu",
            Location::Us => "us",
            Location::Other => "other",
        }
    }

    pub fn parse_label(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|location| {
                normalize_label(location.label()) == wanted || location.alias() == wanted
            })
    }
}

/// Composition of the company vehicle fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FleetType {
    #[serde(rename = "100% Electric", alias = "Electric")]
    Electric,
    #[serde(rename = "Hybrid Mix", alias = "Hybrid")]
    Hybrid,
    #[serde(rename = "Internal Combustion (Gas/Diesel)", alias = "ICE")]
    Ice,
}

impl FleetType {
    pub const ALL: [FleetType; 3] = [FleetType::Electric, FleetType::Hybrid, FleetType::Ice];

    pub fn label(self) -> &'static str {
        match self {
            FleetType::Electric => "100% Electric",
            FleetType::Hybrid => "Hybrid Mix",
            FleetType::Ice => "Internal Combustion (Gas/Diesel)",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            FleetType::Electric => "electric",
            FleetType::Hybrid => "hybrid",
            FleetType::Ice => "ice",
        }
    }

    pub fn parse_label(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|fleet| normalize_label(fleet.label()) == wanted || fleet.alias() == wanted)
    }

    pub fn is_fully_electric(self) -> bool {
        matches!(self, FleetType::Electric)
    }
}

macro_rules! display_label {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })+
    };
}

display_label!(Industry, BusinessSize, Location, FleetType);

/// Business metrics collected by the onboarding flow.
///
/// Nothing here is range-checked: negative consumption or a materials share
/// above 100 flow straight into the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    pub company_name: String,
    pub industry: Industry,
    pub size: BusinessSize,
    pub location: Location,
    #[serde(rename = "monthlyKWh", alias = "monthlyKwh")]
    pub monthly_kwh: f64,
    /// Kilograms per month.
    pub waste_volume: f64,
    pub fleet_type: FleetType,
    /// Share of sustainable materials, nominally 0 to 100.
    pub sustainable_materials: f64,
    pub annual_revenue: f64,
    /// Percentage.
    pub tax_bracket: f64,
}

impl Default for OnboardingData {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            industry: Industry::Technology,
            size: BusinessSize::Sme,
            location: Location::Eu,
            monthly_kwh: 5000.0,
            waste_volume: 200.0,
            fleet_type: FleetType::Hybrid,
            sustainable_materials: 50.0,
            annual_revenue: 1_000_000.0,
            tax_bracket: 21.0,
        }
    }
}

/// Scores and offset projection derived from one [`OnboardingData`] snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityResult {
    pub score: i64,
    pub energy_score: i64,
    pub waste_score: i64,
    pub material_score: i64,
    pub estimated_tax_offset: f64,
    pub recommendations: Vec<String>,
}

pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}
