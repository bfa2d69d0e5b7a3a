use serde::Serialize;

use super::config::OffsetTier;

/// Index of the first tier whose threshold the total strictly exceeds.
pub(crate) fn tier_index(total: f64, tiers: &[OffsetTier]) -> Option<usize> {
    tiers.iter().position(|tier| total > tier.threshold)
}

pub(crate) fn offset_rate(total: f64, tiers: &[OffsetTier]) -> f64 {
    tier_index(total, tiers)
        .map(|index| tiers[index].rate)
        .unwrap_or(0.0)
}

/// Dashboard classification of a score, following the offset tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Leader,
    Advanced,
    Developing,
    AtRisk,
}

impl ScoreBand {
    pub(crate) fn from_tier(index: Option<usize>) -> Self {
        match index {
            Some(0) => ScoreBand::Leader,
            Some(1) => ScoreBand::Advanced,
            Some(_) => ScoreBand::Developing,
            None => ScoreBand::AtRisk,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Leader => "Leader",
            ScoreBand::Advanced => "Advanced",
            ScoreBand::Developing => "Developing",
            ScoreBand::AtRisk => "At Risk",
        }
    }
}

/// Green incentive level advertised at the end of onboarding. The top tier is
/// the highest level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncentiveLevel {
    pub level: u8,
    pub rate: f64,
}

impl IncentiveLevel {
    pub(crate) fn from_tier(index: Option<usize>, tiers: &[OffsetTier]) -> Option<Self> {
        let index = index?;
        let level = u8::try_from(tiers.len() - index).unwrap_or(u8::MAX);
        Some(Self {
            level,
            rate: tiers[index].rate,
        })
    }

    pub fn label(&self) -> String {
        format!("Level {} Green Incentive", self.level)
    }
}
