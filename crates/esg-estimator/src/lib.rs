//! ESG compliance estimation: deterministic scoring against industry
//! baselines, onboarding and portfolio intake, a cached headline feed and an
//! AI-written advisory narrative.

pub mod config;
pub mod error;
pub mod narrative;
pub mod news;
pub mod onboarding;
pub mod portfolio;
pub mod router;
pub mod scoring;
pub mod telemetry;
