//! AI-written advisory narrative for a company's onboarding data.

mod gemini;
mod prompt;

pub use gemini::{GeminiClient, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use prompt::build_audit_prompt;

use std::future::Future;

use tracing::{error, info};

use crate::scoring::OnboardingData;

/// Shown in place of the narrative whenever generation fails.
pub const AUDIT_FAILURE_MESSAGE: &str =
    "Error generating live audit. Please check your connection.";

/// Text-generation backend streaming its answer as deltas.
pub trait NarrativeGateway: Send + Sync {
    fn stream(
        &self,
        prompt: &str,
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> impl Future<Output = Result<(), NarrativeError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative generation is not configured")]
    NotConfigured,
    #[error("narrative request failed: {0}")]
    Transport(String),
    #[error("narrative API responded with status {0}")]
    Status(u16),
    #[error("narrative stream could not be decoded: {0}")]
    Decode(String),
    #[error("invalid narrative endpoint: {0}")]
    InvalidUrl(String),
}

#[derive(Debug)]
pub struct NarrativeService<G> {
    gateway: Option<G>,
}

impl<G> NarrativeService<G>
where
    G: NarrativeGateway,
{
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    pub fn disabled() -> Self {
        Self { gateway: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.gateway.is_some()
    }

    /// Stream the audit for `data`. `on_update` receives the whole text so far
    /// after every delta, or [`AUDIT_FAILURE_MESSAGE`] once if generation fails.
    pub async fn stream_audit<F>(&self, data: &OnboardingData, mut on_update: F)
    where
        F: FnMut(&str) + Send,
    {
        if let Err(err) = self.try_stream(data, &mut on_update).await {
            error!(error = %err, company = %data.company_name, "narrative generation failed");
            on_update(AUDIT_FAILURE_MESSAGE);
        }
    }

    /// Final narrative text, or the failure message.
    pub async fn audit(&self, data: &OnboardingData) -> String {
        let mut latest = String::new();
        self.stream_audit(data, |text: &str| {
            latest.clear();
            latest.push_str(text);
        })
        .await;
        latest
    }

    async fn try_stream<F>(
        &self,
        data: &OnboardingData,
        on_update: &mut F,
    ) -> Result<(), NarrativeError>
    where
        F: FnMut(&str) + Send,
    {
        let gateway = self.gateway.as_ref().ok_or(NarrativeError::NotConfigured)?;
        let prompt = build_audit_prompt(data);

        let mut full_text = String::new();
        let mut forward = |delta: &str| {
            full_text.push_str(delta);
            on_update(&full_text);
        };
        gateway.stream(&prompt, &mut forward).await?;

        info!(
            company = %data.company_name,
            characters = full_text.len(),
            "narrative generated"
        );
        Ok(())
    }
}
