//! Narrative report requester.
//!
//! Builds the GAD analysis prompt from the aggregated summary and
//! delegates generation to the Gemini provider. Every failure maps to a
//! typed, displayable [`ReportError`]; nothing panics past this boundary.

use crate::analysis::summarize_for_report;
use crate::config::ModelConfig;
use crate::models::{PromptSummary, SubmissionRecord};
use crate::report::provider::GeminiClient;
use thiserror::Error;
use tracing::info;

/// Returned when the model replies successfully but with no text.
pub const EMPTY_ANALYSIS_FALLBACK: &str = "No analysis could be generated at this time.";

/// Why a narrative report could not be produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    /// No API key in the environment. Checked before any network attempt.
    #[error("API key is missing. Set GEMINI_API_KEY to enable AI analysis.")]
    NotConfigured,

    /// The provider call failed; carries the underlying message for display.
    #[error("Analysis failed: {0}")]
    ProviderFailure(String),
}

/// Requests narrative analysis reports from the text-generation provider.
pub struct ReportRequester {
    config: ModelConfig,
    api_key: Option<String>,
}

impl ReportRequester {
    pub fn new(config: ModelConfig, api_key: Option<String>) -> Self {
        Self { config, api_key }
    }

    /// Generate a narrative report for the given records.
    ///
    /// Empty model output is not an error: the call succeeded, so the
    /// fixed fallback message is returned instead. An empty record list
    /// is not special-cased here; the caller is expected to skip the
    /// request entirely when there is nothing to analyze.
    pub async fn request_report(
        &self,
        records: &[SubmissionRecord],
    ) -> Result<String, ReportError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ReportError::NotConfigured)?;

        let summary = summarize_for_report(records);
        let prompt = build_prompt(&summary);

        let client = GeminiClient::new(
            &self.config.api_url,
            &self.config.name,
            api_key,
            self.config.timeout_seconds,
            self.config.low_latency,
        )
        .map_err(|e| ReportError::ProviderFailure(e.to_string()))?;

        info!(
            "Requesting analysis of {} submissions from {} offices",
            summary.total_submissions, summary.contributing_offices
        );

        match client.generate(&prompt).await {
            Ok(Some(text)) => Ok(text),
            Ok(None) => Ok(EMPTY_ANALYSIS_FALLBACK.to_string()),
            Err(e) => Err(ReportError::ProviderFailure(e.to_string())),
        }
    }
}

/// Build the deterministic analysis prompt from the record summary.
pub fn build_prompt(summary: &PromptSummary) -> String {
    let breakdown = serde_json::to_string_pretty(&summary.by_age_group)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a specialized Gender and Development (GAD) Data Analyst.\n\
         Analyze the following aggregated database statistics.\n\n\
         Data Source Scope:\n\
         - Total Submissions: {}\n\
         - Contributing Offices: {}\n\n\
         Aggregated Demographic Data (Age Group -> Counts):\n\
         {}\n\n\
         Please provide a strategic GAD analysis report in Markdown format.\n\
         Include:\n\
         1. **Executive Summary**: Brief overview of the gender balance.\n\
         2. **Key Trends**: Notable gaps or patterns in specific age groups \
         (e.g., Youth Bulge, Senior Care needs).\n\
         3. **Recommendations**: 2-3 specific policy or program interventions \
         based on these numbers.\n\n\
         Keep the tone professional, objective, and constructive.",
        summary.total_submissions, summary.contributing_offices, breakdown
    )
}
