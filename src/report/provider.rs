//! Gemini REST client.
//!
//! Thin wrapper over the generateContent endpoint. The provider is
//! treated as an opaque, rate-limited, possibly-unavailable service;
//! every failure is reduced to a displayable message by the requester.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request body for the generateContent endpoint.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "thinkingConfig")]
    thinking_config: ThinkingConfig,
}

/// A budget of 0 disables model thinking; -1 lets the model decide.
#[derive(Debug, Serialize)]
struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// HTTP client for the Gemini text-generation API.
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: String,
    timeout_seconds: u64,
    low_latency: bool,
}

impl GeminiClient {
    pub fn new(
        api_url: &str,
        model: &str,
        api_key: &str,
        timeout_seconds: u64,
        low_latency: bool,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout_seconds,
            low_latency,
        })
    }

    /// Send one prompt and return the generated text.
    ///
    /// `Ok(None)` means the call succeeded but the model produced no
    /// text; the caller decides what that means.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: if self.low_latency { 0 } else { -1 },
                },
            },
        };

        debug!("Sending generateContent request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!("Request timed out after {}s", self.timeout_seconds)
                } else if e.is_connect() {
                    anyhow::anyhow!("Cannot connect to Gemini API at {}", self.api_url)
                } else {
                    anyhow::anyhow!("Failed to send request: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Gemini API error {}: {}", status, body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        Ok(extract_text(body))
    }
}

/// Pull the generated text out of a response, treating blank output as
/// absent.
fn extract_text(body: GenerateContentResponse) -> Option<String> {
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_api_field_names() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"thinkingConfig\""));
        assert!(json.contains("\"thinkingBudget\":0"));
    }

    #[test]
    fn test_extract_text_from_response() {
        let body: GenerateContentResponse = serde_json::from_str(
            r###"{"candidates":[{"content":{"parts":[{"text":"## Report"},{"text":" body"}]}}]}"###,
        )
        .unwrap();

        assert_eq!(extract_text(body).as_deref(), Some("## Report body"));
    }

    #[test]
    fn test_extract_text_handles_empty_responses() {
        let no_candidates: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(no_candidates), None);

        let blank: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
                .unwrap();
        assert_eq!(extract_text(blank), None);

        let missing_content: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{}]}"#).unwrap();
        assert_eq!(extract_text(missing_content), None);
    }
}
