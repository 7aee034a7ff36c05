//! # Generation Client Module
//!
//! The seam to the external text-generation service. The orchestrator only
//! sees the [`TextGenerator`] trait; [`GeminiClient`] implements it over the
//! Gemini `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{GenerationConfig, API_KEY_ENV_VAR};
use crate::errors::PlannerError;

/// Sampling parameters for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// One content-safety category and its blocking threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn new(category: &str, threshold: &str) -> Self {
        Self {
            category: category.to_string(),
            threshold: threshold.to_string(),
        }
    }

    /// Thresholds relaxed so recipes (knives, raw meat, alcohol) are not refused
    pub fn relaxed() -> Vec<Self> {
        [
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ]
        .iter()
        .map(|category| Self::new(category, "BLOCK_NONE"))
        .collect()
    }
}

/// A single-prompt completion request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub settings: GenerationSettings,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerationRequest {
    pub fn new(prompt: String, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            prompt,
            settings: GenerationSettings {
                temperature,
                max_output_tokens,
            },
            safety_settings: SafetySetting::relaxed(),
        }
    }
}

/// Anything that turns a prompt into completion text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the text of the first completion candidate
    async fn generate(&self, request: GenerationRequest) -> Result<String, PlannerError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content>,
    generation_config: &'a GenerationSettings,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl<'a> GenerateContentBody<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: &request.settings,
            safety_settings: &request.safety_settings,
        }
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
///
/// A body that is not JSON, or lacks that path, is an
/// [`PlannerError::EmptyResponse`], not a parse failure.
pub fn extract_candidate_text(body: &str) -> Result<String, PlannerError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| PlannerError::EmptyResponse(format!("response is not valid JSON: {e}")))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| PlannerError::EmptyResponse("no candidate text in response".to_string()))
}

/// Header carrying the key, so it never appears in request URLs
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    http: Client,
    api_key: String,
    config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(api_key: String, config: GenerationConfig) -> Result<Self, PlannerError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key,
            config,
        })
    }

    /// Build a client with the key from `GOOGLE_API_KEY` (or `.env`)
    pub fn from_env(config: GenerationConfig) -> Result<Self, PlannerError> {
        dotenv::dotenv().ok();
        let api_key = env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PlannerError::MissingApiKey(API_KEY_ENV_VAR.to_string()))?;

        Self::new(api_key, config)
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, PlannerError> {
        let body = GenerateContentBody::from_request(&request);
        debug!(
            model = %self.config.model,
            temperature = request.settings.temperature,
            prompt_chars = request.prompt.len(),
            "Sending generation request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!(status = status.as_u16(), "Generation service returned an error");
            return Err(PlannerError::Api {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let text = response.text().await?;
        let candidate = extract_candidate_text(&text)?;
        info!(chars = candidate.len(), "Received generation response");
        debug!(response = %candidate, "Raw generation response");
        Ok(candidate)
    }
}
