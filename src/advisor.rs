//! AI optimization advisor (Gemini boundary)
//!
//! The Gemini API is treated as a black-box oracle: raw configuration text
//! plus a credential go in, a list of suggestion records comes out. The
//! `Advisor` trait is the seam - the CLI and tests never depend on actual
//! network behavior (tests substitute a deterministic stub, or point
//! `GeminiAdvisor` at a mock server via `with_base_url`).
//!
//! Single in-flight request per invocation, no retry, no cancellation. Any
//! transport or parsing failure collapses into one opaque advisor error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TfcostError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const SYSTEM_PROMPT: &str = r#"You are an expert Cloud FinOps and DevOps engineer.
Your goal is to analyze Terraform code for AWS, Azure, and Google Cloud (GCP).
Identify:
1. Potential cost savings (e.g. over-provisioned instances, older generation families).
2. Security risks (e.g. open security groups, public access).
3. Best practices.

Return the response in strictly valid JSON format matching this schema:
{
  "suggestions": [
    {
      "resourceName": "string",
      "currentType": "string",
      "suggestion": "string (short title)",
      "potentialSavings": "string (estimated amount or 'N/A')",
      "reasoning": "string (concise explanation)"
    }
  ]
}"#;

/// One optimization suggestion returned by the model.
///
/// Field names mirror the JSON schema the model is instructed to produce.
/// `potential_savings` is a formatted amount or the literal "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub resource_name: String,
    pub current_type: String,
    pub suggestion: String,
    pub potential_savings: String,
    pub reasoning: String,
}

/// Narrow interface over the AI suggestion service.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Submit raw configuration text, get suggestions or a single opaque error.
    async fn analyze(&self, code: &str) -> Result<Vec<Suggestion>>;
}

/// Gemini REST implementation of [`Advisor`].
#[derive(Debug)]
pub struct GeminiAdvisor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAdvisor {
    /// Build an advisor. An empty credential is a precondition failure,
    /// reported here so no network call is ever attempted without a key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TfcostError::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API endpoint (used by tests to target a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    async fn analyze(&self, code: &str) -> Result<Vec<Suggestion>> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_PROMPT.to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("Analyze this terraform code:\n\n{}", code),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        debug!("requesting analysis from model {}", self.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TfcostError::advisor("request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TfcostError::Advisor {
                message: format!("API returned status {}", status),
                source: None,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TfcostError::advisor("unreadable response", e))?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .unwrap_or("{}");

        let envelope: SuggestionEnvelope = serde_json::from_str(text)
            .map_err(|e| TfcostError::advisor("model returned invalid JSON", e))?;

        Ok(envelope.suggestions)
    }
}

// Wire types for the generateContent endpoint.

#[derive(Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Deserialize)]
struct SuggestionEnvelope {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}
