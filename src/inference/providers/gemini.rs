//! Google Gemini provider using the `generateContent` REST endpoint.
//!
//! One request, one complete reply. The API key travels as the `key` query
//! parameter and is never written to the log.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{CompletionProvider, GenerationRequest, ProviderError};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

/// Error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Deserialize, Debug)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn build_request<'a>(request: &GenerationRequest<'a>) -> GenerateContentRequest<'a> {
    let system_instruction = (!request.system_instruction.is_empty()).then(|| SystemInstruction {
        parts: vec![Part {
            text: request.system_instruction,
        }],
    });
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: request.prompt,
            }],
        }],
        system_instruction,
    }
}

/// Concatenates the text parts of the first candidate. Empty when the
/// service returned no text (e.g. a blocked prompt).
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Prefer the structured `STATUS: message` form; fall back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorWrapper>(body) {
        Ok(wrapper) => {
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(status) if !status.is_empty() => format!("{status}: {msg}"),
                _ => msg,
            }
        }
        Err(_) => body.to_string(),
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    ///
    /// A missing key is not an error here; every call fails with a
    /// `Config` error instead, so the rest of the hub stays usable.
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_content(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Config(
                "API key is not set (config file, GEMINI_API_KEY or API_KEY env var)".to_string(),
            )
        })?;

        let body = build_request(&request);
        let url = self.endpoint(request.model);
        info!("Gemini request: model={}, prompt_len={}", request.model, request.prompt.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: error_message(&err_body),
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| ProviderError::Parse(format!("Failed to parse Gemini response: {e}")))?;

        let text = extract_text(parsed);
        info!("Gemini reply: {} bytes", text.len());
        Ok(text)
    }
}
