//! # Exchange Client
//!
//! Forwards one prompt, together with the fixed system instruction, to the
//! completion provider and turns whatever comes back into chat text.
//!
//! ```text
//! prompt ──► ExchangeClient::send ──► CompletionProvider::generate_content
//!                                             │
//!               reply text ◄── Ok(text) ──────┤
//!   "No response generated." ◄── Ok("") ──────┤
//!   "Error communicating with AI: …" ◄── Err ─┘
//! ```
//!
//! `send` never fails: provider errors become displayable text here so the
//! conversation always receives exactly one reply per submission. It does
//! not touch the conversation and does not retry.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use super::provider::{CompletionProvider, GenerationRequest, ProviderError};

pub const SYSTEM_INSTRUCTION: &str = "You are an expert Analog Circuit Design Engineer and Assistant for the \"Electronic-Legion-library\". \
Your goal is to assist users in designing circuits, defining components in YAML, and understanding circuit theory. \
When asked to design a circuit: \
1. Briefly explain the theory. \
2. Provide a 'Netlist' or 'Component List' in YAML format compatible with the Electronic-Legion schema. \
3. If possible, generate a simple SVG string representation of the schematic inside a code block labeled 'svg'. \
Keep responses technical, precise, and structured.";

/// Prefix of every reply produced from a provider failure.
pub const ERROR_PREFIX: &str = "Error communicating with AI";

/// Reply used when the service answers without any text.
pub const NO_RESPONSE: &str = "No response generated.";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Clone)]
pub struct ExchangeClient {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    system_instruction: String,
    /// `None` waits for as long as the provider takes.
    timeout: Option<Duration>,
}

impl ExchangeClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            timeout: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Send one prompt and return the reply text or a formatted error.
    ///
    /// The caller is responsible for rejecting blank prompts.
    pub async fn send(&self, prompt: &str) -> String {
        let request = GenerationRequest {
            model: &self.model,
            prompt,
            system_instruction: &self.system_instruction,
        };
        info!(
            "Exchange via {} (model={}, timeout={:?})",
            self.provider.name(),
            self.model,
            self.timeout
        );

        let result = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.provider.generate_content(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout(limit)),
                }
            }
            None => self.provider.generate_content(request).await,
        };

        reply_text(result)
    }
}

/// Map a provider outcome to the text shown in the conversation.
pub fn reply_text(result: Result<String, ProviderError>) -> String {
    match result {
        Ok(text) if text.trim().is_empty() => {
            warn!("Provider returned an empty reply");
            NO_RESPONSE.to_string()
        }
        Ok(text) => text,
        Err(e) => {
            warn!("Exchange failed: {e}");
            format!("{ERROR_PREFIX}: {}", e.message())
        }
    }
}
