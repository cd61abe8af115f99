use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
    /// No reply within the configured limit.
    Timeout(Duration),
}

impl ProviderError {
    /// The underlying cause without the category prefix. This is the text
    /// shown to the user in the chat.
    pub fn message(&self) -> String {
        match self {
            ProviderError::Config(msg)
            | ProviderError::Network(msg)
            | ProviderError::Parse(msg) => msg.clone(),
            ProviderError::Api { message, .. } => message.clone(),
            ProviderError::Timeout(limit) => {
                format!("request timed out after {}s", limit.as_secs())
            }
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
            ProviderError::Timeout(limit) => write!(f, "timeout after {}s", limit.as_secs()),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system_instruction: &'a str,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Generates one complete reply. An empty string means the service
    /// answered without any text.
    async fn generate_content(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<String, ProviderError>;
}
