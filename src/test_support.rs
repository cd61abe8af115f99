//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::App;
use crate::inference::{CompletionProvider, ExchangeClient, GenerationRequest, ProviderError};

/// Owned copy of the last request a [`StubProvider`] saw.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
}

enum Behaviour {
    Reply(String),
    Fail(ProviderError),
    Hang,
}

/// A provider with a canned outcome, for tests that don't need real API calls.
pub struct StubProvider {
    behaviour: Behaviour,
    last_request: Mutex<Option<SeenRequest>>,
}

impl StubProvider {
    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            last_request: Mutex::new(None),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with(Behaviour::Reply(text.to_string()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with(Behaviour::Fail(error))
    }

    /// Never completes.
    pub fn hanging() -> Self {
        Self::with(Behaviour::Hang)
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate_content(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<String, ProviderError> {
        *self.last_request.lock().unwrap() = Some(SeenRequest {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            system_instruction: request.system_instruction.to_string(),
        });
        match &self.behaviour {
            Behaviour::Reply(text) => Ok(text.clone()),
            Behaviour::Fail(error) => Err(error.clone()),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

/// Creates a test App backed by a StubProvider that always replies "stub reply".
pub fn test_app() -> App {
    let exchange = ExchangeClient::new(Arc::new(StubProvider::replying("stub reply")), "test-model");
    App::new(exchange)
}
