//! # Application State
//!
//! Core business state for Legion. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── exchange: ExchangeClient      // provider + model + instruction
//! ├── conversation: Conversation    // AI Designer history
//! ├── request: RequestState         // Idle | Pending { since }
//! ├── view: View                    // active view
//! ├── validation: Validation        // last validator result
//! ├── status_message: String        // header status text
//! └── model_name: String            // current model
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::config::ResolvedConfig;
use crate::core::validator::Validation;
use crate::core::view::View;
use crate::inference::{CompletionProvider, Conversation, ExchangeClient};

/// The exchange with the model is either idle or waiting for one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending { since: Instant },
}

impl RequestState {
    /// Time spent waiting so far, if pending.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            RequestState::Idle => None,
            RequestState::Pending { since } => Some(since.elapsed()),
        }
    }
}

pub struct App {
    pub exchange: ExchangeClient,
    pub conversation: Conversation,
    pub request: RequestState,
    pub view: View,
    pub validation: Validation,
    pub status_message: String,
    pub model_name: String,
}

impl App {
    pub fn new(exchange: ExchangeClient) -> Self {
        Self {
            model_name: exchange.model().to_string(),
            exchange,
            conversation: Conversation::new(),
            request: RequestState::Idle,
            view: View::default(),
            validation: Validation::default(),
            status_message: String::from("Welcome to Electronic Legion Hub"),
        }
    }

    /// Builds the app from resolved settings and an already constructed provider.
    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &ResolvedConfig) -> Self {
        let exchange = ExchangeClient::new(provider, config.model_name.clone())
            .with_system_instruction(config.system_instruction.clone())
            .with_timeout(config.request_timeout);
        Self::new(exchange)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.request, RequestState::Pending { .. })
    }
}
