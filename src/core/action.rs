//! # Actions
//!
//! Everything that can happen in Legion becomes an `Action`.
//! User presses Enter in the AI Designer? That's `Action::Submit(text)`.
//! The model replies? That's `Action::ResponseReceived(text)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the adapter should perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Exchange lifecycle
//!
//! ```text
//!          Submit(text)                ResponseReceived(reply)
//!  Idle ─────────────────► Pending ───────────────────────────► Idle
//!   ▲   append user msg      │        append model msg            │
//!   │   Effect::SpawnRequest │                                    │
//!   └────────────────────────┴────────────────────────────────────┘
//! ```
//!
//! Blank submissions and submissions while pending change nothing, so each
//! submitted prompt gets exactly one reply, appended after it.

use log::{debug, info, warn};
use std::time::Instant;

use crate::core::state::{App, RequestState};
use crate::core::validator::validate;
use crate::core::view::View;
use crate::inference::Message;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SwitchView(View),
    Submit(String),
    ResponseReceived(String),
    Validate(String),
    Quit,
}

/// I/O requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start one exchange for this prompt.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SwitchView(view) => {
            if app.view != view {
                debug!("Switching view: {:?} -> {:?}", app.view, view);
                app.view = view;
            }
            Effect::None
        }
        Action::Submit(text) => {
            if text.trim().is_empty() {
                return Effect::None;
            }
            if app.is_loading() {
                debug!("Ignoring submit while a request is pending");
                return Effect::None;
            }
            info!("Submitting prompt ({} bytes)", text.len());
            app.conversation.append(Message::user(text.clone()));
            app.request = RequestState::Pending {
                since: Instant::now(),
            };
            app.status_message = String::from("Generating...");
            Effect::SpawnRequest(text)
        }
        Action::ResponseReceived(reply) => {
            let RequestState::Pending { since } = app.request else {
                warn!("Dropping reply that arrived with no request pending");
                return Effect::None;
            };
            info!(
                "Reply received after {:.1}s ({} bytes)",
                since.elapsed().as_secs_f32(),
                reply.len()
            );
            app.conversation.append(Message::model(reply));
            app.request = RequestState::Idle;
            app.status_message = String::from("Ready");
            Effect::None
        }
        Action::Validate(text) => {
            app.validation = validate(&text);
            debug!("Validation result: {:?}", app.validation.status);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
