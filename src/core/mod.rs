//! # Core Application Logic
//!
//! This module contains Legion's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Library + validator  │
//!                    │  • Segment + schematic  │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │ Inference  │
//!            │  Adapter   │            │ (Gemini)   │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`segment`]: Splits message text into paragraphs and fenced code
//! - [`schematic`]: Reads trusted SVG markup into drawable strokes
//! - [`library`]: The mock component and symbol records
//! - [`validator`]: The mock component definition check

pub mod action;
pub mod config;
pub mod library;
pub mod schematic;
pub mod segment;
pub mod state;
pub mod validator;
pub mod view;
