//! # TUI Adapter
//!
//! The ratatui-specific layer. It owns the terminal and turns keyboard
//! events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Global keys (quit, view switching) become actions directly. Everything
//! else goes to the active view's component state, which may answer with a
//! higher-level event that the adapter turns into an action.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Pending** (a reply is outstanding): draws every ~80ms so the spinner
//!   and elapsed counter move.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::view::View;
use crate::inference::{CompletionProvider, GeminiProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::dashboard::{DashboardEvent, DashboardState};
use crate::tui::components::validator_view::{ValidatorEvent, ValidatorState};
use crate::tui::components::{
    ComponentViewerState, InputBox, InputEvent, MessageListState, SymbolGalleryState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const PENDING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub prompt: InputBox,
    pub dashboard: DashboardState,
    pub component_viewer: ComponentViewerState,
    pub symbol_gallery: SymbolGalleryState,
    pub validator: ValidatorState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            prompt: InputBox::new("Prompt (Enter to send, Ctrl+J for newline)").placeholder(
                "Describe a circuit (e.g., 'Design an active low-pass filter using an Op-Amp with a cutoff of 1kHz')...",
            ),
            dashboard: DashboardState::default(),
            component_viewer: ComponentViewerState::new(),
            symbol_gallery: SymbolGalleryState::default(),
            validator: ValidatorState::new(),
        }
    }

    /// Refresh component props from core state before routing or drawing.
    pub fn sync_props(&mut self, app: &App) {
        self.prompt.focused = app.view == View::AiDesigner;
        self.prompt.disabled = app.is_loading();
        self.component_viewer.search.focused = app.view == View::Components;
        self.validator.editor.focused = app.view == View::Validator;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The keyboard protocol lets the terminal report Shift+Enter; terminals
        // without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the completion provider from resolved credentials.
///
/// A missing key is not fatal: the hub stays usable offline and each prompt
/// is answered with the provider's configuration error.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn CompletionProvider> {
    if config.gemini_api_key.is_none() {
        warn!("No Gemini API key configured; AI Designer requests will fail");
    }
    Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone(),
        Some(config.gemini_base_url.clone()),
    ))
}

/// Turn one terminal event into at most one action and apply it.
fn dispatch(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    let action = match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::NextView => Some(Action::SwitchView(app.view.next())),
        TuiEvent::PrevView => Some(Action::SwitchView(app.view.prev())),
        TuiEvent::SelectView(index) => View::ALL.get(*index).map(|&v| Action::SwitchView(v)),
        TuiEvent::Resize => None,
        _ => route_to_view(app, tui, event),
    };
    match action {
        Some(action) => update(app, action),
        None => Effect::None,
    }
}

fn route_to_view(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match app.view {
        View::Dashboard => tui
            .dashboard
            .handle_event(event)
            .map(|DashboardEvent::Open(view)| Action::SwitchView(view)),
        View::Components => {
            tui.component_viewer.handle_event(event);
            None
        }
        View::Symbols => {
            tui.symbol_gallery.handle_event(event);
            None
        }
        View::AiDesigner => {
            // Scroll keys belong to the transcript, everything else to the prompt
            if tui.message_list.handle_event(event).is_some() {
                return None;
            }
            match tui.prompt.handle_event(event) {
                Some(InputEvent::Submit(text)) => Some(Action::Submit(text)),
                _ => None,
            }
        }
        View::Validator => tui
            .validator
            .handle_event(event)
            .map(|ValidatorEvent::Validate(text)| Action::Validate(text)),
    }
}

pub fn run(config: ResolvedConfig, initial_view: View) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    update(&mut app, Action::SwitchView(initial_view));
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        tui.sync_props(&app);
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(if animating { PENDING_POLL } else { IDLE_POLL });
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync_props(&app);
            match dispatch(&mut app, &mut tui, &event) {
                Effect::Quit => break 'event_loop,
                Effect::SpawnRequest(prompt) => spawn_request(&app, prompt, tx.clone()),
                Effect::None => {}
            }
        }

        // Replies from background exchanges
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Run one exchange in the background and report the reply as an action.
fn spawn_request(app: &App, prompt: String, tx: mpsc::Sender<Action>) {
    let exchange = app.exchange.clone();
    info!(
        "Spawning exchange via {} (model={})",
        exchange.provider_name(),
        exchange.model()
    );
    tokio::spawn(async move {
        let reply = exchange.send(&prompt).await;
        if tx.send(Action::ResponseReceived(reply)).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::ValidationStatus;
    use crate::test_support::test_app;

    fn send(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
        tui.sync_props(app);
        dispatch(app, tui, &event)
    }

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            send(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_global_keys_switch_views() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, TuiEvent::NextView);
        assert_eq!(app.view, View::Components);
        send(&mut app, &mut tui, TuiEvent::PrevView);
        send(&mut app, &mut tui, TuiEvent::PrevView);
        assert_eq!(app.view, View::Validator);
        send(&mut app, &mut tui, TuiEvent::SelectView(3));
        assert_eq!(app.view, View::AiDesigner);
        // Out of range is ignored
        send(&mut app, &mut tui, TuiEvent::SelectView(9));
        assert_eq!(app.view, View::AiDesigner);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(send(&mut app, &mut tui, TuiEvent::Quit), Effect::Quit);
    }

    #[test]
    fn test_dashboard_card_opens_view() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::CursorRight);
        send(&mut app, &mut tui, TuiEvent::CursorRight);
        send(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.view, View::Validator);
    }

    #[test]
    fn test_prompt_submission_spawns_once() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::SelectView(3));

        type_text(&mut app, &mut tui, "Design a 1kHz filter");
        let effect = send(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(effect, Effect::SpawnRequest("Design a 1kHz filter".into()));
        assert!(app.is_loading());

        // Second prompt is held in the box while the first is pending
        type_text(&mut app, &mut tui, "again");
        assert_eq!(send(&mut app, &mut tui, TuiEvent::Submit), Effect::None);
        assert_eq!(tui.prompt.text(), "again");
        assert_eq!(app.conversation.len(), 2);
    }

    #[test]
    fn test_blank_prompt_never_spawns() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::SelectView(3));
        type_text(&mut app, &mut tui, "   ");
        assert_eq!(send(&mut app, &mut tui, TuiEvent::Submit), Effect::None);
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn test_scroll_keys_do_not_reach_prompt() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::SelectView(3));
        send(&mut app, &mut tui, TuiEvent::ScrollUp);
        assert!(!tui.message_list.stick_to_bottom);
        assert!(tui.prompt.text().is_empty());
    }

    #[test]
    fn test_validator_flow() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::SelectView(4));
        tui.validator.editor.set_text("name: R\ndesignator: R");
        send(&mut app, &mut tui, TuiEvent::Validate);
        assert_eq!(app.validation.status, ValidationStatus::Valid);
    }

    #[test]
    fn test_typing_in_components_filters_search() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        send(&mut app, &mut tui, TuiEvent::SelectView(1));
        type_text(&mut app, &mut tui, "resistor");
        assert_eq!(tui.component_viewer.search.text(), "resistor");
        // The prompt never sees keystrokes meant for another view
        assert!(tui.prompt.text().is_empty());
    }

    #[test]
    fn test_build_provider_without_key() {
        let config = crate::core::config::resolve_with(
            &crate::core::config::LegionConfig::default(),
            None,
            |_| None,
        );
        assert_eq!(build_provider(&config).name(), "gemini");
    }
}
