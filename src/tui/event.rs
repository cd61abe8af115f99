use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global
    Quit,
    NextView,
    PrevView,
    SelectView(usize),

    // Forwarded to the focused view
    Submit,
    NewLine,
    Validate,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // Ctrl+End - also re-enables stick-to-bottom
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Terminal poll failed: {e}");
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Mouse(mouse_event)) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Ok(Event::Paste(data)) => Some(TuiEvent::Paste(data)),
        Ok(Event::Resize(..)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Terminal read failed: {e}");
            None
        }
    }
}

/// Translate one key press into a TUI event.
///
/// Releases are dropped: with keyboard enhancement enabled the terminal
/// reports them too, and acting on both would double every keystroke.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::trace!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
        (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::NewLine),
        (KeyModifiers::SHIFT, KeyCode::Enter) => Some(TuiEvent::NewLine),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::Validate),
        (KeyModifiers::CONTROL, KeyCode::End) => Some(TuiEvent::ScrollToBottom),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Tab) => Some(TuiEvent::NextView),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevView),
        (_, KeyCode::F(n @ 1..=5)) => Some(TuiEvent::SelectView(usize::from(n) - 1)),
        (modifiers, KeyCode::Char(c))
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(TuiEvent::InputChar(c))
        }
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
        (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(modifiers: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_and_shifted_chars_are_input() {
        assert_eq!(
            map_key(press(KeyModifiers::NONE, KeyCode::Char('a'))),
            Some(TuiEvent::InputChar('a'))
        );
        assert_eq!(
            map_key(press(KeyModifiers::SHIFT, KeyCode::Char('A'))),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(map_key(press(KeyModifiers::CONTROL, KeyCode::Char('c'))), Some(TuiEvent::Quit));
        assert_eq!(map_key(press(KeyModifiers::CONTROL, KeyCode::Char('j'))), Some(TuiEvent::NewLine));
        assert_eq!(map_key(press(KeyModifiers::CONTROL, KeyCode::Char('s'))), Some(TuiEvent::Validate));
        // Unbound control chords never leak into the buffer
        assert_eq!(map_key(press(KeyModifiers::CONTROL, KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_view_navigation_keys() {
        assert_eq!(map_key(press(KeyModifiers::NONE, KeyCode::Tab)), Some(TuiEvent::NextView));
        assert_eq!(map_key(press(KeyModifiers::SHIFT, KeyCode::BackTab)), Some(TuiEvent::PrevView));
        assert_eq!(map_key(press(KeyModifiers::NONE, KeyCode::F(1))), Some(TuiEvent::SelectView(0)));
        assert_eq!(map_key(press(KeyModifiers::NONE, KeyCode::F(5))), Some(TuiEvent::SelectView(4)));
        assert_eq!(map_key(press(KeyModifiers::NONE, KeyCode::F(6))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
    }
}
