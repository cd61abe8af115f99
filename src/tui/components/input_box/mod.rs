//! # InputBox Component
//!
//! Editable text field shared by the AI Designer prompt, the component search
//! and the schema editor.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter), unless the field treats Enter as a newline
//! - Keep the cursor row visible when content outgrows the field
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `focused` and `disabled` are
//! props the parent refreshes before each render.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{CONTENT_OFFSET_X, HORIZONTAL_OVERHEAD, VERTICAL_OVERHEAD};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed); the buffer is cleared
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// First visible row when content exceeds the field
    scroll_offset: usize,
    /// Content width from the last render (used for vertical movement)
    last_width: u16,
    title: &'static str,
    placeholder: &'static str,
    max_lines: u16,
    enter_inserts_newline: bool,
    /// Whether keystrokes are routed here (Prop)
    pub focused: bool,
    /// Submission blocked, e.g. while a reply is pending (Prop)
    pub disabled: bool,
}

impl InputBox {
    pub fn new(title: &'static str) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            last_width: 80,
            title,
            placeholder: "",
            max_lines: 5,
            enter_inserts_newline: false,
            focused: true,
            disabled: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Most rows the field grows to before scrolling internally.
    pub fn max_lines(mut self, max_lines: u16) -> Self {
        self.max_lines = max_lines.max(1);
        self
    }

    /// Treat Enter as a line break. The field then never emits `Submit`.
    pub fn enter_inserts_newline(mut self) -> Self {
        self.enter_inserts_newline = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
        self.scroll_offset = 0;
    }

    fn single_line(&self) -> bool {
        self.max_lines == 1
    }

    /// Required height for the current buffer, clamped to `max_lines` rows.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let rows = layout::rows(&self.buffer, width.saturating_sub(HORIZONTAL_OVERHEAD));
        (rows.len() as u16).clamp(1, self.max_lines) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        if text.is_empty() {
            return None;
        }
        let text = if self.single_line() {
            text.replace(['\n', '\r'], " ")
        } else {
            text.replace("\r\n", "\n")
        };
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (pos != self.cursor).then(|| {
            self.cursor = pos;
            InputEvent::ContentChanged
        })
    }

    fn move_vertically(&mut self, down: bool) -> Option<InputEvent> {
        let rows = layout::rows(&self.buffer, self.last_width);
        let (row, column) = layout::locate(&rows, &self.buffer, self.cursor);
        let target = if down {
            (row + 1 < rows.len()).then_some(row + 1)?
        } else {
            row.checked_sub(1)?
        };
        self.move_to(layout::offset_at(&rows, &self.buffer, target, column))
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.last_width = width;
        let rows = layout::rows(&self.buffer, width);
        let visible = usize::from(area.height.saturating_sub(VERTICAL_OVERHEAD).max(1));
        let (cursor_row, cursor_col) = layout::locate(&rows, &self.buffer, self.cursor);

        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + visible {
            self.scroll_offset = cursor_row + 1 - visible;
        }

        let lines: Vec<Line> = if self.buffer.is_empty() {
            vec![Line::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )]
        } else {
            rows.iter()
                .skip(self.scroll_offset)
                .take(visible)
                .map(|r| Line::raw(&self.buffer[r.clone()]))
                .collect()
        };

        let border = if self.focused && !self.disabled {
            Color::Green
        } else {
            Color::DarkGray
        };
        let title = if self.disabled {
            format!("{} (waiting for reply)", self.title)
        } else {
            self.title.to_string()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .padding(Padding::horizontal(1))
            .title(title);

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if self.focused && !self.disabled {
            let row = (cursor_row - self.scroll_offset) as u16;
            let x = (area.x + CONTENT_OFFSET_X + cursor_col as u16)
                .min(area.right().saturating_sub(2));
            frame.set_cursor_position((x, area.y + 1 + row));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(&c.to_string()),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::NewLine if !self.single_line() => self.insert("\n"),
            TuiEvent::Submit if self.enter_inserts_newline => self.insert("\n"),
            TuiEvent::Submit => {
                if self.disabled || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = layout::prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = layout::next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.move_to(layout::prev_char_boundary(&self.buffer, self.cursor))
            }
            TuiEvent::CursorRight => {
                self.move_to(layout::next_char_boundary(&self.buffer, self.cursor))
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor + i);
                self.move_to(line_end)
            }
            TuiEvent::ScrollUp if !self.single_line() => self.move_vertically(false),
            TuiEvent::ScrollDown if !self.single_line() => self.move_vertically(true),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new("Prompt");

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        type_text(&mut input, "bΩ");
        assert_eq!(input.text(), "abΩ");

        assert_eq!(input.handle_event(&TuiEvent::Backspace), Some(InputEvent::ContentChanged));
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = InputBox::new("Prompt");
        type_text(&mut input, "hello");

        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit event, got {other:?}"),
        }
        assert!(input.text().is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_blank_submit_keeps_buffer() {
        let mut input = InputBox::new("Prompt");
        type_text(&mut input, "   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.text(), "   ");
    }

    #[test]
    fn test_disabled_blocks_submit_but_keeps_text() {
        let mut input = InputBox::new("Prompt");
        type_text(&mut input, "second question");
        input.disabled = true;
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.text(), "second question");
    }

    #[test]
    fn test_enter_inserts_newline_in_editor_mode() {
        let mut input = InputBox::new("Schema").enter_inserts_newline();
        type_text(&mut input, "name: R");
        assert_eq!(input.handle_event(&TuiEvent::Submit), Some(InputEvent::ContentChanged));
        type_text(&mut input, "designator: R");
        assert_eq!(input.text(), "name: R\ndesignator: R");
    }

    #[test]
    fn test_single_line_flattens_paste() {
        let mut input = InputBox::new("Search").max_lines(1);
        input.handle_event(&TuiEvent::Paste("res\nistor".into()));
        assert_eq!(input.text(), "res istor");
        assert_eq!(input.handle_event(&TuiEvent::NewLine), None);
    }

    #[test]
    fn test_cursor_editing_mid_buffer() {
        let mut input = InputBox::new("Prompt");
        type_text(&mut input, "ac");
        input.handle_event(&TuiEvent::CursorLeft);
        type_text(&mut input, "b");
        assert_eq!(input.text(), "abc");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.text(), "bc");

        assert_eq!(input.handle_event(&TuiEvent::CursorEnd), Some(InputEvent::ContentChanged));
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut input = InputBox::new("Schema").enter_inserts_newline();
        input.set_text("abcd\nxy");
        assert_eq!(input.handle_event(&TuiEvent::ScrollUp), Some(InputEvent::ContentChanged));
        type_text(&mut input, "!");
        assert_eq!(input.text(), "ab!cd\nxy");
        // Already on the first row
        input.handle_event(&TuiEvent::CursorHome);
        assert_eq!(input.handle_event(&TuiEvent::ScrollUp), None);
    }

    #[test]
    fn test_height_grows_then_clamps() {
        let mut input = InputBox::new("Prompt").max_lines(3);
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);
        input.set_text("a\nb");
        assert_eq!(input.calculate_height(40), 2 + VERTICAL_OVERHEAD);
        input.set_text("a\nb\nc\nd\ne");
        assert_eq!(input.calculate_height(40), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_title_and_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut input = InputBox::new("Describe a circuit").placeholder("e.g. 555 timer");

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Describe a circuit"));
        assert!(text.contains("e.g. 555 timer"));
    }

    #[test]
    fn test_render_scrolls_to_cursor_row() {
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        let mut input = InputBox::new("Schema").enter_inserts_newline();
        input.set_text("one\ntwo\nthree");

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("three"));
        assert!(!text.contains("one"));
    }
}
