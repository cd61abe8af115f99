//! # Validator View
//!
//! Multi-line editor for a component definition, the result of the last
//! check, and the schema the definition is meant to follow.
//!
//! Enter inserts a line break; Ctrl+S asks the core to validate the buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::library::SAMPLE_SCHEMA;
use crate::core::validator::{Validation, ValidationStatus};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::input_box::InputBox;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

const STATUS_HEIGHT: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorEvent {
    Validate(String),
}

pub struct ValidatorState {
    pub editor: InputBox,
}

impl Default for ValidatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorState {
    pub fn new() -> Self {
        Self {
            editor: InputBox::new("Component Definition (Ctrl+S to validate)")
                .placeholder("Paste component definition here...")
                .max_lines(u16::MAX)
                .enter_inserts_newline(),
        }
    }
}

impl EventHandler for ValidatorState {
    type Event = ValidatorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Validate => Some(ValidatorEvent::Validate(self.editor.text().to_string())),
            _ => {
                self.editor.handle_event(event);
                None
            }
        }
    }
}

fn status_lines(validation: &Validation) -> (Color, Vec<Line<'_>>) {
    let (color, heading) = match validation.status {
        ValidationStatus::Idle => (Color::DarkGray, "○ Idle"),
        ValidationStatus::Valid => (Color::Green, "✔ Valid"),
        ValidationStatus::Invalid => (Color::Red, "✘ Invalid"),
    };
    let lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::styled(validation.message.as_str(), Style::default().fg(Color::Gray)),
    ];
    (color, lines)
}

pub struct ValidatorView<'a> {
    pub state: &'a mut ValidatorState,
    pub validation: &'a Validation,
}

impl<'a> ValidatorView<'a> {
    pub fn new(state: &'a mut ValidatorState, validation: &'a Validation) -> Self {
        Self { state, validation }
    }
}

impl Component for ValidatorView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [editor_area, side_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .spacing(1)
                .areas(area);
        self.state.editor.render(frame, editor_area);

        let [status_area, schema_area] =
            Layout::vertical([Constraint::Length(STATUS_HEIGHT), Constraint::Min(0)])
                .areas(side_area);

        let (color, lines) = status_lines(self.validation);
        let status = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .title(" Status ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(status, status_area);

        let schema = Paragraph::new(markdown::render_code("json", SAMPLE_SCHEMA)).block(
            Block::default()
                .title(" ACTIVE SCHEMA REFERENCE ")
                .title_style(Style::default().fg(Color::Gray)),
        );
        frame.render_widget(schema, schema_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::validate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut ValidatorState, validation: &Validation) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| ValidatorView::new(state, validation).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_enter_edits_and_ctrl_s_validates() {
        let mut state = ValidatorState::new();
        for c in "name: R".chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        state.handle_event(&TuiEvent::Paste("designator: R".into()));

        assert_eq!(
            state.handle_event(&TuiEvent::Validate),
            Some(ValidatorEvent::Validate("name: R\ndesignator: R".into()))
        );
    }

    #[test]
    fn test_render_idle_state_and_schema() {
        let mut state = ValidatorState::new();
        let text = draw(&mut state, &Validation::default());
        assert!(text.contains("Ready to validate"));
        assert!(text.contains("ACTIVE SCHEMA REFERENCE"));
        assert!(text.contains("Paste component definition here..."));
    }

    #[test]
    fn test_status_reflects_result() {
        let valid = validate("name: R\ndesignator: R");
        let (color, lines) = status_lines(&valid);
        assert_eq!(color, Color::Green);
        assert_eq!(lines[0].spans[0].content, "✔ Valid");

        let invalid = validate("name: R");
        let (color, lines) = status_lines(&invalid);
        assert_eq!(color, Color::Red);
        let message: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(message.starts_with("Validation Failed"));
    }
}
