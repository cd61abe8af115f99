//! # Header Component
//!
//! Two-row banner above the active view.
//!
//! ## Responsibilities
//!
//! - Show the active view's title and subtitle
//! - Show the configured model name and the current status message
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! Header is purely presentational. It receives all data as props and has no
//! internal state:
//!
//! ```rust,ignore
//! let mut header = Header::new(app.view, &app.model_name, &app.status_message, app.is_loading());
//! header.render(frame, area);
//! ```
//!
//! ### Conditional Formatting
//!
//! The right-hand side shrinks with the terminal:
//!
//! 1. **Wide**: `"gemini-3-flash-preview · Generating..."`
//! 2. **Narrow**: the status alone, so the title is never overwritten

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::view::View;
use crate::tui::component::Component;

pub struct Header<'a> {
    pub view: View,
    pub model_name: &'a str,
    pub status_message: &'a str,
    /// A request is in flight; the status is highlighted
    pub busy: bool,
}

impl<'a> Header<'a> {
    pub fn new(view: View, model_name: &'a str, status_message: &'a str, busy: bool) -> Self {
        Self {
            view,
            model_name,
            status_message,
            busy,
        }
    }

    fn status_line(&self, width: u16) -> Line<'a> {
        let status_style = if self.busy {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let full_len = self.model_name.chars().count() + self.status_message.chars().count() + 3;
        if full_len <= usize::from(width) {
            Line::from(vec![
                Span::styled(self.model_name, Style::default().fg(Color::DarkGray)),
                Span::styled(" · ", Style::default().fg(Color::DarkGray)),
                Span::styled(self.status_message, status_style),
            ])
        } else {
            Line::from(Span::styled(self.status_message, status_style))
        }
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, status_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Percentage(40)]).areas(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                self.view.title(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.view.subtitle(),
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(title, title_area);

        let status = Paragraph::new(self.status_line(status_area.width)).alignment(Alignment::Right);
        frame.render_widget(status, status_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(width: u16, header: &mut Header) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 2)).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_view_title_and_status() {
        let mut header = Header::new(View::Components, "gemini-test", "Ready", false);
        let text = draw(120, &mut header);

        assert!(text.contains(View::Components.title()));
        assert!(text.contains(View::Components.subtitle()));
        assert!(text.contains("gemini-test"));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_header_narrow_drops_model_name() {
        let mut header = Header::new(View::Dashboard, "a-very-long-model-name", "Generating...", true);
        let text = draw(40, &mut header);

        assert!(text.contains("Generating..."));
        assert!(!text.contains("a-very-long-model-name"));
    }

    #[test]
    fn test_busy_status_is_highlighted() {
        let header = Header::new(View::AiDesigner, "m", "Generating...", true);
        let line = header.status_line(80);
        let status = line.spans.last().unwrap();
        assert_eq!(status.style.fg, Some(Color::Yellow));
    }
}
