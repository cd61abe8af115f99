//! # Sidebar Component
//!
//! Fixed-width navigation column: brand, the five views with the active one
//! highlighted, and a system status footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::view::View;
use crate::tui::component::Component;

/// Columns taken by the sidebar, border included.
pub const SIDEBAR_WIDTH: u16 = 26;

pub struct Sidebar {
    pub active: View,
    /// A request is in flight
    pub busy: bool,
}

impl Sidebar {
    pub fn new(active: View, busy: bool) -> Self {
        Self { active, busy }
    }

    fn nav_lines(&self) -> Vec<Line<'static>> {
        View::ALL
            .iter()
            .map(|&view| {
                let key = format!(" F{} ", view.index() + 1);
                if view == self.active {
                    Line::from(vec![
                        Span::styled("▌", Style::default().fg(Color::Cyan)),
                        Span::styled(key, Style::default().fg(Color::Cyan)),
                        Span::styled(
                            view.label(),
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw(" "),
                        Span::styled(key, Style::default().fg(Color::DarkGray)),
                        Span::styled(view.label(), Style::default().fg(Color::Gray)),
                    ])
                }
            })
            .collect()
    }
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [brand_area, nav_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(inner);

        let brand = Paragraph::new(vec![
            Line::from(Span::styled(
                " ⚡ LEGION",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(" LIBRARY v0.2", Style::default().fg(Color::DarkGray))),
        ]);
        frame.render_widget(brand, brand_area);

        frame.render_widget(Paragraph::new(self.nav_lines()), nav_area);

        let (state, color) = if self.busy {
            ("BUSY", Color::Yellow)
        } else {
            ("ONLINE", Color::Green)
        };
        let status = Paragraph::new(vec![
            Line::from(Span::styled(" SYSTEM STATUS", Style::default().fg(Color::DarkGray))),
            Line::from(vec![
                Span::styled(" ● ", Style::default().fg(color)),
                Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]),
        ]);
        frame.render_widget(status, status_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(sidebar: &mut Sidebar) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(SIDEBAR_WIDTH, 16)).unwrap();
        terminal.draw(|f| sidebar.render(f, f.area())).unwrap();
        terminal
    }

    fn text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_lists_every_view() {
        let terminal = draw(&mut Sidebar::new(View::Dashboard, false));
        let text = text(&terminal);
        for view in View::ALL {
            assert!(text.contains(view.label()), "missing {}", view.label());
        }
        assert!(text.contains("LEGION"));
        assert!(text.contains("ONLINE"));
    }

    #[test]
    fn test_busy_status() {
        let terminal = draw(&mut Sidebar::new(View::AiDesigner, true));
        assert!(text(&terminal).contains("BUSY"));
    }

    #[test]
    fn test_active_view_is_highlighted() {
        let sidebar = Sidebar::new(View::Symbols, false);
        let lines = sidebar.nav_lines();
        let active = &lines[View::Symbols.index()];
        assert_eq!(active.spans[0].content, "▌");
        assert!(active.spans[2].style.add_modifier.contains(Modifier::BOLD));

        let inactive = &lines[View::Dashboard.index()];
        assert_eq!(inactive.spans[0].content, " ");
    }
}
