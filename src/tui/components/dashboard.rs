//! # Dashboard Component
//!
//! Three quick-action cards and a welcome panel. Left/Right (or Up/Down)
//! moves the selection, Enter opens the selected card's view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::view::View;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const CARD_HEIGHT: u16 = 7;
const WELCOME_TITLE: &str = "Welcome to Electronic Legion Hub";
const WELCOME_BODY: &str = "This system serves as the structured backend reference for \
AI-assisted circuit generation. All symbols and components are validated for machine readability.";

struct Card {
    title: &'static str,
    description: &'static str,
    target: View,
    accent: Color,
}

const CARDS: [Card; 3] = [
    Card {
        title: "Component Library",
        description: "Manage definitions for resistors, capacitors, and ICs.",
        target: View::Components,
        accent: Color::Cyan,
    },
    Card {
        title: "AI Circuit Designer",
        description: "Generate netlists and schematics using Gemini 3.0.",
        target: View::AiDesigner,
        accent: Color::Magenta,
    },
    Card {
        title: "Schema Validator",
        description: "Verify component definitions against strict JSON schemas.",
        target: View::Validator,
        accent: Color::Green,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    Open(View),
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub selected: usize,
}

impl EventHandler for DashboardState {
    type Event = DashboardEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorLeft | TuiEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight | TuiEvent::ScrollDown => {
                self.selected = (self.selected + 1).min(CARDS.len() - 1);
                None
            }
            TuiEvent::Submit => CARDS.get(self.selected).map(|c| DashboardEvent::Open(c.target)),
            _ => None,
        }
    }
}

pub struct Dashboard<'a> {
    pub state: &'a DashboardState,
    /// Live number of component records
    pub component_count: usize,
}

impl<'a> Dashboard<'a> {
    pub fn new(state: &'a DashboardState, component_count: usize) -> Self {
        Self {
            state,
            component_count,
        }
    }

    fn badge(&self, card: &Card) -> String {
        match card.target {
            View::Components => format!("{} ITEMS", self.component_count),
            View::AiDesigner => String::from("BETA"),
            _ => String::new(),
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, index: usize) {
        let card = &CARDS[index];
        let selected = index == self.state.selected;
        let border = if selected {
            Style::default().fg(card.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(if selected { BorderType::Thick } else { BorderType::Rounded })
            .border_style(border)
            .title_top(Line::from(self.badge(card)).right_aligned())
            .padding(Padding::horizontal(1));

        // Pre-wrap so the hint row stays pinned at the bottom of the card
        let inner_width = block.inner(area).width.max(1) as usize;
        let mut lines = vec![Line::from(Span::styled(
            card.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(
            textwrap::wrap(card.description, inner_width)
                .into_iter()
                .take(usize::from(CARD_HEIGHT.saturating_sub(4)))
                .map(|l| Line::styled(l.into_owned(), Style::default().fg(Color::Gray))),
        );
        if selected {
            lines.push(Line::styled("⏎ open", Style::default().fg(card.accent)));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for Dashboard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [cards_area, _, welcome_area] = Layout::vertical([
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3])
            .spacing(1)
            .split(cards_area);
        for (index, column) in columns.iter().enumerate() {
            self.render_card(frame, *column, index);
        }

        let welcome = Paragraph::new(vec![
            Line::from(Span::styled(
                WELCOME_TITLE,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::styled(WELCOME_BODY, Style::default().fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::uniform(1)),
        );
        frame.render_widget(welcome, welcome_area);
    }
}
