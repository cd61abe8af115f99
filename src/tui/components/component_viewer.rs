//! # Component Viewer
//!
//! Searchable list of component records beside a detail pane with the
//! description, the drawn symbol and the YAML definition.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ComponentViewerState` lives in `TuiState`
//! - `ComponentViewer` is created each frame with borrowed state
//!
//! Typing goes to the search box; Up/Down move through the matches. The
//! selection is an index into the current matches and is reset whenever the
//! search text changes.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::library::{self, ElectronicComponent};
use crate::core::schematic::Schematic;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::input_box::{InputBox, InputEvent};
use crate::tui::components::schematic::SchematicView;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

const LIST_WIDTH: u16 = 36;
const SYMBOL_HEIGHT: u16 = 10;

pub struct ComponentViewerState {
    pub search: InputBox,
    pub list_state: ListState,
}

impl Default for ComponentViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentViewerState {
    pub fn new() -> Self {
        Self {
            search: InputBox::new("Search")
                .placeholder("Search components...")
                .max_lines(1),
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// Records matching the current search text.
    pub fn matches(&self) -> Vec<&'static ElectronicComponent> {
        library::search(self.search.text())
    }

    /// The highlighted record, if any record matches.
    pub fn selected(&self) -> Option<&'static ElectronicComponent> {
        let matches = self.matches();
        let index = self.list_state.selected().unwrap_or(0);
        matches.get(index).copied()
    }
}

impl EventHandler for ComponentViewerState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let count = self.matches().len();
        match event {
            TuiEvent::ScrollUp => {
                let index = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some(index.saturating_sub(1)));
                Some(())
            }
            TuiEvent::ScrollDown => {
                let index = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some((index + 1).min(count.saturating_sub(1))));
                Some(())
            }
            _ => match self.search.handle_event(event) {
                Some(InputEvent::ContentChanged) => {
                    self.list_state.select(Some(0));
                    Some(())
                }
                _ => None,
            },
        }
    }
}

/// Symbol of a component, read from its library asset.
fn symbol_of(component: &ElectronicComponent) -> Option<Schematic> {
    component.symbol_path?;
    let id = format!("sym_{}", component.id);
    let asset = library::symbols().iter().find(|s| s.id == id)?;
    match Schematic::parse(&asset.svg_content) {
        Ok(schematic) => Some(schematic),
        Err(e) => {
            log::warn!("Symbol {id} could not be read: {e}");
            None
        }
    }
}

pub struct ComponentViewer<'a> {
    pub state: &'a mut ComponentViewerState,
}

impl<'a> ComponentViewer<'a> {
    pub fn new(state: &'a mut ComponentViewerState) -> Self {
        Self { state }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        self.state.search.render(frame, search_area);

        let matches = self.state.matches();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} results ", matches.len()));

        if matches.is_empty() {
            let empty = Paragraph::new("No components match.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, list_area);
            return;
        }

        let items: Vec<ListItem> = matches
            .iter()
            .map(|component| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        component.name,
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", component.category),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Rgb(30, 41, 59)))
            .highlight_symbol("▌");
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));

        let Some(component) = self.state.selected() else {
            let empty = Paragraph::new("Select a component to view details")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block.title(format!(" {} ", component.id)), area);

        let description = Paragraph::new(vec![
            Line::from(Span::styled(
                component.name,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::styled(component.description, Style::default().fg(Color::Gray)),
        ])
        .wrap(Wrap { trim: true });
        let description_height = description.line_count(inner.width) as u16;

        let [description_area, symbol_title, symbol_area, yaml_title, yaml_area] =
            Layout::vertical([
                Constraint::Length(description_height),
                Constraint::Length(2),
                Constraint::Length(SYMBOL_HEIGHT),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .areas(inner);

        frame.render_widget(description, description_area);
        frame.render_widget(section_title("SYMBOL VISUALIZATION", Color::Cyan), symbol_title);
        match symbol_of(component) {
            Some(schematic) => {
                frame.render_widget(SchematicView::new(&schematic, Color::Gray), symbol_area)
            }
            None => frame.render_widget(
                Paragraph::new("No symbol data available")
                    .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                    .alignment(Alignment::Center),
                symbol_area,
            ),
        }
        frame.render_widget(section_title("YAML DEFINITION", Color::Magenta), yaml_title);
        frame.render_widget(
            Paragraph::new(markdown::render_code("yaml", component.yaml_definition)),
            yaml_area,
        );
    }
}

fn section_title(text: &'static str, accent: Color) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::default(),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(accent)),
            Span::styled(text, Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        ]),
    ])
}

impl Component for ComponentViewer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Length(LIST_WIDTH), Constraint::Min(0)])
                .spacing(1)
                .areas(area);
        self.render_list(frame, list_area);
        self.render_detail(frame, detail_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(state: &mut ComponentViewerState, text: &str) {
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn draw(state: &mut ComponentViewerState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        terminal
            .draw(|f| ComponentViewer::new(state).render(f, f.area()))
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
    fn test_search_filters_and_resets_selection() {
        let mut state = ComponentViewerState::new();
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.list_state.selected(), Some(1));

        type_text(&mut state, "SEMI");
        assert_eq!(state.list_state.selected(), Some(0));
        let names: Vec<_> = state.matches().iter().map(|c| c.name).collect();
        assert!(!names.is_empty());
        assert!(state.matches().iter().all(|c| c.category.label() == "Semiconductor"));
    }

    #[test]
    fn test_selection_stops_at_last_match() {
        let mut state = ComponentViewerState::new();
        for _ in 0..10 {
            state.handle_event(&TuiEvent::ScrollDown);
        }
        assert_eq!(state.list_state.selected(), Some(library::components().len() - 1));
    }

    #[test]
    fn test_no_match_has_no_selection() {
        let mut state = ComponentViewerState::new();
        type_text(&mut state, "flux capacitor");
        assert!(state.selected().is_none());
        assert!(draw(&mut state).contains("No components match."));
    }

    #[test]
    fn test_symbol_found_for_every_record_with_path() {
        for component in library::components() {
            assert_eq!(symbol_of(component).is_some(), component.symbol_path.is_some());
        }
    }

    #[test]
    fn test_render_detail_shows_yaml_and_description() {
        let mut state = ComponentViewerState::new();
        let first = &library::components()[0];
        let text = draw(&mut state);

        assert!(text.contains(first.name));
        assert!(text.contains("YAML DEFINITION"));
        assert!(text.contains("designator"));
    }
}
