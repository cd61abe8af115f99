//! # Symbol Gallery
//!
//! Grid of symbol cards, each drawing its asset's markup above the name,
//! category and id. Arrow keys move the highlight; the grid scrolls by rows
//! to keep it visible.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::library::{self, SymbolAsset};
use crate::core::schematic::Schematic;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::schematic::SchematicView;
use crate::tui::event::TuiEvent;

const CARD_WIDTH: u16 = 28;
const CARD_HEIGHT: u16 = 14;
/// Rows below the drawing: name, category, id.
const CAPTION_HEIGHT: u16 = 3;

#[derive(Debug, Default)]
pub struct SymbolGalleryState {
    pub selected: usize,
    /// Columns in the last rendered grid (used for Up/Down)
    columns: usize,
    first_row: usize,
}

impl SymbolGalleryState {
    fn step(&mut self, delta: isize, count: usize) {
        if count == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        if (0..count as isize).contains(&target) {
            self.selected = target as usize;
        }
    }
}

impl EventHandler for SymbolGalleryState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let columns = self.columns.max(1) as isize;
        let delta = match event {
            TuiEvent::CursorLeft => -1,
            TuiEvent::CursorRight => 1,
            TuiEvent::ScrollUp => -columns,
            TuiEvent::ScrollDown => columns,
            _ => return None,
        };
        self.step(delta, library::symbols().len());
        Some(())
    }
}

pub struct SymbolGallery<'a> {
    pub state: &'a mut SymbolGalleryState,
    pub symbols: &'a [SymbolAsset],
}

impl<'a> SymbolGallery<'a> {
    pub fn new(state: &'a mut SymbolGalleryState, symbols: &'a [SymbolAsset]) -> Self {
        Self { state, symbols }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, symbol: &SymbolAsset, selected: bool) {
        let border = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [drawing_area, caption_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(CAPTION_HEIGHT)]).areas(inner);

        match Schematic::parse(&symbol.svg_content) {
            Ok(schematic) => frame.render_widget(
                SchematicView::new(&schematic, Color::Gray),
                drawing_area,
            ),
            Err(e) => frame.render_widget(
                Paragraph::new(format!("unreadable: {e}"))
                    .style(Style::default().fg(Color::Red)),
                drawing_area,
            ),
        }

        let caption = Paragraph::new(vec![
            Line::from(Span::styled(
                symbol.name,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::styled(
                symbol.category.label().to_uppercase(),
                Style::default().fg(Color::Gray),
            ),
            Line::styled(format!("ID: {}", symbol.id), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(caption, caption_area);
    }
}

impl Component for SymbolGallery<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.symbols.is_empty() {
            frame.render_widget(Paragraph::new("No symbols available."), area);
            return;
        }

        let columns = usize::from((area.width / CARD_WIDTH).max(1));
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        self.state.columns = columns;
        self.state.selected = self.state.selected.min(self.symbols.len() - 1);

        let selected_row = self.state.selected / columns;
        if selected_row < self.state.first_row {
            self.state.first_row = selected_row;
        } else if selected_row >= self.state.first_row + visible_rows {
            self.state.first_row = selected_row + 1 - visible_rows;
        }

        let first = self.state.first_row * columns;
        for (offset, symbol) in self
            .symbols
            .iter()
            .enumerate()
            .skip(first)
            .take(columns * visible_rows)
        {
            let slot = offset - first;
            let x = area.x + (slot % columns) as u16 * CARD_WIDTH;
            let y = area.y + (slot / columns) as u16 * CARD_HEIGHT;
            let card = Rect::new(x, y, CARD_WIDTH - 1, CARD_HEIGHT.min(area.bottom() - y))
                .intersection(area);
            self.render_card(frame, card, symbol, offset == self.state.selected);
        }
    }
}
