//! # Schematic Component
//!
//! Draws a [`Schematic`] on a braille canvas. SVG user space grows downward
//! while the canvas grows upward, so every y coordinate is negated.
//!
//! The drawing keeps the schematic's aspect ratio: a terminal cell is about
//! twice as tall as it is wide, so the used width is twice the height scaled
//! by the view box ratio, centered in the given area.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};

use crate::core::schematic::{Schematic, ViewBox};

/// Terminal rows given to a schematic inside a message.
pub const SCHEMATIC_HEIGHT: u16 = 12;

pub struct SchematicView<'a> {
    pub schematic: &'a Schematic,
    pub color: Color,
}

impl<'a> SchematicView<'a> {
    pub fn new(schematic: &'a Schematic, color: Color) -> Self {
        Self { schematic, color }
    }
}

/// Largest centered sub-area of `area` that keeps the view box proportions.
pub fn fit_area(area: Rect, view_box: &ViewBox) -> Rect {
    if view_box.width <= 0.0 || view_box.height <= 0.0 || area.is_empty() {
        return area;
    }
    let ratio = view_box.width / view_box.height;
    let width = (area.height as f64 * 2.0 * ratio).round() as u16;
    if width <= area.width {
        let x = area.x + (area.width - width) / 2;
        return Rect::new(x, area.y, width.max(1), area.height);
    }
    let height = ((area.width as f64 / ratio) / 2.0).round() as u16;
    let height = height.clamp(1, area.height);
    let y = area.y + (area.height - height) / 2;
    Rect::new(area.x, y, area.width, height)
}

impl Widget for SchematicView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vb = self.schematic.view_box;
        let target = fit_area(area, &vb);
        let color = self.color;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([vb.min_x, vb.min_x + vb.width])
            .y_bounds([-(vb.min_y + vb.height), -vb.min_y])
            .paint(|ctx| {
                for stroke in &self.schematic.strokes {
                    ctx.draw(&CanvasLine::new(
                        stroke.from.x,
                        -stroke.from.y,
                        stroke.to.x,
                        -stroke.to.y,
                        color,
                    ));
                }
                for label in &self.schematic.labels {
                    ctx.print(
                        label.position.x,
                        -label.position.y,
                        Span::styled(label.text.clone(), Style::default().fg(Color::Yellow)),
                    );
                }
            })
            .render(target, buf);
    }
}
