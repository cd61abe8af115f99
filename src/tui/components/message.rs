use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::schematic::Schematic;
use crate::core::segment::{Segment, segments};
use crate::inference::{Message, Role};
use crate::tui::components::schematic::{SCHEMATIC_HEIGHT, SchematicView};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Blank rows between two rendered segments.
const PART_GAP: u16 = 1;

/// One rendered segment of a message.
#[derive(Debug, Clone)]
pub enum Part {
    /// Styled paragraph; wrapped lines drop leading whitespace.
    Prose(Text<'static>),
    /// Preformatted code; indentation is kept when wrapping.
    Code(Text<'static>),
    Schematic(Schematic),
}

impl Part {
    fn paragraph(&self) -> Option<Paragraph<'static>> {
        match self {
            Part::Prose(text) => Some(Paragraph::new(text.clone()).wrap(Wrap { trim: true })),
            Part::Code(text) => Some(Paragraph::new(text.clone()).wrap(Wrap { trim: false })),
            Part::Schematic(_) => None,
        }
    }

    fn height(&self, width: u16) -> u16 {
        match self.paragraph() {
            Some(paragraph) => paragraph.line_count(width) as u16,
            None => SCHEMATIC_HEIGHT,
        }
    }
}

/// Turn message content into renderable parts, one per segment.
///
/// Only code tagged exactly `svg` is read as a schematic. If it cannot be
/// read, the markup is shown as literal code with a short note.
pub fn parts_of(content: &str, base_fg: Color) -> Vec<Part> {
    segments(content)
        .map(|segment| match segment {
            Segment::Paragraph(text) => Part::Prose(markdown::render_paragraph(text, base_fg)),
            Segment::Code { language, body } if segment.is_trusted_markup() => {
                match Schematic::parse(body) {
                    Ok(schematic) => Part::Schematic(schematic),
                    Err(e) => {
                        debug!("Showing svg segment as code: {e}");
                        let mut text = markdown::render_code(language, body);
                        text.lines.push(Line::from(Span::styled(
                            format!("schematic unavailable: {e}"),
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::ITALIC),
                        )));
                        Part::Code(text)
                    }
                }
            }
            Segment::Code { language, body } => Part::Code(markdown::render_code(language, body)),
        })
        .collect()
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Model => Style::default().fg(Color::Blue),
    }
}

/// A single chat message rendered segment by segment.
///
/// `MessageView` is a **transient component**: it's created fresh each frame
/// from the message it shows. Segments are recomputed from the content every
/// time and never cached on the message.
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub parts: Vec<Part>,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        let base_fg = role_style(message.role).fg.unwrap_or(Color::White);
        Self {
            message,
            parts: parts_of(&message.content, base_fg),
        }
    }

    /// Rows needed to show this message at the given outer width.
    pub fn height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let body: u16 = self.parts.iter().map(|p| p.height(content_width)).sum();
        let gaps = PART_GAP * (self.parts.len().saturating_sub(1) as u16);
        body + gaps + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        format!(
            " {} · {} ",
            self.message.role.label(),
            self.message.created_at.format("%H:%M")
        )
    }
}

impl Widget for MessageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        let bottom = inner.y + inner.height;
        let mut y = inner.y;
        for part in self.parts {
            if y >= bottom {
                break;
            }
            let height = part.height(inner.width).min(bottom - y);
            let rect = Rect::new(inner.x, y, inner.width, height);
            match (&part, part.paragraph()) {
                (Part::Schematic(schematic), _) => {
                    SchematicView::new(schematic, style.fg.unwrap_or(Color::White))
                        .render(rect, buf);
                }
                (_, Some(paragraph)) => paragraph.render(rect, buf),
                (_, None) => {}
            }
            y = y.saturating_add(height + PART_GAP);
        }
    }
}
