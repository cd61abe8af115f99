//! Segment → ratatui `Text` renderer.
//!
//! Paragraph segments go through `pulldown_cmark` for inline styling (bold,
//! italic, inline code, links, headings, lists, blockquotes). Code segments
//! never reach the markdown parser; they are drawn as a bordered block, with
//! syntect highlighting when the language tag is known.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";

/// Render one paragraph segment with inline markdown styling.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render_paragraph(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.text
}

/// Render a code segment as literal, optionally highlighted, preformatted text.
pub fn render_code(language: &str, body: &str) -> Text<'static> {
    Text::from(code_lines(language, body))
}

/// Bordered code block: `╭── lang`, `│ ` prefixed body lines, `╰──`.
fn code_lines(language: &str, body: &str) -> Vec<Line<'static>> {
    let bs = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    lines.push(if language.is_empty() {
        Line::from(Span::styled("╭──", bs))
    } else {
        Line::from(vec![
            Span::styled("╭── ", bs),
            Span::styled(language.to_owned(), bs.add_modifier(Modifier::BOLD)),
            Span::styled(" ──", bs),
        ])
    });

    // Expand tabs → 4 spaces (ratatui renders \t as zero-width)
    let body = body.replace('\t', "    ");
    let highlighted = highlight(language, &body);
    let body_lines = highlighted.unwrap_or_else(|| {
        let code_style = Style::default().fg(Color::White);
        body.lines()
            .map(|line| vec![Span::styled(line.to_owned(), code_style)])
            .collect()
    });
    for spans in body_lines {
        let mut line = Line::from(Span::styled("│ ", bs));
        line.spans.extend(spans);
        lines.push(line);
    }

    lines.push(Line::from(Span::styled("╰──", bs)));
    lines
}

/// Syntax-highlight `body` line by line. `None` when the language is unknown.
fn highlight(language: &str, body: &str) -> Option<Vec<Vec<Span<'static>>>> {
    if language.is_empty() {
        return None;
    }
    let syntax = SYNTAX_SET.find_syntax_by_token(language)?;
    let theme = THEME_SET.themes.get(CODE_THEME)?;
    let mut hl = HighlightLines::new(syntax, theme);

    let mut out = Vec::new();
    for line in LinesWithEndings::from(body) {
        let ranges = hl.highlight_line(line, &SYNTAX_SET).ok()?;
        let spans = ranges
            .into_iter()
            .filter_map(|(hl_style, frag)| {
                let content = frag.trim_end_matches(['\n', '\r']);
                if content.is_empty() {
                    return None;
                }
                let fg = Color::Rgb(
                    hl_style.foreground.r,
                    hl_style.foreground.g,
                    hl_style.foreground.b,
                );
                Some(Span::styled(content.to_owned(), Style::default().fg(fg)))
            })
            .collect();
        out.push(spans);
    }
    Some(out)
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack (bold, italic, heading text, etc.). Styles compose
    /// via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Indented code inside prose: language and collected body.
    code: Option<(String, String)>,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            code: None,
            link_url: None,
            needs_newline: false,
        }
    }

    /// Current effective style: top of stack, or base foreground color.
    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(Span::raw(marker));
            }
            // Inline HTML is shown as typed, never interpreted
            Event::Html(raw) | Event::InlineHtml(raw) => {
                let style = self.style();
                self.push_span(Span::styled(raw.to_string(), style));
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                self.push_line(Line::from(Span::styled(
                    format!("{} ", "#".repeat(level as usize)),
                    hs,
                )));
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => {
                self.blank_line_if_needed();
                let lang = match kind {
                    CodeBlockKind::Fenced(l) => l.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // Tables, images, definitions
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                if let Some((lang, body)) = self.code.take() {
                    let body = body.strip_suffix('\n').unwrap_or(&body);
                    for line in code_lines(&lang, body) {
                        self.push_line(line);
                    }
                }
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        if let Some((_, body)) = self.code.as_mut() {
            body.push_str(&cow);
            return;
        }

        let raw = cow.to_string();
        let text = if raw.contains('\t') {
            raw.replace('\t', "    ")
        } else {
            raw
        };

        // Normal text inherits current style (heading, bold, etc.)
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(base_fg).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn heading_text_inherits_heading_style() {
        let text = render_paragraph("## Hello", Color::Blue);
        let line = &text.lines[0];
        assert!(line.spans.len() >= 2, "expected >= 2 spans, got {:?}", line);
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line.spans[1].style.fg, Some(Color::Blue));
    }

    #[test]
    fn bold_text_is_bold() {
        let text = render_paragraph("Some **bold** text", Color::Blue);
        let bold_span = text.lines[0].spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled() {
        let text = render_paragraph("Use `foo()` here", Color::Blue);
        let code_span = text.lines[0].spans.iter().find(|s| s.content == "foo()").unwrap();
        assert_eq!(code_span.style.fg, Some(Color::White));
        assert_eq!(code_span.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render_paragraph("hello", Color::Green);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn inline_markup_is_shown_literally() {
        let text = render_paragraph("Draw <svg onload=x> here", Color::Green);
        assert_eq!(plain(&text).concat(), "Draw <svg onload=x> here");
    }

    #[test]
    fn code_block_has_border_structure() {
        let text = render_code("", "line1\nline2");
        let all = plain(&text);
        assert_eq!(all.len(), 4);
        assert!(all[0].starts_with('╭'), "expected top border, got {:?}", all[0]);
        assert_eq!(all[1], "│ line1");
        assert_eq!(all[2], "│ line2");
        assert!(all[3].starts_with('╰'), "expected bottom border, got {:?}", all[3]);
    }

    #[test]
    fn known_language_is_highlighted() {
        let text = render_code("yaml", "name: Resistor\ndesignator: R");
        let all = plain(&text);
        assert!(all[0].contains("yaml"));
        assert_eq!(all[1], "│ name: Resistor");
        let colored = text.lines[1]
            .spans
            .iter()
            .skip(1)
            .any(|s| matches!(s.style.fg, Some(Color::Rgb(..))));
        assert!(colored, "yaml body should carry highlight colors");
    }

    #[test]
    fn unknown_language_is_plain() {
        let text = render_code("netlist-ish", "R1 1 2 10k");
        assert_eq!(text.lines[1].spans[1].style.fg, Some(Color::White));
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render_code("", "\tindented");
        let all = plain(&text);
        assert_eq!(all[1], "│     indented");
    }
}
