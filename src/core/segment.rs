//! # Content Segmenter
//!
//! Splits the raw text of a message into typed segments so the renderer can
//! treat prose and fenced code differently.
//!
//! ```text
//! "Intro\n```svg\n<svg/>\n```\nOutro"
//!     │
//!     ▼
//! [Paragraph("Intro"), Code { language: "svg", body: "<svg/>" }, Paragraph("Outro")]
//! ```
//!
//! Segments borrow from the content and are recomputed on every render.
//! The iterator is lazy and `Clone`, so a caller can walk it more than once.
//!
//! ## Fence rules
//!
//! - The closing fence is the nearest one after the opening fence, so two
//!   consecutive blocks never merge.
//! - The text between the opening fence and the first newline is the language
//!   tag. The body runs to the closing fence minus one trailing line break.
//! - An unterminated fence turns the rest of the content into a final code
//!   segment.

/// The triple-backtick fence delimiter.
pub const FENCE: &str = "```";

/// Language tag that marks a code segment as drawable SVG markup.
pub const TRUSTED_MARKUP_LANGUAGE: &str = "svg";

/// Discriminant of a [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Paragraph,
    Code,
}

/// One contiguous, typed chunk of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A blank-line delimited block of prose.
    Paragraph(&'a str),
    /// A fenced code block. `language` is empty when the fence had no tag.
    Code { language: &'a str, body: &'a str },
}

impl<'a> Segment<'a> {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Paragraph(_) => SegmentKind::Paragraph,
            Segment::Code { .. } => SegmentKind::Code,
        }
    }

    /// Literal text of the segment. Fence markers are never included.
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Paragraph(text) => text,
            Segment::Code { body, .. } => body,
        }
    }

    /// Language tag, present only for code segments.
    pub fn language(&self) -> Option<&'a str> {
        match self {
            Segment::Paragraph(_) => None,
            Segment::Code { language, .. } => Some(language),
        }
    }

    /// True only for code tagged exactly `svg`. Every other segment is shown
    /// as literal text.
    pub fn is_trusted_markup(&self) -> bool {
        matches!(self, Segment::Code { language, .. } if *language == TRUSTED_MARKUP_LANGUAGE)
    }
}

/// Segment `content` in source order.
pub fn segments(content: &str) -> Segments<'_> {
    Segments {
        rest: content,
        paragraphs: Paragraphs { rest: "" },
        pending_code: None,
    }
}

/// Lazy iterator over the segments of one message.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    /// Unscanned remainder of the content.
    rest: &'a str,
    /// Paragraphs of the prose chunk currently being drained.
    paragraphs: Paragraphs<'a>,
    /// Code block that follows the current prose chunk.
    pending_code: Option<Segment<'a>>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(paragraph) = self.paragraphs.next() {
                return Some(Segment::Paragraph(paragraph));
            }
            if let Some(code) = self.pending_code.take() {
                return Some(code);
            }
            if self.rest.is_empty() {
                return None;
            }

            match self.rest.find(FENCE) {
                None => {
                    self.paragraphs = Paragraphs { rest: self.rest };
                    self.rest = "";
                }
                Some(open) => {
                    let prose = &self.rest[..open];
                    let after_open = &self.rest[open + FENCE.len()..];
                    let inner = match after_open.find(FENCE) {
                        Some(close) => {
                            self.rest = &after_open[close + FENCE.len()..];
                            &after_open[..close]
                        }
                        None => {
                            self.rest = "";
                            after_open
                        }
                    };
                    self.paragraphs = Paragraphs { rest: prose };
                    self.pending_code = Some(parse_fenced(inner));
                }
            }
        }
    }
}

/// Build a code segment from the text between two fences.
fn parse_fenced(inner: &str) -> Segment<'_> {
    match inner.find('\n') {
        Some(newline) => {
            let language = inner[..newline].trim();
            let body = &inner[newline + 1..];
            let body = body.strip_suffix('\n').unwrap_or(body);
            let body = body.strip_suffix('\r').unwrap_or(body);
            Segment::Code { language, body }
        }
        None => Segment::Code {
            language: "",
            body: inner.trim(),
        },
    }
}

/// Splits a prose chunk on blank lines.
#[derive(Debug, Clone)]
struct Paragraphs<'a> {
    rest: &'a str,
}

/// Split off the first line (without its `\n`) and return it with the remainder.
fn split_line(text: &str) -> (&str, &str) {
    match text.find('\n') {
        Some(i) => (&text[..i], &text[i + 1..]),
        None => (text, ""),
    }
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        // Skip blank lines before the paragraph
        loop {
            if self.rest.is_empty() {
                return None;
            }
            let (line, remainder) = split_line(self.rest);
            if !line.trim().is_empty() {
                break;
            }
            self.rest = remainder;
        }

        let start = self.rest;
        let mut cursor = self.rest;
        let mut end = 0;
        while !cursor.is_empty() {
            let (line, remainder) = split_line(cursor);
            if line.trim().is_empty() {
                break;
            }
            end = start.len() - cursor.len() + line.len();
            cursor = remainder;
        }
        self.rest = cursor;

        Some(start[..end].trim_end_matches('\r'))
    }
}
