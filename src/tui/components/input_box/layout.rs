//! Row layout for the InputBox.
//!
//! The buffer is split on `\n`, then each logical line is broken into visual
//! rows by display width. Rows are byte ranges into the buffer, so cursor
//! math never copies text.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to the first content column (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;

/// Byte ranges of the visual rows of `text` at `width` columns.
///
/// Always returns at least one row. A trailing newline yields a trailing
/// empty row so the cursor has somewhere to sit.
pub(super) fn rows(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut used = 0;
        for (i, c) in line.char_indices() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                rows.push(row_start..line_start + i);
                row_start = line_start + i;
                used = 0;
            }
            used += w;
        }
        rows.push(row_start..line_start + line.len());
        line_start += line.len() + 1;
    }

    rows
}

/// Display width of a slice of the buffer.
fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Row index and display column of byte offset `pos`.
///
/// At a soft wrap the offset belongs to the following row, matching where
/// the next typed character will appear.
pub(super) fn locate(rows: &[Range<usize>], text: &str, pos: usize) -> (usize, usize) {
    let row = rows
        .iter()
        .rposition(|r| r.start <= pos)
        .unwrap_or(0);
    let start = rows.get(row).map_or(0, |r| r.start);
    (row, display_width(&text[start..pos]))
}

/// Byte offset in row `row` closest to display column `column`.
pub(super) fn offset_at(rows: &[Range<usize>], text: &str, row: usize, column: usize) -> usize {
    let Some(range) = rows.get(row) else {
        return text.len();
    };
    let mut used = 0;
    for (i, c) in text[range.clone()].char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > column {
            return range.start + i;
        }
        used += w;
    }
    range.end
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}
