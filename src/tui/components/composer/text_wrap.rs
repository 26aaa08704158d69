//! Wrapping helpers and box geometry for the comment composer.
//!
//! The composer draws pre-wrapped lines instead of letting `Paragraph` wrap,
//! so the line count used for layout is exactly what ends up on screen.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

/// Border (1) + padding (1) on each side.
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders.
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the box starts scrolling internally.
pub(super) const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from the box's top-left corner to the first content cell.
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Usable text width inside a box of the given outer width.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` into display lines. A trailing newline yields a trailing
/// empty line so the cursor has somewhere to sit.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<Cow<'_, str>> {
    if width == 0 || text.is_empty() {
        return vec![Cow::Borrowed("")];
    }
    let mut lines = textwrap::wrap(text, wrap_options(width));
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(Cow::Borrowed(""));
    }
    if lines.is_empty() {
        lines.push(Cow::Borrowed(""));
    }
    lines
}

pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    u16::try_from(wrapped_lines(text, width).len()).unwrap_or(u16::MAX)
}

/// Display column and wrapped row of byte offset `pos` within `text`.
pub(super) fn locate(text: &str, pos: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let before = &text[..pos];
    let row = u16::try_from(wrapped_lines(before, width).len().saturating_sub(1))
        .unwrap_or(u16::MAX);

    // textwrap trims trailing spaces, so add them back onto the last
    // wrapped segment of the cursor's logical line.
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let logical = &before[line_start..];
    let trailing_spaces = logical.len() - logical.trim_end_matches(' ').len();
    let last_segment = wrapped_lines(logical, width)
        .last()
        .map(|seg| seg.width())
        .unwrap_or(0);
    let col = (last_segment + trailing_spaces) as u16;
    (col.min(width), row)
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
