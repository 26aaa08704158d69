//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `Header`: top bar with the app name and status message
//! - `Sidebar`: profile summary of the signed-in user
//! - `Avatar`: initials tile, optionally bordered
//! - `PostCard`: one post with its form and comments
//! - `CommentCard`: one comment with its like counter
//!
//! ### Stateful Components (Event-Driven)
//!
//! Transient views over persistent state that lives in `TuiState`:
//! - `Composer` / `ComposerState`: caret editing of a post's draft
//! - `FeedView` / `FeedState`: scrolling and selection across posts
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs       (this file)
//! ├── header.rs    (top bar)
//! ├── sidebar.rs   (profile panel)
//! ├── avatar.rs    (initials tile)
//! ├── feed.rs      (scrollable post column)
//! ├── post.rs      (post card + section layout)
//! ├── comment.rs   (comment card)
//! └── composer/    (comment form: caret, wrapping, rendering)
//! ```

pub mod avatar;
pub mod comment;
pub mod composer;
pub mod feed;
pub mod header;
pub mod post;
pub mod sidebar;

pub use composer::{Composer, ComposerEvent, ComposerState};
pub use feed::{FeedState, FeedView};
pub use header::Header;
pub use sidebar::{SIDEBAR_WIDTH, Sidebar};

/// Word-wrap plain text to `width` columns, always yielding at least one line.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.is_empty() { vec![String::new()] } else { lines }
}

/// A line count as a row height, pinned at `u16::MAX`.
pub fn rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Total of row heights, pinned at `u16::MAX`.
pub fn sum_rows<'a>(heights: impl IntoIterator<Item = &'a u16>) -> u16 {
    heights
        .into_iter()
        .fold(0u16, |acc, &height| acc.saturating_add(height))
}

/// Buffer contents as plain text, one row per line.
#[cfg(test)]
pub fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
