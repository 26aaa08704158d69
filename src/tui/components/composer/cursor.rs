//! Cursor tracking for the comment composer.
//!
//! The draft text itself lives in the post's `CommentThread`; `CursorState`
//! only stores where the caret sits in it and how far the box has scrolled.
//! Every method takes the draft explicitly.

use std::iter;

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, inner_width, locate,
    next_char_boundary, prev_char_boundary, wrap_line_count,
};
use ratatui::layout::Rect;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CursorState {
    /// Byte offset into the draft (0..=draft.len()), always on a char boundary
    pub pos: usize,
    /// First visible wrapped line (0 while the draft fits in the box)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Put the caret after the last character, e.g. when focusing a form
    /// whose draft was typed earlier.
    pub fn place_at_end(&mut self, draft: &str) {
        self.pos = draft.len();
    }

    /// Pull the caret back inside `draft` if the text shrank underneath it.
    pub fn clamp(&mut self, draft: &str) {
        if self.pos > draft.len() {
            self.pos = draft.len();
        }
        while !draft.is_char_boundary(self.pos) {
            self.pos -= 1;
        }
    }

    pub fn move_left(&mut self, draft: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(draft, self.pos);
        true
    }

    pub fn move_right(&mut self, draft: &str) -> bool {
        if self.pos >= draft.len() {
            return false;
        }
        self.pos = next_char_boundary(draft, self.pos);
        true
    }

    pub fn move_home(&mut self, draft: &str) -> bool {
        let line_start = draft[..self.pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let moved = self.pos != line_start;
        self.pos = line_start;
        moved
    }

    pub fn move_end(&mut self, draft: &str) -> bool {
        let line_end = draft[self.pos..]
            .find('\n')
            .map(|i| self.pos + i)
            .unwrap_or(draft.len());
        let moved = self.pos != line_end;
        self.pos = line_end;
        moved
    }

    /// Move one wrapped line up (`direction < 0`) or down, keeping the column
    /// where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, draft: &str, direction: i16, outer_width: u16) -> bool {
        let width = inner_width(outer_width);
        if width == 0 {
            return false;
        }
        let (col, row) = locate(draft, self.pos, width);
        let target_row = if direction < 0 {
            match row.checked_sub(1) {
                Some(r) => r,
                None => return false,
            }
        } else {
            row + 1
        };

        let offsets = draft
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(draft.len()));

        let mut first_on_row = None;
        let mut best = None;
        for offset in offsets {
            let (c, r) = locate(draft, offset, width);
            if r > target_row {
                break;
            }
            if r == target_row {
                first_on_row.get_or_insert(offset);
                if c <= col {
                    best = Some(offset);
                }
            }
        }

        match best.or(first_on_row) {
            Some(offset) => {
                self.pos = offset;
                true
            }
            None => false,
        }
    }

    /// Keep the caret's line inside the visible window of the box.
    pub fn update_scroll_offset(&mut self, draft: &str, outer_width: u16) {
        let width = inner_width(outer_width);
        let total_lines = wrap_line_count(draft, width);
        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (_, row) = locate(draft, self.pos, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen cell of the caret for a composer box drawn at `area`.
    pub fn screen_pos(&self, draft: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let (col, row) = locate(draft, self.pos, width);
        let visible_row = row.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET_X + col,
            area.y + CONTENT_OFFSET_Y + visible_row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_moves_stop_at_edges() {
        let draft = "ab";
        let mut cursor = CursorState::new();
        assert!(!cursor.move_left(draft));
        assert!(cursor.move_right(draft));
        assert!(cursor.move_right(draft));
        assert!(!cursor.move_right(draft));
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn home_and_end_are_line_relative() {
        let draft = "one\ntwo";
        let mut cursor = CursorState { pos: 5, scroll_offset: 0 };
        assert!(cursor.move_home(draft));
        assert_eq!(cursor.pos, 4);
        assert!(cursor.move_end(draft));
        assert_eq!(cursor.pos, 7);
        assert!(!cursor.move_end(draft));
    }

    #[test]
    fn vertical_moves_keep_column() {
        // Outer width 24 → 20 columns of text, no wrapping here
        let draft = "hello\nhi\nworld";
        let mut cursor = CursorState { pos: 4, scroll_offset: 0 };
        assert!(cursor.move_vertically(draft, 1, 24));
        // "hi" is shorter: clamp to its end
        assert_eq!(cursor.pos, 8);
        assert!(cursor.move_vertically(draft, 1, 24));
        assert_eq!(cursor.pos, 11);
        assert!(!cursor.move_vertically(draft, 1, 24));
        assert!(cursor.move_vertically(draft, -1, 24));
        assert_eq!(cursor.pos, 8);
    }

    #[test]
    fn clamp_after_draft_shrinks() {
        let mut cursor = CursorState { pos: 10, scroll_offset: 0 };
        cursor.clamp("é");
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn scroll_follows_cursor() {
        let draft = "1\n2\n3\n4\n5\n6";
        let mut cursor = CursorState::new();
        cursor.place_at_end(draft);
        cursor.update_scroll_offset(draft, 24);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.reset();
        cursor.update_scroll_offset(draft, 24);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn screen_pos_accounts_for_border_and_padding() {
        let cursor = CursorState { pos: 3, scroll_offset: 0 };
        let area = Rect::new(10, 5, 24, 3);
        assert_eq!(cursor.screen_pos("abc", area), (15, 6));
    }
}
