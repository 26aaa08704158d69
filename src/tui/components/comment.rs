use chrono::NaiveDateTime;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::comments::Comment;
use crate::core::datefmt::format_relative;
use crate::tui::components::avatar::{AVATAR_HEIGHT, AVATAR_WIDTH, Avatar};
use crate::tui::components::{rows, wrap_text};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Borders (1 left + 1 right) and padding.
const BOX_HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Avatar column plus the gap after it.
const AVATAR_COLUMN: u16 = AVATAR_WIDTH + 1;
/// Top + bottom borders plus the like footer line.
const VERTICAL_OVERHEAD: u16 = 3;

pub const DELETE_LABEL: &str = " ✖ Deletar ";
pub const LIKE_LABEL: &str = "▲ Aplaudir";

/// A single comment: avatar, author and time in the frame, the text, and
/// the like counter.
///
/// # Design
///
/// `CommentCard` is a **transient component**: it's created fresh each frame
/// from the comment it shows and never mutates it. Delete and like are
/// keyboard actions on the selected card, dispatched by the event loop as
/// `Action::DeleteComment` / `Action::LikeComment`.
#[derive(Clone, Copy)]
pub struct CommentCard<'a> {
    pub comment: &'a Comment,
    /// Rendering instant, for the relative time label
    pub now: NaiveDateTime,
    /// Whether this card is the target of like/delete keys
    pub is_selected: bool,
}

impl<'a> CommentCard<'a> {
    pub fn new(comment: &'a Comment, now: NaiveDateTime, is_selected: bool) -> Self {
        Self {
            comment,
            now,
            is_selected,
        }
    }

    fn text_width(width: u16) -> u16 {
        width
            .saturating_sub(AVATAR_COLUMN)
            .saturating_sub(BOX_HORIZONTAL_OVERHEAD)
    }

    /// Height of the card for a given total width, without rendering it.
    pub fn calculate_height(comment: &Comment, width: u16) -> u16 {
        let text_width = Self::text_width(width);
        if text_width == 0 {
            // Too narrow for borders; still occupy the avatar's rows.
            return AVATAR_HEIGHT;
        }
        rows(wrap_text(&comment.text, text_width).len())
            .saturating_add(VERTICAL_OVERHEAD)
            .max(AVATAR_HEIGHT)
    }
}

impl Widget for CommentCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let avatar_area = Rect::new(area.x, area.y, AVATAR_WIDTH.min(area.width), AVATAR_HEIGHT.min(area.height));
        Avatar::new(&self.comment.author.avatar_url, &self.comment.author.name)
            .without_border()
            .render(avatar_area, buf);

        let box_area = Rect {
            x: area.x + AVATAR_COLUMN.min(area.width),
            width: area.width.saturating_sub(AVATAR_COLUMN),
            ..area
        };
        if box_area.width == 0 {
            return;
        }

        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let heading = Line::from(vec![
            Span::styled(
                format!(" {} ", self.comment.author.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", format_relative(self.comment.created_at, self.now)),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let delete = Line::from(Span::styled(DELETE_LABEL, border_style)).right_aligned();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_top(heading)
            .title_top(delete)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let mut lines: Vec<Line> = wrap_text(&self.comment.text, Self::text_width(area.width))
            .into_iter()
            .map(Line::raw)
            .collect();

        let like_style = if self.comment.likes() > 0 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(LIKE_LABEL, like_style),
            Span::styled(" • ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.comment.likes().to_string(), like_style.add_modifier(Modifier::BOLD)),
        ]));

        Paragraph::new(lines).block(block).render(box_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comments::CommentThread;
    use crate::test_support::{test_author, test_now};
    use crate::tui::components::buffer_text;

    fn comment_with(text: &str, likes: u32) -> Comment {
        let mut thread = CommentThread::new();
        thread.update_draft(text);
        let id = thread.submit_comment(&test_author(), test_now()).unwrap();
        for _ in 0..likes {
            thread.like_comment(id);
        }
        thread.get(id).unwrap().clone()
    }

    fn render(comment: &Comment, width: u16) -> String {
        let height = CommentCard::calculate_height(comment, width);
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        CommentCard::new(comment, test_now(), false).render(buf.area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn single_line_comment_height() {
        let comment = comment_with("Great post!", 0);
        // 1 text line + footer + 2 borders
        assert_eq!(CommentCard::calculate_height(&comment, 60), 4);
    }

    #[test]
    fn wrapped_comment_height() {
        let comment = comment_with("aaaa bbbb cccc", 0);
        // width 17 → box 10 → text 6: "aaaa" | "bbbb" | "cccc"
        assert_eq!(CommentCard::calculate_height(&comment, 17), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn oversized_comment_height_saturates() {
        // Fits in u16 lines, but not once the borders and footer are added
        let comment = comment_with(&"a\n".repeat(65_533), 0);
        assert_eq!(CommentCard::calculate_height(&comment, 60), u16::MAX);

        let comment = comment_with(&"a\n".repeat(70_000), 0);
        assert_eq!(CommentCard::calculate_height(&comment, 60), u16::MAX);
    }

    #[test]
    fn degenerate_width_keeps_avatar_height() {
        let comment = comment_with("hello", 0);
        assert_eq!(CommentCard::calculate_height(&comment, 5), AVATAR_HEIGHT);
    }

    #[test]
    fn renders_author_time_text_and_likes() {
        let comment = comment_with("Great post!", 3);
        let text = render(&comment, 70);
        assert!(text.contains("Test User"));
        assert!(text.contains("há menos de um minuto"));
        assert!(text.contains("Great post!"));
        assert!(text.contains("Aplaudir • 3"));
        assert!(text.contains("Deletar"));
    }

    #[test]
    fn fresh_comment_shows_zero_likes() {
        let comment = comment_with("hi", 0);
        assert!(render(&comment, 70).contains("Aplaudir • 0"));
    }
}
