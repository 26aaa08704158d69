//! # PostCard Component
//!
//! One feed entry: author header with timestamps, the content blocks, the
//! comment form and the comment list.
//!
//! ```text
//! ╭──────────────────────────────────────────────────────────╮
//! │ ┏━━━━┓ Leonardo Barrocal            há cerca de 2 horas  │  header
//! │ ┃ LB ┃ Desenvolvedor           10 de setembro as 09:00h  │
//! │ ┗━━━━┛                                                   │
//! │                                                          │
//! │ Fala galeraa 👋                                          │  content
//! │ github/leohb07                                           │
//! │ ↗ https://github.com/leohb07                             │
//! │──────────────────────────────────────────────────────────│  divider
//! │ ╭ Deixe o seu feedback ───────────────────────────────╮  │  form
//! │ │ Deixe um comentário                                 │  │
//! │ ╰─────────────────────────────────────────────────────╯  │
//! │                                         [ Publicar ]     │
//! │                                                          │
//! │  TU   ╭ Test User há 5 minutos ────────── ✖ Deletar ╮    │  comments
//! │       │ Great post!                                 │    │
//! ╰──────────────────────────────────────────────────────────╯
//! ```
//!
//! Section heights are measured once by [`PostLayout`] and shared by the
//! feed's layout cache, the renderer and caret placement, so all three agree.

use chrono::NaiveDateTime;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget};

use crate::core::comments::CommentId;
use crate::core::datefmt::{format_absolute, format_relative};
use crate::core::feed::RenderedBlock;
use crate::core::state::FeedEntry;
use crate::tui::components::avatar::{AVATAR_HEIGHT, AVATAR_WIDTH, Avatar};
use crate::tui::components::comment::CommentCard;
use crate::tui::components::composer::ComposerBox;
use crate::tui::components::{rows, sum_rows, wrap_text};

/// Border (1) + padding (1) on each side.
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;
/// Blank row between the header and the content.
const HEADER_GAP: u16 = 1;
/// Rule between the content and the form.
const DIVIDER: u16 = 1;
/// Blank row between the form and the first comment.
const COMMENTS_GAP: u16 = 1;

pub const LINK_ARROW: &str = "↗ ";

/// Content blocks as styled, pre-wrapped lines.
fn content_lines<'a>(blocks: &[RenderedBlock<'_>], width: u16) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            RenderedBlock::Paragraph(text) => {
                lines.extend(wrap_text(text, width).into_iter().map(Line::raw));
            }
            RenderedBlock::Link { label, target } => {
                let label_style = Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                lines.extend(
                    wrap_text(label, width)
                        .into_iter()
                        .map(|l| Line::from(Span::styled(l, label_style))),
                );
                let target_style = Style::default().fg(Color::DarkGray);
                lines.extend(
                    wrap_text(&format!("{LINK_ARROW}{target}"), width)
                        .into_iter()
                        .map(|l| Line::from(Span::styled(l, target_style))),
                );
            }
        }
    }
    lines
}

/// Measured section heights of one post at a given width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLayout {
    pub header: u16,
    pub content: u16,
    pub form: u16,
    /// One entry per visible comment, in display order.
    pub comments: Vec<u16>,
}

impl PostLayout {
    pub fn measure(entry: &FeedEntry, link_host: &str, width: u16) -> Self {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        let blocks = entry.post.rendered_blocks(link_host);
        Self {
            header: AVATAR_HEIGHT,
            content: rows(content_lines(&blocks, inner).len()),
            form: ComposerBox::calculate_height(&entry.thread.draft, inner),
            comments: entry
                .thread
                .visible_comments()
                .map(|c| CommentCard::calculate_height(c, inner))
                .collect(),
        }
    }

    fn comments_height(&self) -> u16 {
        if self.comments.is_empty() {
            0
        } else {
            COMMENTS_GAP.saturating_add(sum_rows(&self.comments))
        }
    }

    pub fn total_height(&self) -> u16 {
        sum_rows(&[
            VERTICAL_OVERHEAD,
            self.header,
            HEADER_GAP,
            self.content,
            DIVIDER,
            self.form,
            self.comments_height(),
        ])
    }

    /// Area inside the border and padding of a post drawn at `area`.
    pub fn inner(area: Rect) -> Rect {
        Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(HORIZONTAL_OVERHEAD),
            height: area.height.saturating_sub(VERTICAL_OVERHEAD),
        }
    }

    /// Rows from the top of the post to the comment form.
    pub fn form_offset(&self) -> u16 {
        sum_rows(&[1, self.header, HEADER_GAP, self.content, DIVIDER])
    }

    /// Rows from the top of the post to its `index`-th visible comment.
    pub fn comment_offset(&self, index: usize) -> u16 {
        let above = sum_rows(self.comments.iter().take(index));
        sum_rows(&[self.form_offset(), self.form, COMMENTS_GAP, above])
    }

    /// Where the comment form sits within a post drawn at `area`.
    pub fn form_area(&self, area: Rect) -> Rect {
        let inner = Self::inner(area);
        Rect::new(
            inner.x,
            area.y.saturating_add(self.form_offset()),
            inner.width,
            self.form,
        )
    }
}

/// Feed entry widget.
///
/// # Props
///
/// - `entry`: the post and its comment thread
/// - `link_host`: host for link targets
/// - `now`: rendering instant for relative labels
/// - `is_selected`: keyboard focus is on this post
/// - `selected_comment`: comment targeted by like/delete keys
/// - `composer_focused` / `composer_scroll`: comment form presentation
pub struct PostCard<'a> {
    pub entry: &'a FeedEntry,
    pub link_host: &'a str,
    pub now: NaiveDateTime,
    pub is_selected: bool,
    pub selected_comment: Option<CommentId>,
    pub composer_focused: bool,
    pub composer_scroll: u16,
}

impl PostCard<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let author = &self.entry.post.author;
        Avatar::new(&author.avatar_url, &author.name)
            .render(Rect { width: AVATAR_WIDTH.min(area.width), ..area }, buf);

        let text_area = Rect {
            x: area.x + AVATAR_WIDTH + 1,
            width: area.width.saturating_sub(AVATAR_WIDTH + 1),
            height: 2.min(area.height),
            ..area
        };
        Paragraph::new(vec![
            Line::from(Span::styled(
                author.name.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(author.role.as_str(), Style::default().fg(Color::Gray))),
        ])
        .render(text_area, buf);

        let published_at = self.entry.post.published_at;
        Paragraph::new(vec![
            Line::from(Span::styled(
                format_relative(published_at, self.now),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format_absolute(published_at),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Right)
        .render(text_area, buf);
    }
}

impl Widget for PostCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PostLayout::measure(self.entry, self.link_host, area.width);

        let border_style = if self.is_selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .render(area, buf);

        let inner = PostLayout::inner(area);
        let bottom = inner.y.saturating_add(inner.height);
        // Clip a section to the inner area; None once we've run off the end.
        let section = |y: u16, height: u16| -> Option<Rect> {
            (y < bottom).then(|| Rect::new(inner.x, y, inner.width, height.min(bottom - y)))
        };

        let mut y = inner.y;
        if let Some(rect) = section(y, layout.header) {
            self.render_header(rect, buf);
        }
        y = sum_rows(&[y, layout.header, HEADER_GAP]);

        if let Some(rect) = section(y, layout.content) {
            let blocks = self.entry.post.rendered_blocks(self.link_host);
            Paragraph::new(content_lines(&blocks, inner.width)).render(rect, buf);
        }
        y = y.saturating_add(layout.content);

        if let Some(rect) = section(y, DIVIDER) {
            Block::new()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .render(rect, buf);
        }
        y = y.saturating_add(DIVIDER);

        if let Some(rect) = section(y, layout.form) {
            let thread = &self.entry.thread;
            ComposerBox {
                draft: &thread.draft,
                focused: self.composer_focused,
                can_submit: thread.can_submit(),
                validation: thread.validation.as_ref().map(|v| v.message()),
                scroll_offset: self.composer_scroll,
            }
            .render(rect, buf);
        }
        y = y.saturating_add(layout.form);

        if !layout.comments.is_empty() {
            y = y.saturating_add(COMMENTS_GAP);
        }
        for (comment, height) in self.entry.thread.visible_comments().zip(&layout.comments) {
            let Some(rect) = section(y, *height) else {
                break;
            };
            let is_selected = self.is_selected && self.selected_comment == Some(comment.id);
            CommentCard::new(comment, self.now, is_selected).render(rect, buf);
            y = y.saturating_add(*height);
        }
    }
}
