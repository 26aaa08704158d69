//! Frame layout: header, sidebar + feed, key hints.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ⚡ Ignite Feed │ status                        │  header
//! ├─────────────┬────────────────────────────────┤
//! │  sidebar    │  feed (scrolls)                │
//! │             │                                │
//! ├─────────────┴────────────────────────────────┤
//! │ key hints for the current mode               │  footer
//! └──────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::post::PostLayout;
use crate::tui::components::{FeedView, Header, SIDEBAR_WIDTH, Sidebar};
use crate::tui::{FocusMode, TuiState};

/// Below this width the sidebar is hidden to leave room for the feed.
const MIN_WIDTH_FOR_SIDEBAR: u16 = SIDEBAR_WIDTH + 40;

/// Key hints shown in the footer, per mode.
fn hints(mode: FocusMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        FocusMode::Browse => &[
            ("↑↓", "post"),
            ("Tab", "comentário"),
            ("c", "comentar"),
            ("a", "aplaudir"),
            ("x", "deletar"),
            ("q", "sair"),
        ],
        FocusMode::Compose => &[
            ("Enter", "publicar"),
            ("Ctrl+J", "nova linha"),
            ("Esc", "voltar"),
        ],
    }
}

fn footer_line(mode: FocusMode) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in hints(mode) {
        spans.push(Span::styled(*key, Style::default().fg(Color::Green)));
        spans.push(Span::styled(
            format!(" {label}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Outer width of the comment form for a feed drawn at `feed_area`.
pub fn form_width(feed_area: Rect) -> u16 {
    let content = Rect {
        width: feed_area.width.saturating_sub(1), // scrollbar
        ..feed_area
    };
    PostLayout::inner(content).width
}

/// Splits the frame into header, sidebar (if it fits), feed and footer.
pub fn layout(area: Rect) -> (Rect, Option<Rect>, Rect, Rect) {
    use Constraint::{Length, Min};
    let [header, body, footer] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
    if body.width < MIN_WIDTH_FOR_SIDEBAR {
        return (header, None, body, footer);
    }
    let [sidebar, feed] = Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)])
        .spacing(1)
        .areas(body);
    (header, Some(sidebar), feed, footer)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: NaiveDateTime) {
    let (header_area, sidebar_area, feed_area, footer_area) = layout(frame.area());

    Header::new(&app.status_message, app.total_likes()).render(frame, header_area);

    if let Some(area) = sidebar_area {
        Sidebar::new(&app.profile).render(frame, area);
    }

    tui.form_width = form_width(feed_area);
    let composer = match tui.mode {
        FocusMode::Compose => {
            if let Some(entry) = app.feed.get(tui.feed.selected_post) {
                tui.composer
                    .cursor
                    .update_scroll_offset(&entry.thread.draft, tui.form_width);
            }
            Some(&tui.composer)
        }
        FocusMode::Browse => None,
    };
    FeedView::new(&mut tui.feed, app, now, composer).render(frame, feed_area);

    frame.render_widget(Paragraph::new(footer_line(tui.mode)), footer_area);
}
