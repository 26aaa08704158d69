//! # Feed Component
//!
//! Scrollable column of posts.
//!
//! ## Architecture
//!
//! `FeedView` is a transient component (created each frame) wrapping
//! `&'a mut FeedState` (persistent state) and the app data (props). Post
//! heights depend on drafts and comment counts, which change between almost
//! every frame, so the layout is re-measured on each render. Only posts
//! overlapping the viewport are drawn into the `ScrollView` canvas.
//!
//! ## Selection
//!
//! Keyboard focus is a post index plus an optional comment on that post.
//! Like/delete act on the selected comment; the comment form belongs to the
//! selected post.

use chrono::NaiveDateTime;
use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::comments::CommentId;
use crate::core::state::{App, FeedEntry};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::composer::{ComposerBox, ComposerState};
use crate::tui::components::post::{PostCard, PostLayout};
use crate::tui::event::TuiEvent;

/// Blank rows between consecutive posts.
const POST_GAP: u16 = 1;

/// Measured layout of the whole feed.
#[derive(Debug, Default)]
pub struct FeedLayout {
    pub posts: Vec<PostLayout>,
    /// Running bottom edge of each post, gaps included.
    pub prefix_heights: Vec<u16>,
}

impl FeedLayout {
    pub fn measure(feed: &[FeedEntry], link_host: &str, width: u16) -> Self {
        let posts: Vec<PostLayout> = feed
            .iter()
            .map(|entry| PostLayout::measure(entry, link_host, width))
            .collect();
        let prefix_heights = posts
            .iter()
            .scan(0u16, |acc, post| {
                *acc = acc
                    .saturating_add(post.total_height())
                    .saturating_add(POST_GAP);
                Some(*acc)
            })
            .collect();
        Self {
            posts,
            prefix_heights,
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas row where post `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights.get(index - 1).copied().unwrap_or(0)
        }
    }

    /// Posts overlapping `[scroll_offset, scroll_offset + viewport_height)`.
    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let end_row = scroll_offset.saturating_add(viewport_height);
        let start = self
            .prefix_heights
            .partition_point(|&end| end <= scroll_offset);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < end_row)
            .saturating_add(1)
            .min(self.prefix_heights.len());
        start..end.max(start)
    }
}

/// Scroll and selection state for the feed.
/// Must be persisted in the parent TuiState.
pub struct FeedState {
    pub scroll_state: ScrollViewState,
    pub layout: FeedLayout,
    /// Index into `App::feed` of the focused post
    pub selected_post: usize,
    /// Comment on the focused post targeted by like/delete
    pub selected_comment: Option<CommentId>,
    /// Bring the selection into view on the next render
    pub follow_selection: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: FeedLayout::default(),
            selected_post: 0,
            selected_comment: None,
            follow_selection: false,
            viewport_height: 0,
        }
    }

    pub fn select_next_post(&mut self, app: &App) {
        if self.selected_post + 1 < app.feed.len() {
            self.selected_post += 1;
            self.selected_comment = None;
            self.follow_selection = true;
        }
    }

    pub fn select_previous_post(&mut self) {
        if self.selected_post > 0 {
            self.selected_post -= 1;
            self.selected_comment = None;
            self.follow_selection = true;
        }
    }

    /// Step through the focused post's comments. Stepping past either end
    /// returns focus to the post itself.
    pub fn cycle_comment(&mut self, app: &App, forward: bool) {
        let Some(entry) = app.feed.get(self.selected_post) else {
            return;
        };
        let ids: Vec<CommentId> = entry.thread.visible_comments().map(|c| c.id).collect();
        let current = self
            .selected_comment
            .and_then(|id| ids.iter().position(|&other| other == id));
        let next = match (current, forward) {
            (None, true) => ids.first(),
            (None, false) => ids.last(),
            (Some(i), true) => ids.get(i + 1),
            (Some(i), false) => i.checked_sub(1).and_then(|i| ids.get(i)),
        };
        self.selected_comment = next.copied();
        self.follow_selection = true;
    }

    /// Re-point the selection at something that still exists, e.g. after a
    /// delete. A removed comment hands focus to its successor, or its
    /// predecessor when it was last.
    pub fn reconcile(&mut self, app: &App, removed_at: Option<usize>) {
        self.selected_post = self.selected_post.min(app.feed.len().saturating_sub(1));
        let Some(entry) = app.feed.get(self.selected_post) else {
            self.selected_comment = None;
            return;
        };
        let Some(id) = self.selected_comment else {
            return;
        };
        if entry.thread.get(id).is_some() {
            return;
        }
        let ids: Vec<CommentId> = entry.thread.visible_comments().map(|c| c.id).collect();
        self.selected_comment = removed_at.and_then(|index| {
            ids.get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| ids.get(i)))
                .copied()
        });
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self
            .layout
            .total_height()
            .saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Rows `[top, bottom)` of the current selection on the canvas.
    fn selection_span(&self, app: &App) -> Option<(u16, u16)> {
        let post = self.layout.posts.get(self.selected_post)?;
        let post_top = self.layout.top_of(self.selected_post);
        let comment_index = self.selected_comment.and_then(|id| {
            app.feed
                .get(self.selected_post)?
                .thread
                .visible_comments()
                .position(|c| c.id == id)
        });
        match comment_index {
            Some(index) => {
                let top = post_top.saturating_add(post.comment_offset(index));
                Some((top, top.saturating_add(*post.comments.get(index)?)))
            }
            None => Some((post_top, post_top.saturating_add(post.total_height()))),
        }
    }

    /// Scroll the viewport so the selection is fully visible. If it is
    /// taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self, app: &App) {
        let Some((top, bottom)) = self.selection_span(app) else {
            return;
        };
        let offset_y = self.scroll_state.offset().y;
        if top < offset_y || bottom.saturating_sub(top) > self.viewport_height {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y.saturating_add(self.viewport_height) {
            self.scroll_state.set_offset(Position {
                x: 0,
                y: bottom.saturating_sub(self.viewport_height),
            });
        }
    }

    /// Keep the focused form's text box on screen while typing.
    pub fn scroll_to_form(&mut self, draft_box: Rect) {
        let offset_y = self.scroll_state.offset().y;
        let bottom = draft_box.y.saturating_add(draft_box.height);
        if draft_box.y < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: draft_box.y });
        } else if bottom > offset_y.saturating_add(self.viewport_height) {
            self.scroll_state.set_offset(Position {
                x: 0,
                y: bottom.saturating_sub(self.viewport_height),
            });
        }
    }
}

/// Scroll events only; selection keys are interpreted by the event loop
/// because they need the app data.
impl EventHandler for FeedState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            _ => {}
        }
        self.follow_selection = false;
        None
    }
}

/// Scrollable feed view.
/// Created fresh each frame with references to state and data.
pub struct FeedView<'a> {
    pub state: &'a mut FeedState,
    pub app: &'a App,
    pub now: NaiveDateTime,
    /// Present while the selected post's form has keyboard focus.
    pub composer: Option<&'a ComposerState>,
}

impl<'a> FeedView<'a> {
    pub fn new(
        state: &'a mut FeedState,
        app: &'a App,
        now: NaiveDateTime,
        composer: Option<&'a ComposerState>,
    ) -> Self {
        Self {
            state,
            app,
            now,
            composer,
        }
    }

    /// Canvas rect of the focused form's text box and its caret cell.
    fn caret(&self, content_width: u16) -> Option<(Rect, Position)> {
        let composer = self.composer?;
        let index = self.state.selected_post;
        let entry = self.app.feed.get(index)?;
        let layout = self.state.layout.posts.get(index)?;
        let post_area = Rect::new(
            0,
            self.state.layout.top_of(index),
            content_width,
            layout.total_height(),
        );
        let draft = entry.thread.draft.as_str();
        let draft_box = ComposerBox::box_area(draft, layout.form_area(post_area));
        let (x, y) = composer.cursor.screen_pos(draft, draft_box);
        Some((draft_box, Position { x, y }))
    }
}

impl Component for FeedView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        // 1. Measure
        self.state.layout = FeedLayout::measure(&self.app.feed, &self.app.link_host, content_width);
        self.state.viewport_height = area.height;
        self.state.reconcile(self.app, None);

        // 2. Scroll: follow keyboard focus, keep the caret visible, clamp
        if self.state.follow_selection {
            self.state.scroll_to_selected(self.app);
            self.state.follow_selection = false;
        }
        let caret = self.caret(content_width);
        if let Some((draft_box, _)) = caret {
            self.state.scroll_to_form(draft_box);
        }
        self.state.clamp_scroll();

        // 3. Render visible posts into a ScrollView
        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let scroll_offset = self.state.scroll_state.offset().y;
        for index in self.state.layout.visible_range(scroll_offset, area.height) {
            let entry = &self.app.feed[index];
            let layout = &self.state.layout.posts[index];
            let rect = Rect::new(
                0,
                self.state.layout.top_of(index),
                content_width,
                layout.total_height(),
            );
            let is_selected = index == self.state.selected_post;
            let composer_focused = is_selected && self.composer.is_some();
            let card = PostCard {
                entry,
                link_host: &self.app.link_host,
                now: self.now,
                is_selected,
                selected_comment: self.state.selected_comment.filter(|_| is_selected),
                composer_focused,
                composer_scroll: self
                    .composer
                    .filter(|_| composer_focused)
                    .map_or(0, |c| c.cursor.scroll_offset),
            };
            scroll_view.render_widget(card, rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 4. Caret, when it is inside the viewport
        if let Some((_, caret)) = caret {
            let offset_y = self.state.scroll_state.offset().y;
            if caret.y >= offset_y && caret.y < offset_y.saturating_add(area.height) && caret.x < content_width {
                frame.set_cursor_position(Position {
                    x: area.x + caret.x,
                    y: area.y + caret.y - offset_y,
                });
            }
        }
    }
}
