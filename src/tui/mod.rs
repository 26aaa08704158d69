//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop only draws after an event or when relative timestamps are due
//! for a refresh (`general.refresh_secs`). Between the two it sleeps in
//! `poll`, so an idle feed costs nothing.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{Composer, ComposerEvent, ComposerState, FeedState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Longest sleep between polls while idle.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Move between posts and comments; single-key like/delete.
    Browse,
    /// Typing into the selected post's comment form. Esc returns to Browse.
    Compose,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub feed: FeedState,
    pub composer: ComposerState,
    pub mode: FocusMode,
    /// Outer width of the comment form at the last draw
    pub form_width: u16,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            feed: FeedState::new(),
            composer: ComposerState::new(),
            mode: FocusMode::Browse,
            form_width: 0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

fn enter_compose(app: &App, tui: &mut TuiState) {
    let Some(entry) = app.feed.get(tui.feed.selected_post) else {
        return;
    };
    tui.composer.focus(entry.post.id, &entry.thread.draft);
    tui.mode = FocusMode::Compose;
    tui.feed.selected_comment = None;
}

fn handle_browse(app: &mut App, tui: &mut TuiState, event: TuiEvent, now: NaiveDateTime) -> bool {
    let Some(post) = app.feed.get(tui.feed.selected_post).map(|e| e.post.id) else {
        return matches!(event, TuiEvent::Escape | TuiEvent::InputChar('q'));
    };
    match event {
        TuiEvent::Escape | TuiEvent::InputChar('q') => {
            return update(app, Action::Quit) == Effect::Quit;
        }
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => tui.feed.select_previous_post(),
        TuiEvent::CursorDown | TuiEvent::InputChar('j') => tui.feed.select_next_post(app),
        TuiEvent::NextComment => tui.feed.cycle_comment(app, true),
        TuiEvent::PreviousComment => tui.feed.cycle_comment(app, false),
        TuiEvent::InputChar('a') => {
            if let Some(comment) = tui.feed.selected_comment {
                update(app, Action::LikeComment { post, comment });
            }
        }
        TuiEvent::InputChar('x') | TuiEvent::Delete => {
            if let Some(comment) = tui.feed.selected_comment {
                let removed_at = app.feed[tui.feed.selected_post]
                    .thread
                    .visible_comments()
                    .position(|c| c.id == comment);
                update(app, Action::DeleteComment { post, comment });
                tui.feed.reconcile(app, removed_at);
            }
        }
        TuiEvent::Submit | TuiEvent::InputChar('c') => enter_compose(app, tui),
        // Pasting starts a comment with the pasted text
        TuiEvent::Paste(_) => {
            enter_compose(app, tui);
            handle_compose(app, tui, event, now);
        }
        _ => {}
    }
    false
}

fn handle_compose(app: &mut App, tui: &mut TuiState, event: TuiEvent, now: NaiveDateTime) {
    if matches!(event, TuiEvent::Escape) {
        tui.mode = FocusMode::Browse;
        return;
    }
    let Some(entry) = app.feed.get(tui.feed.selected_post) else {
        tui.mode = FocusMode::Browse;
        return;
    };
    let post = entry.post.id;
    let Some(composer_event) =
        Composer::new(&mut tui.composer, &entry.thread.draft, tui.form_width).handle_event(&event)
    else {
        return;
    };
    match composer_event {
        ComposerEvent::Changed(text) => {
            update(app, Action::UpdateDraft { post, text });
        }
        ComposerEvent::Submit => {
            if let Effect::CommentPosted(id) = update(app, Action::SubmitComment { post, now }) {
                debug!("Comment {} posted from composer", id);
            }
        }
        ComposerEvent::CursorMoved => {}
    }
}

/// Route one event. Returns true when the app should quit.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, now: NaiveDateTime) -> bool {
    match event {
        // Ctrl+C always quits regardless of mode
        TuiEvent::ForceQuit => update(app, Action::Quit) == Effect::Quit,
        TuiEvent::Resize => false,
        // Scroll events go to the feed regardless of mode
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.feed.handle_event(&event);
            false
        }
        _ => match tui.mode {
            FocusMode::Browse => handle_browse(app, tui, event, now),
            FocusMode::Compose => {
                handle_compose(app, tui, event, now);
                false
            }
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    let refresh = Duration::from_secs(config.refresh_secs.max(1));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut last_draw = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if last_draw.elapsed() >= refresh {
            needs_redraw = true;
        }

        if needs_redraw {
            let now = Local::now().naive_local();
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;
            last_draw = Instant::now();
            needs_redraw = false;
        }

        let timeout = refresh.saturating_sub(last_draw.elapsed()).min(IDLE_POLL);
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, Local::now().naive_local()) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            info!("Quitting");
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, test_now};

    fn send(app: &mut App, tui: &mut TuiState, events: impl IntoIterator<Item = TuiEvent>) -> bool {
        let mut quit = false;
        for event in events {
            quit |= handle_event(app, tui, event, test_now());
        }
        quit
    }

    fn type_text(text: &str) -> Vec<TuiEvent> {
        text.chars().map(TuiEvent::InputChar).collect()
    }

    fn setup() -> (App, TuiState) {
        let mut tui = TuiState::new();
        tui.form_width = 60;
        (test_app(), tui)
    }

    #[test]
    fn compose_submit_like_delete() {
        let (mut app, mut tui) = setup();

        send(&mut app, &mut tui, [TuiEvent::Submit]);
        assert_eq!(tui.mode, FocusMode::Compose);

        send(&mut app, &mut tui, type_text("Great post!"));
        assert_eq!(app.feed[0].thread.draft, "Great post!");

        send(&mut app, &mut tui, [TuiEvent::Submit]);
        assert_eq!(app.feed[0].thread.draft, "");
        assert_eq!(app.feed[0].thread.comments().len(), 1);
        assert_eq!(app.feed[0].thread.comments()[0].text, "Great post!");

        send(
            &mut app,
            &mut tui,
            [
                TuiEvent::Escape,
                TuiEvent::NextComment,
                TuiEvent::InputChar('a'),
                TuiEvent::InputChar('a'),
            ],
        );
        assert_eq!(tui.mode, FocusMode::Browse);
        assert_eq!(app.feed[0].thread.comments()[0].likes(), 2);

        send(&mut app, &mut tui, [TuiEvent::InputChar('x')]);
        assert!(app.feed[0].thread.comments().is_empty());
        assert_eq!(tui.feed.selected_comment, None);
    }

    #[test]
    fn empty_submit_is_rejected_and_typing_clears_it() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, [TuiEvent::InputChar('c'), TuiEvent::Submit]);
        assert!(app.feed[0].thread.comments().is_empty());
        assert!(app.feed[0].thread.validation.is_some());

        send(&mut app, &mut tui, type_text("x"));
        assert!(app.feed[0].thread.validation.is_none());
    }

    #[test]
    fn browse_letters_do_not_edit_drafts() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, type_text("ajx"));
        assert_eq!(app.feed[0].thread.draft, "");
        assert_eq!(tui.feed.selected_post, 1);
    }

    #[test]
    fn drafts_are_per_post() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, [TuiEvent::Submit]);
        send(&mut app, &mut tui, type_text("first"));
        send(&mut app, &mut tui, [TuiEvent::Escape, TuiEvent::CursorDown, TuiEvent::Submit]);
        send(&mut app, &mut tui, type_text("second"));

        assert_eq!(app.feed[0].thread.draft, "first");
        assert_eq!(app.feed[1].thread.draft, "second");
    }

    #[test]
    fn paste_in_browse_starts_composing() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, [TuiEvent::Paste("colado".into())]);
        assert_eq!(tui.mode, FocusMode::Compose);
        assert_eq!(app.feed[0].thread.draft, "colado");
    }

    #[test]
    fn quit_keys() {
        let (mut app, mut tui) = setup();
        assert!(send(&mut app, &mut tui, [TuiEvent::InputChar('q')]));

        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, [TuiEvent::Submit]);
        // 'q' and Esc in compose mode do not quit
        assert!(!send(&mut app, &mut tui, [TuiEvent::InputChar('q'), TuiEvent::Escape]));
        assert!(send(&mut app, &mut tui, [TuiEvent::ForceQuit]));
    }
}
