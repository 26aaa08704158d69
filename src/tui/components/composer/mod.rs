//! # Composer Component
//!
//! The comment form under each post: a bordered text area, the "Publicar"
//! button and the required-field message.
//!
//! ## State Management
//!
//! The draft text is core state (`CommentThread::draft`), so edits never
//! mutate it directly. [`Composer`] turns key events into a
//! [`ComposerEvent::Changed`] carrying the new text, which the event loop
//! dispatches as `Action::UpdateDraft`. Only the caret position and
//! internal scroll live here, in [`ComposerState`].
//!
//! Rendering goes through [`ComposerBox`], a transient widget built from
//! props each frame.

mod cursor;
mod text_wrap;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::feed::PostId;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

pub use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrapped_lines,
};

pub const FORM_TITLE: &str = "Deixe o seu feedback";
pub const PLACEHOLDER: &str = "Deixe um comentário";
pub const SUBMIT_LABEL: &str = "[ Publicar ]";

/// Rows below the text box: button + validation message.
const FOOTER_HEIGHT: u16 = 1;

/// High-level events emitted by the composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    /// The draft should become this text.
    Changed(String),
    /// Enter pressed. Whether the draft is acceptable is decided by the core.
    Submit,
    /// Caret moved without changing the text.
    CursorMoved,
}

/// Persistent composer state, kept in `TuiState`.
#[derive(Debug, Default)]
pub struct ComposerState {
    pub cursor: CursorState,
    /// Post whose draft the caret belongs to.
    pub post: Option<PostId>,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the caret to `post`, placing it at the end of that post's
    /// draft when focus moves between forms.
    pub fn focus(&mut self, post: PostId, draft: &str) {
        if self.post != Some(post) {
            self.post = Some(post);
            self.cursor.reset();
            self.cursor.place_at_end(draft);
        }
        self.cursor.clamp(draft);
    }
}

/// Transient editor over the persistent caret and the current draft.
pub struct Composer<'a> {
    pub state: &'a mut ComposerState,
    pub draft: &'a str,
    /// Outer width of the text box, for vertical caret movement.
    pub width: u16,
}

impl<'a> Composer<'a> {
    pub fn new(state: &'a mut ComposerState, draft: &'a str, width: u16) -> Self {
        Self { state, draft, width }
    }

    fn insert(&mut self, text: &str) -> ComposerEvent {
        let pos = self.state.cursor.pos;
        let mut next = String::with_capacity(self.draft.len() + text.len());
        next.push_str(&self.draft[..pos]);
        next.push_str(text);
        next.push_str(&self.draft[pos..]);
        self.state.cursor.pos = pos + text.len();
        ComposerEvent::Changed(next)
    }

    fn remove(&mut self, start: usize, end: usize) -> ComposerEvent {
        let mut next = String::with_capacity(self.draft.len());
        next.push_str(&self.draft[..start]);
        next.push_str(&self.draft[end..]);
        self.state.cursor.pos = start;
        ComposerEvent::Changed(next)
    }
}

impl EventHandler for Composer<'_> {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        self.state.cursor.clamp(self.draft);
        let pos = self.state.cursor.pos;
        let draft = self.draft;
        let cursor = &mut self.state.cursor;
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                Some(self.insert(c.encode_utf8(&mut buf)))
            }
            TuiEvent::Paste(text) => Some(self.insert(text)),
            TuiEvent::Backspace => {
                (pos > 0).then(|| self.remove(prev_char_boundary(draft, pos), pos))
            }
            TuiEvent::Delete => {
                (pos < draft.len()).then(|| self.remove(pos, next_char_boundary(draft, pos)))
            }
            TuiEvent::CursorLeft => cursor.move_left(draft).then_some(ComposerEvent::CursorMoved),
            TuiEvent::CursorRight => {
                cursor.move_right(draft).then_some(ComposerEvent::CursorMoved)
            }
            TuiEvent::CursorHome => cursor.move_home(draft).then_some(ComposerEvent::CursorMoved),
            TuiEvent::CursorEnd => cursor.move_end(draft).then_some(ComposerEvent::CursorMoved),
            TuiEvent::CursorUp => cursor
                .move_vertically(draft, -1, self.width)
                .then_some(ComposerEvent::CursorMoved),
            TuiEvent::CursorDown => cursor
                .move_vertically(draft, 1, self.width)
                .then_some(ComposerEvent::CursorMoved),
            TuiEvent::Submit => {
                cursor.reset();
                Some(ComposerEvent::Submit)
            }
            _ => None,
        }
    }
}

/// Comment form widget.
///
/// # Props
///
/// - `draft`: current draft text
/// - `focused`: whether keystrokes go to this form
/// - `can_submit`: drives the enabled/disabled look of the button
/// - `validation`: required-field message, if a rejected submit is pending
/// - `scroll_offset`: first visible wrapped line
pub struct ComposerBox<'a> {
    pub draft: &'a str,
    pub focused: bool,
    pub can_submit: bool,
    pub validation: Option<&'a str>,
    pub scroll_offset: u16,
}

impl ComposerBox<'_> {
    /// Height of the text box alone (borders included).
    pub fn box_height(draft: &str, width: u16) -> u16 {
        let lines = wrap_line_count(draft, inner_width(width));
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Height of the whole form: text box + footer.
    pub fn calculate_height(draft: &str, width: u16) -> u16 {
        Self::box_height(draft, width) + FOOTER_HEIGHT
    }

    /// Area of the text box within a form drawn at `area`.
    pub fn box_area(draft: &str, area: Rect) -> Rect {
        Rect {
            height: Self::box_height(draft, area.width).min(area.height),
            ..area
        }
    }

    fn content_lines(&self, width: u16) -> Vec<Line<'static>> {
        if self.draft.is_empty() {
            return vec![Line::from(Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))];
        }
        wrapped_lines(self.draft, inner_width(width))
            .into_iter()
            .skip(self.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|line| Line::raw(line.into_owned()))
            .collect()
    }
}

impl Widget for ComposerBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let box_area = Self::box_area(self.draft, area);
        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {FORM_TITLE} "),
                border_style.add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));
        Paragraph::new(self.content_lines(area.width))
            .block(block)
            .render(box_area, buf);

        let footer_y = box_area.y.saturating_add(box_area.height);
        if footer_y >= area.y.saturating_add(area.height) {
            return;
        }
        let footer = Rect::new(area.x, footer_y, area.width, FOOTER_HEIGHT);

        if let Some(message) = self.validation {
            Paragraph::new(Span::styled(
                format!(" {message}"),
                Style::default().fg(Color::Red),
            ))
            .render(footer, buf);
        }

        let button_style = if self.can_submit {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };
        Paragraph::new(Span::styled(SUBMIT_LABEL, button_style))
            .alignment(Alignment::Right)
            .render(footer, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn apply(state: &mut ComposerState, draft: &mut String, event: TuiEvent) -> Option<ComposerEvent> {
        let result = Composer::new(state, draft, 40).handle_event(&event);
        if let Some(ComposerEvent::Changed(next)) = &result {
            *draft = next.clone();
        }
        result
    }

    #[test]
    fn typing_emits_changed_text() {
        let mut state = ComposerState::new();
        let mut draft = String::new();

        apply(&mut state, &mut draft, TuiEvent::InputChar('o'));
        let event = apply(&mut state, &mut draft, TuiEvent::InputChar('i'));

        assert_eq!(event, Some(ComposerEvent::Changed("oi".to_string())));
        assert_eq!(state.cursor.pos, 2);
    }

    #[test]
    fn insert_and_delete_at_caret() {
        let mut state = ComposerState::new();
        let mut draft = "ac".to_string();
        state.cursor.pos = 1;

        apply(&mut state, &mut draft, TuiEvent::InputChar('b'));
        assert_eq!(draft, "abc");

        apply(&mut state, &mut draft, TuiEvent::Backspace);
        assert_eq!(draft, "ac");
        assert_eq!(state.cursor.pos, 1);

        apply(&mut state, &mut draft, TuiEvent::Delete);
        assert_eq!(draft, "a");
        assert_eq!(apply(&mut state, &mut draft, TuiEvent::Delete), None);
    }

    #[test]
    fn backspace_at_start_is_ignored() {
        let mut state = ComposerState::new();
        let mut draft = "x".to_string();
        assert_eq!(apply(&mut state, &mut draft, TuiEvent::Backspace), None);
        assert_eq!(draft, "x");
    }

    #[test]
    fn paste_keeps_newlines() {
        let mut state = ComposerState::new();
        let mut draft = String::new();
        apply(&mut state, &mut draft, TuiEvent::Paste("a\nb".into()));
        assert_eq!(draft, "a\nb");
        assert_eq!(state.cursor.pos, 3);
    }

    #[test]
    fn submit_resets_caret_even_for_empty_draft() {
        let mut state = ComposerState::new();
        let mut draft = String::new();
        assert_eq!(
            apply(&mut state, &mut draft, TuiEvent::Submit),
            Some(ComposerEvent::Submit)
        );
        assert_eq!(state.cursor.pos, 0);
    }

    #[test]
    fn focus_moves_caret_to_end_of_other_draft() {
        let mut state = ComposerState::new();
        state.focus(PostId(1), "hello");
        assert_eq!(state.cursor.pos, 5);

        state.cursor.pos = 2;
        state.focus(PostId(1), "hello");
        assert_eq!(state.cursor.pos, 2);

        state.focus(PostId(2), "");
        assert_eq!(state.cursor.pos, 0);
    }

    #[test]
    fn height_grows_then_caps() {
        assert_eq!(ComposerBox::calculate_height("", 40), 1 + 2 + 1);
        assert_eq!(ComposerBox::calculate_height("a\nb", 40), 2 + 2 + 1);
        assert_eq!(ComposerBox::calculate_height("1\n2\n3\n4\n5\n6", 40), 4 + 2 + 1);
    }

    fn draw(props: ComposerBox<'_>) -> Terminal<TestBackend> {
        let backend = TestBackend::new(40, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(props, f.area()))
            .unwrap();
        terminal
    }

    fn render(props: ComposerBox<'_>) -> String {
        buffer_text(draw(props).backend().buffer())
    }

    /// Style of the button's first and last cells on the footer row.
    fn button_styles(can_submit: bool) -> [Style; 2] {
        let terminal = draw(ComposerBox {
            draft: "",
            focused: false,
            can_submit,
            validation: None,
            scroll_offset: 0,
        });
        let buf = terminal.backend().buffer();
        let left = 40 - SUBMIT_LABEL.len() as u16;
        assert_eq!(buf[(left, 3)].symbol(), "[");
        assert_eq!(buf[(39, 3)].symbol(), "]");
        [buf[(left, 3)].style(), buf[(39, 3)].style()]
    }

    #[test]
    fn empty_form_shows_placeholder_and_button() {
        let text = render(ComposerBox {
            draft: "",
            focused: false,
            can_submit: false,
            validation: None,
            scroll_offset: 0,
        });
        assert!(text.contains(FORM_TITLE));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Publicar"));
        assert!(!text.contains("obrigatório"));

        for style in button_styles(false) {
            assert!(style.add_modifier.contains(Modifier::DIM));
            assert_eq!(style.fg, Some(Color::DarkGray));
            assert_ne!(style.bg, Some(Color::Green));
        }
    }

    #[test]
    fn button_is_highlighted_once_submittable() {
        for style in button_styles(true) {
            assert_eq!(style.bg, Some(Color::Green));
            assert_eq!(style.fg, Some(Color::Black));
            assert!(style.add_modifier.contains(Modifier::BOLD));
            assert!(!style.add_modifier.contains(Modifier::DIM));
        }
    }

    #[test]
    fn validation_message_is_rendered() {
        let text = render(ComposerBox {
            draft: "",
            focused: true,
            can_submit: false,
            validation: Some("Esse campo é obrigatório"),
            scroll_offset: 0,
        });
        assert!(text.contains("Esse campo é obrigatório"));
    }

    #[test]
    fn draft_replaces_placeholder() {
        let text = render(ComposerBox {
            draft: "Great post!",
            focused: true,
            can_submit: true,
            validation: None,
            scroll_offset: 0,
        });
        assert!(text.contains("Great post!"));
        assert!(!text.contains(PLACEHOLDER));
    }
}
