//! # Header Component
//!
//! Top bar with the application name and the latest status message.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! The header is purely presentational. It receives all data as props and
//! has no internal state:
//!
//! ```rust,ignore
//! let mut header = Header::new(&app.status_message, app.total_likes());
//! header.render(frame, header_area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status + likes**: `" Ignite Feed │ Comentário publicado │ 3 aplausos"`
//! 2. **Status only**: `" Ignite Feed │ Comentário publicado"`
//! 3. **Default**: `" Ignite Feed"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const APP_TITLE: &str = "Ignite Feed";

pub struct Header<'a> {
    /// Status message (e.g. "Comentário publicado")
    pub status_message: &'a str,
    /// Likes across the whole feed; hidden while zero
    pub total_likes: u64,
}

impl<'a> Header<'a> {
    pub fn new(status_message: &'a str, total_likes: u64) -> Self {
        Self {
            status_message,
            total_likes,
        }
    }

    fn line(&self) -> Line<'a> {
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![Span::styled(
            format!(" ⚡ {APP_TITLE}"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(separator.clone());
            spans.push(Span::raw(self.status_message));
        }
        if self.total_likes > 0 {
            spans.push(separator);
            let noun = if self.total_likes == 1 { "aplauso" } else { "aplausos" };
            spans.push(Span::styled(
                format!("{} {}", self.total_likes, noun),
                Style::default().fg(Color::Green),
            ));
        }
        Line::from(spans)
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bar = Paragraph::new(self.line()).style(Style::default().bg(Color::Black));
        frame.render_widget(bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(header: &mut Header<'_>) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_header_default_no_status() {
        let text = render(&mut Header::new("", 0));
        assert!(text.contains(APP_TITLE));
        assert!(!text.contains('│'));
    }

    #[test]
    fn test_header_with_status_message() {
        let text = render(&mut Header::new("Comentário publicado", 0));
        assert!(text.contains(APP_TITLE));
        assert!(text.contains("Comentário publicado"));
        assert!(!text.contains("aplauso"));
    }

    #[test]
    fn test_header_with_likes() {
        assert!(render(&mut Header::new("", 1)).contains("1 aplauso"));
        assert!(render(&mut Header::new("ok", 4)).contains("4 aplausos"));
    }
}
