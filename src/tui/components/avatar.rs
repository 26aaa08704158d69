//! # Avatar Component
//!
//! A terminal can't show the profile image, so the avatar is a small box
//! holding the person's initials. Bordered avatars get a thick green frame
//! (the highlighted look used for post authors and the sidebar profile);
//! unbordered ones are a plain tile.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

/// Rendered size of every avatar.
pub const AVATAR_WIDTH: u16 = 6;
pub const AVATAR_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Avatar<'a> {
    /// Image URL, used for initials when `alt` is empty.
    pub src: &'a str,
    /// Person's name.
    pub alt: &'a str,
    pub has_border: bool,
}

impl<'a> Avatar<'a> {
    pub fn new(src: &'a str, alt: &'a str) -> Self {
        Self {
            src,
            alt,
            has_border: true,
        }
    }

    pub fn without_border(self) -> Self {
        Self {
            has_border: false,
            ..self
        }
    }

    /// Up to two uppercase initials: first and last word of the name, or the
    /// first two letters of the image's file stem.
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self.alt.split_whitespace().collect();
        match words.as_slice() {
            [] => {
                let stem = self
                    .src
                    .rsplit('/')
                    .next()
                    .and_then(|file| file.split('.').next())
                    .unwrap_or("");
                stem.chars().take(2).collect::<String>().to_uppercase()
            }
            [only] => only.chars().take(1).collect::<String>().to_uppercase(),
            [first, .., last] => first
                .chars()
                .take(1)
                .chain(last.chars().take(1))
                .collect::<String>()
                .to_uppercase(),
        }
    }
}

impl Widget for Avatar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Rect {
            width: area.width.min(AVATAR_WIDTH),
            height: area.height.min(AVATAR_HEIGHT),
            ..area
        };
        let text_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let paragraph = Paragraph::new(self.initials())
            .alignment(Alignment::Center)
            .style(text_style);

        if self.has_border {
            let block = Block::bordered()
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Green));
            paragraph.block(block).render(area, buf);
        } else {
            buf.set_style(area, Style::default().bg(Color::DarkGray));
            let middle = Rect {
                y: area.y + area.height / 2,
                height: 1.min(area.height),
                ..area
            };
            paragraph.render(middle, buf);
        }
    }
}
