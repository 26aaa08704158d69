//! # Sidebar Component
//!
//! Profile summary of the signed-in user: a cover strip, the avatar, name,
//! role and the "Editar seu perfil" button. Static chrome; no events.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::core::feed::Author;
use crate::tui::component::Component;
use crate::tui::components::avatar::{AVATAR_HEIGHT, AVATAR_WIDTH, Avatar};

pub const SIDEBAR_WIDTH: u16 = 30;
pub const EDIT_PROFILE_LABEL: &str = "✎ Editar seu perfil";

pub struct Sidebar<'a> {
    pub profile: &'a Author,
}

impl<'a> Sidebar<'a> {
    pub fn new(profile: &'a Author) -> Self {
        Self { profile }
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [cover, avatar_row, name, role, _, divider, edit] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(AVATAR_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Block::new().style(Style::default().bg(Color::Green).fg(Color::Black)),
            cover,
        );

        let avatar_x = avatar_row.x + avatar_row.width.saturating_sub(AVATAR_WIDTH) / 2;
        let avatar_area = Rect::new(avatar_x, avatar_row.y, AVATAR_WIDTH.min(avatar_row.width), avatar_row.height);
        frame.render_widget(
            Avatar::new(&self.profile.avatar_url, &self.profile.name),
            avatar_area,
        );

        frame.render_widget(
            Paragraph::new(Span::styled(
                self.profile.name.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            name,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.profile.role.as_str(),
                Style::default().fg(Color::Gray),
            ))
            .alignment(Alignment::Center),
            role,
        );
        frame.render_widget(
            Block::new()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
            divider,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                EDIT_PROFILE_LABEL,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            edit,
        );
    }
}
