use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("↓ PgDn Space j", "next section"),
    ("↑ PgUp k", "previous section"),
    ("Home g", "first section"),
    ("End G", "last section"),
    ("m", "jump to \"more\""),
    ("wheel / drag", "scroll or swipe"),
    ("click dot", "go to section"),
    ("?", "toggle this help"),
    ("q Esc", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key help overlay
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();

        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (HELP_ENTRIES.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line> = HELP_ENTRIES
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}  ", keys),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*what, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(
            Line::styled("press any key to close", Style::default().fg(theme.grey))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
