use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Style::default().bg(theme.bg1);

        let mode_str = match app.mode {
            Mode::Normal if app.nav.is_transitioning() => "MOVING",
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let position = format!(
            " {}/{} ",
            app.nav.current_index() + 1,
            app.nav.len()
        );

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => {
                let deck = app.deck.title.as_deref().unwrap_or("snapdeck");
                match app.current_title() {
                    Some(title) => format!(" {} | {}", deck, title),
                    None => format!(" {}", deck),
                }
            }
        };

        let help_hint = " j/k:move g/G:ends m:more ?:help q:quit ";
        let used = mode_str.width() + 2 + position.width() + status_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", mode_str),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(position, bar.fg(theme.fg1)),
            Span::styled(status_text, bar.fg(theme.fg0)),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(theme.grey)),
        ]);

        frame.render_widget(Paragraph::new(line).style(bar), area);
    }
}
