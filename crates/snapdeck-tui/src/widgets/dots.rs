use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Rows between two dots
const DOT_SPACING: u16 = 2;
/// Distance of the dot column from the right edge
const DOT_MARGIN: u16 = 3;

/// Vertical dot indicator column, one dot per section
pub struct DotsWidget;

impl DotsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let areas = dot_layout(area, app.nav.dots().len());
        let dots = app.nav.dots();

        for (index, rect) in areas.iter().enumerate() {
            let (symbol, style) = if dots.is_active(index) {
                (
                    "●",
                    Style::default()
                        .fg(app.theme.accent)
                        .bg(app.theme.bg0)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", Style::default().fg(app.theme.grey).bg(app.theme.bg0))
            };
            frame.render_widget(Paragraph::new(Span::styled(symbol, style)), *rect);
        }

        app.dot_areas = areas;
    }
}

/// Hit areas of the dots, vertically centered along the right edge.
///
/// Dots are packed onto adjacent rows when the spaced column does not fit.
/// Only when even that overflows are dots dropped from the end.
pub fn dot_layout(area: Rect, count: usize) -> Vec<Rect> {
    if area.width < DOT_MARGIN || area.height == 0 || count == 0 {
        return Vec::new();
    }

    let height = area.height as usize;
    let spacing = if (count - 1) * (DOT_SPACING as usize) < height {
        DOT_SPACING
    } else {
        1
    };
    let count = count.min(height);
    let span = (count as u16 - 1) * spacing + 1;
    let top = area.y + (area.height - span) / 2;
    let x = area.right() - DOT_MARGIN;

    (0..count as u16)
        .map(|i| Rect::new(x, top + i * spacing, 1, 1))
        .collect()
}
