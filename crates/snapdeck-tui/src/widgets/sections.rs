use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use snapdeck_core::deck::{Block as ContentBlock, SectionContent};
use snapdeck_core::{ElementId, Pose};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::theme::blend;

/// Pose offsets are in pixels; one terminal row counts as this many
const PIXELS_PER_ROW: f64 = 6.0;
const MAX_TEXT_WIDTH: u16 = 72;
/// Columns kept free on the right for the dot indicators
const DOT_GUTTER: u16 = 6;
const MORE_LABEL: &str = "[ more ↓ ]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Title,
    Body,
    Item,
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
struct LayoutLine {
    text: String,
    kind: LineKind,
    element: Option<ElementId>,
}

impl LayoutLine {
    fn blank() -> Self {
        Self {
            text: String::new(),
            kind: LineKind::Blank,
            element: None,
        }
    }
}

/// Renders the stacked sections at the viewport's scroll offset
pub struct SectionsWidget;

impl SectionsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let viewport = app.nav.viewport();
        let height = viewport.section_height() as i32;
        let offset = viewport.offset() as i32;
        let text_width = area
            .width
            .saturating_sub(DOT_GUTTER * 2)
            .min(MAX_TEXT_WIDTH)
            .max(1);
        let text_x = area.x + (area.width.saturating_sub(text_width)) / 2;

        let mut more_area = None;
        for (index, content) in app.deck.sections.iter().enumerate() {
            let top = area.y as i32 + viewport.section_top(index) as i32 - offset;
            if top >= area.bottom() as i32 || top + height <= area.y as i32 {
                continue;
            }

            // Rows this section may paint into
            let clip_top = top.max(area.y as i32);
            let clip_bottom = (top + height).min(area.bottom() as i32);

            let lines = layout_section(content, text_width);
            let first = top + (height - lines.len() as i32).max(0) / 2;

            for (i, line) in lines.iter().enumerate() {
                if line.kind == LineKind::Blank {
                    continue;
                }
                let pose = line
                    .element
                    .map(|id| app.nav.motion().pose(id))
                    .unwrap_or(Pose::REVEALED);
                if pose.opacity <= 0.01 {
                    continue;
                }

                let row = first + i as i32 + (pose.offset_y / PIXELS_PER_ROW).round() as i32;
                if row < clip_top || row >= clip_bottom {
                    continue;
                }

                let base = match line.kind {
                    LineKind::Title => theme.fg1,
                    LineKind::Item => theme.info,
                    _ => theme.fg0,
                };
                let mut style = Style::default()
                    .fg(blend(theme.bg0, base, pose.opacity))
                    .bg(theme.bg0);
                if line.kind == LineKind::Title {
                    style = style.add_modifier(Modifier::BOLD);
                }

                let rect = Rect::new(text_x, row as u16, text_width, 1);
                frame.render_widget(
                    Paragraph::new(Line::styled(line.text.as_str(), style))
                        .alignment(Alignment::Center),
                    rect,
                );
            }

            if index == 0 && app.deck.more_target != 0 && height >= 4 {
                let row = top + height - 2;
                if row >= clip_top && row < clip_bottom {
                    let width = (MORE_LABEL.width() as u16).min(area.width);
                    let rect = Rect::new(
                        area.x + (area.width.saturating_sub(width)) / 2,
                        row as u16,
                        width,
                        1,
                    );
                    frame.render_widget(
                        Paragraph::new(Line::styled(
                            MORE_LABEL,
                            Style::default()
                                .fg(theme.accent)
                                .bg(theme.bg0)
                                .add_modifier(Modifier::BOLD),
                        )),
                        rect,
                    );
                    more_area = Some(rect);
                }
            }
        }

        app.more_area = more_area;
    }
}

/// Break a section into display lines of at most `width` columns
fn layout_section(content: &SectionContent, width: u16) -> Vec<LayoutLine> {
    let width = width as usize;
    let mut lines = Vec::new();

    let push_wrapped =
        |lines: &mut Vec<LayoutLine>, text: &str, kind: LineKind, element: Option<ElementId>| {
            lines.extend(wrap(text, width).into_iter().map(|text| LayoutLine {
                text,
                kind,
                element,
            }));
        };

    if let Some(title) = &content.title {
        push_wrapped(&mut lines, title, LineKind::Title, None);
        lines.push(LayoutLine::blank());
    }

    for (i, block) in content.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(LayoutLine::blank());
        }
        match block {
            ContentBlock::Text(text) => push_wrapped(&mut lines, text, LineKind::Body, None),
            ContentBlock::Fade { element, text, .. } => {
                push_wrapped(&mut lines, text, LineKind::Body, Some(*element))
            }
            ContentBlock::Stagger { children } => {
                for (element, text) in children {
                    push_wrapped(&mut lines, &format!("• {}", text), LineKind::Item, Some(*element));
                }
            }
        }
    }

    lines
}

/// Greedy word wrap by display width. Words wider than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!line.is_empty());

            if line_width + gap + word_width <= width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                continue;
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if line_width + w > width && !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += w;
            }
        }

        out.push(line);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use snapdeck_core::Deck;

    use super::*;

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_wide_chars() {
        assert_eq!(wrap("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn test_layout_assigns_elements() {
        let deck = Deck::from_toml(
            r#"
            [[section]]
            title = "Title"
            [[section.item]]
            kind = "text"
            text = "static"
            [[section.item]]
            kind = "stagger"
            children = ["a", "b"]
            "#,
        )
        .unwrap();

        let lines = layout_section(&deck.sections[0], 40);
        let kinds: Vec<LineKind> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Title,
                LineKind::Blank,
                LineKind::Body,
                LineKind::Blank,
                LineKind::Item,
                LineKind::Item
            ]
        );
        assert_eq!(lines[2].element, None);
        assert_eq!(lines[4].element, Some(ElementId(0)));
        assert_eq!(lines[5].text, "• b");
    }
}
