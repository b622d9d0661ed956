use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use snapdeck_core::NavIntent;

use crate::app::{App, Mode};
use crate::keymap::Keymap;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Navigate(NavIntent),
    /// Jump to the deck's "more" target
    More,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match app.mode {
        Mode::Help => match keymap.action_for(key) {
            Action::Quit => Action::Quit,
            // Any other key closes help
            _ => Action::ExitMode,
        },
        Mode::Normal => keymap.action_for(key),
    }
}

/// What a mouse event means for the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// One wheel notch; positive scrolls down
    Wheel(i32),
    /// Press on a dot indicator
    Dot(usize),
    /// Press on the "more" button
    More,
    /// Left button pressed on the section body, row in screen coordinates
    TouchStart(u16),
    TouchMove(u16),
    TouchEnd(u16),
    None,
}

/// Classify a mouse event against the hit areas of the last frame
pub fn handle_mouse_event(mouse: MouseEvent, dots: &[Rect], more: Option<Rect>) -> MouseAction {
    let at = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollDown => MouseAction::Wheel(1),
        MouseEventKind::ScrollUp => MouseAction::Wheel(-1),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = dots.iter().position(|area| area.contains(at)) {
                MouseAction::Dot(index)
            } else if more.is_some_and(|area| area.contains(at)) {
                MouseAction::More
            } else {
                MouseAction::TouchStart(mouse.row)
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => MouseAction::TouchMove(mouse.row),
        MouseEventKind::Up(MouseButton::Left) => MouseAction::TouchEnd(mouse.row),
        _ => MouseAction::None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 0, 0), &[], None),
            MouseAction::Wheel(1)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 0, 0), &[], None),
            MouseAction::Wheel(-1)
        );
    }

    #[test]
    fn test_press_hit_testing() {
        let dots = [Rect::new(78, 10, 1, 1), Rect::new(78, 12, 1, 1)];
        let more = Some(Rect::new(30, 20, 10, 1));

        let press = |column, row| {
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), column, row), &dots, more)
        };
        assert_eq!(press(78, 12), MouseAction::Dot(1));
        assert_eq!(press(35, 20), MouseAction::More);
        assert_eq!(press(5, 5), MouseAction::TouchStart(5));
    }

    #[test]
    fn test_drag_and_release() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 4), &[], None),
            MouseAction::TouchMove(4)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 3, 9), &[], None),
            MouseAction::TouchEnd(9)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 3, 9), &[], None),
            MouseAction::None
        );
    }
}
