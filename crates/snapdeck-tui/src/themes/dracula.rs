//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36), // Background
        bg1: Color::Rgb(0x21, 0x22, 0x2c), // Current Line (darker)
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2), // Foreground
        fg1: Color::Rgb(0xe9, 0xe9, 0xea),
        grey: Color::Rgb(0x62, 0x72, 0xa4), // Comment
        accent: Color::Rgb(0xbd, 0x93, 0xf9), // Purple
        info: Color::Rgb(0x8b, 0xe9, 0xfd),   // Cyan
    }
}
