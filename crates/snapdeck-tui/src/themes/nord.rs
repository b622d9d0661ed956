//! Nord theme
//! https://www.nordtheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        // Polar Night
        bg0: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        bg1: Color::Rgb(0x3b, 0x42, 0x52), // nord1
        // Snow Storm
        fg0: Color::Rgb(0xe5, 0xe9, 0xf0), // nord5
        fg1: Color::Rgb(0xec, 0xef, 0xf4), // nord6
        grey: Color::Rgb(0x4c, 0x56, 0x6a), // nord3
        // Frost
        accent: Color::Rgb(0x8f, 0xbc, 0xbb), // nord7
        info: Color::Rgb(0x88, 0xc0, 0xd0),   // nord8
    }
}
