//! Gruvbox Material themes
//! https://github.com/sainnhe/gruvbox-material

use ratatui::style::Color;
use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme::default()
}

pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
        fg0: Color::Rgb(0x65, 0x47, 0x35),
        fg1: Color::Rgb(0x4f, 0x38, 0x29),
        grey: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0x4c, 0x7a, 0x5d),
        info: Color::Rgb(0x45, 0x70, 0x7a),
    }
}
