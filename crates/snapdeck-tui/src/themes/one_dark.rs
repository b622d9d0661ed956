//! One Dark theme
//! https://github.com/atom/atom/tree/master/packages/one-dark-syntax

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34), // bg
        bg1: Color::Rgb(0x21, 0x25, 0x2b), // bg-darker
        fg0: Color::Rgb(0xab, 0xb2, 0xbf), // fg
        fg1: Color::Rgb(0xd7, 0xda, 0xe0),
        grey: Color::Rgb(0x5c, 0x63, 0x70), // comment
        accent: Color::Rgb(0x61, 0xaf, 0xef), // blue
        info: Color::Rgb(0x56, 0xb6, 0xc2),   // cyan
    }
}
