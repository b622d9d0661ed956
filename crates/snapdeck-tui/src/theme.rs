use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey: Color,

    // Semantic colors
    pub accent: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
        }
    }
}

/// Mix `fg` over `bg` at `opacity` in [0, 1].
///
/// Non-RGB colors cannot be mixed and switch over at half opacity.
pub fn blend(bg: Color, fg: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (bg, fg) {
        (Color::Rgb(br, bg_, bb), Color::Rgb(fr, fg_, fb)) => {
            let mix = |b: u8, f: u8| (b as f64 + (f as f64 - b as f64) * opacity).round() as u8;
            Color::Rgb(mix(br, fr), mix(bg_, fg_), mix(bb, fb))
        }
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}
