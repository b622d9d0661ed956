pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod motion;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod viewport;
pub mod widgets;

pub use app::App;
pub use motion::TweenEngine;
pub use theme::Theme;
pub use themes::{available_themes, load_theme};
pub use viewport::SnapViewport;
