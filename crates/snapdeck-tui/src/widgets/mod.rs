mod dots;
mod popup;
mod sections;
mod status_bar;

pub use dots::{dot_layout, DotsWidget};
pub use popup::PopupWidget;
pub use sections::SectionsWidget;
pub use status_bar::StatusBarWidget;
