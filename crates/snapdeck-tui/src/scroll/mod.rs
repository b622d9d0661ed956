//! Smooth viewport scrolling for the section stack
//!
//! # Layers
//!
//! - `easing` - Pure easing functions (quadratic, cubic, quintic, exponential)
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `config` - Duration and smoothness helpers over `ScrollConfig`
//! - `animation` - Scroll animator combining the above
//!
//! # Usage
//!
//! ```ignore
//! use snapdeck_tui::scroll::{ScrollAnimator, ScrollConfig};
//!
//! let mut animator = ScrollAnimator::new(ScrollConfig::default());
//!
//! // Snap to the third section of a 40-row viewport
//! animator.scroll_to(80, max_scroll);
//!
//! // In the frame loop
//! let offset = animator.update(max_scroll);
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
