pub mod config;
pub mod deck;
pub mod error;
pub mod input;
pub mod motion;
pub mod navigation;
pub mod section;
pub mod sequencer;
pub mod visibility;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use deck::Deck;
pub use error::{Error, Result};
pub use input::{InputAdapters, InputResponse, NavKey};
pub use motion::{Completer, Completion, MotionProvider, Pose, ReducedMotion, Timeline, Tween};
pub use navigation::{
    DotIndicatorSet, DropReason, NavIntent, NavOutcome, NavState, NavigationController, Settled,
    Viewport,
};
pub use section::{ElementId, FadeTarget, RevealState, Section, StaggerGroup};
pub use sequencer::AnimationSequencer;
pub use visibility::{IntersectionTracker, VisibilityChange};
