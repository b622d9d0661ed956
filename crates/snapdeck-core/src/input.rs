//! Input adapters: wheel, keyboard, touch and click translated into
//! navigation requests.
//!
//! Adapters hold no navigation state of their own; the controller is passed
//! in by `&mut` for each event.

use tracing::trace;

use crate::config::NavigationConfig;
use crate::motion::MotionProvider;
use crate::navigation::{NavIntent, NavOutcome, NavigationController, Viewport};

/// Keys with a navigation meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    PageDown,
    Space,
    Up,
    PageUp,
    Home,
    End,
}

impl NavKey {
    pub fn intent(self) -> NavIntent {
        match self {
            NavKey::Down | NavKey::PageDown | NavKey::Space => NavIntent::Next,
            NavKey::Up | NavKey::PageUp => NavIntent::Previous,
            NavKey::Home => NavIntent::First,
            NavKey::End => NavIntent::Last,
        }
    }
}

/// How the host should treat the event after the adapter saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// The host must not apply its own default behavior (native scrolling)
    pub default_prevented: bool,
    /// Outcome of the navigation request, if one was issued
    pub navigation: Option<NavOutcome>,
}

impl InputResponse {
    fn pass() -> Self {
        Self::default()
    }

    fn prevent() -> Self {
        Self {
            default_prevented: true,
            navigation: None,
        }
    }

    fn navigated(outcome: NavOutcome, default_prevented: bool) -> Self {
        Self {
            default_prevented,
            navigation: Some(outcome),
        }
    }
}

/// Translates raw input into navigation requests
#[derive(Debug, Clone)]
pub struct InputAdapters {
    wheel_threshold: f64,
    swipe_threshold: f64,
    touch_start_y: f64,
}

impl InputAdapters {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            wheel_threshold: config.wheel_threshold,
            swipe_threshold: config.swipe_threshold,
            touch_start_y: 0.0,
        }
    }

    /// Wheel with vertical delta `delta_y` (positive scrolls down)
    pub fn wheel<M: MotionProvider, V: Viewport>(
        &self,
        delta_y: f64,
        nav: &mut NavigationController<M, V>,
    ) -> InputResponse {
        if nav.reduced_motion().is_reduced() {
            return InputResponse::pass();
        }
        if nav.is_suppressed() || nav.is_transitioning() {
            trace!(delta_y, "Wheel swallowed during transition");
            return InputResponse::prevent();
        }
        if delta_y.abs() < self.wheel_threshold {
            return InputResponse::pass();
        }

        let intent = if delta_y > 0.0 {
            NavIntent::Next
        } else {
            NavIntent::Previous
        };
        InputResponse::navigated(nav.navigate(intent), false)
    }

    pub fn key<M: MotionProvider, V: Viewport>(
        &self,
        key: NavKey,
        nav: &mut NavigationController<M, V>,
    ) -> InputResponse {
        self.intent(key.intent(), nav)
    }

    /// A key already resolved to an intent by a keymap
    pub fn intent<M: MotionProvider, V: Viewport>(
        &self,
        intent: NavIntent,
        nav: &mut NavigationController<M, V>,
    ) -> InputResponse {
        InputResponse::navigated(nav.navigate(intent), true)
    }

    pub fn touch_start(&mut self, y: f64) {
        self.touch_start_y = y;
    }

    pub fn touch_move<M: MotionProvider, V: Viewport>(
        &self,
        nav: &NavigationController<M, V>,
    ) -> InputResponse {
        if !nav.reduced_motion().is_reduced() && nav.is_transitioning() {
            InputResponse::prevent()
        } else {
            InputResponse::pass()
        }
    }

    /// Finger lifted at `y`. Swiping up (negative displacement) advances.
    pub fn touch_end<M: MotionProvider, V: Viewport>(
        &mut self,
        y: f64,
        nav: &mut NavigationController<M, V>,
    ) -> InputResponse {
        if nav.reduced_motion().is_reduced() {
            return InputResponse::pass();
        }
        let dy = y - self.touch_start_y;
        if dy.abs() <= self.swipe_threshold {
            return InputResponse::pass();
        }

        let intent = if dy < 0.0 {
            NavIntent::Next
        } else {
            NavIntent::Previous
        };
        InputResponse::navigated(nav.navigate(intent), false)
    }

    /// Dot indicator or "more" affordance
    pub fn click<M: MotionProvider, V: Viewport>(
        &self,
        index: usize,
        nav: &mut NavigationController<M, V>,
    ) -> InputResponse {
        InputResponse::navigated(nav.navigate(NavIntent::GoTo(index)), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_intents() {
        assert_eq!(NavKey::Down.intent(), NavIntent::Next);
        assert_eq!(NavKey::PageDown.intent(), NavIntent::Next);
        assert_eq!(NavKey::Space.intent(), NavIntent::Next);
        assert_eq!(NavKey::Up.intent(), NavIntent::Previous);
        assert_eq!(NavKey::PageUp.intent(), NavIntent::Previous);
        assert_eq!(NavKey::Home.intent(), NavIntent::First);
        assert_eq!(NavKey::End.intent(), NavIntent::Last);
    }

    #[test]
    fn test_thresholds_from_config() {
        let adapters = InputAdapters::new(&NavigationConfig::default());
        assert_eq!(adapters.wheel_threshold, 10.0);
        assert_eq!(adapters.swipe_threshold, 50.0);
    }
}
