//! Scroll animation controller for the section stack

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_u16, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Animates the viewport's row offset.
///
/// `scroll_to()` snaps to a section boundary; `scroll_by()` is the native,
/// line-based scrolling used when motion is reduced. Call `update()` every
/// frame to get the current offset.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_scroll: u16,
    /// Line deltas batched until the next update
    pending_delta: i32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
            pending_delta: 0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Pending work that needs a high frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final position once the running animation ends
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animating
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate from the current position to `target`.
    ///
    /// A running animation is replaced and the new one starts from wherever
    /// the viewport currently is.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() || self.current_scroll == target {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: Instant::now(),
            from: self.current_scroll,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Move by `delta` lines immediately (native scrolling)
    pub fn scroll_by(&mut self, delta: i32) {
        self.animation = None;
        self.pending_delta += delta;
    }

    /// One native scroll step down (positive) or up (negative)
    pub fn step(&mut self, direction: i32) {
        self.scroll_by(direction.signum() * self.config.scroll_lines.max(1) as i32);
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            self.current_scroll = (self.current_scroll as i32 + self.pending_delta)
                .clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;
        }

        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration));
                self.current_scroll = lerp_u16(anim.from, anim.to, t).min(max_scroll);
            }
        }

        self.current_scroll = self.current_scroll.min(max_scroll);
        self.current_scroll
    }
}
