//! Motion Provider seam: poses, tweens, timelines and completions.
//!
//! The host implements [`MotionProvider`] to actually move pixels (or
//! terminal cells). The core only describes *what* should animate and waits
//! on the returned [`Completion`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::config::EasingType;
use crate::section::ElementId;

/// Process-wide reduced-motion flag, resolved once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReducedMotion(bool);

impl ReducedMotion {
    pub fn new(reduced: bool) -> Self {
        Self(reduced)
    }

    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.0
    }
}

/// Visual properties the entrance animation drives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// 0.0 = invisible, 1.0 = fully visible
    pub opacity: f64,
    /// Vertical offset from the resting position, positive is downwards
    pub offset_y: f64,
}

impl Pose {
    /// Fully visible at the resting position
    pub const REVEALED: Pose = Pose {
        opacity: 1.0,
        offset_y: 0.0,
    };

    /// Invisible and pushed down by `offset`
    pub fn hidden(offset: f64) -> Self {
        Self {
            opacity: 0.0,
            offset_y: offset,
        }
    }

    /// Interpolate towards `to` by factor `t` in [0, 1]
    pub fn lerp(&self, to: &Pose, t: f64) -> Pose {
        Pose {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            offset_y: self.offset_y + (to.offset_y - self.offset_y) * t,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::REVEALED
    }
}

/// One `to` tween inside a [`Timeline`]. Times are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub targets: Vec<ElementId>,
    pub to: Pose,
    /// Timeline time at which the tween is inserted
    pub position: f64,
    pub delay: f64,
    pub duration: f64,
    /// Offset between consecutive targets
    pub stagger: f64,
    pub easing: EasingType,
}

impl Tween {
    /// Timeline time at which the `i`-th target starts moving
    pub fn start_of(&self, i: usize) -> f64 {
        self.position + self.delay + self.stagger * i as f64
    }

    /// Timeline time at which the last target stops moving
    pub fn end(&self) -> f64 {
        match self.targets.len() {
            0 => self.position + self.delay,
            n => self.start_of(n - 1) + self.duration,
        }
    }
}

/// A composite of tweens with independent start positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn into_tweens(self) -> Vec<Tween> {
        self.tweens
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Total length in seconds
    pub fn duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }
}

/// Awaitable that resolves once an animation has finished.
///
/// If the provider drops its [`Completer`] without firing it, the completion
/// resolves as well; a discarded animation never holds the navigation lock.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<()>,
    done: bool,
}

/// Producer side of a [`Completion`]
#[derive(Debug)]
pub struct Completer {
    tx: oneshot::Sender<()>,
}

impl Completion {
    pub fn channel() -> (Completer, Completion) {
        let (tx, rx) = oneshot::channel();
        (Completer { tx }, Completion { rx, done: false })
    }

    /// A completion that has already resolved
    pub fn ready() -> Self {
        let (completer, completion) = Self::channel();
        completer.complete();
        completion
    }

    /// Non-blocking check
    pub fn is_done(&mut self) -> bool {
        if !self.done {
            self.done = !matches!(self.rx.try_recv(), Err(oneshot::error::TryRecvError::Empty));
        }
        self.done
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(());
        }
        // The receiver must not be polled again once it has resolved
        let poll = Pin::new(&mut this.rx).poll(cx).map(|_| ());
        this.done = poll.is_ready();
        poll
    }
}

impl Completer {
    pub fn complete(self) {
        // Receiver may be gone when nobody waits on the animation
        let _ = self.tx.send(());
    }
}

/// Capability the host supplies to animate elements
pub trait MotionProvider {
    /// Apply a pose immediately, cancelling nothing
    fn set(&mut self, targets: &[ElementId], pose: Pose);

    /// Start a timeline and return its completion
    fn play(&mut self, timeline: Timeline) -> Completion;
}
