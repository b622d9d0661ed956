//! Navigation state machine.
//!
//! [`NavigationController`] owns the current section index, the transition
//! lock, the wheel suppression window and the dot indicators. It is mutated
//! through `&mut self` from the host's event loop only. Background tasks never
//! touch it: they wait for an entrance animation plus the settle delay and
//! post a [`Settled`] message that the host feeds back with
//! [`NavigationController::drain_settled`] or
//! [`NavigationController::settle_next`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::NavigationConfig;
use crate::motion::{Completion, MotionProvider, ReducedMotion};
use crate::section::Section;
use crate::sequencer::AnimationSequencer;
use crate::visibility::VisibilityChange;
use crate::{Error, Result};

/// Capability the host supplies to bring a section into view
pub trait Viewport {
    /// Start a smooth scroll so that `section` fills the viewport
    fn scroll_to(&mut self, section: usize);
}

/// A navigation request, relative or absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    /// A transition is in flight; `epoch` identifies it
    Transitioning { epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Transitioning,
    Suppressed,
}

/// What happened to a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Started { from: usize, to: usize, epoch: u64 },
    /// Debounced; nothing changed
    Dropped(DropReason),
}

impl NavOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, NavOutcome::Started { .. })
    }
}

/// Posted once a transition's animation and settle delay have elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub epoch: u64,
    /// The animation did not finish before `transition_timeout_ms`
    pub timed_out: bool,
}

/// One indicator per section, reflecting the current index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotIndicatorSet {
    len: usize,
    active: usize,
}

impl DotIndicatorSet {
    pub fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.active
    }

    /// Value of the `aria-current` attribute for dot `index`
    pub fn aria_current(&self, index: usize) -> &'static str {
        if self.is_active(index) {
            "true"
        } else {
            "false"
        }
    }

    fn set_active(&mut self, index: usize) {
        self.active = index.min(self.len.saturating_sub(1));
    }
}

pub struct NavigationController<M, V> {
    sections: Vec<Section>,
    current: usize,
    state: NavState,
    suppressed_until: Option<Instant>,
    dots: DotIndicatorSet,
    sequencer: AnimationSequencer,
    motion: M,
    viewport: V,
    epoch: u64,
    suppression: Duration,
    settle: Duration,
    transition_timeout: Option<Duration>,
    settle_tx: mpsc::UnboundedSender<Settled>,
    settle_rx: mpsc::UnboundedReceiver<Settled>,
}

impl<M: MotionProvider, V: Viewport> NavigationController<M, V> {
    /// Build a controller over a fixed, non-empty sequence of sections.
    ///
    /// Unless motion is reduced, every animated child starts in the hidden
    /// pose so that the first visit of each section animates in.
    pub fn new(
        sections: Vec<Section>,
        config: &NavigationConfig,
        sequencer: AnimationSequencer,
        motion: M,
        viewport: V,
    ) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::EmptyDeck);
        }
        if let Some(pos) = sections.iter().enumerate().position(|(i, s)| s.index() != i) {
            return Err(Error::Deck(format!(
                "section at position {} carries index {}",
                pos,
                sections[pos].index()
            )));
        }

        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            dots: DotIndicatorSet::new(sections.len()),
            sections,
            current: 0,
            state: NavState::Idle,
            suppressed_until: None,
            sequencer,
            motion,
            viewport,
            epoch: 0,
            suppression: config.suppression(),
            settle: config.settle(),
            transition_timeout: config.transition_timeout(),
            settle_tx,
            settle_rx,
        };

        for section in controller.sections.iter_mut() {
            controller.sequencer.reset(section, &mut controller.motion);
        }

        Ok(controller)
    }

    /// Initial activation: mark the first dot and animate the first section
    pub fn start(&mut self) {
        self.dots.set_active(0);
        if self.reduced_motion().is_reduced() {
            return;
        }
        let first = &mut self.sections[0];
        self.sequencer.reset(first, &mut self.motion);
        // Startup does not take the lock; nobody waits on this animation
        let _ = self.sequencer.play(first, &mut self.motion);
    }

    /// Ask for section `target`. Out-of-range targets are clamped.
    ///
    /// The settle wait runs as a task on the current tokio runtime. Called
    /// outside a runtime, the transition settles on the next
    /// [`drain_settled`](Self::drain_settled) without waiting for the
    /// animation.
    pub fn request_go_to(&mut self, target: isize) -> NavOutcome {
        if let NavState::Transitioning { epoch } = self.state {
            debug!(target, epoch, "Navigation dropped: transition in progress");
            return NavOutcome::Dropped(DropReason::Transitioning);
        }

        let now = Instant::now();
        if self.is_suppressed_at(now) {
            debug!(target, "Navigation dropped: input suppression window active");
            return NavOutcome::Dropped(DropReason::Suppressed);
        }

        let last = (self.sections.len() - 1) as isize;
        let to = target.clamp(0, last) as usize;
        let from = self.current;

        self.epoch += 1;
        let epoch = self.epoch;
        self.current = to;
        self.state = NavState::Transitioning { epoch };
        self.viewport.scroll_to(to);
        self.dots.set_active(to);
        self.suppressed_until = Some(now + self.suppression);

        let completion = self.sequencer.play(&mut self.sections[to], &mut self.motion);
        self.spawn_settle(epoch, completion);

        info!(from, to, epoch, "Transition started");
        NavOutcome::Started { from, to, epoch }
    }

    pub fn navigate(&mut self, intent: NavIntent) -> NavOutcome {
        let current = self.current as isize;
        let target = match intent {
            NavIntent::Next => current + 1,
            NavIntent::Previous => current - 1,
            NavIntent::First => 0,
            NavIntent::Last => self.sections.len() as isize - 1,
            NavIntent::GoTo(index) => isize::try_from(index).unwrap_or(isize::MAX),
        };
        self.request_go_to(target)
    }

    pub fn next(&mut self) -> NavOutcome {
        self.navigate(NavIntent::Next)
    }

    pub fn previous(&mut self) -> NavOutcome {
        self.navigate(NavIntent::Previous)
    }

    pub fn first(&mut self) -> NavOutcome {
        self.navigate(NavIntent::First)
    }

    pub fn last(&mut self) -> NavOutcome {
        self.navigate(NavIntent::Last)
    }

    /// Recovery path for scrolling the controller did not initiate.
    ///
    /// Forces the index to `observed`, clears the lock and the suppression
    /// window, and plays the entrance animation unless the section is still
    /// revealed.
    pub fn sync_from_visibility(&mut self, observed: usize) {
        if observed >= self.sections.len() {
            warn!(observed, len = self.sections.len(), "Ignoring visibility report for unknown section");
            return;
        }

        if self.current != observed || self.state != NavState::Idle {
            debug!(from = self.current, to = observed, state = ?self.state, "Resyncing from visibility");
        }
        self.current = observed;
        self.dots.set_active(observed);
        self.state = NavState::Idle;
        self.suppressed_until = None;

        let section = &mut self.sections[observed];
        if section.is_revealed() {
            return;
        }
        let _ = self.sequencer.play(section, &mut self.motion);
    }

    /// A section left the viewport: hide its children for replay
    pub fn on_section_hidden(&mut self, index: usize) {
        if let Some(section) = self.sections.get_mut(index) {
            self.sequencer.reset(section, &mut self.motion);
        }
    }

    /// Dispatch a visibility notification
    pub fn on_visibility(&mut self, change: VisibilityChange) {
        match change {
            VisibilityChange::Entered(index) => self.sync_from_visibility(index),
            VisibilityChange::Left(index) => self.on_section_hidden(index),
        }
    }

    /// Apply every settle message that has arrived. Returns true if the lock
    /// was released.
    pub fn drain_settled(&mut self) -> bool {
        let mut released = false;
        while let Ok(settled) = self.settle_rx.try_recv() {
            released |= self.apply_settled(settled);
        }
        released
    }

    /// Wait for the next settle message and apply it
    pub async fn settle_next(&mut self) -> Option<Settled> {
        let settled = self.settle_rx.recv().await?;
        self.apply_settled(settled);
        Some(settled)
    }

    fn apply_settled(&mut self, settled: Settled) -> bool {
        match self.state {
            NavState::Transitioning { epoch } if epoch == settled.epoch => {
                self.state = NavState::Idle;
                debug!(epoch, timed_out = settled.timed_out, "Transition settled");
                true
            }
            _ => {
                debug!(epoch = settled.epoch, state = ?self.state, "Ignoring stale settle");
                false
            }
        }
    }

    fn spawn_settle(&self, epoch: u64, completion: Completion) {
        let tx = self.settle_tx.clone();
        let settle = self.settle;
        let timeout = self.transition_timeout;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(epoch, "No async runtime to await the entrance animation, settling now");
            let _ = tx.send(Settled { epoch, timed_out: false });
            return;
        };

        runtime.spawn(async move {
            let timed_out = match timeout {
                Some(limit) => tokio::time::timeout(limit, completion).await.is_err(),
                None => {
                    completion.await;
                    false
                }
            };
            if timed_out {
                warn!(epoch, "Entrance animation did not finish in time, releasing lock");
            }
            tokio::time::sleep(settle).await;
            // Receiver lives as long as the controller
            let _ = tx.send(Settled { epoch, timed_out });
        });
    }

    fn is_suppressed_at(&self, now: Instant) -> bool {
        self.suppressed_until.is_some_and(|until| now < until)
    }

    /// Wheel input is currently being swallowed
    pub fn is_suppressed(&self) -> bool {
        self.is_suppressed_at(Instant::now())
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, NavState::Transitioning { .. })
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn dots(&self) -> &DotIndicatorSet {
        &self.dots
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn reduced_motion(&self) -> ReducedMotion {
        self.sequencer.reduced_motion()
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }
}
