//! Entrance animation planning.
//!
//! Single fade targets start at timeline time 0 with their own delay; every
//! stagger group starts slightly later and walks its children in order.

use tracing::debug;

use crate::config::AnimationConfig;
use crate::motion::{Completion, MotionProvider, Pose, ReducedMotion, Timeline, Tween};
use crate::section::{RevealState, Section};

/// Builds and plays section entrance animations
#[derive(Debug, Clone)]
pub struct AnimationSequencer {
    config: AnimationConfig,
    reduced_motion: ReducedMotion,
}

impl AnimationSequencer {
    pub fn new(config: AnimationConfig, reduced_motion: ReducedMotion) -> Self {
        Self {
            config,
            reduced_motion,
        }
    }

    pub fn reduced_motion(&self) -> ReducedMotion {
        self.reduced_motion
    }

    /// Pose applied to children before they animate in
    pub fn hidden_pose(&self) -> Pose {
        Pose::hidden(self.config.hidden_offset)
    }

    /// Compute the composite timeline for a section
    pub fn plan(&self, section: &Section) -> Timeline {
        let mut timeline = Timeline::new();

        for single in section.singles() {
            timeline.push(Tween {
                targets: vec![single.element],
                to: Pose::REVEALED,
                position: 0.0,
                delay: single.delay,
                duration: self.config.fade_duration,
                stagger: 0.0,
                easing: self.config.easing,
            });
        }

        for group in section.stagger_groups() {
            if group.children.is_empty() {
                continue;
            }
            timeline.push(Tween {
                targets: group.children.clone(),
                to: Pose::REVEALED,
                position: self.config.stagger_position,
                delay: 0.0,
                duration: self.config.stagger_duration,
                stagger: self.config.stagger_each,
                easing: self.config.easing,
            });
        }

        timeline
    }

    /// Play the entrance animation of `section`.
    ///
    /// Under reduced motion nothing is touched and the completion is already
    /// resolved. Otherwise every animated child is marked revealed.
    pub fn play<M: MotionProvider>(&self, section: &mut Section, motion: &mut M) -> Completion {
        if self.reduced_motion.is_reduced() {
            return Completion::ready();
        }

        let timeline = self.plan(section);
        if timeline.is_empty() {
            return Completion::ready();
        }

        debug!(
            section = section.index(),
            tweens = timeline.tweens().len(),
            duration = timeline.duration(),
            "Playing entrance animation"
        );
        section.mark_all(RevealState::Revealed);
        motion.play(timeline)
    }

    /// Put every animated child of `section` back into the hidden pose so
    /// the entrance animation replays on the next visit
    pub fn reset<M: MotionProvider>(&self, section: &mut Section, motion: &mut M) {
        if self.reduced_motion.is_reduced() || !section.has_animations() {
            return;
        }
        motion.set(&section.animated_elements(), self.hidden_pose());
        section.mark_all(RevealState::Hidden);
    }
}
