//! Frame-driven tween engine backing the entrance animations

use std::collections::HashMap;
use std::time::Instant;

use snapdeck_core::{Completer, Completion, ElementId, EasingType, MotionProvider, Pose, Timeline};
use tracing::trace;

use crate::scroll::timing::segment_progress;
use crate::scroll::EasingTypeExt;

#[derive(Debug)]
struct Track {
    element: ElementId,
    /// Timeline time in seconds
    begin: f64,
    duration: f64,
    easing: EasingType,
    /// Captured when the track begins
    from: Option<Pose>,
    to: Pose,
    finished: bool,
}

#[derive(Debug)]
struct Running {
    started: Instant,
    tracks: Vec<Track>,
    completer: Option<Completer>,
}

impl Running {
    fn fire(&mut self) {
        if let Some(completer) = self.completer.take() {
            completer.complete();
        }
    }
}

/// Interpolates element poses once per frame.
///
/// Elements that were never touched render fully revealed.
#[derive(Debug, Default)]
pub struct TweenEngine {
    poses: HashMap<ElementId, Pose>,
    running: Vec<Running>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pose(&self, element: ElementId) -> Pose {
        self.poses.get(&element).copied().unwrap_or_default()
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    /// Advance every running timeline to `now`.
    ///
    /// Returns true while anything is still moving.
    pub fn update(&mut self, now: Instant) -> bool {
        let Self { poses, running } = self;

        for timeline in running.iter_mut() {
            let t = now.saturating_duration_since(timeline.started).as_secs_f64();
            for track in timeline.tracks.iter_mut().filter(|track| !track.finished) {
                if t < track.begin {
                    continue;
                }
                let from = *track
                    .from
                    .get_or_insert_with(|| poses.get(&track.element).copied().unwrap_or_default());
                let local = segment_progress(t, track.begin, track.duration);
                poses.insert(track.element, from.lerp(&track.to, track.easing.apply(local)));
                track.finished = local >= 1.0;
            }
            if timeline.tracks.iter().all(|track| track.finished) {
                timeline.fire();
            }
        }

        running.retain(|timeline| timeline.completer.is_some());
        !running.is_empty()
    }

    /// Drop tracks for `targets` from timelines already running
    fn supersede(&mut self, targets: &[ElementId]) {
        for timeline in self.running.iter_mut() {
            timeline.tracks.retain(|track| !targets.contains(&track.element));
            if timeline.tracks.is_empty() {
                timeline.fire();
            }
        }
        self.running.retain(|timeline| timeline.completer.is_some());
    }
}

impl MotionProvider for TweenEngine {
    /// Running tracks on `targets` are dropped so they cannot overwrite `pose`
    fn set(&mut self, targets: &[ElementId], pose: Pose) {
        self.supersede(targets);
        for element in targets {
            self.poses.insert(*element, pose);
        }
    }

    fn play(&mut self, timeline: Timeline) -> Completion {
        let mut tracks = Vec::new();
        for tween in timeline.into_tweens() {
            for (i, element) in tween.targets.iter().enumerate() {
                tracks.push(Track {
                    element: *element,
                    begin: tween.start_of(i),
                    duration: tween.duration,
                    easing: tween.easing,
                    from: None,
                    to: tween.to,
                    finished: false,
                });
            }
        }

        if tracks.is_empty() {
            return Completion::ready();
        }

        let targets: Vec<ElementId> = tracks.iter().map(|track| track.element).collect();
        self.supersede(&targets);

        trace!(tracks = tracks.len(), "Timeline started");
        let (completer, completion) = Completion::channel();
        self.running.push(Running {
            started: Instant::now(),
            tracks,
            completer: Some(completer),
        });
        completion
    }
}
