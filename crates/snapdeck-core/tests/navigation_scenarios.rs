use std::collections::HashMap;
use std::time::Duration;

use snapdeck_core::config::{AnimationConfig, NavigationConfig};
use snapdeck_core::{
    AnimationSequencer, Completer, Completion, Deck, DropReason, ElementId, InputAdapters,
    IntersectionTracker, MotionProvider, NavKey, NavOutcome, NavState, NavigationController,
    Pose, ReducedMotion, RevealState, Timeline, Viewport,
};

/// Motion provider that applies timelines instantly when asked to
#[derive(Default)]
struct FakeStage {
    poses: HashMap<ElementId, Pose>,
    pending: Vec<(Timeline, Completer)>,
    mutations: usize,
}

impl MotionProvider for FakeStage {
    fn set(&mut self, targets: &[ElementId], pose: Pose) {
        self.mutations += 1;
        for id in targets {
            self.poses.insert(*id, pose);
        }
    }

    fn play(&mut self, timeline: Timeline) -> Completion {
        self.mutations += 1;
        let (completer, completion) = Completion::channel();
        self.pending.push((timeline, completer));
        completion
    }
}

impl FakeStage {
    fn finish(&mut self) {
        for (timeline, completer) in self.pending.drain(..) {
            for tween in timeline.tweens() {
                for id in &tween.targets {
                    self.poses.insert(*id, tween.to);
                }
            }
            completer.complete();
        }
    }

    fn pose(&self, id: ElementId) -> Pose {
        self.poses.get(&id).copied().unwrap_or_default()
    }
}

#[derive(Default)]
struct FakeViewport {
    scrolls: Vec<usize>,
}

impl Viewport for FakeViewport {
    fn scroll_to(&mut self, section: usize) {
        self.scrolls.push(section);
    }
}

const DECK: &str = r#"
[[section]]
title = "Intro"
[[section.item]]
kind = "fade-up"
text = "hello"

[[section]]
[[section.item]]
kind = "fade-up"
text = "one"
delay = 0.1
[[section.item]]
kind = "stagger"
children = ["a", "b"]

[[section]]
[[section.item]]
kind = "stagger"
children = ["c", "d", "e"]

[[section]]
[[section.item]]
kind = "fade-up"
text = "three"

[[section]]
[[section.item]]
kind = "text"
text = "the end"
"#;

fn build(reduced: bool) -> (Deck, NavigationController<FakeStage, FakeViewport>) {
    let deck = Deck::from_toml(DECK).unwrap();
    let sequencer = AnimationSequencer::new(AnimationConfig::default(), ReducedMotion::new(reduced));
    let mut nav = NavigationController::new(
        deck.descriptors(),
        &NavigationConfig::default(),
        sequencer,
        FakeStage::default(),
        FakeViewport::default(),
    )
    .unwrap();
    nav.start();
    (deck, nav)
}

fn elements(nav: &NavigationController<FakeStage, FakeViewport>, index: usize) -> Vec<ElementId> {
    nav.section(index).unwrap().animated_elements()
}

#[tokio::test(start_paused = true)]
async fn keyboard_down_moves_to_second_section() {
    let (_deck, mut nav) = build(false);
    let adapters = InputAdapters::new(&NavigationConfig::default());
    assert_eq!(nav.len(), 5);

    let response = adapters.key(NavKey::Down, &mut nav);
    assert!(response.default_prevented);
    assert_eq!(
        response.navigation,
        Some(NavOutcome::Started { from: 0, to: 1, epoch: 1 })
    );

    nav.motion_mut().finish();
    nav.settle_next().await;

    assert_eq!(nav.current_index(), 1);
    for id in elements(&nav, 1) {
        assert_eq!(nav.section(1).unwrap().state_of(id), Some(RevealState::Revealed));
        assert_eq!(nav.motion().pose(id), Pose::REVEALED);
    }
    assert!(nav.dots().is_active(1));
    assert_eq!(nav.dots().aria_current(1), "true");
    assert!(!nav.dots().is_active(0));
    assert_eq!(nav.dots().aria_current(0), "false");
    assert_eq!(nav.viewport().scrolls, vec![1]);
}

#[tokio::test(start_paused = true)]
async fn double_wheel_within_window_navigates_once() {
    let (_deck, mut nav) = build(false);
    let adapters = InputAdapters::new(&NavigationConfig::default());

    let first = adapters.wheel(15.0, &mut nav);
    assert!(first.navigation.is_some_and(|o| o.is_started()));

    tokio::time::advance(Duration::from_millis(200)).await;
    let second = adapters.wheel(15.0, &mut nav);
    assert!(second.default_prevented);
    assert_eq!(second.navigation, None);
    assert_eq!(nav.current_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn wheel_after_lock_release_is_still_suppressed() {
    let (_deck, mut nav) = build(false);
    let adapters = InputAdapters::new(&NavigationConfig::default());

    adapters.wheel(40.0, &mut nav);
    nav.motion_mut().finish();
    nav.settle_next().await;
    assert_eq!(nav.state(), NavState::Idle);

    // Suppression is a heuristic window, 450ms from the start of the transition
    let blocked = adapters.wheel(40.0, &mut nav);
    assert!(blocked.default_prevented);
    assert_eq!(nav.current_index(), 1);

    tokio::time::advance(Duration::from_millis(400)).await;
    let next = adapters.wheel(40.0, &mut nav);
    assert!(next.navigation.is_some_and(|o| o.is_started()));
    assert_eq!(nav.current_index(), 2);
}

#[tokio::test(start_paused = true)]
async fn small_wheel_delta_is_noise() {
    let (_deck, mut nav) = build(false);
    let adapters = InputAdapters::new(&NavigationConfig::default());

    let response = adapters.wheel(-9.5, &mut nav);
    assert!(!response.default_prevented);
    assert_eq!(response.navigation, None);
    assert_eq!(nav.current_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn short_swipe_does_not_navigate() {
    let (_deck, mut nav) = build(false);
    let mut adapters = InputAdapters::new(&NavigationConfig::default());

    adapters.touch_start(300.0);
    let response = adapters.touch_end(270.0, &mut nav);
    assert_eq!(response.navigation, None);
    assert_eq!(nav.current_index(), 0);
    assert_eq!(nav.state(), NavState::Idle);
}

#[tokio::test(start_paused = true)]
async fn long_swipe_up_advances_and_blocks_touch_move() {
    let (_deck, mut nav) = build(false);
    let mut adapters = InputAdapters::new(&NavigationConfig::default());

    adapters.touch_start(300.0);
    let response = adapters.touch_end(200.0, &mut nav);
    assert!(response.navigation.is_some_and(|o| o.is_started()));
    assert_eq!(nav.current_index(), 1);

    assert!(adapters.touch_move(&nav).default_prevented);

    adapters.touch_start(100.0);
    let back = adapters.touch_end(180.0, &mut nav);
    assert_eq!(back.navigation, Some(NavOutcome::Dropped(DropReason::Transitioning)));
}

#[tokio::test(start_paused = true)]
async fn visibility_overrides_stale_lock() {
    let (_deck, mut nav) = build(false);
    nav.request_go_to(1);
    assert!(nav.is_transitioning());

    let mut tracker = IntersectionTracker::new(nav.len(), 0.6);
    let changes = tracker.observe_all(&[0.0, 0.0, 0.0, 0.9, 0.1]);
    for change in changes {
        nav.on_visibility(change);
    }

    assert_eq!(nav.current_index(), 3);
    assert_eq!(nav.state(), NavState::Idle);
    assert!(!nav.is_suppressed());
    assert!(nav.dots().is_active(3));
    assert!(nav.section(3).unwrap().is_revealed());
}

#[tokio::test(start_paused = true)]
async fn requests_during_transition_never_move_the_index() {
    let (_deck, mut nav) = build(false);
    nav.request_go_to(2);

    for target in [-100, 0, 1, 3, 4, 1_000_000] {
        assert_eq!(
            nav.request_go_to(target),
            NavOutcome::Dropped(DropReason::Transitioning)
        );
        assert_eq!(nav.current_index(), 2);
    }

    nav.motion_mut().finish();
    nav.settle_next().await;
    assert_eq!(nav.current_index(), 2);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_targets_are_clamped() {
    for (target, expected) in [(-5, 0), (0, 0), (3, 3), (4, 4), (5, 4), (isize::MIN, 0), (isize::MAX, 4)] {
        let (_deck, mut nav) = build(false);
        nav.request_go_to(target);
        assert_eq!(nav.current_index(), expected, "target {}", target);
    }
}

#[tokio::test(start_paused = true)]
async fn hidden_revealed_hidden_round_trip() {
    let (_deck, mut nav) = build(false);
    let adapters = InputAdapters::new(&NavigationConfig::default());

    assert!(nav.section(2).unwrap().is_hidden());
    adapters.click(2, &mut nav);
    nav.motion_mut().finish();
    nav.settle_next().await;
    assert!(nav.section(2).unwrap().is_revealed());

    nav.on_section_hidden(2);
    assert!(nav.section(2).unwrap().is_hidden());
    for id in elements(&nav, 2) {
        assert_eq!(nav.motion().pose(id), Pose::hidden(12.0));
    }

    // Revisit replays the animation
    tokio::time::advance(Duration::from_millis(500)).await;
    adapters.click(0, &mut nav);
    nav.motion_mut().finish();
    nav.settle_next().await;
    tokio::time::advance(Duration::from_millis(500)).await;
    adapters.click(2, &mut nav);
    nav.motion_mut().finish();
    nav.settle_next().await;
    assert!(nav.section(2).unwrap().is_revealed());
}

#[tokio::test(start_paused = true)]
async fn reduced_motion_never_touches_visuals() {
    let (_deck, mut nav) = build(true);
    let mut adapters = InputAdapters::new(&NavigationConfig::default());

    let response = adapters.key(NavKey::End, &mut nav);
    assert!(response.navigation.is_some_and(|o| o.is_started()));
    assert_eq!(nav.current_index(), 4);
    assert!(nav.dots().is_active(4));

    nav.on_section_hidden(0);
    nav.sync_from_visibility(2);
    nav.settle_next().await;

    assert_eq!(nav.motion().mutations, 0);
    assert!(nav.sections().iter().all(|s| s.is_revealed()));

    // Wheel and touch are left to native scrolling
    let wheel = adapters.wheel(120.0, &mut nav);
    assert_eq!(wheel, Default::default());
    adapters.touch_start(400.0);
    assert_eq!(adapters.touch_end(0.0, &mut nav).navigation, None);
}

#[tokio::test(start_paused = true)]
async fn home_and_end_jump_to_edges() {
    let (_deck, mut nav) = build(false);
    let adapters = InputAdapters::new(&NavigationConfig::default());

    adapters.key(NavKey::End, &mut nav);
    assert_eq!(nav.current_index(), 4);
    nav.motion_mut().finish();
    nav.settle_next().await;
    tokio::time::advance(Duration::from_millis(500)).await;

    adapters.key(NavKey::Home, &mut nav);
    assert_eq!(nav.current_index(), 0);
}
