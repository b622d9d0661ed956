use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::Rect;
use snapdeck_core::{
    AnimationSequencer, AppConfig, Deck, InputAdapters, InputResponse, IntersectionTracker,
    NavOutcome, NavigationController, ReducedMotion,
};
use tracing::debug;

use crate::input::{Action, MouseAction};
use crate::motion::TweenEngine;
use crate::theme::Theme;
use crate::viewport::SnapViewport;

/// Controller type driven by the terminal host
pub type DeckNavigator = NavigationController<TweenEngine, SnapViewport>;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Presenting
    Normal,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Loaded deck content
    pub deck: Deck,
    pub theme: Theme,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    pub nav: DeckNavigator,
    pub adapters: InputAdapters,
    pub tracker: IntersectionTracker,
    /// Dot hit areas from the last frame
    pub dot_areas: Vec<Rect>,
    /// "More" button hit area from the last frame
    pub more_area: Option<Rect>,
    /// Row of the last press or drag on the section body
    drag_row: Option<u16>,
}

impl App {
    /// Build the app for a viewport of `body_height` rows.
    ///
    /// The reduced-motion preference is resolved here, once.
    pub fn new(config: Arc<AppConfig>, deck: Deck, theme: Theme, body_height: u16) -> Result<Self> {
        let reduced = config.motion.resolve();
        Self::with_reduced_motion(config, deck, theme, body_height, reduced)
    }

    pub fn with_reduced_motion(
        config: Arc<AppConfig>,
        deck: Deck,
        theme: Theme,
        body_height: u16,
        reduced: ReducedMotion,
    ) -> Result<Self> {
        let mut scroll = config.ui.scroll.clone();
        if reduced.is_reduced() {
            scroll.smooth_enabled = false;
        }

        let viewport = SnapViewport::new(scroll, deck.len(), body_height);
        let sequencer = AnimationSequencer::new(config.animation.clone(), reduced);
        let nav = NavigationController::new(
            deck.descriptors(),
            &config.navigation,
            sequencer,
            TweenEngine::new(),
            viewport,
        )?;

        Ok(Self {
            adapters: InputAdapters::new(&config.navigation),
            tracker: IntersectionTracker::new(deck.len(), config.navigation.visibility_threshold),
            config,
            deck,
            theme,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            nav,
            dot_areas: Vec::new(),
            more_area: None,
            drag_row: None,
        })
    }

    /// Activate the first section
    pub fn start(&mut self) {
        self.nav.start();
        if self.nav.reduced_motion().is_reduced() {
            self.set_status("Reduced motion: animations off");
        }
    }

    /// Advance animations and feed visibility back into the controller.
    ///
    /// Returns true while anything is moving.
    pub fn tick(&mut self) -> bool {
        self.nav.drain_settled();

        let tweening = self.nav.motion_mut().update(Instant::now());
        self.nav.viewport_mut().update();

        let ratios = self.nav.viewport().visibility_ratios();
        for change in self.tracker.observe_all(&ratios) {
            self.nav.on_visibility(change);
        }

        tweening || self.needs_fast_update()
    }

    /// Something is moving and wants the animation frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.nav.motion().is_animating()
            || self.nav.viewport().is_animating()
            || self.nav.is_transitioning()
    }

    /// The body area changed height
    pub fn set_viewport_height(&mut self, height: u16) {
        self.nav.viewport_mut().resize(height);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn current_title(&self) -> Option<&str> {
        self.deck
            .sections
            .get(self.nav.current_index())
            .and_then(|s| s.title.as_deref())
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Navigate(intent) => {
                let response = self.adapters.intent(intent, &mut self.nav);
                self.after_input(response);
            }
            Action::More => {
                let target = self.deck.more_target;
                let response = self.adapters.click(target, &mut self.nav);
                self.after_input(response);
            }
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Help => Mode::Normal,
                    Mode::Normal => Mode::Help,
                };
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, action: MouseAction) {
        match action {
            MouseAction::Wheel(notches) => {
                let delta = notches as f64 * self.config.ui.wheel_delta;
                let response = self.adapters.wheel(delta, &mut self.nav);
                if !response.default_prevented && response.navigation.is_none() {
                    self.nav.viewport_mut().scroll_lines(notches);
                }
                self.after_input(response);
            }
            MouseAction::Dot(index) => {
                let response = self.adapters.click(index, &mut self.nav);
                self.after_input(response);
            }
            MouseAction::More => {
                self.handle_action(Action::More);
            }
            MouseAction::TouchStart(row) => {
                let y = self.touch_units(row);
                self.drag_row = Some(row);
                self.adapters.touch_start(y);
            }
            MouseAction::TouchMove(row) => {
                let Some(last) = self.drag_row else { return };
                let response = self.adapters.touch_move(&self.nav);
                if !response.default_prevented && self.nav.reduced_motion().is_reduced() {
                    self.nav.viewport_mut().scroll_rows(last as i32 - row as i32);
                    self.drag_row = Some(row);
                }
            }
            MouseAction::TouchEnd(row) => {
                if self.drag_row.take().is_none() {
                    return;
                }
                let y = self.touch_units(row);
                let response = self.adapters.touch_end(y, &mut self.nav);
                self.after_input(response);
            }
            MouseAction::None => {}
        }
    }

    fn touch_units(&self, row: u16) -> f64 {
        row as f64 * self.config.ui.touch_row_units
    }

    fn after_input(&mut self, response: InputResponse) {
        if let Some(outcome) = response.navigation {
            debug!(?outcome, prevented = response.default_prevented, "Input handled");
            if let NavOutcome::Started { .. } = outcome {
                self.clear_status();
            }
        }
    }
}
