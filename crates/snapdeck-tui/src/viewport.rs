//! Section stack viewport: every section is exactly one screen tall

use snapdeck_core::{ScrollConfig, Viewport};

use crate::scroll::ScrollAnimator;

/// Scroll position over a vertical stack of full-height sections
#[derive(Debug, Clone)]
pub struct SnapViewport {
    animator: ScrollAnimator,
    section_count: usize,
    section_height: u16,
}

impl SnapViewport {
    pub fn new(config: ScrollConfig, section_count: usize, section_height: u16) -> Self {
        Self {
            animator: ScrollAnimator::new(config),
            section_count,
            section_height: section_height.max(1),
        }
    }

    pub fn section_height(&self) -> u16 {
        self.section_height
    }

    /// Rows scrolled past the top of the first section
    pub fn offset(&self) -> u16 {
        self.animator.current_scroll()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.needs_update()
    }

    pub fn max_scroll(&self) -> u16 {
        let rows = self.section_count.saturating_sub(1) as u64 * self.section_height as u64;
        rows.min(u16::MAX as u64) as u16
    }

    /// Row at which section `index` starts
    pub fn section_top(&self, index: usize) -> u16 {
        (index as u64 * self.section_height as u64).min(u16::MAX as u64) as u16
    }

    /// Native line scrolling, used when entrance motion is reduced
    pub fn scroll_lines(&mut self, direction: i32) {
        self.animator.step(direction);
    }

    /// Native drag scrolling by whole rows
    pub fn scroll_rows(&mut self, rows: i32) {
        self.animator.scroll_by(rows);
    }

    /// Advance the scroll animation; returns the current offset
    pub fn update(&mut self) -> u16 {
        let max = self.max_scroll();
        self.animator.update(max)
    }

    /// Terminal height changed. Keeps the same relative position.
    pub fn resize(&mut self, section_height: u16) {
        let section_height = section_height.max(1);
        if section_height == self.section_height {
            return;
        }

        let old = self.section_height as f64;
        let animating = self.animator.is_animating();
        let target = (self.animator.target_scroll() as f64 / old).round() as usize;
        let position = self.animator.current_scroll() as f64 / old;

        self.section_height = section_height;
        let max = self.max_scroll();
        self.animator
            .set_scroll(((position * section_height as f64).round() as u16).min(max));
        if animating {
            self.animator.scroll_to(self.section_top(target), max);
        }
    }

    /// Fraction of each section currently inside the viewport
    pub fn visibility_ratios(&self) -> Vec<f64> {
        let height = self.section_height as f64;
        let top = self.offset() as f64;
        let bottom = top + height;

        (0..self.section_count)
            .map(|i| {
                let start = i as f64 * height;
                let end = start + height;
                let overlap = end.min(bottom) - start.max(top);
                (overlap.max(0.0) / height).clamp(0.0, 1.0)
            })
            .collect()
    }
}

impl Viewport for SnapViewport {
    fn scroll_to(&mut self, section: usize) {
        let index = section.min(self.section_count.saturating_sub(1));
        let max = self.max_scroll();
        self.animator.scroll_to(self.section_top(index), max);
    }
}
