//! Threshold-crossing detection for section visibility.
//!
//! The host reports how much of each section is inside the viewport; the
//! tracker turns those ratios into enter/leave notifications the way an
//! intersection observer with a single threshold does. The first report for
//! a section always produces a notification.

/// A section crossed the visibility threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered(usize),
    Left(usize),
}

impl VisibilityChange {
    pub fn index(&self) -> usize {
        match self {
            VisibilityChange::Entered(i) | VisibilityChange::Left(i) => *i,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntersectionTracker {
    threshold: f64,
    intersecting: Vec<Option<bool>>,
}

impl IntersectionTracker {
    pub fn new(section_count: usize, threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            intersecting: vec![None; section_count],
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record the visible ratio of one section
    pub fn observe(&mut self, index: usize, ratio: f64) -> Option<VisibilityChange> {
        let slot = self.intersecting.get_mut(index)?;
        let now = ratio >= self.threshold;
        if *slot == Some(now) {
            return None;
        }
        *slot = Some(now);
        Some(if now {
            VisibilityChange::Entered(index)
        } else {
            VisibilityChange::Left(index)
        })
    }

    /// Record ratios for every section, in index order.
    ///
    /// Leave notifications come before enter notifications so a host that
    /// applies them in order ends on the section that is now visible.
    pub fn observe_all(&mut self, ratios: &[f64]) -> Vec<VisibilityChange> {
        let mut changes: Vec<VisibilityChange> = ratios
            .iter()
            .enumerate()
            .filter_map(|(i, ratio)| self.observe(i, *ratio))
            .collect();
        changes.sort_by_key(|c| matches!(c, VisibilityChange::Entered(_)));
        changes
    }

    pub fn is_intersecting(&self, index: usize) -> bool {
        matches!(self.intersecting.get(index), Some(Some(true)))
    }

    /// Forget everything, so the next report of each section notifies again
    pub fn reset(&mut self) {
        self.intersecting.iter_mut().for_each(|s| *s = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_always_reports() {
        let mut tracker = IntersectionTracker::new(3, 0.6);
        assert_eq!(tracker.observe(0, 1.0), Some(VisibilityChange::Entered(0)));
        assert_eq!(tracker.observe(1, 0.0), Some(VisibilityChange::Left(1)));
        assert!(tracker.is_intersecting(0));
        assert!(!tracker.is_intersecting(1));
        assert!(!tracker.is_intersecting(2));
    }

    #[test]
    fn test_reports_only_crossings() {
        let mut tracker = IntersectionTracker::new(2, 0.6);
        tracker.observe(0, 1.0);
        assert_eq!(tracker.observe(0, 0.8), None);
        assert_eq!(tracker.observe(0, 0.59), Some(VisibilityChange::Left(0)));
        assert_eq!(tracker.observe(0, 0.3), None);
        assert_eq!(tracker.observe(0, 0.6), Some(VisibilityChange::Entered(0)));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut tracker = IntersectionTracker::new(1, 0.6);
        assert_eq!(tracker.observe(4, 1.0), None);
    }

    #[test]
    fn test_observe_all_orders_leaves_first() {
        let mut tracker = IntersectionTracker::new(2, 0.6);
        tracker.observe_all(&[1.0, 0.0]);
        let changes = tracker.observe_all(&[0.3, 0.7]);
        assert_eq!(
            changes,
            vec![VisibilityChange::Left(0), VisibilityChange::Entered(1)]
        );
    }

    #[test]
    fn test_reset_reports_again() {
        let mut tracker = IntersectionTracker::new(1, 0.6);
        tracker.observe(0, 1.0);
        tracker.reset();
        assert_eq!(tracker.observe(0, 1.0), Some(VisibilityChange::Entered(0)));
    }
}
