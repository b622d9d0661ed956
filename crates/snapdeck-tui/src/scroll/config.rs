//! Helpers over the scroll configuration from snapdeck-core

use std::time::Duration;

pub use snapdeck_core::{EasingType, ScrollConfig};

pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Whether a section snap should animate at all
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_snaps() {
        let config = ScrollConfig {
            animation_duration_ms: 0,
            ..Default::default()
        };
        assert!(!config.is_smooth());
        assert_eq!(config.animation_duration(), Duration::ZERO);
    }

    #[test]
    fn test_disabled_snaps() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        assert!(!config.is_smooth());
        assert!(ScrollConfig::default().is_smooth());
    }
}
