//! Time calculation utilities for animations

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) from start time and duration
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    progress_at(start.elapsed(), duration)
}

/// Progress after `elapsed` of a `duration`, clamped to [0.0, 1.0]
#[inline]
pub fn progress_at(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Progress of a segment `[begin, begin + length)` at time `t`, all in seconds
#[inline]
pub fn segment_progress(t: f64, begin: f64, length: f64) -> f64 {
    if t < begin {
        0.0
    } else if length <= 0.0 {
        1.0
    } else {
        ((t - begin) / length).clamp(0.0, 1.0)
    }
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Instant, duration: Duration) -> bool {
    start.elapsed() >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (scroll positions)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_u16_downwards() {
        assert_eq!(lerp_u16(80, 40, 0.5), 60);
        assert_eq!(lerp_u16(80, 40, 1.0), 40);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Instant::now(), Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_segment_progress() {
        assert_eq!(segment_progress(0.0, 0.05, 0.45), 0.0);
        assert!((segment_progress(0.275, 0.05, 0.45) - 0.5).abs() < 1e-9);
        assert_eq!(segment_progress(2.0, 0.05, 0.45), 1.0);
        assert_eq!(segment_progress(0.1, 0.1, 0.0), 1.0);
    }
}
