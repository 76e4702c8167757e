//! Trajectory Detector: directional swipes from recent hand positions
//!
//! Fixed-capacity ring of timestamped positions. `analyze` uses the net
//! displacement between the oldest and newest sample. Diagnostic only:
//! nothing is wired to its output.

use std::collections::VecDeque;
use std::time::Instant;
use crate::types::{RecognizerConfig, Swipe, SwipeDirection, TrajectorySample};

/// Ring buffer of recent hand positions
#[derive(Debug, Clone)]
pub struct TrajectoryDetector {
    samples: VecDeque<TrajectorySample>,
    capacity: usize,
    min_samples: usize,
    axis_threshold: f32,
    min_distance: f32,
}

impl Default for TrajectoryDetector {
    fn default() -> Self {
        Self::new(&RecognizerConfig::default())
    }
}

impl TrajectoryDetector {
    /// Allocate the ring once
    pub fn new(config: &RecognizerConfig) -> Self {
        Self {
            samples: VecDeque::with_capacity(config.trajectory_capacity),
            capacity: config.trajectory_capacity,
            min_samples: config.swipe_min_samples,
            axis_threshold: config.swipe_axis_threshold_px,
            min_distance: config.swipe_min_distance_px,
        }
    }

    /// Append a position, evicting the oldest beyond capacity
    pub fn record(&mut self, x: f32, y: f32, t: Instant) {
        // A zero capacity still holds one sample
        while self.samples.len() >= self.capacity.max(1) {
            self.samples.pop_front();
        }
        self.samples.push_back(TrajectorySample { x, y, t });
    }

    /// Dominant-axis direction of the buffered movement
    pub fn analyze(&self) -> Option<Swipe> {
        if self.samples.len() < self.min_samples {
            return None;
        }
        let (first, last) = (self.samples.front()?, self.samples.back()?);
        let dx = last.x - first.x;
        let dy = last.y - first.y;

        let direction = if dx.abs() > dy.abs() {
            if dx.abs() <= self.axis_threshold {
                return None;
            }
            if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left }
        } else {
            if dy.abs() <= self.axis_threshold {
                return None;
            }
            if dy > 0.0 { SwipeDirection::Down } else { SwipeDirection::Up }
        };

        Some(Swipe {
            direction,
            distance: dx.hypot(dy),
        })
    }

    /// `analyze` plus the total-distance gate
    pub fn detect_swipe(&self) -> Option<Swipe> {
        self.analyze().filter(|s| s.distance > self.min_distance)
    }

    /// Swipe name (`SWIPE_RIGHT`, ...) when both gates pass
    pub fn swipe_name(&self) -> Option<&'static str> {
        self.detect_swipe().map(|s| s.name())
    }

    /// Drop all samples (no hand, or reset)
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Sample count
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Seconds spanned by the buffered samples
    pub fn span_secs(&self) -> f32 {
        match (self.samples.front(), self.samples.back()) {
            (Some(a), Some(b)) => b.t.duration_since(a.t).as_secs_f32(),
            _ => 0.0,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Evenly spaced samples from (0, 0) to (dx, dy)
    fn sweep(detector: &mut TrajectoryDetector, n: usize, dx: f32, dy: f32) {
        let t0 = Instant::now();
        for i in 0..n {
            let f = i as f32 / (n - 1) as f32;
            detector.record(100.0 + dx * f, 200.0 + dy * f, t0 + Duration::from_millis(33 * i as u64));
        }
    }

    #[test]
    fn test_sixty_px_right_is_swipe() {
        let mut detector = TrajectoryDetector::default();
        sweep(&mut detector, 8, 60.0, 2.0);
        assert_eq!(detector.swipe_name(), Some("SWIPE_RIGHT"));
    }

    #[test]
    fn test_forty_px_fails_magnitude_gate() {
        let mut detector = TrajectoryDetector::default();
        sweep(&mut detector, 8, 40.0, 0.0);
        let analyzed = detector.analyze().unwrap();
        assert_eq!(analyzed.direction, SwipeDirection::Right);
        assert_eq!(detector.detect_swipe(), None);
    }

    #[test]
    fn test_needs_min_samples() {
        let mut detector = TrajectoryDetector::default();
        sweep(&mut detector, 4, 200.0, 0.0);
        assert_eq!(detector.analyze(), None);
    }

    #[test]
    fn test_vertical_directions() {
        let mut up = TrajectoryDetector::default();
        sweep(&mut up, 6, 5.0, -80.0);
        assert_eq!(up.swipe_name(), Some("SWIPE_UP"));

        let mut down = TrajectoryDetector::default();
        sweep(&mut down, 6, 5.0, 80.0);
        assert_eq!(down.swipe_name(), Some("SWIPE_DOWN"));
    }

    #[test]
    fn test_axis_gate() {
        let mut detector = TrajectoryDetector::default();
        sweep(&mut detector, 6, -25.0, 10.0);
        assert_eq!(detector.analyze(), None);
    }

    #[test]
    fn test_ring_evicts_oldest() {
        let mut detector = TrajectoryDetector::default();
        let t0 = Instant::now();
        // Large leftward jump first, then 10 stationary samples
        detector.record(500.0, 0.0, t0);
        for i in 1..=10 {
            detector.record(0.0, 0.0, t0 + Duration::from_millis(i));
        }
        assert_eq!(detector.len(), 10);
        assert_eq!(detector.analyze(), None);
    }

    #[test]
    fn test_zero_capacity_stays_bounded() {
        let config = RecognizerConfig {
            trajectory_capacity: 0,
            ..RecognizerConfig::default()
        };
        let mut detector = TrajectoryDetector::new(&config);
        let t0 = Instant::now();
        for i in 0..1000 {
            detector.record(i as f32, 0.0, t0 + Duration::from_millis(i));
        }
        assert_eq!(detector.len(), 1);
        assert_eq!(detector.detect_swipe(), None);
    }

    #[test]
    fn test_clear() {
        let mut detector = TrajectoryDetector::default();
        sweep(&mut detector, 6, 100.0, 0.0);
        detector.clear();
        assert!(detector.is_empty());
        assert_eq!(detector.span_secs(), 0.0);
    }
}
