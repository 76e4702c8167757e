//! Trajectory samples and swipe classifications

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One timestamped hand position (pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub x: f32,
    pub y: f32,
    pub t: Instant,
}

/// Dominant direction of a hand movement. Screen coordinates: +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// Result of trajectory analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub direction: SwipeDirection,
    /// Euclidean distance between oldest and newest sample
    pub distance: f32,
}

impl Swipe {
    /// Gesture-style name, e.g. `SWIPE_RIGHT`
    pub fn name(&self) -> &'static str {
        match self.direction {
            SwipeDirection::Up => "SWIPE_UP",
            SwipeDirection::Down => "SWIPE_DOWN",
            SwipeDirection::Left => "SWIPE_LEFT",
            SwipeDirection::Right => "SWIPE_RIGHT",
        }
    }
}
