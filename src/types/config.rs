//! Recognizer configuration
//!
//! One immutable value per recognizer. Setters consume and return a new
//! value; the recognizer swaps the whole thing via `set_config`.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::{
    FINGER_STATE_THRESHOLD, ACCEPTANCE_SCALE, HISTORY_CAPACITY, CONFIRM_FRAMES,
    REPEAT_INTERVAL_MS, GESTURE_COOLDOWN_MS, GESTURE_COOLDOWN_MIN_MS, GESTURE_COOLDOWN_MAX_MS,
    MUSIC_COOLDOWN_MS, GRACE_WINDOW_MS,
    GRACE_WINDOW_MAX_MS, TRAJECTORY_CAPACITY, SWIPE_MIN_SAMPLES,
    SWIPE_AXIS_THRESHOLD_PX, SWIPE_MIN_DISTANCE_PX,
};

/// Every tunable of the recognition pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Per-finger error threshold
    pub finger_state_threshold: f32,
    /// Acceptance bound = threshold × scale
    pub acceptance_scale: f32,
    /// Debounce history length
    pub history_capacity: usize,
    /// Identical trailing frames needed to confirm
    pub confirm_frames: usize,
    /// MAIN fast-repeat interval
    pub repeat_interval_ms: u64,
    /// Edge cooldown for MAIN, MOUSE, BROWSER
    pub gesture_cooldown_ms: u64,
    /// Edge cooldown for MUSIC
    pub music_cooldown_ms: u64,
    /// Post-transition suppression
    pub grace_window_ms: u64,
    pub trajectory_capacity: usize,
    pub swipe_min_samples: usize,
    pub swipe_axis_threshold_px: f32,
    pub swipe_min_distance_px: f32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            finger_state_threshold: FINGER_STATE_THRESHOLD,
            acceptance_scale: ACCEPTANCE_SCALE,
            history_capacity: HISTORY_CAPACITY,
            confirm_frames: CONFIRM_FRAMES,
            repeat_interval_ms: REPEAT_INTERVAL_MS,
            gesture_cooldown_ms: GESTURE_COOLDOWN_MS,
            music_cooldown_ms: MUSIC_COOLDOWN_MS,
            grace_window_ms: GRACE_WINDOW_MS,
            trajectory_capacity: TRAJECTORY_CAPACITY,
            swipe_min_samples: SWIPE_MIN_SAMPLES,
            swipe_axis_threshold_px: SWIPE_AXIS_THRESHOLD_PX,
            swipe_min_distance_px: SWIPE_MIN_DISTANCE_PX,
        }
    }
}

impl RecognizerConfig {
    pub fn with_finger_state_threshold(mut self, threshold: f32) -> Self {
        self.finger_state_threshold = threshold;
        self
    }

    pub fn with_gesture_cooldown_ms(mut self, ms: u64) -> Self {
        self.gesture_cooldown_ms = ms;
        self
    }

    pub fn with_music_cooldown_ms(mut self, ms: u64) -> Self {
        self.music_cooldown_ms = ms;
        self
    }

    pub fn with_repeat_interval_ms(mut self, ms: u64) -> Self {
        self.repeat_interval_ms = ms;
        self
    }

    pub fn with_grace_window_ms(mut self, ms: u64) -> Self {
        self.grace_window_ms = ms;
        self
    }

    /// Distance below which a template is accepted
    pub fn acceptance_bound(&self) -> f32 {
        self.finger_state_threshold * self.acceptance_scale
    }

    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }

    pub fn grace_window(&self) -> Duration {
        Duration::from_millis(self.grace_window_ms)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.finger_state_threshold > 0.0) || !(self.acceptance_scale > 0.0) {
            return Err(ConfigError::R701_THRESHOLD_NOT_POSITIVE);
        }
        if self.history_capacity == 0 || self.confirm_frames == 0 {
            return Err(ConfigError::R702_ZERO_CAPACITY);
        }
        if self.confirm_frames > self.history_capacity {
            return Err(ConfigError::R703_CONFIRM_EXCEEDS_HISTORY);
        }
        if self.grace_window_ms > GRACE_WINDOW_MAX_MS {
            return Err(ConfigError::R704_GRACE_OUT_OF_RANGE);
        }
        if self.trajectory_capacity == 0
            || self.swipe_min_samples < 2
            || self.swipe_min_samples > self.trajectory_capacity
        {
            return Err(ConfigError::R705_TRAJECTORY_INVALID);
        }
        if !(GESTURE_COOLDOWN_MIN_MS..=GESTURE_COOLDOWN_MAX_MS).contains(&self.gesture_cooldown_ms) {
            return Err(ConfigError::R706_COOLDOWN_OUT_OF_RANGE);
        }
        Ok(())
    }
}

/// Configuration rejected by `validate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ConfigError {
    R701_THRESHOLD_NOT_POSITIVE,
    R702_ZERO_CAPACITY,
    R703_CONFIRM_EXCEEDS_HISTORY,
    R704_GRACE_OUT_OF_RANGE,
    R705_TRAJECTORY_INVALID,
    R706_COOLDOWN_OUT_OF_RANGE,
}

impl ConfigError {
    /// Get code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::R701_THRESHOLD_NOT_POSITIVE => "R701_THRESHOLD_NOT_POSITIVE",
            Self::R702_ZERO_CAPACITY => "R702_ZERO_CAPACITY",
            Self::R703_CONFIRM_EXCEEDS_HISTORY => "R703_CONFIRM_EXCEEDS_HISTORY",
            Self::R704_GRACE_OUT_OF_RANGE => "R704_GRACE_OUT_OF_RANGE",
            Self::R705_TRAJECTORY_INVALID => "R705_TRAJECTORY_INVALID",
            Self::R706_COOLDOWN_OUT_OF_RANGE => "R706_COOLDOWN_OUT_OF_RANGE",
        }
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R701_THRESHOLD_NOT_POSITIVE => "Classifier threshold and scale must be positive",
            Self::R702_ZERO_CAPACITY => "History capacity and confirm frames must be non-zero",
            Self::R703_CONFIRM_EXCEEDS_HISTORY => "Confirm frames cannot exceed history capacity",
            Self::R704_GRACE_OUT_OF_RANGE => "Grace window above 5000 ms",
            Self::R705_TRAJECTORY_INVALID => "Swipe sample minimum must be 2..=trajectory capacity",
            Self::R706_COOLDOWN_OUT_OF_RANGE => "Gesture cooldown outside 100..=2000 ms",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

impl std::error::Error for ConfigError {}
