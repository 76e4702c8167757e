//! Handmode: gesture recognition and mode state machine
//!
//! Per-frame path: finger vector → classifier → debounce → trigger policy
//! → action resolver. Mode transitions come from `toggle_mode`, explicit
//! toggle requests, or browser/music context signals.

pub mod core;
pub mod types;

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Per-finger error threshold for template matching
pub const FINGER_STATE_THRESHOLD: f32 = 0.015;

/// Acceptance bound = threshold × this scale (one term per finger)
pub const ACCEPTANCE_SCALE: f32 = 5.0;

// =============================================================================
// DEBOUNCE
// =============================================================================

/// Raw classifications kept in the debounce history
pub const HISTORY_CAPACITY: usize = 5;

/// Consecutive identical frames needed to confirm a gesture
pub const CONFIRM_FRAMES: usize = 3;

// =============================================================================
// TIMING (milliseconds)
// =============================================================================

/// MAIN-mode fast-repeat interval for volume/brightness gestures
pub const REPEAT_INTERVAL_MS: u64 = 300;

/// Edge-policy cooldown for MAIN, MOUSE and BROWSER
pub const GESTURE_COOLDOWN_MS: u64 = 500;

/// Accepted range for the edge-policy cooldown
pub const GESTURE_COOLDOWN_MIN_MS: u64 = 100;
pub const GESTURE_COOLDOWN_MAX_MS: u64 = 2000;

/// Edge-policy cooldown for MUSIC
pub const MUSIC_COOLDOWN_MS: u64 = 300;

/// Suppression window after any mode transition
pub const GRACE_WINDOW_MS: u64 = 1000;

/// Upper bound accepted for the grace window
pub const GRACE_WINDOW_MAX_MS: u64 = 5000;

// =============================================================================
// TRAJECTORY
// =============================================================================

/// Ring buffer size for hand positions
pub const TRAJECTORY_CAPACITY: usize = 10;

/// Samples required before a swipe can be analyzed
pub const SWIPE_MIN_SAMPLES: usize = 5;

/// Dominant-axis displacement gate (pixels)
pub const SWIPE_AXIS_THRESHOLD_PX: f32 = 30.0;

/// Total displacement gate for a named swipe (pixels)
pub const SWIPE_MIN_DISTANCE_PX: f32 = 50.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
