//! Recognizer state snapshot for display and telemetry

use serde::{Deserialize, Serialize};
use crate::types::{Gesture, Mode};

/// Read-only view of the recognizer's in-memory state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerState {
    /// Active mode
    pub mode: Mode,
    /// Mode the machine returns to when the current context ends
    pub restore_mode: Option<Mode>,
    /// Currently confirmed gesture
    pub current_gesture: Option<Gesture>,
    /// Gesture that last fired
    pub previous_gesture: Option<Gesture>,
    /// Milliseconds since the last fire; negative while a grace window is pending
    pub ms_since_last_fire: Option<i64>,
    /// Frames processed since construction
    pub frames_processed: u64,
    /// Actions handed to the executor since construction
    pub actions_fired: u64,
}

impl RecognizerState {
    /// Short single-line summary
    pub fn summary(&self) -> String {
        format!(
            "mode={} | gesture={} | previous={} | frames={} | fired={}",
            self.mode,
            self.current_gesture.map(|g| g.as_str()).unwrap_or("-"),
            self.previous_gesture.map(|g| g.as_str()).unwrap_or("-"),
            self.frames_processed,
            self.actions_fired
        )
    }
}
