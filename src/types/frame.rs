//! Per-frame input from the hand tracker

use serde::{Deserialize, Serialize};

/// What the tracker reports for one captured frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// [thumb, index, middle, ring, pinky]; absent or empty when no hand
    #[serde(default)]
    pub finger_states: Option<Vec<f32>>,
    /// Tracked landmark position in pixels (index fingertip)
    #[serde(default)]
    pub position: Option<[f32; 2]>,
    /// Full landmark set, passed through to position-dependent actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<[f32; 3]>>,
}

impl HandFrame {
    /// Frame with no hand in view
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_fingers(finger_states: impl Into<Vec<f32>>) -> Self {
        Self {
            finger_states: Some(finger_states.into()),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Some([x, y]);
        self
    }

    pub fn with_landmarks(mut self, landmarks: Vec<[f32; 3]>) -> Self {
        self.landmarks = Some(landmarks);
        self
    }

    /// True when the tracker saw a hand (non-empty vector)
    pub fn has_hand(&self) -> bool {
        self.finger_states.as_ref().is_some_and(|v| !v.is_empty())
    }
}
