//! Output structures for each processed frame

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{Action, Gesture, Mode, ModeTransition, ReasonCode, Swipe};

/// Everything the core decided for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Mode after this frame (reflects any transition)
    pub mode: Mode,
    /// Raw per-frame classification
    pub raw_gesture: Option<Gesture>,
    /// Debounced gesture
    pub gesture: Option<Gesture>,
    /// First frame of this confirmed gesture
    pub is_new: bool,
    /// Action to hand to the executor
    pub action: Option<Action>,
    /// Executor keeps the action running until the gesture changes or the hand leaves
    #[serde(default)]
    pub sustained: bool,
    /// Why
    pub reason: ReasonCode,
    /// Mode change triggered by this frame's action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<ModeTransition>,
    /// Diagnostic swipe classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe: Option<Swipe>,
    /// Landmark payload for position-dependent actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<[f32; 3]>>,
}

impl FrameOutput {
    /// Create output with nothing fired
    pub fn new(mode: Mode, raw_gesture: Option<Gesture>, gesture: Option<Gesture>, reason: ReasonCode) -> Self {
        Self {
            timestamp: Utc::now(),
            mode,
            raw_gesture,
            gesture,
            is_new: false,
            action: None,
            sustained: false,
            reason,
            transition: None,
            swipe: None,
            landmarks: None,
        }
    }

    /// Did this frame produce an action?
    pub fn fired(&self) -> bool {
        self.action.is_some()
    }

    fn gesture_label(&self) -> &'static str {
        self.gesture.map(|g| g.as_str()).unwrap_or("-")
    }

    fn action_label(&self) -> &'static str {
        self.action.map(|a| a.as_str()).unwrap_or("-")
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.mode.color_code();
        let reset = Mode::color_reset();
        let mut line = format!(
            "{}{} [{}] gesture={}{} | action={} | {}{}",
            color,
            self.mode.emoji(),
            self.mode,
            self.gesture_label(),
            if self.is_new { "*" } else { "" },
            self.action_label(),
            self.reason.code(),
            reset
        );
        if let Some(t) = &self.transition {
            line.push_str(&format!("\n{}  ↳ {}{}", t.to.color_code(), t, reset));
        }
        if let Some(s) = &self.swipe {
            line.push_str(&format!("\n\x1b[90m  ↳ {} ({:.0}px){}", s.name(), s.distance, reset));
        }
        line
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let mut line = format!(
            "mode={} | gesture={} | new={} | action={} | reason={}",
            self.mode,
            self.gesture_label(),
            self.is_new,
            self.action_label(),
            self.reason.code()
        );
        if self.sustained {
            line.push_str(" | sustained");
        }
        if let Some(t) = &self.transition {
            line.push_str(&format!(" | transition={}->{}", t.from, t.to));
        }
        if let Some(s) = &self.swipe {
            line.push_str(&format!(" | swipe={}", s.name()));
        }
        line
    }
}
