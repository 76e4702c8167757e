//! Reason codes for per-frame decisions and mode changes

use serde::{Deserialize, Serialize};

/// Why a frame did or did not produce an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Input
    // =========================================================================
    /// No finger vector this frame
    R101_NO_HAND,
    /// Vector present but no template within the acceptance bound
    R102_NO_TEMPLATE_MATCH,

    // =========================================================================
    // R2xx: Debounce
    // =========================================================================
    /// Waiting for consecutive agreement
    R201_AWAITING_CONFIRMATION,

    // =========================================================================
    // R3xx: Suppression
    // =========================================================================
    /// Inside the post-transition grace window
    R301_GRACE_WINDOW,
    /// Fast-repeat interval not yet elapsed
    R302_REPEAT_INTERVAL,
    /// Gesture held, mode cooldown not yet elapsed
    R303_COOLDOWN_ACTIVE,

    // =========================================================================
    // R4xx: Firing
    // =========================================================================
    /// Continuous gesture, fires every frame
    R401_FIRED_CONTINUOUS,
    /// Held magnitude gesture, repeat interval elapsed
    R402_FIRED_REPEAT,
    /// First frame after a gesture change
    R403_FIRED_EDGE,
    /// Held gesture re-announced after the cooldown
    R404_FIRED_COOLDOWN_ELAPSED,
    /// Gesture fired but the current mode maps it to nothing
    R405_UNMAPPED_IN_MODE,

    // =========================================================================
    // R5xx: Mode transitions
    // =========================================================================
    /// Manual toggle (gesture or explicit request)
    R501_MODE_TOGGLED,
    /// Context signal entered an automatic mode
    R502_AUTO_ENTER,
    /// Context signal ended, restored the previous mode
    R503_AUTO_EXIT,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_NO_HAND => "R101_NO_HAND",
            Self::R102_NO_TEMPLATE_MATCH => "R102_NO_TEMPLATE_MATCH",
            Self::R201_AWAITING_CONFIRMATION => "R201_AWAITING_CONFIRMATION",
            Self::R301_GRACE_WINDOW => "R301_GRACE_WINDOW",
            Self::R302_REPEAT_INTERVAL => "R302_REPEAT_INTERVAL",
            Self::R303_COOLDOWN_ACTIVE => "R303_COOLDOWN_ACTIVE",
            Self::R401_FIRED_CONTINUOUS => "R401_FIRED_CONTINUOUS",
            Self::R402_FIRED_REPEAT => "R402_FIRED_REPEAT",
            Self::R403_FIRED_EDGE => "R403_FIRED_EDGE",
            Self::R404_FIRED_COOLDOWN_ELAPSED => "R404_FIRED_COOLDOWN_ELAPSED",
            Self::R405_UNMAPPED_IN_MODE => "R405_UNMAPPED_IN_MODE",
            Self::R501_MODE_TOGGLED => "R501_MODE_TOGGLED",
            Self::R502_AUTO_ENTER => "R502_AUTO_ENTER",
            Self::R503_AUTO_EXIT => "R503_AUTO_EXIT",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_NO_HAND => "No hand detected",
            Self::R102_NO_TEMPLATE_MATCH => "No gesture template matched",
            Self::R201_AWAITING_CONFIRMATION => "Waiting for consecutive agreement",
            Self::R301_GRACE_WINDOW => "Suppressed after mode change",
            Self::R302_REPEAT_INTERVAL => "Repeat interval not elapsed",
            Self::R303_COOLDOWN_ACTIVE => "Cooldown active",
            Self::R401_FIRED_CONTINUOUS => "Continuous gesture",
            Self::R402_FIRED_REPEAT => "Repeating while held",
            Self::R403_FIRED_EDGE => "New gesture",
            Self::R404_FIRED_COOLDOWN_ELAPSED => "Re-announced after cooldown",
            Self::R405_UNMAPPED_IN_MODE => "No action for gesture in this mode",
            Self::R501_MODE_TOGGLED => "Mode toggled",
            Self::R502_AUTO_ENTER => "Context detected, mode entered",
            Self::R503_AUTO_EXIT => "Context ended, mode restored",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
