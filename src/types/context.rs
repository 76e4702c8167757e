//! Context signals and mode transition records

use serde::{Deserialize, Serialize};
use crate::types::{Gesture, Mode, ReasonCode};

/// External probes polled by the host on their own timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextProbe {
    /// "Is a browser focused"
    Browser,
    /// "Is music playing"
    Music,
}

impl ContextProbe {
    /// Mode this probe switches into
    pub fn mode(&self) -> Mode {
        match self {
            ContextProbe::Browser => Mode::Browser,
            ContextProbe::Music => Mode::Music,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextProbe::Browser => "browser",
            ContextProbe::Music => "music",
        }
    }
}

/// One probe reading: active flag plus an optional label (browser or app name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSignal {
    pub probe: ContextProbe,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ContextSignal {
    pub fn new(probe: ContextProbe, active: bool, label: Option<String>) -> Self {
        Self { probe, active, label }
    }

    pub fn browser(active: bool) -> Self {
        Self::new(ContextProbe::Browser, active, None)
    }

    pub fn music(active: bool) -> Self {
        Self::new(ContextProbe::Music, active, None)
    }

    /// Attach a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// What caused a mode transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCause {
    /// `toggle_mode` action or explicit toggle request
    Manual,
    /// Probe turned on
    ContextEntered(ContextProbe),
    /// Probe turned off
    ContextEnded(ContextProbe),
}

impl TransitionCause {
    pub fn reason(&self) -> ReasonCode {
        match self {
            TransitionCause::Manual => ReasonCode::R501_MODE_TOGGLED,
            TransitionCause::ContextEntered(_) => ReasonCode::R502_AUTO_ENTER,
            TransitionCause::ContextEnded(_) => ReasonCode::R503_AUTO_EXIT,
        }
    }

    /// Context behind an automatic transition
    pub fn source(&self) -> Option<ContextProbe> {
        match self {
            TransitionCause::Manual => None,
            TransitionCause::ContextEntered(p) | TransitionCause::ContextEnded(p) => Some(*p),
        }
    }
}

/// A completed mode change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
    pub cause: TransitionCause,
    /// Gesture that triggered a manual toggle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesture: Option<Gesture>,
    /// Probe label for context transitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl std::fmt::Display for ModeTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {} ({}", self.from, self.to, self.cause.reason().code())?;
        if let Some(source) = self.cause.source() {
            write!(f, ", {}", source.as_str())?;
        }
        write!(f, ")")?;
        if let Some(label) = &self.label {
            write!(f, " [{}]", label)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(cause: TransitionCause, label: Option<&str>) -> ModeTransition {
        ModeTransition {
            from: Mode::Main,
            to: Mode::Browser,
            cause,
            gesture: None,
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_display_names_context_source() {
        let t = transition(TransitionCause::ContextEntered(ContextProbe::Browser), Some("Chrome"));
        assert_eq!(t.to_string(), "MAIN → BROWSER (R502_AUTO_ENTER, browser) [Chrome]");

        let t = transition(TransitionCause::ContextEnded(ContextProbe::Music), None);
        assert_eq!(t.to_string(), "MAIN → BROWSER (R503_AUTO_EXIT, music)");
    }

    #[test]
    fn test_manual_toggle_has_no_context_source() {
        let t = transition(TransitionCause::Manual, None);
        assert_eq!(t.cause.source(), None);
        assert_eq!(t.to_string(), "MAIN → BROWSER (R501_MODE_TOGGLED)");
    }
}
