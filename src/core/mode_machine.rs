//! Mode State Machine
//!
//! Transitions:
//! - Manual toggle: MAIN ↔ MOUSE, BROWSER → MAIN, MUSIC → MAIN
//! - Context on: record mode-to-restore, enter BROWSER / MUSIC
//! - Context off: return to mode-to-restore (MAIN if none), clear it
//! - MUSIC outranks BROWSER: browser switching is suppressed while music
//!   is active and resumes once MUSIC exits (MUSIC → BROWSER directly)

use tracing::info;
use crate::types::{ContextProbe, ContextSignal, Gesture, Mode, ModeTransition, TransitionCause};

/// Latest reading from one probe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ProbeReading {
    active: bool,
    label: Option<String>,
}

/// Holds the active mode and the context that drives automatic modes
#[derive(Debug, Clone)]
pub struct ModeMachine {
    mode: Mode,
    restore: Option<Mode>,
    browser: ProbeReading,
    music: ProbeReading,
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeMachine {
    /// Start in MAIN with no context
    pub fn new() -> Self {
        Self {
            mode: Mode::Main,
            restore: None,
            browser: ProbeReading::default(),
            music: ProbeReading::default(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mode the machine returns to when the active context ends
    pub fn restore_target(&self) -> Option<Mode> {
        self.restore
    }

    /// Last reported state of a probe
    pub fn context_active(&self, probe: ContextProbe) -> bool {
        match probe {
            ContextProbe::Browser => self.browser.active,
            ContextProbe::Music => self.music.active,
        }
    }

    /// Manual toggle target for a mode
    pub fn toggle_target(mode: Mode) -> Mode {
        match mode {
            Mode::Main => Mode::Mouse,
            Mode::Mouse | Mode::Browser | Mode::Music => Mode::Main,
        }
    }

    /// Manual toggle; `gesture` is the gesture that requested it, if any
    pub fn toggle(&mut self, gesture: Option<Gesture>) -> ModeTransition {
        let target = Self::toggle_target(self.mode);
        self.restore = None;
        self.switch(target, TransitionCause::Manual, gesture, None)
    }

    /// Record a probe reading and apply any transitions it causes
    pub fn observe(&mut self, signal: ContextSignal) -> Vec<ModeTransition> {
        let reading = ProbeReading {
            active: signal.active,
            label: signal.label,
        };
        match signal.probe {
            ContextProbe::Browser => self.browser = reading,
            ContextProbe::Music => self.music = reading,
        }
        self.reconcile()
    }

    /// Bring the mode in line with the stored probe readings
    fn reconcile(&mut self) -> Vec<ModeTransition> {
        let mut transitions = Vec::new();

        if self.music.active {
            if self.mode != Mode::Music {
                transitions.push(self.enter(ContextProbe::Music));
            }
            // Browser evaluation suppressed while MUSIC holds
            return transitions;
        }
        if self.mode == Mode::Music {
            if self.browser.active {
                // Hand over directly; the restore target carries over
                transitions.push(self.enter(ContextProbe::Browser));
                return transitions;
            }
            transitions.push(self.exit(ContextProbe::Music));
        }

        if self.browser.active {
            if self.mode != Mode::Browser {
                transitions.push(self.enter(ContextProbe::Browser));
            }
        } else if self.mode == Mode::Browser {
            transitions.push(self.exit(ContextProbe::Browser));
        }

        transitions
    }

    fn enter(&mut self, probe: ContextProbe) -> ModeTransition {
        // An automatic mode overriding another keeps the original restore target
        if !self.mode.is_automatic() || self.restore.is_none() {
            self.restore = Some(self.mode);
        }
        let label = self.reading(probe).label.clone();
        self.switch(probe.mode(), TransitionCause::ContextEntered(probe), None, label)
    }

    fn exit(&mut self, probe: ContextProbe) -> ModeTransition {
        let target = self.restore.take().unwrap_or(Mode::Main);
        let label = self.reading(probe).label.clone();
        self.switch(target, TransitionCause::ContextEnded(probe), None, label)
    }

    fn reading(&self, probe: ContextProbe) -> &ProbeReading {
        match probe {
            ContextProbe::Browser => &self.browser,
            ContextProbe::Music => &self.music,
        }
    }

    fn switch(
        &mut self,
        to: Mode,
        cause: TransitionCause,
        gesture: Option<Gesture>,
        label: Option<String>,
    ) -> ModeTransition {
        let from = self.mode;
        self.mode = to;
        info!(%from, %to, reason = cause.reason().code(), label = label.as_deref(), "mode transition");
        ModeTransition { from, to, cause, gesture, label }
    }

    /// Back to MAIN, forget context
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// TESTS
// =============================================================================
