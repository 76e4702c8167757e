//! Mode profiles: per-mode action table, firing rules and cooldown
//!
//! One profile is selected per frame; the trigger policy and the action
//! resolver both read from it instead of branching on the mode.

use std::time::Duration;
use crate::types::{Action, Gesture, Mode, RecognizerConfig};

/// How a gesture's repeats are throttled in a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiringRule {
    /// Every confirmed frame fires (pointer tracking, MOUSE exits)
    Continuous,
    /// Fires while held, at most once per repeat interval
    FastRepeat,
    /// Fires on change, or again once the mode cooldown has elapsed
    Edge,
}

const MAIN_TABLE: &[(Gesture, Action)] = &[
    (Gesture::One, Action::VolumeUp),
    (Gesture::Two, Action::VolumeDown),
    (Gesture::Three, Action::BrightnessUp),
    (Gesture::Four, Action::BrightnessDown),
    (Gesture::Rock, Action::Screenshot),
    (Gesture::Palm, Action::ToggleMode),
];

const MOUSE_TABLE: &[(Gesture, Action)] = &[
    (Gesture::One, Action::MouseMove),
    (Gesture::Two, Action::MouseClickLeft),
    (Gesture::Three, Action::MouseClickRight),
    (Gesture::Four, Action::MouseDoubleClick),
    (Gesture::Fist, Action::ToggleMode),
    (Gesture::Palm, Action::ToggleMode),
];

const BROWSER_TABLE: &[(Gesture, Action)] = &[
    (Gesture::One, Action::BrowserRefresh),
    (Gesture::Two, Action::BrowserBack),
    (Gesture::Three, Action::BrowserForward),
    (Gesture::Four, Action::BrowserReopenTab),
    (Gesture::Fist, Action::BrowserScrollDown),
    (Gesture::Palm, Action::ToggleMode),
    (Gesture::Rock, Action::BrowserSwitchTab),
    (Gesture::ThumbsUp, Action::BrowserScrollUp),
];

const MUSIC_TABLE: &[(Gesture, Action)] = &[
    (Gesture::One, Action::MusicPlayPause),
    (Gesture::Two, Action::MusicNext),
    (Gesture::Three, Action::MusicPrevious),
    (Gesture::Four, Action::MusicVolumeUp),
    (Gesture::Fist, Action::MusicVolumeDown),
    (Gesture::Palm, Action::ToggleMode),
    (Gesture::ThumbsUp, Action::MusicLike),
];

const NO_GESTURES: &[Gesture] = &[];

/// MAIN magnitude gestures (volume/brightness ramps)
const MAIN_FAST_REPEAT: &[Gesture] = &[Gesture::One, Gesture::Two, Gesture::Three, Gesture::Four];

/// MOUSE pointer move and exit gestures
const MOUSE_CONTINUOUS: &[Gesture] = &[Gesture::One, Gesture::Fist, Gesture::Palm];

/// Table, firing rules and timing for one mode
#[derive(Debug, Clone)]
pub struct ModeProfile {
    mode: Mode,
    table: &'static [(Gesture, Action)],
    continuous: &'static [Gesture],
    fast_repeat: &'static [Gesture],
    cooldown: Duration,
    repeat_interval: Duration,
}

impl ModeProfile {
    /// Select the profile for a mode
    pub fn for_mode(mode: Mode, config: &RecognizerConfig) -> Self {
        let gesture_cooldown = Duration::from_millis(config.gesture_cooldown_ms);
        let (table, continuous, fast_repeat, cooldown) = match mode {
            Mode::Main => (MAIN_TABLE, NO_GESTURES, MAIN_FAST_REPEAT, gesture_cooldown),
            Mode::Mouse => (MOUSE_TABLE, MOUSE_CONTINUOUS, NO_GESTURES, gesture_cooldown),
            Mode::Browser => (BROWSER_TABLE, NO_GESTURES, NO_GESTURES, gesture_cooldown),
            Mode::Music => (
                MUSIC_TABLE,
                NO_GESTURES,
                NO_GESTURES,
                Duration::from_millis(config.music_cooldown_ms),
            ),
        };
        Self {
            mode,
            table,
            continuous,
            fast_repeat,
            cooldown,
            repeat_interval: config.repeat_interval(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Action Resolver: gesture → action in this mode
    pub fn resolve(&self, gesture: Gesture) -> Option<Action> {
        self.table
            .iter()
            .find(|(g, _)| *g == gesture)
            .map(|(_, a)| *a)
    }

    /// Firing rule for a gesture in this mode
    pub fn rule_for(&self, gesture: Gesture) -> FiringRule {
        if self.continuous.contains(&gesture) {
            FiringRule::Continuous
        } else if self.fast_repeat.contains(&gesture) {
            FiringRule::FastRepeat
        } else {
            FiringRule::Edge
        }
    }

    /// Edge-policy cooldown
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Fast-repeat interval
    pub fn repeat_interval(&self) -> Duration {
        self.repeat_interval
    }

    /// Whole table, in declaration order
    pub fn table(&self) -> &'static [(Gesture, Action)] {
        self.table
    }
}

// =============================================================================
// TESTS
// =============================================================================
