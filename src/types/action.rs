//! Action identifiers handed to the external executor

use serde::{Deserialize, Serialize};

/// Every action a mode table can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // MAIN
    VolumeUp,
    VolumeDown,
    BrightnessUp,
    BrightnessDown,
    Screenshot,
    ToggleMode,

    // MOUSE
    MouseMove,
    MouseClickLeft,
    MouseClickRight,
    MouseDoubleClick,

    // BROWSER
    BrowserRefresh,
    BrowserBack,
    BrowserForward,
    BrowserReopenTab,
    BrowserSwitchTab,
    BrowserScrollUp,
    BrowserScrollDown,

    // MUSIC
    MusicPlayPause,
    MusicNext,
    MusicPrevious,
    MusicVolumeUp,
    MusicVolumeDown,
    MusicLike,
}

impl Action {
    /// Token string understood by the executor
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::BrightnessUp => "brightness_up",
            Self::BrightnessDown => "brightness_down",
            Self::Screenshot => "screenshot",
            Self::ToggleMode => "toggle_mode",
            Self::MouseMove => "mouse_move",
            Self::MouseClickLeft => "mouse_click_left",
            Self::MouseClickRight => "mouse_click_right",
            Self::MouseDoubleClick => "mouse_double_click",
            Self::BrowserRefresh => "browser_refresh",
            Self::BrowserBack => "browser_back",
            Self::BrowserForward => "browser_forward",
            Self::BrowserReopenTab => "browser_reopen_tab",
            Self::BrowserSwitchTab => "browser_switch_tab",
            Self::BrowserScrollUp => "browser_scroll_up",
            Self::BrowserScrollDown => "browser_scroll_down",
            Self::MusicPlayPause => "music_play_pause",
            Self::MusicNext => "music_next",
            Self::MusicPrevious => "music_previous",
            Self::MusicVolumeUp => "music_volume_up",
            Self::MusicVolumeDown => "music_volume_down",
            Self::MusicLike => "music_like",
        }
    }

    /// Needs the current landmark set to execute
    pub fn needs_landmarks(&self) -> bool {
        matches!(self, Self::MouseMove)
    }

    /// Keeps running in the executor until the gesture changes or the hand leaves
    pub fn is_sustained(&self) -> bool {
        matches!(
            self,
            Self::MouseMove | Self::BrowserScrollUp | Self::BrowserScrollDown
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
