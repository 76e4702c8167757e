//! Operating mode definitions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The four mutually exclusive operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Volume, brightness, screenshot. Initial and fallback mode
    Main,
    /// Pointer control
    Mouse,
    /// Entered automatically while a browser has focus
    Browser,
    /// Entered automatically while music is playing
    Music,
}

impl Mode {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Mode::Main => "\x1b[37m",    // White
            Mode::Mouse => "\x1b[36m",   // Cyan
            Mode::Browser => "\x1b[34m", // Blue
            Mode::Music => "\x1b[35m",   // Magenta
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for mode
    pub fn emoji(&self) -> &'static str {
        match self {
            Mode::Main => "🎛",
            Mode::Mouse => "🖱",
            Mode::Browser => "🌐",
            Mode::Music => "🎵",
        }
    }

    /// Modes the user can only reach through a context signal
    pub fn is_automatic(&self) -> bool {
        matches!(self, Mode::Browser | Mode::Music)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Main => "MAIN",
            Mode::Mouse => "MOUSE",
            Mode::Browser => "BROWSER",
            Mode::Music => "MUSIC",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MAIN" => Ok(Mode::Main),
            "MOUSE" => Ok(Mode::Mouse),
            "BROWSER" => Ok(Mode::Browser),
            "MUSIC" => Ok(Mode::Music),
            _ => Err(ModeError::R601_UNKNOWN_MODE),
        }
    }
}

/// Errors raised at text boundaries that name a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ModeError {
    /// Name does not match any mode
    R601_UNKNOWN_MODE,
}

impl ModeError {
    /// Get code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::R601_UNKNOWN_MODE => "R601_UNKNOWN_MODE",
        }
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R601_UNKNOWN_MODE => "Unknown mode name (expected MAIN, MOUSE, BROWSER or MUSIC)",
        }
    }
}

impl std::fmt::Display for ModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

impl std::error::Error for ModeError {}
