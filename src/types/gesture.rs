//! Gesture names and the template table

use serde::{Deserialize, Serialize};

/// Named static hand gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    /// All fingers curled
    Fist,
    /// All five fingers extended
    Palm,
    /// Index only
    One,
    /// Index + middle
    Two,
    /// Index + middle + ring
    Three,
    /// Four fingers, thumb curled
    Four,
    /// Index + pinky
    Rock,
    /// Thumb only
    ThumbsUp,
}

impl Gesture {
    /// All gestures, in template order
    pub const ALL: [Gesture; 8] = [
        Gesture::Fist,
        Gesture::Palm,
        Gesture::One,
        Gesture::Two,
        Gesture::Three,
        Gesture::Four,
        Gesture::Rock,
        Gesture::ThumbsUp,
    ];

    /// Canonical name (for logging and wire formats)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fist => "FIST",
            Self::Palm => "PALM",
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::Three => "THREE",
            Self::Four => "FOUR",
            Self::Rock => "ROCK",
            Self::ThumbsUp => "THUMBS_UP",
        }
    }

    /// Template vector for this gesture
    pub fn template(&self) -> [f32; 5] {
        GESTURE_TEMPLATES
            .iter()
            .find(|t| t.gesture == *self)
            .map(|t| t.vector)
            .unwrap_or([0.0; 5])
    }

    /// Parse a gesture name, case-insensitive
    pub fn from_name(name: &str) -> Option<Gesture> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|g| g.as_str() == upper)
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A gesture and its canonical finger-extension vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTemplate {
    pub gesture: Gesture,
    /// [thumb, index, middle, ring, pinky], 1 = extended
    pub vector: [f32; 5],
}

/// Template table. Iteration order is the classifier's tie-break.
pub const GESTURE_TEMPLATES: [GestureTemplate; 8] = [
    GestureTemplate { gesture: Gesture::Fist, vector: [0.0, 0.0, 0.0, 0.0, 0.0] },
    GestureTemplate { gesture: Gesture::Palm, vector: [1.0, 1.0, 1.0, 1.0, 1.0] },
    GestureTemplate { gesture: Gesture::One, vector: [0.0, 1.0, 0.0, 0.0, 0.0] },
    GestureTemplate { gesture: Gesture::Two, vector: [0.0, 1.0, 1.0, 0.0, 0.0] },
    GestureTemplate { gesture: Gesture::Three, vector: [0.0, 1.0, 1.0, 1.0, 0.0] },
    GestureTemplate { gesture: Gesture::Four, vector: [0.0, 1.0, 1.0, 1.0, 1.0] },
    GestureTemplate { gesture: Gesture::Rock, vector: [0.0, 1.0, 0.0, 0.0, 1.0] },
    GestureTemplate { gesture: Gesture::ThumbsUp, vector: [1.0, 0.0, 0.0, 0.0, 0.0] },
];
