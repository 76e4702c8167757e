//! Debounce Filter: confirms a gesture after consecutive agreement
//!
//! - Non-null raw: push to history (bounded FIFO)
//! - Last `confirm_frames` entries identical → confirmed
//! - Null raw: history and confirmed gesture cleared

use std::collections::VecDeque;
use tracing::debug;
use crate::types::{Gesture, RecognizerConfig};

/// Result of one `observe` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Confirmed (sticky) gesture after this frame
    pub confirmed: Option<Gesture>,
    /// Confirmation changed the stored gesture this frame
    pub is_new: bool,
}

/// Rolling history of raw classifications
#[derive(Debug, Clone)]
pub struct DebounceFilter {
    history: VecDeque<Gesture>,
    capacity: usize,
    confirm_frames: usize,
    confirmed: Option<Gesture>,
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new(&RecognizerConfig::default())
    }
}

impl DebounceFilter {
    pub fn new(config: &RecognizerConfig) -> Self {
        Self {
            history: VecDeque::with_capacity(config.history_capacity),
            capacity: config.history_capacity,
            confirm_frames: config.confirm_frames,
            confirmed: None,
        }
    }

    /// Feed one raw classification
    pub fn observe(&mut self, raw: Option<Gesture>) -> Observation {
        let Some(gesture) = raw else {
            self.clear();
            return Observation { confirmed: None, is_new: false };
        };

        self.history.push_back(gesture);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        if self.is_agreeing() {
            let is_new = self.confirmed != Some(gesture);
            if is_new {
                debug!(gesture = gesture.as_str(), "gesture confirmed");
            }
            self.confirmed = Some(gesture);
            return Observation { confirmed: self.confirmed, is_new };
        }

        Observation { confirmed: self.confirmed, is_new: false }
    }

    /// Trailing `confirm_frames` entries all identical
    fn is_agreeing(&self) -> bool {
        if self.history.len() < self.confirm_frames {
            return false;
        }
        let mut tail = self.history.iter().rev().take(self.confirm_frames);
        match tail.next() {
            Some(first) => tail.all(|g| g == first),
            None => false,
        }
    }

    /// Drop history and confirmed gesture
    pub fn clear(&mut self) {
        self.history.clear();
        self.confirmed = None;
    }

    /// Drop history and seed the confirmed gesture (used on mode transitions)
    pub fn reseed(&mut self, confirmed: Option<Gesture>) {
        self.history.clear();
        self.confirmed = confirmed;
    }

    /// Currently confirmed gesture
    pub fn confirmed(&self) -> Option<Gesture> {
        self.confirmed
    }

    /// History length
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
