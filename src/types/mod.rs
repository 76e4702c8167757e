//! Core types for handmode

mod gesture;
mod mode;
mod action;
mod reason;
mod trajectory;
mod context;
mod config;
mod frame;
mod output;
mod state;

pub use gesture::{Gesture, GestureTemplate, GESTURE_TEMPLATES};
pub use mode::{Mode, ModeError};
pub use action::Action;
pub use reason::ReasonCode;
pub use trajectory::{TrajectorySample, SwipeDirection, Swipe};
pub use context::{ContextProbe, ContextSignal, TransitionCause, ModeTransition};
pub use config::{RecognizerConfig, ConfigError};
pub use frame::HandFrame;
pub use output::FrameOutput;
pub use state::RecognizerState;
