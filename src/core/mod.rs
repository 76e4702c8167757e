//! Core modules for handmode

pub mod classifier;
pub mod debounce;
pub mod profile;
pub mod trigger;
pub mod mode_machine;
pub mod trajectory;
pub mod recognizer;
pub mod command;
pub mod api;

pub use classifier::{GestureClassifier, state_distance};
pub use debounce::{DebounceFilter, Observation};
pub use profile::{ModeProfile, FiringRule};
pub use trigger::{TriggerPolicy, FireDecision};
pub use mode_machine::ModeMachine;
pub use trajectory::TrajectoryDetector;
pub use recognizer::GestureRecognizer;
pub use command::{HostCommand, ReplayEvent, parse_command};
pub use api::{create_router, run_server};
