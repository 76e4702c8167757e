//! Gesture Recognizer: per-frame entry point tying the pipeline together
//!
//! finger vector → classifier → debounce → trigger policy → action resolver.
//! Hand position feeds the trajectory detector in parallel. Every mode
//! transition clears debounce history, seeds the confirmed gesture and
//! starts a grace window.

use std::time::Instant;
use tracing::{debug, warn};
use crate::core::{DebounceFilter, GestureClassifier, ModeMachine, ModeProfile, TrajectoryDetector, TriggerPolicy};
use crate::types::{
    Action, ConfigError, ContextSignal, FrameOutput, Gesture, HandFrame, Mode, ModeTransition, ReasonCode,
    RecognizerConfig, RecognizerState,
};

/// Owns all recognition state for one hand stream
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: RecognizerConfig,
    classifier: GestureClassifier,
    debounce: DebounceFilter,
    policy: TriggerPolicy,
    machine: ModeMachine,
    trajectory: TrajectoryDetector,
    previous_gesture: Option<Gesture>,
    frames_processed: u64,
    actions_fired: u64,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        // Defaults always pass `validate`
        Self::build(RecognizerConfig::default())
    }
}

impl GestureRecognizer {
    /// Create recognizer; rejects a configuration that fails `validate`
    pub fn new(config: RecognizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RecognizerConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(&config),
            debounce: DebounceFilter::new(&config),
            policy: TriggerPolicy::new(),
            machine: ModeMachine::new(),
            trajectory: TrajectoryDetector::new(&config),
            previous_gesture: None,
            frames_processed: 0,
            actions_fired: 0,
            config,
        }
    }

    /// Process a frame stamped with the current time
    pub fn process_frame(&mut self, frame: &HandFrame) -> FrameOutput {
        self.process_frame_at(frame, Instant::now())
    }

    /// Process one frame at `now`
    pub fn process_frame_at(&mut self, frame: &HandFrame, now: Instant) -> FrameOutput {
        self.frames_processed += 1;

        match frame.position {
            Some([x, y]) if frame.has_hand() => self.trajectory.record(x, y, now),
            _ => self.trajectory.clear(),
        }
        let swipe = self.trajectory.detect_swipe();
        if let Some(s) = &swipe {
            debug!(swipe = s.name(), distance = s.distance, "trajectory");
        }

        let raw = match frame.finger_states.as_deref() {
            Some(states) if !states.is_empty() => {
                let raw = self.classifier.classify(states);
                if raw.is_none() && states.len() != 5 {
                    warn!(len = states.len(), "finger vector has wrong arity");
                }
                raw
            }
            _ => None,
        };

        let observation = self.debounce.observe(raw);
        let mode = self.machine.mode();

        let Some(gesture) = observation.confirmed else {
            let reason = if !frame.has_hand() {
                ReasonCode::R101_NO_HAND
            } else if raw.is_none() {
                ReasonCode::R102_NO_TEMPLATE_MATCH
            } else {
                ReasonCode::R201_AWAITING_CONFIRMATION
            };
            let mut output = FrameOutput::new(mode, raw, None, reason);
            output.swipe = swipe;
            return output;
        };

        let profile = ModeProfile::for_mode(mode, &self.config);
        let decision = self.policy.evaluate(gesture, observation.is_new, &profile, now);

        let mut output = FrameOutput::new(mode, raw, Some(gesture), decision.reason);
        output.is_new = observation.is_new;
        output.swipe = swipe;

        if !decision.fire {
            return output;
        }
        self.previous_gesture = Some(gesture);

        let Some(action) = profile.resolve(gesture) else {
            output.reason = ReasonCode::R405_UNMAPPED_IN_MODE;
            return output;
        };

        self.actions_fired += 1;
        output.action = Some(action);
        output.sustained = action.is_sustained();
        if action.needs_landmarks() {
            output.landmarks = frame.landmarks.clone();
        }

        if action == Action::ToggleMode {
            let transition = self.machine.toggle(Some(gesture));
            self.after_transition(Some(gesture), now);
            output.mode = transition.to;
            output.transition = Some(transition);
        }

        output
    }

    /// Feed a context probe reading; returns the transitions it caused
    pub fn observe_context(&mut self, signal: ContextSignal) -> Vec<ModeTransition> {
        self.observe_context_at(signal, Instant::now())
    }

    /// Feed a context probe reading at `now`
    pub fn observe_context_at(&mut self, signal: ContextSignal, now: Instant) -> Vec<ModeTransition> {
        let transitions = self.machine.observe(signal);
        if !transitions.is_empty() {
            let held = self.debounce.confirmed();
            self.after_transition(held, now);
        }
        transitions
    }

    /// Explicit toggle request from the host (keyboard shortcut, UI button)
    pub fn request_toggle(&mut self) -> ModeTransition {
        self.request_toggle_at(Instant::now())
    }

    /// Explicit toggle request at `now`
    pub fn request_toggle_at(&mut self, now: Instant) -> ModeTransition {
        let held = self.debounce.confirmed();
        let transition = self.machine.toggle(held);
        self.after_transition(held, now);
        transition
    }

    /// Clear history, seed the confirmed gesture, start the grace window
    fn after_transition(&mut self, seed: Option<Gesture>, now: Instant) {
        self.debounce.reseed(seed);
        self.policy.begin_grace(now, self.config.grace_window());
    }

    /// Clear transient state: history, confirmed gesture, cooldown, trajectory
    pub fn reset(&mut self) {
        self.debounce.clear();
        self.policy.reset();
        self.trajectory.clear();
        self.previous_gesture = None;
    }

    /// Swap in a new configuration. Transient state is rebuilt; mode is kept.
    /// An invalid configuration leaves the recognizer untouched.
    pub fn set_config(&mut self, config: RecognizerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.classifier = GestureClassifier::new(&config);
        self.debounce = DebounceFilter::new(&config);
        self.trajectory = TrajectoryDetector::new(&config);
        self.policy.reset();
        self.previous_gesture = None;
        self.config = config;
        Ok(())
    }

    /// Active configuration
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    /// Currently confirmed gesture
    pub fn current_gesture(&self) -> Option<Gesture> {
        self.debounce.confirmed()
    }

    /// Action table of the current mode
    pub fn action_table(&self) -> &'static [(Gesture, Action)] {
        ModeProfile::for_mode(self.mode(), &self.config).table()
    }

    /// Snapshot for display/telemetry
    pub fn state(&self) -> RecognizerState {
        self.state_at(Instant::now())
    }

    /// Snapshot at `now`
    pub fn state_at(&self, now: Instant) -> RecognizerState {
        RecognizerState {
            mode: self.machine.mode(),
            restore_mode: self.machine.restore_target(),
            current_gesture: self.debounce.confirmed(),
            previous_gesture: self.previous_gesture,
            ms_since_last_fire: self.policy.ms_since_last_fire(now),
            frames_processed: self.frames_processed,
            actions_fired: self.actions_fired,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn frame(g: Gesture) -> HandFrame {
        HandFrame::with_fingers(g.template().to_vec())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_no_hand_reason() {
        let mut rec = GestureRecognizer::default();
        let out = rec.process_frame_at(&HandFrame::empty(), Instant::now());
        assert_eq!(out.reason, ReasonCode::R101_NO_HAND);
        assert_eq!(out.action, None);
    }

    #[test]
    fn test_no_match_reason() {
        let mut rec = GestureRecognizer::default();
        let out = rec.process_frame_at(&HandFrame::with_fingers(vec![0.5; 5]), Instant::now());
        assert_eq!(out.reason, ReasonCode::R102_NO_TEMPLATE_MATCH);
    }

    #[test]
    fn test_awaiting_then_fires_edge() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        let a = rec.process_frame_at(&frame(Gesture::Rock), t0);
        let b = rec.process_frame_at(&frame(Gesture::Rock), t0 + ms(33));
        assert_eq!(a.reason, ReasonCode::R201_AWAITING_CONFIRMATION);
        assert_eq!(b.reason, ReasonCode::R201_AWAITING_CONFIRMATION);
        let c = rec.process_frame_at(&frame(Gesture::Rock), t0 + ms(66));
        assert_eq!(c.action, Some(Action::Screenshot));
        assert!(c.is_new);
        assert!(!c.sustained);
    }

    #[test]
    fn test_unmapped_in_mode_distinct_from_no_gesture() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        let mut out = None;
        for i in 0..3 {
            out = Some(rec.process_frame_at(&frame(Gesture::ThumbsUp), t0 + ms(33 * i)));
        }
        let out = out.unwrap();
        assert_eq!(out.gesture, Some(Gesture::ThumbsUp));
        assert_eq!(out.action, None);
        assert_eq!(out.reason, ReasonCode::R405_UNMAPPED_IN_MODE);
    }

    #[test]
    fn test_landmarks_only_for_pointer_move() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        rec.request_toggle_at(t0); // → MOUSE
        let landmarks = vec![[1.0, 2.0, 0.0]; 21];
        let mut last = None;
        for i in 0..3 {
            let f = frame(Gesture::One).with_landmarks(landmarks.clone());
            last = Some(rec.process_frame_at(&f, t0 + ms(2000 + 33 * i)));
        }
        let last = last.unwrap();
        assert_eq!(last.action, Some(Action::MouseMove));
        assert!(last.sustained);
        assert_eq!(last.landmarks.as_ref().map(|l| l.len()), Some(21));
    }

    #[test]
    fn test_browser_scroll_is_sustained() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        rec.observe_context_at(ContextSignal::browser(true), t0);
        let mut last = None;
        for i in 0..3 {
            last = Some(rec.process_frame_at(&frame(Gesture::ThumbsUp), t0 + ms(2000 + 33 * i)));
        }
        let last = last.unwrap();
        assert_eq!(last.action, Some(Action::BrowserScrollUp));
        assert!(last.sustained);
        assert!(last.to_parseable_string().contains("| sustained"));
    }

    #[test]
    fn test_unfired_frame_not_sustained() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        rec.request_toggle_at(t0);
        let out = rec.process_frame_at(&frame(Gesture::One), t0 + ms(2000));
        assert_eq!(out.action, None);
        assert!(!out.sustained);
    }

    #[test]
    fn test_trajectory_cleared_without_hand() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        for i in 0..6 {
            let f = frame(Gesture::One).with_position(100.0 + 20.0 * i as f32, 100.0);
            rec.process_frame_at(&f, t0 + ms(33 * i));
        }
        let out = rec.process_frame_at(&frame(Gesture::One).with_position(220.0, 100.0), t0 + ms(200));
        assert_eq!(out.swipe.map(|s| s.name()), Some("SWIPE_RIGHT"));

        let out = rec.process_frame_at(&HandFrame::empty().with_position(0.0, 0.0), t0 + ms(233));
        assert_eq!(out.swipe, None);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        rec.request_toggle_at(t0);
        rec.reset();
        assert_eq!(rec.mode(), Mode::Mouse);
        assert_eq!(rec.current_gesture(), None);
        assert_eq!(rec.state_at(t0).ms_since_last_fire, None);
    }

    #[test]
    fn test_counters() {
        let mut rec = GestureRecognizer::default();
        let t0 = Instant::now();
        for i in 0..4 {
            rec.process_frame_at(&frame(Gesture::Rock), t0 + ms(33 * i));
        }
        let state = rec.state_at(t0 + ms(200));
        assert_eq!(state.frames_processed, 4);
        assert_eq!(state.actions_fired, 1);
        assert_eq!(state.previous_gesture, Some(Gesture::Rock));
    }
}
