//! Integration tests for mode switching
//!
//! Manual toggles, automatic browser/music modes and the post-transition grace window

use handmode::core::GestureRecognizer;
use handmode::types::{
    Action, ConfigError, ContextProbe, ContextSignal, Gesture, HandFrame, Mode, ReasonCode,
    RecognizerConfig, TransitionCause,
};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

fn frame(g: Gesture) -> HandFrame {
    HandFrame::with_fingers(g.template().to_vec())
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

#[test]
fn test_palm_toggles_main_to_mouse() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();

    let mut last = None;
    for i in 0..3 {
        last = Some(rec.process_frame_at(&frame(Gesture::Palm), at(t0, 33 * i)));
    }
    let out = last.unwrap();
    assert_eq!(out.action, Some(Action::ToggleMode));
    assert_eq!(out.mode, Mode::Mouse);

    let transition = out.transition.expect("toggle records a transition");
    assert_eq!((transition.from, transition.to), (Mode::Main, Mode::Mouse));
    assert_eq!(transition.cause, TransitionCause::Manual);
    assert_eq!(transition.gesture, Some(Gesture::Palm));
}

#[test]
fn test_held_palm_waits_out_grace_window() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();

    for i in 0..3 {
        rec.process_frame_at(&frame(Gesture::Palm), at(t0, 33 * i));
    }
    assert_eq!(rec.mode(), Mode::Mouse);
    // Grace runs until 66 + 1000
    let mut first_fire = None;
    for i in 3..60u64 {
        let t = 33 * i;
        let out = rec.process_frame_at(&frame(Gesture::Palm), at(t0, t));
        if out.fired() {
            first_fire = Some((t, out));
            break;
        }
        assert_eq!(out.gesture, Some(Gesture::Palm));
        assert!(!out.is_new);
        assert_eq!(out.reason, ReasonCode::R301_GRACE_WINDOW);
    }

    let (t, out) = first_fire.expect("palm fires again after grace");
    assert_eq!(t, 1089);
    assert_eq!(out.action, Some(Action::ToggleMode));
    assert_eq!(out.reason, ReasonCode::R401_FIRED_CONTINUOUS);
    assert_eq!(out.mode, Mode::Main);
}

#[test]
fn test_toggle_round_trip_restores_main_table() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();
    let main_table = rec.action_table().to_vec();

    let t = rec.request_toggle_at(t0);
    assert_eq!(t.to, Mode::Mouse);
    assert!(rec.action_table().contains(&(Gesture::One, Action::MouseMove)));

    let t = rec.request_toggle_at(at(t0, 2000));
    assert_eq!(t.to, Mode::Main);
    assert_eq!(rec.action_table().to_vec(), main_table);
}

#[test]
fn test_mouse_pointer_fires_every_frame() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();
    rec.request_toggle_at(t0);

    let fired = (0..10u64)
        .map(|i| rec.process_frame_at(&frame(Gesture::One), at(t0, 1000 + 33 * i)))
        .filter(|out| out.action == Some(Action::MouseMove))
        .count();
    // First two frames are still confirming
    assert_eq!(fired, 8);
}

#[test]
fn test_music_outranks_browser_in_either_order() {
    let t0 = Instant::now();

    let mut rec = GestureRecognizer::default();
    rec.observe_context_at(ContextSignal::browser(true), t0);
    rec.observe_context_at(ContextSignal::music(true), t0);
    assert_eq!(rec.mode(), Mode::Music);

    let mut rec = GestureRecognizer::default();
    rec.observe_context_at(ContextSignal::music(true), t0);
    let transitions = rec.observe_context_at(ContextSignal::browser(true), t0);
    assert!(transitions.is_empty());
    assert_eq!(rec.mode(), Mode::Music);
}

#[test]
fn test_browser_resumes_after_music_ends() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();

    rec.observe_context_at(ContextSignal::browser(true).with_label("Chrome"), t0);
    rec.observe_context_at(ContextSignal::music(true).with_label("Spotify"), at(t0, 100));
    assert_eq!(rec.mode(), Mode::Music);

    let transitions = rec.observe_context_at(ContextSignal::music(false), at(t0, 200));
    let path: Vec<_> = transitions.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(path, vec![(Mode::Music, Mode::Browser)]);
    assert_eq!(transitions[0].cause, TransitionCause::ContextEntered(ContextProbe::Browser));
    assert_eq!(transitions[0].label.as_deref(), Some("Chrome"));

    let transitions = rec.observe_context_at(ContextSignal::browser(false), at(t0, 300));
    assert_eq!(transitions.len(), 1);
    assert_eq!(rec.mode(), Mode::Main);
}

#[test]
fn test_context_exit_restores_mouse() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();
    rec.request_toggle_at(t0);

    rec.observe_context_at(ContextSignal::browser(true), at(t0, 10));
    assert_eq!(rec.state_at(at(t0, 10)).restore_mode, Some(Mode::Mouse));

    let transitions = rec.observe_context_at(ContextSignal::browser(false), at(t0, 20));
    assert_eq!(transitions[0].to, Mode::Mouse);
    assert_eq!(transitions[0].cause.reason(), ReasonCode::R503_AUTO_EXIT);
    assert_eq!(rec.state_at(at(t0, 20)).restore_mode, None);
}

#[test]
fn test_repeated_probe_reading_is_idempotent() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();
    assert_eq!(rec.observe_context_at(ContextSignal::browser(true), t0).len(), 1);
    assert!(rec.observe_context_at(ContextSignal::browser(true), at(t0, 500)).is_empty());
    assert!(rec.observe_context_at(ContextSignal::music(false), at(t0, 500)).is_empty());
    assert_eq!(rec.mode(), Mode::Browser);
}

#[test]
fn test_auto_transition_keeps_held_gesture_without_refire() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();

    for i in 0..3 {
        rec.process_frame_at(&frame(Gesture::Two), at(t0, 33 * i));
    }
    rec.observe_context_at(ContextSignal::browser(true), at(t0, 80));

    let out = rec.process_frame_at(&frame(Gesture::Two), at(t0, 99));
    assert_eq!(out.mode, Mode::Browser);
    assert_eq!(out.gesture, Some(Gesture::Two));
    assert_eq!(out.action, None);
    assert_eq!(out.reason, ReasonCode::R301_GRACE_WINDOW);

    // After grace the held gesture is old news: cooldown path, not an edge
    let mut fired = None;
    for i in 0..40u64 {
        let out = rec.process_frame_at(&frame(Gesture::Two), at(t0, 1100 + 33 * i));
        if out.fired() {
            fired = Some(out);
            break;
        }
    }
    let fired = fired.expect("fires once cooldown elapses");
    assert_eq!(fired.action, Some(Action::BrowserBack));
    assert_eq!(fired.reason, ReasonCode::R404_FIRED_COOLDOWN_ELAPSED);
}

#[test]
fn test_explicit_toggle_from_browser_goes_main() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();
    rec.observe_context_at(ContextSignal::browser(true), t0);

    let t = rec.request_toggle_at(at(t0, 50));
    assert_eq!((t.from, t.to), (Mode::Browser, Mode::Main));
    assert_eq!(rec.state_at(at(t0, 50)).restore_mode, None);
}

#[test]
fn test_set_config_keeps_mode() {
    let mut rec = GestureRecognizer::default();
    let t0 = Instant::now();
    rec.request_toggle_at(t0);

    let config = rec.config().clone().with_grace_window_ms(0);
    rec.set_config(config).unwrap();
    assert_eq!(rec.mode(), Mode::Mouse);
    assert_eq!(rec.config().grace_window_ms, 0);
    assert_eq!(rec.current_gesture(), None);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = RecognizerConfig {
        trajectory_capacity: 0,
        ..RecognizerConfig::default()
    };
    assert_eq!(
        GestureRecognizer::new(config).err(),
        Some(ConfigError::R705_TRAJECTORY_INVALID)
    );

    let config = RecognizerConfig {
        history_capacity: 0,
        ..RecognizerConfig::default()
    };
    assert_eq!(GestureRecognizer::new(config).err(), Some(ConfigError::R702_ZERO_CAPACITY));
}

#[test]
fn test_invalid_config_swap_keeps_previous() {
    let mut rec = GestureRecognizer::default();
    let config = rec.config().clone().with_grace_window_ms(60_000);

    assert_eq!(rec.set_config(config), Err(ConfigError::R704_GRACE_OUT_OF_RANGE));
    assert_eq!(rec.config().grace_window_ms, 1000);
}
