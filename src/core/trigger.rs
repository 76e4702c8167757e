//! Trigger Policy: decides whether a confirmed gesture fires this frame
//!
//! Precedence:
//! 1. Grace window after a mode transition blocks everything
//! 2. Continuous gestures (MOUSE) fire every frame
//! 3. Fast-repeat gestures (MAIN magnitude) fire once per repeat interval
//! 4. Everything else fires on change, or when the mode cooldown elapsed

use std::time::{Duration, Instant};
use crate::core::profile::{FiringRule, ModeProfile};
use crate::types::{Gesture, ReasonCode};

/// Outcome of one policy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireDecision {
    pub fire: bool,
    pub reason: ReasonCode,
}

impl FireDecision {
    fn fire(reason: ReasonCode) -> Self {
        Self { fire: true, reason }
    }

    fn hold(reason: ReasonCode) -> Self {
        Self { fire: false, reason }
    }
}

/// Owns `last_fire_time`
#[derive(Debug, Clone, Default)]
pub struct TriggerPolicy {
    /// Last fire; sits in the future while a grace window is pending
    last_fire: Option<Instant>,
}

impl TriggerPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate and, on fire, record `now` as the last fire time
    pub fn evaluate(
        &mut self,
        gesture: Gesture,
        is_new: bool,
        profile: &ModeProfile,
        now: Instant,
    ) -> FireDecision {
        let decision = self.decide(gesture, is_new, profile, now);
        if decision.fire {
            self.last_fire = Some(now);
        }
        decision
    }

    /// Boolean form of `evaluate`
    pub fn should_fire(
        &mut self,
        gesture: Gesture,
        is_new: bool,
        profile: &ModeProfile,
        now: Instant,
    ) -> bool {
        self.evaluate(gesture, is_new, profile, now).fire
    }

    fn decide(
        &self,
        gesture: Gesture,
        is_new: bool,
        profile: &ModeProfile,
        now: Instant,
    ) -> FireDecision {
        // None = never fired
        let since_fire = match self.last_fire {
            None => None,
            Some(t) => match now.checked_duration_since(t) {
                Some(d) => Some(d),
                None => return FireDecision::hold(ReasonCode::R301_GRACE_WINDOW),
            },
        };
        let elapsed = |limit: Duration| since_fire.map_or(true, |d| d >= limit);

        match profile.rule_for(gesture) {
            FiringRule::Continuous => FireDecision::fire(ReasonCode::R401_FIRED_CONTINUOUS),
            FiringRule::FastRepeat => {
                if elapsed(profile.repeat_interval()) {
                    FireDecision::fire(ReasonCode::R402_FIRED_REPEAT)
                } else {
                    FireDecision::hold(ReasonCode::R302_REPEAT_INTERVAL)
                }
            }
            FiringRule::Edge => {
                if is_new {
                    FireDecision::fire(ReasonCode::R403_FIRED_EDGE)
                } else if elapsed(profile.cooldown()) {
                    FireDecision::fire(ReasonCode::R404_FIRED_COOLDOWN_ELAPSED)
                } else {
                    FireDecision::hold(ReasonCode::R303_COOLDOWN_ACTIVE)
                }
            }
        }
    }

    /// Push the last fire time forward so nothing fires before `now + grace`
    pub fn begin_grace(&mut self, now: Instant, grace: Duration) {
        self.last_fire = Some(now + grace);
    }

    /// Signed milliseconds since the last fire
    pub fn ms_since_last_fire(&self, now: Instant) -> Option<i64> {
        self.last_fire.map(|t| match now.checked_duration_since(t) {
            Some(d) => d.as_millis() as i64,
            None => -(t.duration_since(now).as_millis() as i64),
        })
    }

    /// Forget the cooldown
    pub fn reset(&mut self) {
        self.last_fire = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mode, RecognizerConfig};

    fn profile(mode: Mode) -> ModeProfile {
        ModeProfile::for_mode(mode, &RecognizerConfig::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_main_fast_repeat_interval() {
        let main = profile(Mode::Main);
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();

        assert!(policy.should_fire(Gesture::One, true, &main, t0));
        assert!(!policy.should_fire(Gesture::One, false, &main, t0 + ms(100)));
        assert!(!policy.should_fire(Gesture::One, false, &main, t0 + ms(299)));
        assert!(policy.should_fire(Gesture::One, false, &main, t0 + ms(300)));
    }

    #[test]
    fn test_fast_repeat_ignores_is_new() {
        let main = profile(Mode::Main);
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();

        policy.evaluate(Gesture::One, true, &main, t0);
        let decision = policy.evaluate(Gesture::Two, true, &main, t0 + ms(50));
        assert_eq!(decision, FireDecision::hold(ReasonCode::R302_REPEAT_INTERVAL));
    }

    #[test]
    fn test_edge_fires_once_then_cooldown() {
        let browser = profile(Mode::Browser);
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();

        let first = policy.evaluate(Gesture::Two, true, &browser, t0);
        assert_eq!(first.reason, ReasonCode::R403_FIRED_EDGE);
        let held = policy.evaluate(Gesture::Two, false, &browser, t0 + ms(200));
        assert_eq!(held.reason, ReasonCode::R303_COOLDOWN_ACTIVE);
        let again = policy.evaluate(Gesture::Two, false, &browser, t0 + ms(500));
        assert_eq!(again.reason, ReasonCode::R404_FIRED_COOLDOWN_ELAPSED);
    }

    #[test]
    fn test_edge_new_gesture_bypasses_cooldown() {
        let browser = profile(Mode::Browser);
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();

        policy.evaluate(Gesture::Two, true, &browser, t0);
        assert!(policy.should_fire(Gesture::Three, true, &browser, t0 + ms(10)));
    }

    #[test]
    fn test_music_uses_music_cooldown() {
        let music = profile(Mode::Music);
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();

        policy.evaluate(Gesture::Four, true, &music, t0);
        assert!(!policy.should_fire(Gesture::Four, false, &music, t0 + ms(299)));
        assert!(policy.should_fire(Gesture::Four, false, &music, t0 + ms(300)));
    }

    #[test]
    fn test_mouse_continuous_never_throttled() {
        let mouse = profile(Mode::Mouse);
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();

        for i in 0..10 {
            let decision = policy.evaluate(Gesture::One, false, &mouse, t0 + ms(i * 5));
            assert_eq!(decision.reason, ReasonCode::R401_FIRED_CONTINUOUS);
        }
    }

    #[test]
    fn test_grace_blocks_every_rule() {
        let mouse = profile(Mode::Mouse);
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();

        policy.begin_grace(t0, ms(1000));
        let decision = policy.evaluate(Gesture::One, true, &mouse, t0 + ms(999));
        assert_eq!(decision, FireDecision::hold(ReasonCode::R301_GRACE_WINDOW));
        assert!(policy.should_fire(Gesture::One, false, &mouse, t0 + ms(1000)));
    }

    #[test]
    fn test_ms_since_last_fire_signed() {
        let mut policy = TriggerPolicy::new();
        let t0 = Instant::now();
        assert_eq!(policy.ms_since_last_fire(t0), None);
        policy.begin_grace(t0, ms(1000));
        assert_eq!(policy.ms_since_last_fire(t0 + ms(400)), Some(-600));
        assert_eq!(policy.ms_since_last_fire(t0 + ms(1250)), Some(250));
    }
}
