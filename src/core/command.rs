//! Host commands for the CLI driver: interactive lines and replay events
//!
//! Interactive grammar (one command per line):
//! - `0 1 0 0 0 [@ x y]` finger vector, optional hand position
//! - `ONE [@ x y]` gesture name, expanded to its template vector
//! - `-` / `none` no hand
//! - `browser on|off [label]`, `music on|off [label]`
//! - `toggle`, `reset`, `wait <ms>`, `quit`

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::types::{ContextProbe, ContextSignal, Gesture, HandFrame};

lazy_static! {
    /// Frame body with optional `@ x y` position
    static ref RE_FRAME: Regex = Regex::new(
        r"^(?P<body>[^@]+?)\s*(?:@\s*(?P<x>-?\d+(?:\.\d+)?)[\s,]+(?P<y>-?\d+(?:\.\d+)?))?$"
    ).unwrap();

    /// Numeric finger vector (any arity; the classifier rejects wrong lengths)
    static ref RE_VECTOR: Regex = Regex::new(
        r"^\d+(?:\.\d+)?(?:[\s,]+\d+(?:\.\d+)?)*$"
    ).unwrap();

    static ref RE_CONTEXT: Regex = Regex::new(
        r"(?i)^(?P<probe>browser|music)\s+(?P<state>on|off)(?:\s+(?P<label>.+))?$"
    ).unwrap();

    static ref RE_WAIT: Regex = Regex::new(r"(?i)^wait\s+(?P<ms>\d+)$").unwrap();
}

/// One instruction for the recognizer host loop
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Frame(HandFrame),
    Context(ContextSignal),
    Toggle,
    Reset,
    /// Advance the virtual clock
    Wait(u64),
    Quit,
}

/// Parse one interactive line; `None` if it matches nothing
pub fn parse_command(line: &str) -> Option<HostCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.to_ascii_lowercase().as_str() {
        "-" | "none" => return Some(HostCommand::Frame(HandFrame::empty())),
        "toggle" => return Some(HostCommand::Toggle),
        "reset" => return Some(HostCommand::Reset),
        "quit" | "exit" => return Some(HostCommand::Quit),
        _ => {}
    }

    if let Some(caps) = RE_CONTEXT.captures(line) {
        let probe = if caps["probe"].eq_ignore_ascii_case("music") {
            ContextProbe::Music
        } else {
            ContextProbe::Browser
        };
        let active = caps["state"].eq_ignore_ascii_case("on");
        let label = caps.name("label").map(|m| m.as_str().trim().to_string());
        return Some(HostCommand::Context(ContextSignal::new(probe, active, label)));
    }

    if let Some(caps) = RE_WAIT.captures(line) {
        return caps["ms"].parse().ok().map(HostCommand::Wait);
    }

    let caps = RE_FRAME.captures(line)?;
    let body = caps["body"].trim();
    let finger_states = if RE_VECTOR.is_match(body) {
        body.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f32>().ok())
            .collect::<Option<Vec<f32>>>()?
    } else {
        Gesture::from_name(body)?.template().to_vec()
    };

    let mut frame = HandFrame::with_fingers(finger_states);
    if let (Some(x), Some(y)) = (caps.name("x"), caps.name("y")) {
        frame = frame.with_position(x.as_str().parse().ok()?, y.as_str().parse().ok()?);
    }
    Some(HostCommand::Frame(frame))
}

/// One line of a JSON Lines replay file, stamped relative to replay start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    Frame { t_ms: u64, frame: HandFrame },
    Context { t_ms: u64, signal: ContextSignal },
    Toggle { t_ms: u64 },
    Reset { t_ms: u64 },
}

impl ReplayEvent {
    /// Offset from replay start
    pub fn t_ms(&self) -> u64 {
        match self {
            Self::Frame { t_ms, .. }
            | Self::Context { t_ms, .. }
            | Self::Toggle { t_ms }
            | Self::Reset { t_ms } => *t_ms,
        }
    }

    /// Command to run at `t_ms`
    pub fn into_command(self) -> HostCommand {
        match self {
            Self::Frame { frame, .. } => HostCommand::Frame(frame),
            Self::Context { signal, .. } => HostCommand::Context(signal),
            Self::Toggle { .. } => HostCommand::Toggle,
            Self::Reset { .. } => HostCommand::Reset,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_vector() {
        let cmd = parse_command("0 1 0 0 0").unwrap();
        assert_eq!(cmd, HostCommand::Frame(HandFrame::with_fingers(vec![0.0, 1.0, 0.0, 0.0, 0.0])));
    }

    #[test]
    fn test_comma_vector_with_position() {
        let cmd = parse_command("0,1,1,0,0 @ 320 240").unwrap();
        let expected = HandFrame::with_fingers(vec![0.0, 1.0, 1.0, 0.0, 0.0]).with_position(320.0, 240.0);
        assert_eq!(cmd, HostCommand::Frame(expected));
    }

    #[test]
    fn test_gesture_name() {
        let cmd = parse_command("thumbs_up").unwrap();
        assert_eq!(cmd, HostCommand::Frame(HandFrame::with_fingers(Gesture::ThumbsUp.template().to_vec())));
    }

    #[test]
    fn test_no_hand() {
        assert_eq!(parse_command("-"), Some(HostCommand::Frame(HandFrame::empty())));
        assert_eq!(parse_command("NONE"), Some(HostCommand::Frame(HandFrame::empty())));
    }

    #[test]
    fn test_context_with_label() {
        let cmd = parse_command("music on NetEase Cloud Music").unwrap();
        let expected = ContextSignal::music(true).with_label("NetEase Cloud Music");
        assert_eq!(cmd, HostCommand::Context(expected));
        assert_eq!(parse_command("Browser OFF"), Some(HostCommand::Context(ContextSignal::browser(false))));
    }

    #[test]
    fn test_control_words() {
        assert_eq!(parse_command("toggle"), Some(HostCommand::Toggle));
        assert_eq!(parse_command("reset"), Some(HostCommand::Reset));
        assert_eq!(parse_command("wait 300"), Some(HostCommand::Wait(300)));
        assert_eq!(parse_command("quit"), Some(HostCommand::Quit));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_command("wave hello"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_replay_event_json() {
        let line = r#"{"event":"frame","t_ms":66,"frame":{"finger_states":[0,1,0,0,0],"position":[10,20]}}"#;
        let event: ReplayEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.t_ms(), 66);
        let expected = HandFrame::with_fingers(vec![0.0, 1.0, 0.0, 0.0, 0.0]).with_position(10.0, 20.0);
        assert_eq!(event.into_command(), HostCommand::Frame(expected));

        let line = r#"{"event":"context","t_ms":1000,"signal":{"probe":"music","active":true,"label":"Spotify"}}"#;
        let event: ReplayEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.into_command(), HostCommand::Context(ContextSignal::music(true).with_label("Spotify")));
    }
}
