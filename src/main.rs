//! handmode CLI
//!
//! Usage:
//!   handmode --interactive                  # Type frames and context readings
//!   handmode --replay session.jsonl         # Replay a recorded event stream
//!   handmode --serve                        # HTTP API server
//!   handmode --replay session.jsonl --json  # JSON output
//!   handmode --table music                  # Print one mode's action table

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use handmode::core::{GestureRecognizer, HostCommand, ModeProfile, ReplayEvent, parse_command, run_server};
use handmode::types::{FrameOutput, Mode, ModeTransition, RecognizerConfig};
use handmode::VERSION;

/// Virtual time between two interactive frames (~30 fps)
const FRAME_STEP_MS: u64 = 33;

#[derive(Parser, Debug)]
#[command(
    name = "handmode",
    version = VERSION,
    about = "Hand-gesture recognition and mode state machine",
    long_about = "handmode turns per-frame finger states into debounced gestures\n\
                  and mode-dependent actions.\n\n\
                  Modes:\n  \
                  --interactive  Type frames line by line (default)\n  \
                  --replay       Replay a JSON Lines event file\n  \
                  --serve        HTTP API server mode\n\n\
                  Gesture modes:\n  \
                  MAIN    - Media keys, tabs, screenshot\n  \
                  MOUSE   - Pointer control\n  \
                  BROWSER - Scrolling, tabs, refresh (automatic)\n  \
                  MUSIC   - Playback control (automatic)"
)]
struct Args {
    /// Replay a JSON Lines event file
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Interactive mode - read commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Print the gesture→action table of a mode and exit
    #[arg(long, value_name = "MODE")]
    table: Option<String>,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show recognizer state after each event
    #[arg(long)]
    verbose: bool,

    /// Edge cooldown for MAIN, MOUSE and BROWSER
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Grace window after a mode transition
    #[arg(long)]
    grace_ms: Option<u64>,

    /// Per-finger classification threshold
    #[arg(long)]
    threshold: Option<f32>,
}

impl Args {
    fn config(&self) -> anyhow::Result<RecognizerConfig> {
        let mut config = RecognizerConfig::default();
        if let Some(ms) = self.cooldown_ms {
            config = config.with_gesture_cooldown_ms(ms);
        }
        if let Some(ms) = self.grace_ms {
            config = config.with_grace_window_ms(ms);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_finger_state_threshold(threshold);
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("handmode=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config()?;

    if let Some(name) = &args.table {
        let mode: Mode = name.parse().with_context(|| format!("--table {}", name))?;
        print_table(mode, &config, args.no_color);
        Ok(())
    } else if args.serve {
        run_serve(&args, config).await
    } else if let Some(path) = &args.replay {
        run_replay(path, &args, config)
    } else {
        run_interactive(&args, config)
    }
}

/// Host loop state: recognizer plus a virtual clock
struct Host {
    recognizer: GestureRecognizer,
    base: Instant,
    offset_ms: u64,
}

impl Host {
    fn new(config: RecognizerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            recognizer: GestureRecognizer::new(config).context("invalid configuration")?,
            base: Instant::now(),
            offset_ms: 0,
        })
    }

    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms)
    }

    /// Run one command at the current virtual time
    fn run(&mut self, command: HostCommand, args: &Args) {
        let now = self.now();
        match command {
            HostCommand::Frame(frame) => {
                let output = self.recognizer.process_frame_at(&frame, now);
                print_frame(&output, args);
            }
            HostCommand::Context(signal) => {
                let transitions = self.recognizer.observe_context_at(signal, now);
                print_transitions(&transitions, args);
            }
            HostCommand::Toggle => {
                let transition = self.recognizer.request_toggle_at(now);
                print_transitions(std::slice::from_ref(&transition), args);
            }
            HostCommand::Reset => {
                self.recognizer.reset();
                if !args.json {
                    println!("  transient state cleared");
                }
            }
            HostCommand::Wait(ms) => self.offset_ms += ms,
            HostCommand::Quit => {}
        }
        if args.verbose && !args.json {
            print_state(&self.recognizer, now, args.no_color);
        }
    }
}

/// Run interactive mode
fn run_interactive(args: &Args, config: RecognizerConfig) -> anyhow::Result<()> {
    let mut host = Host::new(config)?;

    print_header("Interactive", args.no_color);
    println!("One command per line:");
    println!("  0 1 0 0 0 [@ x y]     finger states (thumb..pinky), optional position");
    println!("  ONE | PALM | ...      gesture name");
    println!("  - | none              no hand");
    println!("  browser on|off [title], music on|off [title]");
    println!("  toggle, reset, wait <ms>, quit");
    println!("Each frame advances the clock by {} ms.", FRAME_STEP_MS);
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(host.recognizer.mode(), args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            warn!(line = line.trim(), "unrecognized command");
            continue;
        };
        if command == HostCommand::Quit {
            break;
        }

        let is_frame = matches!(command, HostCommand::Frame(_));
        host.run(command, args);
        if is_frame {
            host.offset_ms += FRAME_STEP_MS;
        }
    }

    let state = host.recognizer.state_at(host.now());
    println!("\nSession ended. Frames: {} | Actions: {}", state.frames_processed, state.actions_fired);
    Ok(())
}

/// Replay a JSON Lines file against the virtual clock
fn run_replay(path: &Path, args: &Args, config: RecognizerConfig) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut host = Host::new(config)?;

    if !args.json {
        print_header("Replay", args.no_color);
    }

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ReplayEvent = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed event", path.display(), index + 1))?;

        // Timestamps never run backwards
        host.offset_ms = host.offset_ms.max(event.t_ms());
        host.run(event.into_command(), args);
    }

    if !args.json {
        let state = host.recognizer.state_at(host.now());
        println!();
        println!("{}", state.summary());
    }
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: RecognizerConfig) -> anyhow::Result<()> {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  ✋ handmode API Server                                   ║");
    println!("║  Version: {}                                          ║", VERSION);
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    run_server(&args.addr, config).await
}

/// Print header
fn print_header(title: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  handmode v{} - {}", VERSION, title);
        println!("========================================");
    } else {
        println!("\x1b[1m╔══════════════════════════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║           handmode v{} - {}                     ║\x1b[0m", VERSION, title);
        println!("\x1b[1m╚══════════════════════════════════════════════════════════╝\x1b[0m");
    }
    println!();
}

/// Format prompt with the current mode
fn format_prompt(mode: Mode, no_color: bool) -> String {
    if no_color {
        format!("[{}] > ", mode)
    } else {
        format!("{}{} [{}]{} > ", mode.color_code(), mode.emoji(), mode, Mode::color_reset())
    }
}

/// Print one frame result
fn print_frame(output: &FrameOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!(error = %e, "failed to serialize frame output"),
        }
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

/// Print mode transitions from a toggle or context reading
fn print_transitions(transitions: &[ModeTransition], args: &Args) {
    for t in transitions {
        if args.json {
            match serde_json::to_string(t) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!(error = %e, "failed to serialize transition"),
            }
        } else if args.no_color {
            println!("transition={}->{} | reason={}", t.from, t.to, t.cause.reason().code());
        } else {
            println!("{}{} ↳ {}{}", t.to.color_code(), t.to.emoji(), t, Mode::color_reset());
        }
    }
}

/// Print one mode's action table
fn print_table(mode: Mode, config: &RecognizerConfig, no_color: bool) {
    let color = if no_color { "" } else { mode.color_code() };
    let reset = if no_color { "" } else { Mode::color_reset() };
    println!("{}{} [{}]{}", color, if no_color { "" } else { mode.emoji() }, mode, reset);
    for (gesture, action) in ModeProfile::for_mode(mode, config).table() {
        println!("  {:<10} → {}", gesture.as_str(), action);
    }
}

/// Print verbose recognizer state
fn print_state(recognizer: &GestureRecognizer, now: Instant, no_color: bool) {
    let state = recognizer.state_at(now);
    let color = if no_color { "" } else { "\x1b[90m" };
    let reset = if no_color { "" } else { Mode::color_reset() };

    println!("{}┌─────────────────────────────────────┐{}", color, reset);
    println!("{}│ {}{}", color, state.summary(), reset);
    println!(
        "{}│ restore={} | since_fire={}{}",
        color,
        state.restore_mode.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string()),
        state
            .ms_since_last_fire
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "-".to_string()),
        reset
    );
    let table = recognizer
        .action_table()
        .iter()
        .map(|(g, a)| format!("{}={}", g, a))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}│ table: {}{}", color, if table.is_empty() { "-" } else { table.as_str() }, reset);
    println!("{}└─────────────────────────────────────┘{}", color, reset);
}
