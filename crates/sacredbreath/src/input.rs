use std::io::{self, BufRead};
use std::thread;
use std::time::Instant;

use breathclock::{BreathPattern, Session, StrengthLevel};
use crossbeam_channel::{unbounded, Receiver};
use tracing::{debug, warn};

/// Commands typed on stdin while a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Pause,
    Toggle,
    Reset,
    Strength(StrengthLevel),
    Quit,
}

pub fn parse_control(line: &str) -> Option<Control> {
    let normalized = line.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" => Some(Control::Toggle),
        "p" | "pause" => Some(Control::Pause),
        "g" | "go" | "start" | "resume" => Some(Control::Start),
        "r" | "reset" => Some(Control::Reset),
        "q" | "quit" | "exit" => Some(Control::Quit),
        other => other.parse().ok().map(Control::Strength),
    }
}

/// Applies one command. `None` means the session should end.
pub fn apply_control(session: Session, control: Control, now: Instant) -> Option<Session> {
    let next = match control {
        Control::Start => session.start(now),
        Control::Pause => session.pause(now),
        Control::Toggle => session.toggle(now),
        Control::Reset => session.reset(now),
        Control::Strength(level) => session.with_pattern(BreathPattern::Strength(level)),
        Control::Quit => return None,
    };
    Some(next)
}

/// Forwards parsed stdin commands over a channel. The channel disconnects
/// when stdin reaches EOF.
pub fn spawn_stdin_reader() -> Receiver<Control> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(%err, "failed to read from stdin; ignoring further input");
                    break;
                }
            };
            match parse_control(&line) {
                Some(control) => {
                    if tx.send(control).is_err() {
                        break;
                    }
                }
                None => warn!(input = %line.trim(), "unrecognised command"),
            }
        }
        debug!("stdin closed");
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_control(""), Some(Control::Toggle));
        assert_eq!(parse_control(" P "), Some(Control::Pause));
        assert_eq!(parse_control("resume"), Some(Control::Start));
        assert_eq!(parse_control("r"), Some(Control::Reset));
        assert_eq!(parse_control("quit"), Some(Control::Quit));
        assert_eq!(
            parse_control("strong"),
            Some(Control::Strength(StrengthLevel::Strong))
        );
        assert_eq!(parse_control("louder"), None);
    }

    #[test]
    fn controls_drive_session_transitions() {
        let start = Instant::now();
        let session = Session::started(BreathPattern::Strength(StrengthLevel::Light), start);

        let paused = apply_control(session, Control::Pause, start + Duration::from_secs(2)).unwrap();
        assert!(!paused.is_running());

        let switched = apply_control(
            paused,
            Control::Strength(StrengthLevel::Medium),
            start + Duration::from_secs(3),
        )
        .unwrap();
        assert_eq!(
            switched.pattern().strength_level(),
            Some(StrengthLevel::Medium)
        );
        assert_eq!(switched.elapsed(start + Duration::from_secs(9)), Duration::from_secs(2));

        let reset = apply_control(switched, Control::Reset, start + Duration::from_secs(4)).unwrap();
        assert_eq!(reset.elapsed(start + Duration::from_secs(4)), Duration::ZERO);

        assert!(apply_control(reset, Control::Quit, start).is_none());
    }
}
