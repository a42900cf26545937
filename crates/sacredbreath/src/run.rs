use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use breathclock::{calculate, BreathPhase, Session};
use crossbeam_channel::RecvTimeoutError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{AtArgs, RunArgs};
use crate::display::{describe, status_line};
use crate::input::{apply_control, spawn_stdin_reader, Control};
use crate::paths::AppPaths;
use crate::settings::{load_config, SessionSettings};

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

pub fn run(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let paths = AppPaths::discover()?;
    let (config, source) = load_config(&paths, config_path)?;
    debug!(config_dir = %paths.config_dir().display(), ?source, "resolved sacredbreath config");
    let settings = SessionSettings::resolve(&config, &args);

    info!(
        pattern = ?settings.pattern,
        autostart = settings.autostart,
        frame_ms = settings.frame_interval.as_millis() as u64,
        limit = ?settings.limit,
        cycles = ?settings.cycles,
        "starting breath session"
    );
    if !settings.autostart {
        info!("session paused; type `g` and press enter to begin");
    }

    let mut controls = spawn_stdin_reader();
    let mut session = Session::new(settings.pattern);
    if settings.autostart {
        session = session.start(Instant::now());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut last_position: Option<(u64, BreathPhase)> = None;

    loop {
        match controls.recv_timeout(settings.frame_interval) {
            Ok(control) => {
                let now = Instant::now();
                log_control(control, &session);
                match apply_control(session, control, now) {
                    Some(next) => session = next,
                    None => break,
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if !session.is_running() {
                    warn!("input closed while paused; nothing can resume the session");
                    break;
                }
                debug!("input closed; continuing without interactive controls");
                controls = crossbeam_channel::never();
            }
        }

        let now = Instant::now();
        let state = session
            .snapshot(now)
            .context("failed to compute breath state")?;

        let position = (state.cycle, state.phase);
        if last_position != Some(position) {
            info!(
                phase = %state.phase,
                cycle = state.cycle + 1,
                seconds = state.phase_duration,
                chakra = %state.active_chakra,
                "phase change"
            );
            last_position = Some(position);
        }

        write!(out, "\r{}", status_line(&state)).context("failed to write status line")?;
        out.flush().context("failed to flush status line")?;

        if let Some(limit) = settings.limit {
            if session.elapsed(now) >= limit {
                info!(limit = ?limit, "session limit reached");
                break;
            }
        }
        if let Some(target) = settings.cycles {
            if state.completed_cycles() >= target {
                info!(cycles = target, "cycle target reached");
                break;
            }
        }
    }

    writeln!(out).context("failed to finish status line")?;
    Ok(())
}

fn log_control(control: Control, session: &Session) {
    match control {
        Control::Start if !session.is_running() => info!("resuming session"),
        Control::Pause if session.is_running() => info!("pausing session"),
        Control::Toggle => info!(running = !session.is_running(), "toggling session"),
        Control::Reset => info!("resetting session"),
        Control::Strength(level) => info!(%level, "switching strength level"),
        Control::Quit => info!("quitting session"),
        Control::Start | Control::Pause => {}
    }
}

pub fn run_at(args: AtArgs, config_path: Option<&Path>) -> Result<()> {
    let paths = AppPaths::discover()?;
    let (config, source) = load_config(&paths, config_path)?;
    debug!(?source, "resolved sacredbreath config");
    let pattern = args.pattern.resolve(&config);
    let state = calculate(&pattern, args.elapsed).context("failed to compute breath state")?;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&state).context("failed to serialise breath state")?;
        println!("{rendered}");
    } else {
        println!("{}", describe(&state));
    }
    Ok(())
}
