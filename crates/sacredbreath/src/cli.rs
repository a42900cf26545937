use std::path::PathBuf;
use std::time::Duration;

use breathclock::{BreathPattern, PhaseDurations, StrengthLevel};
use breathconfig::{parse_duration, BreathConfig};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "sacredbreath",
    author,
    version,
    about = "Sacred Breath timer",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Read settings from this TOML file instead of the user config directory.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Strength schedule: `light`, `medium`, or `strong`.
    #[arg(long, value_name = "LEVEL", value_parser = parse_strength, conflicts_with = "durations")]
    pub strength: Option<StrengthLevel>,

    /// Explicit phase lengths as `INHALE,HOLD,EXHALE,HOLD` (seconds or e.g. `1500ms`).
    #[arg(long, value_name = "IN,HOLD,OUT,HOLD", value_parser = parse_durations)]
    pub durations: Option<PhaseDurations>,
}

impl PatternArgs {
    /// Flags win over the file; explicit durations win over a strength level.
    pub fn resolve(&self, config: &BreathConfig) -> BreathPattern {
        if let Some(durations) = self.durations {
            BreathPattern::Durations(durations)
        } else if let Some(level) = self.strength {
            BreathPattern::Strength(level)
        } else {
            config.pattern()
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Status refresh rate (frames per second).
    #[arg(long, value_name = "FPS", value_parser = parse_fps)]
    pub fps: Option<f32>,

    /// Stop after this much breathing time (seconds or e.g. `20m`).
    #[arg(long, value_name = "DURATION", value_parser = parse_limit)]
    pub limit: Option<Duration>,

    /// Stop once this many cycles have completed.
    #[arg(long, value_name = "COUNT")]
    pub cycles: Option<u64>,

    /// Start paused; resume with `g` on stdin.
    #[arg(long)]
    pub no_autostart: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the breath state at a given elapsed time.
    At(AtArgs),
    /// Print the strength schedules.
    Schedule(ScheduleArgs),
    /// Inspect configuration locations.
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
pub struct AtArgs {
    /// Elapsed session time (seconds or e.g. `1m 22s`).
    #[arg(value_name = "ELAPSED", value_parser = parse_elapsed)]
    pub elapsed: f64,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Emit the state as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Only show this strength level.
    #[arg(value_name = "LEVEL", value_parser = parse_strength)]
    pub level: Option<StrengthLevel>,
}

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config directory and file.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_strength(value: &str) -> Result<StrengthLevel, String> {
    value.parse()
}

pub fn parse_durations(value: &str) -> Result<PhaseDurations, String> {
    value.parse().map_err(|err: breathconfig::ConfigError| err.to_string())
}

pub fn parse_fps(value: &str) -> Result<f32, String> {
    let fps: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid fps '{}'", value.trim()))?;
    if !fps.is_finite() || fps <= 0.0 || fps > breathconfig::MAX_FPS {
        return Err(format!(
            "fps must be within (0, {}], got {fps}",
            breathconfig::MAX_FPS
        ));
    }
    Ok(fps)
}

pub fn parse_limit(value: &str) -> Result<Duration, String> {
    let limit = parse_duration(value)?;
    if limit.is_zero() {
        return Err("limit must be greater than zero".to_string());
    }
    Ok(limit)
}

pub fn parse_elapsed(value: &str) -> Result<f64, String> {
    parse_duration(value).map(|elapsed| elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "sacredbreath",
            "--strength",
            "medium",
            "--fps",
            "15",
            "--limit",
            "5m",
            "--cycles",
            "12",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.pattern.strength, Some(StrengthLevel::Medium));
        assert_eq!(cli.run.fps, Some(15.0));
        assert_eq!(cli.run.limit, Some(Duration::from_secs(300)));
        assert_eq!(cli.run.cycles, Some(12));
    }

    #[test]
    fn strength_and_durations_conflict() {
        let err = Cli::try_parse_from([
            "sacredbreath",
            "--strength",
            "light",
            "--durations",
            "4,4,4,4",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn at_accepts_humantime_elapsed() {
        let cli = Cli::try_parse_from(["sacredbreath", "at", "1m 22s", "--json"]).unwrap();
        let Some(Command::At(args)) = cli.command else {
            panic!("expected at subcommand");
        };
        assert_eq!(args.elapsed, 82.0);
        assert!(args.json);
    }

    #[test]
    fn rejects_zero_length_phase() {
        assert!(parse_durations("4,0,4,4").is_err());
        assert!(Cli::try_parse_from(["sacredbreath", "--durations", "4,0,4,4"]).is_err());
    }

    #[test]
    fn validates_fps_and_limit() {
        assert!(parse_fps("0").is_err());
        assert!(parse_fps("500").is_err());
        assert_eq!(parse_fps(" 24 "), Ok(24.0));
        assert!(parse_limit("0").is_err());
        assert_eq!(parse_limit("90"), Ok(Duration::from_secs(90)));
    }

    #[test]
    fn pattern_flags_override_config() {
        let config = BreathConfig::from_toml_str("version = 1\nstrength = \"strong\"").unwrap();
        assert_eq!(
            PatternArgs::default().resolve(&config),
            BreathPattern::Strength(StrengthLevel::Strong)
        );

        let flags = PatternArgs {
            strength: Some(StrengthLevel::Light),
            durations: None,
        };
        assert_eq!(
            flags.resolve(&config),
            BreathPattern::Strength(StrengthLevel::Light)
        );

        let explicit = PatternArgs {
            strength: None,
            durations: Some(PhaseDurations::default()),
        };
        assert_eq!(
            explicit.resolve(&config),
            BreathPattern::Durations(PhaseDurations::default())
        );
    }
}
