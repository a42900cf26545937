use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use breathclock::BreathPattern;
use breathconfig::BreathConfig;
use tracing::debug;

use crate::cli::RunArgs;
use crate::paths::AppPaths;

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

/// Loads the explicit `--config` file when given (it must exist), otherwise
/// the user config file if present, otherwise built-in defaults.
pub fn load_config(
    paths: &AppPaths,
    explicit: Option<&Path>,
) -> Result<(BreathConfig, ConfigSource)> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        let config = read_config(path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    let path = paths.config_file();
    if path.exists() {
        let config = read_config(&path)?;
        debug!(path = %path.display(), "loaded user config");
        Ok((config, ConfigSource::File(path)))
    } else {
        debug!(path = %path.display(), "no user config present; using built-in defaults");
        Ok((BreathConfig::default(), ConfigSource::BuiltIn))
    }
}

fn read_config(path: &Path) -> Result<BreathConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    BreathConfig::from_toml_str(&contents)
        .with_context(|| format!("failed to load config file at {}", path.display()))
}

/// Fully resolved knobs for an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub pattern: BreathPattern,
    pub autostart: bool,
    pub frame_interval: Duration,
    pub limit: Option<Duration>,
    pub cycles: Option<u64>,
}

impl SessionSettings {
    pub fn resolve(config: &BreathConfig, args: &RunArgs) -> Self {
        let fps = args.fps.unwrap_or(config.fps);
        Self {
            pattern: args.pattern.resolve(config),
            autostart: config.autostart && !args.no_autostart,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(fps)),
            limit: args.limit.or(config.session_limit),
            cycles: args.cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breathclock::StrengthLevel;
    use tempfile::TempDir;

    #[test]
    fn missing_user_config_falls_back_to_defaults() {
        let root = TempDir::new().unwrap();
        let paths = AppPaths::from_raw(root.path().to_path_buf());

        let (config, source) = load_config(&paths, None).unwrap();

        assert_eq!(source, ConfigSource::BuiltIn);
        assert_eq!(config.pattern(), BreathPattern::Strength(StrengthLevel::Light));
    }

    #[test]
    fn reads_user_config_file() {
        let root = TempDir::new().unwrap();
        let paths = AppPaths::from_raw(root.path().to_path_buf());
        fs::write(
            paths.config_file(),
            "version = 1\nstrength = \"medium\"\nfps = 10\nsession_limit = \"90s\"\n",
        )
        .unwrap();

        let (config, source) = load_config(&paths, None).unwrap();

        assert_eq!(source, ConfigSource::File(paths.config_file()));
        let settings = SessionSettings::resolve(&config, &RunArgs::default());
        assert_eq!(
            settings.pattern,
            BreathPattern::Strength(StrengthLevel::Medium)
        );
        assert_eq!(settings.frame_interval, Duration::from_millis(100));
        assert_eq!(settings.limit, Some(Duration::from_secs(90)));
        assert!(settings.autostart);
    }

    #[test]
    fn explicit_config_must_exist() {
        let root = TempDir::new().unwrap();
        let paths = AppPaths::from_raw(root.path().to_path_buf());
        let missing = root.path().join("nope.toml");

        assert!(load_config(&paths, Some(&missing)).is_err());
    }

    #[test]
    fn invalid_config_reports_path() {
        let root = TempDir::new().unwrap();
        let paths = AppPaths::from_raw(root.path().to_path_buf());
        fs::write(
            paths.config_file(),
            "version = 1\n[durations]\ninhale = 0\nhold_in = 1\nexhale = 1\nhold_out = 1\n",
        )
        .unwrap();

        let err = load_config(&paths, None).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn flags_override_file_values() {
        let config = BreathConfig::from_toml_str("version = 1\nsession_limit = 60").unwrap();
        let args = RunArgs {
            fps: Some(50.0),
            limit: Some(Duration::from_secs(5)),
            no_autostart: true,
            cycles: Some(3),
            ..RunArgs::default()
        };

        let settings = SessionSettings::resolve(&config, &args);

        assert_eq!(settings.frame_interval, Duration::from_millis(20));
        assert_eq!(settings.limit, Some(Duration::from_secs(5)));
        assert!(!settings.autostart);
        assert_eq!(settings.cycles, Some(3));
    }
}
