use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;
pub const MAX_FPS: f32 = 240.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Named intensity preset. Each level owns a stepwise schedule of breath
/// durations that lengthen as the session progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Light,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub const ALL: [StrengthLevel; 3] = [Self::Light, Self::Medium, Self::Strong];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Light => "5-7s breaths",
            Self::Medium => "7-8s breaths",
            Self::Strong => "7-10s breaths",
        }
    }
}

impl Default for StrengthLevel {
    fn default() -> Self {
        Self::Light
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrengthLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" | "l" => Ok(Self::Light),
            "medium" | "m" => Ok(Self::Medium),
            "strong" | "s" => Ok(Self::Strong),
            "" => Err("strength level must not be empty".to_string()),
            other => Err(format!(
                "unknown strength level '{other}'; expected light, medium, or strong"
            )),
        }
    }
}

/// Four explicit phase lengths. Every phase is strictly positive; the
/// constructor is the only way in, so a zero-length phase never reaches the
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawDurations")]
pub struct PhaseDurations {
    inhale: Duration,
    hold_in: Duration,
    exhale: Duration,
    hold_out: Duration,
}

impl PhaseDurations {
    pub fn new(
        inhale: Duration,
        hold_in: Duration,
        exhale: Duration,
        hold_out: Duration,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("inhale", inhale),
            ("hold_in", hold_in),
            ("exhale", exhale),
            ("hold_out", hold_out),
        ] {
            if value.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "{name} duration must be greater than zero"
                )));
            }
        }
        Ok(Self {
            inhale,
            hold_in,
            exhale,
            hold_out,
        })
    }

    pub fn from_secs_f64(
        inhale: f64,
        hold_in: f64,
        exhale: f64,
        hold_out: f64,
    ) -> Result<Self, ConfigError> {
        Self::new(
            secs_to_duration("inhale", inhale)?,
            secs_to_duration("hold_in", hold_in)?,
            secs_to_duration("exhale", exhale)?,
            secs_to_duration("hold_out", hold_out)?,
        )
    }

    pub fn inhale(&self) -> Duration {
        self.inhale
    }

    pub fn hold_in(&self) -> Duration {
        self.hold_in
    }

    pub fn exhale(&self) -> Duration {
        self.exhale
    }

    pub fn hold_out(&self) -> Duration {
        self.hold_out
    }

    /// Phase lengths in seconds, in breath order.
    pub fn as_secs(&self) -> [f64; 4] {
        [
            self.inhale.as_secs_f64(),
            self.hold_in.as_secs_f64(),
            self.exhale.as_secs_f64(),
            self.hold_out.as_secs_f64(),
        ]
    }

    pub fn cycle(&self) -> Duration {
        self.inhale + self.hold_in + self.exhale + self.hold_out
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            inhale: Duration::from_secs(4),
            hold_in: Duration::from_secs(4),
            exhale: Duration::from_secs(6),
            hold_out: Duration::from_secs(2),
        }
    }
}

/// Parses `IN,HOLD,OUT,HOLD`, each entry in seconds or a humantime string.
impl FromStr for PhaseDurations {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ConfigError::Invalid(format!(
                "expected four comma-separated durations (inhale,hold_in,exhale,hold_out), got {}",
                parts.len()
            )));
        }
        let mut parsed = [Duration::ZERO; 4];
        for (slot, raw) in parsed.iter_mut().zip(&parts) {
            *slot = parse_duration(raw).map_err(ConfigError::Invalid)?;
        }
        Self::new(parsed[0], parsed[1], parsed[2], parsed[3])
    }
}

#[derive(Deserialize)]
struct RawDurations {
    #[serde(deserialize_with = "deserialize_duration")]
    inhale: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    hold_in: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    exhale: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    hold_out: Duration,
}

impl TryFrom<RawDurations> for PhaseDurations {
    type Error = ConfigError;

    fn try_from(raw: RawDurations) -> Result<Self, Self::Error> {
        Self::new(raw.inhale, raw.hold_in, raw.exhale, raw.hold_out)
    }
}

/// What drives the breath length: a strength schedule or fixed phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreathPattern {
    Strength(StrengthLevel),
    Durations(PhaseDurations),
}

impl BreathPattern {
    pub fn strength_level(&self) -> Option<StrengthLevel> {
        match self {
            Self::Strength(level) => Some(*level),
            Self::Durations(_) => None,
        }
    }
}

impl Default for BreathPattern {
    fn default() -> Self {
        Self::Strength(StrengthLevel::default())
    }
}

impl From<StrengthLevel> for BreathPattern {
    fn from(level: StrengthLevel) -> Self {
        Self::Strength(level)
    }
}

impl From<PhaseDurations> for BreathPattern {
    fn from(durations: PhaseDurations) -> Self {
        Self::Durations(durations)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BreathConfig {
    pub version: u32,
    #[serde(default)]
    pub strength: Option<StrengthLevel>,
    #[serde(default)]
    pub durations: Option<PhaseDurations>,
    #[serde(default = "default_autostart")]
    pub autostart: bool,
    #[serde(default = "default_fps")]
    pub fps: f32,
    #[serde(default, deserialize_with = "deserialize_duration_opt")]
    pub session_limit: Option<Duration>,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            strength: None,
            durations: None,
            autostart: default_autostart(),
            fps: default_fps(),
            session_limit: None,
        }
    }
}

fn default_autostart() -> bool {
    true
}

fn default_fps() -> f32 {
    30.0
}

fn secs_to_duration(name: &str, secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} duration must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|err| ConfigError::Invalid(format!("{name} duration {secs} is out of range: {err}")))
}

/// Accepts plain seconds (`4`, `2.5`) or a humantime string (`1500ms`, `1m 30s`).
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("duration must not be empty".to_string());
    }
    if let Ok(secs) = trimmed.parse::<f64>() {
        if !secs.is_finite() || secs.is_sign_negative() {
            return Err(format!("duration '{trimmed}' must be non-negative"));
        }
        return Duration::try_from_secs_f64(secs)
            .map_err(|err| format!("invalid duration '{trimmed}': {err}"));
    }
    humantime::parse_duration(trimmed).map_err(|err| format!("invalid duration '{trimmed}': {err}"))
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_duration_opt(deserializer)?
        .ok_or_else(|| de::Error::custom("expected a duration"))
}

fn deserialize_duration_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Option<Duration>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_duration(v).map(Some).map_err(E::custom)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(Duration::from_secs(v)))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Some(Duration::from_secs(v as u64)))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Duration::try_from_secs_f64(v)
                .map(Some)
                .map_err(|err| E::custom(format!("invalid duration {v}: {err}")))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(Visitor)
}

impl BreathConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: BreathConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    /// Resolves the active pattern. Without either section the light
    /// schedule applies.
    pub fn pattern(&self) -> BreathPattern {
        match (self.durations, self.strength) {
            (Some(durations), _) => BreathPattern::Durations(durations),
            (None, level) => BreathPattern::Strength(level.unwrap_or_default()),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected {CONFIG_VERSION}",
                self.version
            )));
        }

        if self.strength.is_some() && self.durations.is_some() {
            return Err(ConfigError::Invalid(
                "strength and [durations] are mutually exclusive".into(),
            ));
        }

        if !self.fps.is_finite() || self.fps <= 0.0 || self.fps > MAX_FPS {
            return Err(ConfigError::Invalid(format!(
                "fps must be within (0, {MAX_FPS}], got {}",
                self.fps
            )));
        }

        if let Some(limit) = self.session_limit {
            if limit.is_zero() {
                return Err(ConfigError::Invalid(
                    "session_limit must be greater than zero".into(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = 1
autostart = false
fps = 60
session_limit = "20m"

[durations]
inhale = 4
hold_in = "1500ms"
exhale = 6.5
hold_out = "2s"
"#;

    #[test]
    fn parses_sample_config() {
        let config = BreathConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.version, 1);
        assert!(!config.autostart);
        assert_eq!(config.fps, 60.0);
        assert_eq!(config.session_limit, Some(Duration::from_secs(1200)));

        let BreathPattern::Durations(durations) = config.pattern() else {
            panic!("expected explicit durations");
        };
        assert_eq!(durations.inhale(), Duration::from_secs(4));
        assert_eq!(durations.hold_in(), Duration::from_millis(1500));
        assert_eq!(durations.exhale(), Duration::from_millis(6500));
        assert_eq!(durations.hold_out(), Duration::from_secs(2));
        assert_eq!(durations.cycle(), Duration::from_millis(14_000));
    }

    #[test]
    fn defaults_to_light_schedule() {
        let config = BreathConfig::from_toml_str("version = 1").unwrap();
        assert_eq!(config.pattern(), BreathPattern::Strength(StrengthLevel::Light));
        assert!(config.autostart);
        assert_eq!(config.fps, 30.0);
        assert!(config.session_limit.is_none());
    }

    #[test]
    fn parses_strength_level() {
        let config = BreathConfig::from_toml_str(
            r#"
version = 1
strength = "strong"
"#,
        )
        .unwrap();
        assert_eq!(config.pattern().strength_level(), Some(StrengthLevel::Strong));
    }

    #[test]
    fn rejects_zero_phase() {
        let err = BreathConfig::from_toml_str(
            r#"
version = 1

[durations]
inhale = 4
hold_in = 0
exhale = 4
hold_out = 4
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("hold_in"));
    }

    #[test]
    fn rejects_negative_phase() {
        let err = BreathConfig::from_toml_str(
            r#"
version = 1

[durations]
inhale = -1
hold_in = 4
exhale = 4
hold_out = 4
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_both_patterns() {
        let err = BreathConfig::from_toml_str(
            r#"
version = 1
strength = "medium"

[durations]
inhale = 4
hold_in = 4
exhale = 4
hold_out = 4
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unsupported_version_and_fps() {
        assert!(matches!(
            BreathConfig::from_toml_str("version = 2").unwrap_err(),
            ConfigError::Invalid(_)
        ));
        assert!(matches!(
            BreathConfig::from_toml_str("version = 1\nfps = 0").unwrap_err(),
            ConfigError::Invalid(_)
        ));
        assert!(matches!(
            BreathConfig::from_toml_str("version = 1\nfps = 1000").unwrap_err(),
            ConfigError::Invalid(_)
        ));
    }

    #[test]
    fn parses_duration_lists() {
        let durations: PhaseDurations = "4, 4, 6, 2".parse().unwrap();
        assert_eq!(durations, PhaseDurations::default());

        let mixed: PhaseDurations = "1.5,500ms,2s,1".parse().unwrap();
        assert_eq!(mixed.hold_in(), Duration::from_millis(500));
        assert_eq!(mixed.as_secs(), [1.5, 0.5, 2.0, 1.0]);

        assert!("4,4,6".parse::<PhaseDurations>().is_err());
        assert!("4,0,6,2".parse::<PhaseDurations>().is_err());
        assert!("4,-1,6,2".parse::<PhaseDurations>().is_err());
    }

    #[test]
    fn seconds_constructor_rejects_non_positive() {
        assert!(PhaseDurations::from_secs_f64(4.0, 4.0, 6.0, 2.0).is_ok());
        assert!(PhaseDurations::from_secs_f64(0.0, 4.0, 6.0, 2.0).is_err());
        assert!(PhaseDurations::from_secs_f64(4.0, -4.0, 6.0, 2.0).is_err());
        assert!(PhaseDurations::from_secs_f64(4.0, 4.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn strength_level_parses_aliases() {
        assert_eq!("Light".parse::<StrengthLevel>(), Ok(StrengthLevel::Light));
        assert_eq!(" m ".parse::<StrengthLevel>(), Ok(StrengthLevel::Medium));
        assert_eq!("strong".parse::<StrengthLevel>(), Ok(StrengthLevel::Strong));
        assert!("extreme".parse::<StrengthLevel>().is_err());
    }
}
