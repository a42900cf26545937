use std::time::{Duration, Instant};

use breathconfig::BreathPattern;

use crate::calculator::{calculate, BreathState};
use crate::ClockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Paused,
    Running { since: Instant },
}

/// Explicit session state. Every transition consumes the current value and
/// returns the next one; nothing is mutated behind the caller's back.
///
/// Elapsed time is the banked total from earlier running stretches plus the
/// live stretch since the last `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    pattern: BreathPattern,
    banked: Duration,
    status: Status,
}

impl Session {
    /// A paused session at zero elapsed.
    pub fn new(pattern: BreathPattern) -> Self {
        Self {
            pattern,
            banked: Duration::ZERO,
            status: Status::Paused,
        }
    }

    pub fn started(pattern: BreathPattern, now: Instant) -> Self {
        Self::new(pattern).start(now)
    }

    #[must_use]
    pub fn start(self, now: Instant) -> Self {
        match self.status {
            Status::Running { .. } => self,
            Status::Paused => Self {
                status: Status::Running { since: now },
                ..self
            },
        }
    }

    /// Freezes elapsed time at `now`.
    #[must_use]
    pub fn pause(self, now: Instant) -> Self {
        match self.status {
            Status::Paused => self,
            Status::Running { since } => Self {
                banked: self.banked + now.saturating_duration_since(since),
                status: Status::Paused,
                ..self
            },
        }
    }

    #[must_use]
    pub fn toggle(self, now: Instant) -> Self {
        if self.is_running() {
            self.pause(now)
        } else {
            self.start(now)
        }
    }

    /// Returns elapsed time to zero. A running session keeps running from
    /// `now`; a paused one stays paused.
    #[must_use]
    pub fn reset(self, now: Instant) -> Self {
        let status = match self.status {
            Status::Paused => Status::Paused,
            Status::Running { .. } => Status::Running { since: now },
        };
        Self {
            banked: Duration::ZERO,
            status,
            ..self
        }
    }

    /// Swaps the breath pattern. Elapsed time is left as is; the next
    /// snapshot reads it through the new pattern.
    #[must_use]
    pub fn with_pattern(self, pattern: BreathPattern) -> Self {
        Self { pattern, ..self }
    }

    pub fn pattern(&self) -> &BreathPattern {
        &self.pattern
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, Status::Running { .. })
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.status {
            Status::Paused => self.banked,
            Status::Running { since } => self.banked + now.saturating_duration_since(since),
        }
    }

    pub fn snapshot(&self, now: Instant) -> Result<BreathState, ClockError> {
        let elapsed = self.elapsed(now).as_secs_f64();
        calculate(&self.pattern, elapsed).map(|state| state.with_running(self.is_running()))
    }
}
