//! Breath timing core.
//!
//! - `schedule` holds the per-strength breath-length tables and locates the
//!   cycle containing a given elapsed time.
//! - `calculator` turns elapsed seconds plus a pattern into a [`BreathState`].
//! - `session` is the explicit start/pause/reset state object that feeds the
//!   calculator from wall-clock `Instant`s.
//! - `uniforms` packs a state into a shader uniform block.

mod calculator;
mod phase;
mod schedule;
mod session;
mod uniforms;

pub use breathconfig::{BreathPattern, PhaseDurations, StrengthLevel};
pub use calculator::{calculate, BreathState};
pub use phase::{BreathPhase, Chakra, ChakraInfo, PhaseChakras, PoseInfo};
pub use schedule::{schedule, CyclePosition, Schedule, ScheduleStep};
pub use session::Session;
pub use uniforms::BreathUniforms;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ClockError {
    #[error("elapsed time must be a finite, non-negative number of seconds (got {0})")]
    InvalidElapsed(f64),
}
