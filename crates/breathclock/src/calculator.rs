use breathconfig::{BreathPattern, PhaseDurations, StrengthLevel};
use serde::Serialize;

use crate::phase::{BreathPhase, Chakra};
use crate::schedule::{schedule, split_cycles};
use crate::ClockError;

/// Largest `f64` strictly below one; progress values never reach 1.0.
const PROGRESS_CEILING: f64 = 1.0 - f64::EPSILON / 2.0;

/// Immutable snapshot of where a session is inside its breath cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreathState {
    pub strength_level: Option<StrengthLevel>,
    pub phase: BreathPhase,
    /// 0-based index of the cycle in progress.
    pub cycle: u64,
    /// Position inside the current cycle, in `[0, 1)`.
    pub progress: f64,
    /// Position inside the current phase, in `[0, 1]`.
    pub phase_progress: f64,
    /// Seconds left in the current phase.
    pub time_remaining: f64,
    pub phase_duration: f64,
    pub cycle_duration: f64,
    pub is_running: bool,
    /// Total seconds the session has been breathing.
    pub elapsed: f64,
    pub active_chakra: Chakra,
    pub secondary_chakra: Option<Chakra>,
}

impl BreathState {
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    /// Number of fully finished cycles.
    pub fn completed_cycles(&self) -> u64 {
        self.cycle
    }

    pub fn significance(&self) -> &'static str {
        self.phase.chakras().significance
    }
}

/// Maps elapsed seconds onto the breath cycle described by `pattern`.
///
/// Pure and idempotent: identical inputs always produce identical output.
/// The returned state reports `is_running == false`; callers that own a
/// running session overlay the flag with [`BreathState::with_running`].
pub fn calculate(pattern: &BreathPattern, elapsed: f64) -> Result<BreathState, ClockError> {
    if !elapsed.is_finite() || elapsed < 0.0 {
        return Err(ClockError::InvalidElapsed(elapsed));
    }
    // Normalises -0.0.
    let elapsed = elapsed.max(0.0);

    let state = match pattern {
        BreathPattern::Strength(level) => strength_state(*level, elapsed),
        BreathPattern::Durations(durations) => durations_state(durations, elapsed),
    };
    Ok(state)
}

fn strength_state(level: StrengthLevel, elapsed: f64) -> BreathState {
    let position = schedule(level).locate(elapsed);
    let progress = (position.offset / position.duration).clamp(0.0, PROGRESS_CEILING);

    // Four equal quarters; scaling by four is exact so the quartile edges
    // land precisely on 0.25, 0.5 and 0.75.
    let scaled = progress * 4.0;
    let quarter = (scaled.floor() as usize).min(3);
    let phase = BreathPhase::from_index(quarter).unwrap_or(BreathPhase::HoldOut);
    let phase_progress = (scaled - quarter as f64).clamp(0.0, 1.0);

    let phase_duration = position.duration / 4.0;
    build_state(
        Some(level),
        phase,
        position.cycle,
        progress,
        phase_progress,
        phase_duration * (1.0 - phase_progress),
        phase_duration,
        position.duration,
        elapsed,
    )
}

fn durations_state(durations: &PhaseDurations, elapsed: f64) -> BreathState {
    let phases = durations.as_secs();
    let cycle_length: f64 = phases.iter().sum();
    let (cycle, position) = split_cycles(0, elapsed, cycle_length);

    let mut bounds = [0.0; 4];
    let mut end = 0.0;
    for (slot, length) in bounds.iter_mut().zip(phases) {
        end += length;
        *slot = end;
    }

    let index = bounds
        .iter()
        .position(|&phase_end| position < phase_end)
        .unwrap_or(3);
    let phase_start = if index == 0 { 0.0 } else { bounds[index - 1] };
    let phase_duration = phases[index];
    let into_phase = position - phase_start;

    build_state(
        None,
        BreathPhase::ALL[index],
        cycle,
        (position / cycle_length).clamp(0.0, PROGRESS_CEILING),
        (into_phase / phase_duration).clamp(0.0, 1.0),
        (phase_duration - into_phase).max(0.0),
        phase_duration,
        cycle_length,
        elapsed,
    )
}

#[allow(clippy::too_many_arguments)]
fn build_state(
    strength_level: Option<StrengthLevel>,
    phase: BreathPhase,
    cycle: u64,
    progress: f64,
    phase_progress: f64,
    time_remaining: f64,
    phase_duration: f64,
    cycle_duration: f64,
    elapsed: f64,
) -> BreathState {
    let chakras = phase.chakras();
    BreathState {
        strength_level,
        phase,
        cycle,
        progress,
        phase_progress,
        time_remaining,
        phase_duration,
        cycle_duration,
        is_running: false,
        elapsed,
        active_chakra: chakras.primary,
        secondary_chakra: chakras.secondary,
    }
}
