use breathconfig::StrengthLevel;

/// A run of consecutive cycles sharing one breath length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleStep {
    /// Last cycle index (inclusive) this step applies to.
    pub through_cycle: u64,
    pub seconds: f64,
}

/// Ordered breath-length table for a strength level. Cycles past the last
/// bounded step use `tail_seconds` forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub steps: &'static [ScheduleStep],
    pub tail_seconds: f64,
}

const fn step(through_cycle: u64, seconds: f64) -> ScheduleStep {
    ScheduleStep {
        through_cycle,
        seconds,
    }
}

const LIGHT: Schedule = Schedule {
    steps: &[step(16, 5.0)],
    tail_seconds: 7.0,
};

const MEDIUM: Schedule = Schedule {
    steps: &[step(31, 7.0)],
    tail_seconds: 8.0,
};

const STRONG: Schedule = Schedule {
    steps: &[step(31, 7.0), step(61, 8.0)],
    tail_seconds: 10.0,
};

pub fn schedule(level: StrengthLevel) -> &'static Schedule {
    match level {
        StrengthLevel::Light => &LIGHT,
        StrengthLevel::Medium => &MEDIUM,
        StrengthLevel::Strong => &STRONG,
    }
}

/// Position inside the cycle that contains a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePosition {
    pub cycle: u64,
    /// Seconds since the start of `cycle`, in `[0, duration)`.
    pub offset: f64,
    pub duration: f64,
}

impl Schedule {
    /// Full breath length for the given 0-based cycle.
    pub fn cycle_duration(&self, cycle: u64) -> f64 {
        self.steps
            .iter()
            .find(|step| cycle <= step.through_cycle)
            .map_or(self.tail_seconds, |step| step.seconds)
    }

    /// Walks the table one step at a time, consuming whole spans, so the
    /// search is bounded by the table size rather than the cycle count.
    pub fn locate(&self, elapsed: f64) -> CyclePosition {
        let mut remaining = elapsed;
        let mut first_cycle = 0u64;

        for step in self.steps {
            if step.through_cycle < first_cycle {
                continue;
            }
            let count = step.through_cycle - first_cycle + 1;
            let span = count as f64 * step.seconds;
            if remaining < span {
                let (cycle, offset) = split_cycles(first_cycle, remaining, step.seconds);
                return CyclePosition {
                    cycle: cycle.min(step.through_cycle),
                    offset,
                    duration: step.seconds,
                };
            }
            remaining -= span;
            first_cycle = step.through_cycle + 1;
        }

        let (cycle, offset) = split_cycles(first_cycle, remaining, self.tail_seconds);
        CyclePosition {
            cycle,
            offset,
            duration: self.tail_seconds,
        }
    }
}

/// Splits `remaining` into whole cycles of `seconds` plus a leftover in
/// `[0, seconds)`, starting the count at `first_cycle`.
pub(crate) fn split_cycles(first_cycle: u64, remaining: f64, seconds: f64) -> (u64, f64) {
    let whole = (remaining / seconds).floor().max(0.0);
    let mut cycle = first_cycle.saturating_add(whole as u64);
    let mut offset = remaining - whole * seconds;

    if offset < 0.0 {
        cycle = cycle.saturating_sub(1).max(first_cycle);
        offset += seconds;
    } else if offset >= seconds {
        cycle = cycle.saturating_add(1);
        offset -= seconds;
    }

    if !(0.0..seconds).contains(&offset) {
        offset = offset.rem_euclid(seconds);
        if offset >= seconds {
            offset = 0.0;
        }
    }

    (cycle, offset)
}
