use std::fmt::Write as _;

use breathclock::{schedule, BreathPhase, BreathState, StrengthLevel};

/// `1m 22s` once a minute has passed, `42s` before that.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let mins = total / 60;
    let secs = total % 60;
    if mins > 0 {
        format!("{mins}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

fn phase_markers(current: BreathPhase) -> String {
    BreathPhase::ALL
        .iter()
        .map(|phase| if *phase == current { '●' } else { '·' })
        .collect()
}

pub fn status_line(state: &BreathState) -> String {
    let percent = (state.progress * 100.0).round() as u32;
    let marker = if state.is_running { "" } else { " [paused]" };
    format!(
        "{label:<11} {markers}  cycle {cycle:>3}  remaining {remaining:>4.1}s  phase {phase:.1}s  session {clock:<7} {percent:>3}%{marker}",
        label = state.phase.label(),
        markers = phase_markers(state.phase),
        cycle = state.cycle + 1,
        remaining = state.time_remaining,
        phase = state.phase_duration,
        clock = format_clock(state.elapsed),
    )
}

pub fn describe(state: &BreathState) -> String {
    let chakra = state.active_chakra.info();
    let mut out = String::new();
    let _ = writeln!(out, "Phase:      {} ({})", state.phase.label(), state.phase);
    let _ = writeln!(out, "            {}", state.phase.sublabel());
    let _ = writeln!(out, "Cycle:      {}", state.cycle + 1);
    let _ = writeln!(out, "Progress:   {:.0}%", state.progress * 100.0);
    let _ = writeln!(out, "Remaining:  {:.1}s", state.time_remaining);
    let _ = writeln!(out, "Phase time: {:.1}s", state.phase_duration);
    let _ = writeln!(out, "Session:    {}", format_clock(state.elapsed));
    if let Some(level) = state.strength_level {
        let _ = writeln!(out, "Intensity:  {} ({})", level.label(), level.description());
    }
    let _ = writeln!(
        out,
        "Chakra:     {} {} ({}, {})",
        chakra.name, chakra.sanskrit, chakra.location, chakra.color
    );
    if let Some(secondary) = state.secondary_chakra {
        let _ = writeln!(out, "Secondary:  {secondary}");
    }
    let _ = writeln!(out, "Focus:      {}", state.significance());
    let pose = state.phase.pose();
    let _ = writeln!(out, "Pose:       {} ({})", pose.name, pose.sanskrit);
    let _ = writeln!(out, "            {}", pose.description);
    let _ = writeln!(out, "Bandha:     {}", pose.bandha);
    let _ = writeln!(out, "Drishti:    {}", pose.drishti);
    let _ = write!(out, "            {}", pose.instruction);
    out
}

pub fn describe_schedule(level: StrengthLevel) -> String {
    let table = schedule(level);
    let mut out = format!("{} ({})", level.label(), level.description());
    let mut first = 0u64;
    for step in table.steps {
        let _ = write!(
            out,
            "\n  cycles {:>3}-{:<4} {:>4.1}s per breath, {:.2}s per phase",
            first + 1,
            step.through_cycle + 1,
            step.seconds,
            step.seconds / 4.0
        );
        first = step.through_cycle + 1;
    }
    let _ = write!(
        out,
        "\n  cycles {:>3}+    {:>4.1}s per breath, {:.2}s per phase",
        first + 1,
        table.tail_seconds,
        table.tail_seconds / 4.0
    );
    out
}
