//! Terminal output helpers shared by the commands.

use std::io::Write;

use ridesim_sim::output::OutcomeTally;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

pub fn pass_fail(passed: bool) -> &'static str {
    if passed { "PASS" } else { "FAIL" }
}

/// Human-readable outcome tally.
pub fn write_tally(out: &mut dyn Write, tally: &OutcomeTally) -> std::io::Result<()> {
    writeln!(
        out,
        "Sessions: {}  Wins: {}  Losses: {}  Pushes: {}  In progress: {}",
        tally.sessions, tally.wins, tally.losses, tally.pushes, tally.in_progress
    )?;
    writeln!(
        out,
        "Hands: {}  Net: {}  Wagered: {}  Win rate: {:.2}%",
        tally.hands_played,
        tally.net_profit,
        tally.total_wagered,
        tally.win_rate() * 100.0
    )
}
