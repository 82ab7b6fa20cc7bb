//! Plain-text report format.

use super::{GameSummary, ReportError, ReportGenerator};
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const RULE_WIDTH: usize = 80;

/// Renders the final report as a human-readable text file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl ReportGenerator for TextReport {
    fn generate(&self, summary: &GameSummary<'_>, path: &Path) -> Result<(), ReportError> {
        let mut out = BufWriter::new(File::create(path)?);

        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "TRIVIA NIGHT - FINAL REPORT")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            out,
            "Generated: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out)?;

        writeln!(out, "Players: {}", summary.players().len())?;
        writeln!(out, "Turns played: {}", summary.turns().len())?;
        writeln!(out)?;

        writeln!(out, "FINAL SCORES")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        let winner_id = summary.winner().map(|w| *w.id());
        for (rank, player) in summary.ranked().iter().enumerate() {
            let marker = if winner_id == Some(*player.id()) {
                "  *** WINNER! ***"
            } else {
                ""
            };
            writeln!(
                out,
                "{:>4}. {:<24} ${}{}",
                rank + 1,
                player.name(),
                player.score(),
                marker
            )?;
        }
        writeln!(out)?;

        writeln!(out, "TURN BY TURN HISTORY")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for (i, turn) in summary.turns().iter().enumerate() {
            let outcome = if *turn.correct() { "CORRECT" } else { "WRONG" };
            writeln!(
                out,
                "{:>4}. {} | {} for ${} | answered \"{}\" | {} ({:+}) | total ${}",
                i + 1,
                turn.player_name(),
                turn.category(),
                turn.question_value(),
                turn.given_answer(),
                outcome,
                turn.points_earned(),
                turn.running_total()
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "End of report")?;

        out.flush()?;
        Ok(())
    }
}
