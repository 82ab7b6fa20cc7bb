//! End-of-game reporting.
//!
//! Reports are downstream collaborators: they get read-only access to
//! the final roster and the turn ledger, and a failure in one never
//! disturbs the game or the other generators.

mod json;
mod text;

pub use json::JsonReport;
pub use text::TextReport;

use crate::model::{GameTurn, Player, winner};
use derive_more::{Display, Error};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Read-only view over a finished game, handed to report generators.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary<'a> {
    players: &'a [Player],
    turns: &'a [GameTurn],
}

impl<'a> GameSummary<'a> {
    /// Builds a summary over the final roster and ledger.
    pub fn new(players: &'a [Player], turns: &'a [GameTurn]) -> Self {
        Self { players, turns }
    }

    /// The players, in roster order.
    pub fn players(&self) -> &[Player] {
        self.players
    }

    /// The completed turns, in play order.
    pub fn turns(&self) -> &[GameTurn] {
        self.turns
    }

    /// Players ranked by score, highest first.
    ///
    /// The sort is stable, so ties keep roster order.
    pub fn ranked(&self) -> Vec<&'a Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(*p.score()));
        ranked
    }

    /// The winner, when the top score is strictly positive.
    pub fn winner(&self) -> Option<&'a Player> {
        winner(self.players)
    }
}

/// Report generation error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Report error: {} at {}:{}", message, file, line)]
pub struct ReportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ReportError {
    /// Creates a new report error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<io::Error> for ReportError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        Self::new(format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for ReportError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {err}"))
    }
}

/// A report format.
pub trait ReportGenerator {
    /// Renders the summary to the given path.
    ///
    /// # Errors
    ///
    /// Fails when the artifact cannot be written.
    fn generate(&self, summary: &GameSummary<'_>, path: &Path) -> Result<(), ReportError>;
}

/// Runs every generator, logging failures without aborting the rest.
///
/// Returns the paths that were written successfully.
#[instrument(skip(summary, generators))]
pub fn write_reports(
    summary: &GameSummary<'_>,
    generators: &[(&dyn ReportGenerator, PathBuf)],
) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for (generator, path) in generators {
        match generator.generate(summary, path) {
            Ok(()) => {
                info!(path = %path.display(), "report written");
                println!("Report generated: {}", path.display());
                written.push(path.clone());
            }
            Err(e) => warn!(path = %path.display(), error = %e, "report generation failed"),
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameTurn, Player, Question};

    fn roster() -> Vec<Player> {
        let mut a = Player::new(1, "Alice");
        let mut b = Player::new(2, "Bob");
        a.apply_delta(-100);
        b.apply_delta(300);
        vec![a, b]
    }

    #[test]
    fn ranking_is_highest_first() {
        let players = roster();
        let summary = GameSummary::new(&players, &[]);
        let ranked = summary.ranked();
        assert_eq!(ranked[0].name(), "Bob");
        assert_eq!(ranked[1].name(), "Alice");
    }

    #[test]
    fn winner_mirrors_the_positive_score_rule() {
        let players = roster();
        let summary = GameSummary::new(&players, &[]);
        assert_eq!(summary.winner().unwrap().name(), "Bob");

        let losers = vec![Player::new(1, "Alice")];
        let summary = GameSummary::new(&losers, &[]);
        assert!(summary.winner().is_none());
    }

    #[test]
    fn failed_generator_does_not_stop_the_rest() {
        struct Failing;
        impl ReportGenerator for Failing {
            fn generate(&self, _: &GameSummary<'_>, _: &Path) -> Result<(), ReportError> {
                Err(ReportError::new("boom"))
            }
        }

        let players = roster();
        let turns = vec![GameTurn::new(
            &players[1],
            &Question::from_raw("History", "100", "Q?", Default::default(), "a"),
            "a",
            true,
            100,
        )];
        let summary = GameSummary::new(&players, &turns);

        let dir = tempfile::tempdir().unwrap();
        let ok_path = dir.path().join("report.json");
        let generators: [(&dyn ReportGenerator, PathBuf); 2] = [
            (&Failing, dir.path().join("nope.bin")),
            (&JsonReport, ok_path.clone()),
        ];
        let written = write_reports(&summary, &generators);
        assert_eq!(written, vec![ok_path]);
    }
}
