//! JSON report format.

use super::{GameSummary, ReportError, ReportGenerator};
use crate::model::GameTurn;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Renders the final report as a JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

#[derive(Serialize)]
struct Document<'a> {
    generated_at: DateTime<Utc>,
    players: Vec<RankedPlayer<'a>>,
    /// Null unless the top score is strictly positive.
    winner: Option<&'a str>,
    turns: &'a [GameTurn],
}

#[derive(Serialize)]
struct RankedPlayer<'a> {
    rank: usize,
    id: u32,
    name: &'a str,
    score: i64,
}

impl ReportGenerator for JsonReport {
    fn generate(&self, summary: &GameSummary<'_>, path: &Path) -> Result<(), ReportError> {
        let players = summary
            .ranked()
            .into_iter()
            .enumerate()
            .map(|(i, p)| RankedPlayer {
                rank: i + 1,
                id: *p.id(),
                name: p.name().as_str(),
                score: *p.score(),
            })
            .collect();

        let document = Document {
            generated_at: Utc::now(),
            players,
            winner: summary.winner().map(|w| w.name().as_str()),
            turns: summary.turns(),
        };

        let out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(out, &document)?;
        Ok(())
    }
}
