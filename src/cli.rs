//! Command-line interface for trivia_night.

use clap::Parser;
use std::path::PathBuf;

/// Trivia Night - turn-based trivia for 1-4 players at one terminal
#[derive(Parser, Debug)]
#[command(name = "trivia_night")]
#[command(about = "Turn-based trivia game for 1-4 local players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults apply if absent)
    #[arg(short, long, default_value = "trivia_night.toml")]
    pub config: PathBuf,

    /// Question file (.csv, .json or .xml); overrides the config
    #[arg(short, long)]
    pub questions: Option<PathBuf>,

    /// Comma-separated player names (1-4); skips the interactive roster
    #[arg(short, long)]
    pub players: Option<String>,

    /// Where to write the text report; overrides the config
    #[arg(long)]
    pub text_report: Option<PathBuf>,

    /// Where to write the JSON report; overrides the config
    #[arg(long)]
    pub json_report: Option<PathBuf>,

    /// Where to write the CSV event log; overrides the config
    #[arg(long)]
    pub event_log: Option<PathBuf>,

    /// Disable the CSV event log
    #[arg(long)]
    pub no_event_log: bool,
}
