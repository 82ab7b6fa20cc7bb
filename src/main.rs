//! Trivia Night - binary entry point.
//!
//! Wires configuration, question loading, roster setup and the event
//! log together, runs the game to completion, then hands the final
//! roster and ledger to the report generators.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trivia_night::report::{GameSummary, JsonReport, ReportGenerator, TextReport, write_reports};
use trivia_night::{Cli, CsvEventLog, GameConfig, GameEngine, StdinSource, source};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = merge_config(&cli)?;

    let questions = source::load_questions(&config.questions)
        .with_context(|| format!("loading questions from {}", config.questions.display()))?;
    println!(
        "\nSuccessfully loaded {} questions from {}",
        questions.len(),
        config.questions.display()
    );

    println!("\nWelcome to Trivia Night!\n");

    let mut stdin = StdinSource::new();
    let players = match &config.players {
        Some(names) => trivia_night::roster_from_names(names)?,
        None => trivia_night::prompt_players(&mut stdin)?,
    };

    let mut engine = GameEngine::new(questions, players, stdin)?;
    if !cli.no_event_log {
        match CsvEventLog::create(&config.event_log) {
            Ok(log) => {
                info!(path = %config.event_log.display(), "event log enabled");
                engine = engine.with_sink(Box::new(log));
            }
            // The event sink is best-effort: play on without one.
            Err(e) => warn!(error = %e, "could not create event log, continuing without"),
        }
    }

    engine.run()?;

    let summary = GameSummary::new(engine.players(), engine.turns());
    let generators: [(&dyn ReportGenerator, PathBuf); 2] = [
        (&TextReport, config.text_report.clone()),
        (&JsonReport, config.json_report.clone()),
    ];
    write_reports(&summary, &generators);

    Ok(())
}

/// Loads the config file (or defaults) and applies CLI overrides.
fn merge_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = GameConfig::load_or_default(&cli.config)?;
    if let Some(questions) = &cli.questions {
        config.questions = questions.clone();
    }
    if let Some(text_report) = &cli.text_report {
        config.text_report = text_report.clone();
    }
    if let Some(json_report) = &cli.json_report {
        config.json_report = json_report.clone();
    }
    if let Some(event_log) = &cli.event_log {
        config.event_log = event_log.clone();
    }
    if let Some(players) = &cli.players {
        config.players = Some(
            players
                .split(',')
                .map(|name| name.trim().to_string())
                .collect(),
        );
    }
    Ok(config)
}
