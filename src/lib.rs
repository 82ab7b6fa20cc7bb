//! Trivia Night - a turn-based trivia game for 1-4 local players.
//!
//! The heart of the crate is the game-flow state machine: a
//! [`GameEngine`] driving seven [`GameState`]s through a load phase
//! (prompts, input, event notifications) and an advance phase (next
//! state selection). Everything else is a narrow collaborator:
//! question files feed the board at startup, an optional [`EventSink`]
//! receives play-by-play notifications, and report generators render
//! the finished ledger.
//!
//! # Example
//!
//! ```no_run
//! use trivia_night::{GameEngine, Player, StdinSource, source};
//!
//! # fn example() -> anyhow::Result<()> {
//! let questions = source::load_questions("questions.csv".as_ref())?;
//! let players = vec![Player::new(1, "Alice"), Player::new(2, "Bob")];
//! let mut engine = GameEngine::new(questions, players, StdinSource::new())?;
//! engine.run()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod engine;
mod events;
mod input;
mod model;
mod setup;

// Collaborator subsystems
pub mod report;
pub mod source;

// Crate-level exports - CLI
pub use cli::Cli;

// Crate-level exports - configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - engine core
pub use engine::{EngineError, GameEngine, GameState, MAX_PLAYERS};

// Crate-level exports - events
pub use events::{ActivityKind, CsvEventLog, EventRecord, EventSink, MemorySink};

// Crate-level exports - input seam
pub use input::{InputSource, ScriptedInput, StdinSource};

// Crate-level exports - records
pub use model::{GameTurn, Player, Question, winner};

// Crate-level exports - roster setup
pub use setup::{prompt_players, roster_from_names};
