//! Gameplay event pipeline.
//!
//! The engine announces every state boundary through an [`EventSink`].
//! Sinks are optional, best-effort collaborators: a missing or failing
//! sink never interrupts gameplay.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{instrument, warn};

/// The kind of gameplay activity an event describes.
///
/// Display names are the wire names written to the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    /// A player's turn began.
    PlayerTurnStart,
    /// A question was presented.
    AskQuestion,
    /// The player submitted an answer.
    AnswerQuestion,
    /// The answer was checked against the correct one.
    CheckAnswer,
    /// The player's score was updated.
    ScoreUpdated,
    /// Final reports are about to be produced.
    GenerateReport,
    /// The event log is about to be finalized.
    GenerateEventLog,
    /// The game process is exiting.
    ExitGame,
}

/// A single gameplay event.
///
/// Fields that do not apply to the activity are `None`.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct EventRecord {
    /// Identifier of the game this event belongs to.
    case_id: String,
    /// Name of the player involved, when the activity has one.
    player: Option<String>,
    /// What happened.
    activity: ActivityKind,
    /// When it happened.
    timestamp: DateTime<Utc>,
    /// Category of the question in play, if any.
    category: Option<String>,
    /// Point value of the question in play, if any.
    question_value: Option<u32>,
    /// The answer the player gave, if any.
    answer_given: Option<String>,
    /// Outcome of the activity (CORRECT / INCORRECT), if any.
    result: Option<String>,
    /// The player's score after the activity, if relevant.
    score_after_play: Option<i64>,
}

impl EventRecord {
    /// Creates an event stamped with the current instant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        case_id: impl Into<String>,
        player: Option<String>,
        activity: ActivityKind,
        category: Option<String>,
        question_value: Option<u32>,
        answer_given: Option<String>,
        result: Option<String>,
        score_after_play: Option<i64>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            player,
            activity,
            timestamp: Utc::now(),
            category,
            question_value,
            answer_given,
            result,
            score_after_play,
        }
    }
}

/// One-way receiver of gameplay events.
pub trait EventSink {
    /// Called once per published event, in play order.
    fn on_event(&mut self, event: &EventRecord);
}

/// Event sink that appends one CSV row per event.
///
/// The file is created (truncating any previous run) with a header row.
/// Write failures are logged and swallowed; the game never stops for
/// its event log.
pub struct CsvEventLog {
    writer: csv::Writer<std::fs::File>,
}

const LOG_HEADER: [&str; 9] = [
    "Case_ID",
    "Player_ID",
    "Activity",
    "Timestamp",
    "Category",
    "Question_Value",
    "Answer_Given",
    "Result",
    "Score_After_Play",
];

impl CsvEventLog {
    /// Creates the log file and writes the header row.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn create(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        writer.write_record(LOG_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }
}

impl EventSink for CsvEventLog {
    fn on_event(&mut self, event: &EventRecord) {
        let opt = |s: &Option<String>| s.clone().unwrap_or_default();
        let row = [
            event.case_id().clone(),
            opt(event.player()),
            event.activity().to_string(),
            event.timestamp().to_rfc3339(),
            opt(event.category()),
            event
                .question_value()
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            opt(event.answer_given()),
            opt(event.result()),
            event
                .score_after_play()
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default(),
        ];

        if let Err(e) = self.writer.write_record(&row).and_then(|()| {
            self.writer.flush().map_err(csv::Error::from)
        }) {
            warn!(error = %e, "failed to write event log row");
        }
    }
}

/// In-memory sink for tests and in-process inspection.
///
/// Clones share the same backing store, so a test can keep a handle
/// while handing the sink to the engine.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().expect("event store poisoned").clone()
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.events.lock().expect("event store poisoned").len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn on_event(&mut self, event: &EventRecord) {
        self.events
            .lock()
            .expect("event store poisoned")
            .push(event.clone());
    }
}
