//! Game-flow state machine.
//!
//! The engine owns the roster, the question board, the turn ledger and
//! the active [`GameState`]. Each state has a load phase (prompts,
//! reads, event notifications) and an advance phase (picks the next
//! state); the driver loop in [`GameEngine::run`] only sequences the
//! two and checks for the terminal state.

use crate::events::{ActivityKind, EventRecord, EventSink};
use crate::input::InputSource;
use crate::model::{GameTurn, OPTION_LABELS, Player, Question, winner};
use chrono::Utc;
use std::io::{self, Write};
use tracing::{debug, info, instrument};

/// Maximum roster size for a shared-terminal game.
pub const MAX_PLAYERS: usize = 4;

/// The states of the game flow.
///
/// `GameOver` is terminal; every other state advances along the cycle
/// `PlayerTurn -> SelectQuestion -> AskQuestion -> AcceptAnswer ->
/// CheckAnswer -> UpdateScore -> PlayerTurn`, with `quit` and
/// board exhaustion short-circuiting to `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Announce whose turn it is.
    PlayerTurn,
    /// List the open board and take a selection.
    SelectQuestion,
    /// Present the selected question and its options.
    AskQuestion,
    /// Capture the player's answer.
    AcceptAnswer,
    /// Judge the answer and show feedback.
    CheckAnswer,
    /// Apply the score delta and record the turn.
    UpdateScore,
    /// Terminal: final scores and hand-off to reporting.
    GameOver,
}

impl GameState {
    /// Whether this is the terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver)
    }
}

/// Errors that can stop the game engine.
///
/// Recoverable player mistakes (bad selection syntax, unknown
/// questions) never surface here; they re-prompt in place.
#[derive(Debug)]
pub enum EngineError {
    /// The question file produced no questions.
    NoQuestions,
    /// The roster was empty or larger than [`MAX_PLAYERS`].
    BadRosterSize(usize),
    /// A question-dependent state ran without a selected question.
    NoSelection,
    /// The input source failed (for example, stdin closed).
    Input(io::Error),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NoQuestions => write!(f, "no questions loaded; cannot start a game"),
            EngineError::BadRosterSize(n) => {
                write!(f, "a game needs 1 to {MAX_PLAYERS} players, got {n}")
            }
            EngineError::NoSelection => write!(f, "no question selected"),
            EngineError::Input(e) => write!(f, "input error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Input(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        EngineError::Input(e)
    }
}

/// The game engine context.
///
/// Generic over its [`InputSource`] so tests can run complete games
/// from scripted lines.
pub struct GameEngine<I: InputSource> {
    state: GameState,
    players: Vec<Player>,
    questions: Vec<Question>,
    turns: Vec<GameTurn>,
    current_player: usize,
    selected: Option<usize>,
    last_input: String,
    answer_correct: bool,
    input: I,
    sink: Option<Box<dyn EventSink>>,
    case_id: String,
}

impl<I: InputSource> GameEngine<I> {
    /// Creates an engine in the initial `PlayerTurn` state.
    ///
    /// # Errors
    ///
    /// Fails when the question set is empty (the all-picked check
    /// would end the game before it starts) or the roster size is
    /// out of range.
    pub fn new(questions: Vec<Question>, players: Vec<Player>, input: I) -> Result<Self, EngineError> {
        if questions.is_empty() {
            return Err(EngineError::NoQuestions);
        }
        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(EngineError::BadRosterSize(players.len()));
        }
        Ok(Self {
            state: GameState::PlayerTurn,
            players,
            questions,
            turns: Vec::new(),
            current_player: 0,
            selected: None,
            last_input: String::new(),
            answer_correct: false,
            input,
            sink: None,
            case_id: format!("game-{}", Utc::now().timestamp()),
        })
    }

    /// Attaches an event sink. Without one, publishing is a no-op.
    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The active state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether the terminal state has not yet been reached.
    pub fn is_running(&self) -> bool {
        !self.state.is_terminal()
    }

    /// The players, in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The question board.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The append-only ledger of completed turns.
    pub fn turns(&self) -> &[GameTurn] {
        &self.turns
    }

    /// Index of the player whose turn it is.
    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// The question currently held for play, if one is selected.
    pub fn selected_question(&self) -> Option<&Question> {
        self.selected.map(|i| &self.questions[i])
    }

    /// Runs the game to completion.
    ///
    /// Repeats load-then-advance until the terminal state is reached,
    /// then performs the final end-screen load and the exit
    /// notification. Performs no game logic of its own.
    #[instrument(skip(self), fields(case_id = %self.case_id))]
    pub fn run(&mut self) -> Result<(), EngineError> {
        info!(
            players = self.players.len(),
            questions = self.questions.len(),
            "starting game"
        );
        while self.is_running() {
            self.load()?;
            self.advance()?;
        }
        self.load()?;
        self.advance()?;
        Ok(())
    }

    /// Executes the load phase of the active state.
    pub fn load(&mut self) -> Result<(), EngineError> {
        debug!(state = ?self.state, "load phase");
        match self.state {
            GameState::PlayerTurn => self.load_player_turn(),
            GameState::SelectQuestion => self.load_select_question(),
            GameState::AskQuestion => self.load_ask_question(),
            GameState::AcceptAnswer => self.load_accept_answer(),
            GameState::CheckAnswer => self.load_check_answer(),
            GameState::UpdateScore => self.load_update_score(),
            GameState::GameOver => self.load_game_over(),
        }
    }

    /// Executes the transition phase of the active state.
    pub fn advance(&mut self) -> Result<(), EngineError> {
        let from = self.state;
        match self.state {
            GameState::PlayerTurn => self.advance_player_turn(),
            GameState::SelectQuestion => self.advance_select_question()?,
            GameState::AskQuestion => self.state = GameState::AcceptAnswer,
            GameState::AcceptAnswer => self.advance_accept_answer(),
            GameState::CheckAnswer => self.state = GameState::UpdateScore,
            GameState::UpdateScore => self.state = GameState::PlayerTurn,
            GameState::GameOver => self.advance_game_over(),
        }
        debug!(?from, to = ?self.state, "transition");
        Ok(())
    }

    // ── PlayerTurn ───────────────────────────────────────────────

    fn load_player_turn(&mut self) -> Result<(), EngineError> {
        let (name, score) = {
            let p = &self.players[self.current_player];
            (p.name().clone(), *p.score())
        };
        println!("\nIt is {name}'s turn");
        println!("Score: ${score}");
        self.publish(
            Some(name),
            ActivityKind::PlayerTurnStart,
            None,
            None,
            None,
            None,
            Some(score),
        );
        Ok(())
    }

    fn advance_player_turn(&mut self) {
        if self.questions.iter().all(|q| *q.picked()) {
            info!("board exhausted");
            self.state = GameState::GameOver;
        } else {
            self.state = GameState::SelectQuestion;
        }
    }

    // ── SelectQuestion ───────────────────────────────────────────

    fn load_select_question(&mut self) -> Result<(), EngineError> {
        println!("\n--- Available Questions ---");
        for q in &self.questions {
            if !*q.picked() {
                println!("[{} {}]", q.category(), q.value());
            }
        }
        println!("\nType 'quit' to end the game\n");
        print!("Choose a category and value (e.g., 'World History,200'): ");
        io::stdout().flush().ok();
        Ok(())
    }

    fn advance_select_question(&mut self) -> Result<(), EngineError> {
        let raw = self.input.read_line()?;
        let input = raw.trim();

        if input.eq_ignore_ascii_case("quit") {
            info!("player quit during selection");
            self.state = GameState::GameOver;
            return Ok(());
        }

        // Malformed or unknown selections re-prompt in place: the
        // state stays SelectQuestion and the board is shown again.
        let Some((category, value)) = input.split_once(',') else {
            println!("\nInvalid format. Please try again.");
            return Ok(());
        };

        let value: u32 = match value.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                println!("Invalid number. Please try again.");
                return Ok(());
            }
        };

        match self.find_question(category, value) {
            Some(idx) if !*self.questions[idx].picked() => {
                debug!(category, value, "question selected");
                self.selected = Some(idx);
                self.state = GameState::AskQuestion;
            }
            _ => println!("\nQuestion not found or already played."),
        }
        Ok(())
    }

    /// Finds the first question matching the selection, picked or not.
    fn find_question(&self, category: &str, value: u32) -> Option<usize> {
        self.questions.iter().position(|q| q.matches(category, value))
    }

    // ── AskQuestion ──────────────────────────────────────────────

    fn load_ask_question(&mut self) -> Result<(), EngineError> {
        let idx = self.selected.ok_or(EngineError::NoSelection)?;
        let q = &self.questions[idx];
        println!("\n{} for {}", q.category(), q.value());
        println!("Question: {}", q.text());
        for (label, option) in OPTION_LABELS.iter().zip(q.options()) {
            println!("{label}) {option}");
        }

        let (category, value) = (q.category().clone(), *q.value());
        let (name, score) = self.current_player_snapshot();
        self.publish(
            Some(name),
            ActivityKind::AskQuestion,
            Some(category),
            Some(value),
            None,
            None,
            Some(score),
        );
        Ok(())
    }

    // ── AcceptAnswer ─────────────────────────────────────────────

    fn load_accept_answer(&mut self) -> Result<(), EngineError> {
        let idx = self.selected.ok_or(EngineError::NoSelection)?;
        print!("\nWhat is your answer? ");
        io::stdout().flush().ok();
        self.last_input = self.input.read_line()?;

        let (category, value) = {
            let q = &self.questions[idx];
            (q.category().clone(), *q.value())
        };
        let (name, score) = self.current_player_snapshot();
        let answer = self.last_input.clone();
        self.publish(
            Some(name),
            ActivityKind::AnswerQuestion,
            Some(category),
            Some(value),
            Some(answer),
            None,
            Some(score),
        );
        Ok(())
    }

    fn advance_accept_answer(&mut self) {
        if self.last_input.trim().eq_ignore_ascii_case("quit") {
            info!("player quit instead of answering");
            self.state = GameState::GameOver;
        } else {
            self.state = GameState::CheckAnswer;
        }
    }

    // ── CheckAnswer ──────────────────────────────────────────────

    fn load_check_answer(&mut self) -> Result<(), EngineError> {
        let idx = self.selected.ok_or(EngineError::NoSelection)?;
        let correct = {
            let q = &self.questions[idx];
            let correct = self
                .last_input
                .trim()
                .eq_ignore_ascii_case(q.correct_answer().trim());
            if correct {
                println!("\nCORRECT!");
            } else {
                println!("\nWRONG! The correct answer was: {}", q.correct_answer());
            }
            correct
        };
        self.answer_correct = correct;

        let (category, value) = {
            let q = &self.questions[idx];
            (q.category().clone(), *q.value())
        };
        let (name, score) = self.current_player_snapshot();
        let answer = self.last_input.clone();
        self.publish(
            Some(name),
            ActivityKind::CheckAnswer,
            Some(category),
            Some(value),
            Some(answer),
            Some(Self::result_label(correct).to_string()),
            Some(score),
        );
        Ok(())
    }

    // ── UpdateScore ──────────────────────────────────────────────

    /// The single place scores, the picked flag and the ledger mutate.
    fn load_update_score(&mut self) -> Result<(), EngineError> {
        let idx = self.selected.ok_or(EngineError::NoSelection)?;
        let value = i64::from(*self.questions[idx].value());
        let earned = if self.answer_correct { value } else { -value };

        self.players[self.current_player].apply_delta(earned);
        self.questions[idx].mark_picked();

        let turn = GameTurn::new(
            &self.players[self.current_player],
            &self.questions[idx],
            self.last_input.clone(),
            self.answer_correct,
            earned,
        );

        let (name, score) = self.current_player_snapshot();
        println!("{name} now has ${score}");
        info!(
            player = %name,
            earned,
            total = score,
            "score updated"
        );

        let (category, q_value) = {
            let q = &self.questions[idx];
            (q.category().clone(), *q.value())
        };
        let answer = self.last_input.clone();
        self.publish(
            Some(name),
            ActivityKind::ScoreUpdated,
            Some(category),
            Some(q_value),
            Some(answer),
            Some(Self::result_label(self.answer_correct).to_string()),
            Some(score),
        );

        self.turns.push(turn);
        self.selected = None;
        self.current_player = (self.current_player + 1) % self.players.len();
        Ok(())
    }

    // ── GameOver ─────────────────────────────────────────────────

    /// Renders the end screen. Mutates nothing, so re-rendering is safe.
    fn load_game_over(&mut self) -> Result<(), EngineError> {
        println!("\n--------------------------------");
        println!("       GAME OVER");
        println!("--------------------------------");
        println!("Final Scores:");
        for p in &self.players {
            println!("{}: ${}", p.name(), p.score());
        }
        if let Some(w) = winner(&self.players) {
            println!("\nThe winner is: {}!", w.name());
        }

        self.publish(None, ActivityKind::GenerateReport, None, None, None, None, None);
        self.publish(None, ActivityKind::GenerateEventLog, None, None, None, None, None);
        Ok(())
    }

    fn advance_game_over(&mut self) {
        self.publish(None, ActivityKind::ExitGame, None, None, None, None, None);
        println!("\nThank you for playing Trivia Night!");
    }

    // ── helpers ──────────────────────────────────────────────────

    fn current_player_snapshot(&self) -> (String, i64) {
        let p = &self.players[self.current_player];
        (p.name().clone(), *p.score())
    }

    fn result_label(correct: bool) -> &'static str {
        if correct { "CORRECT" } else { "INCORRECT" }
    }

    /// Publishes an event when a sink is attached; no-op otherwise.
    #[allow(clippy::too_many_arguments)]
    fn publish(
        &mut self,
        player: Option<String>,
        activity: ActivityKind,
        category: Option<String>,
        value: Option<u32>,
        answer: Option<String>,
        result: Option<String>,
        score: Option<i64>,
    ) {
        if let Some(sink) = self.sink.as_mut() {
            let record = EventRecord::new(
                self.case_id.clone(),
                player,
                activity,
                category,
                value,
                answer,
                result,
                score,
            );
            sink.on_event(&record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;

    fn question(category: &str, value: &str) -> Question {
        Question::from_raw(
            category,
            value,
            "Q?",
            [
                "Alpha".into(),
                "Beta".into(),
                "Gamma".into(),
                "Delta".into(),
            ],
            "Alpha",
        )
    }

    fn engine(questions: Vec<Question>, lines: &[&str]) -> GameEngine<ScriptedInput> {
        GameEngine::new(
            questions,
            vec![Player::new(1, "Alice")],
            ScriptedInput::new(lines.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn empty_question_set_is_fatal() {
        let result = GameEngine::new(
            Vec::new(),
            vec![Player::new(1, "Alice")],
            ScriptedInput::new(Vec::<String>::new()),
        );
        assert!(matches!(result, Err(EngineError::NoQuestions)));
    }

    #[test]
    fn oversized_roster_is_rejected() {
        let players = (1..=5).map(|i| Player::new(i, format!("P{i}"))).collect();
        let result = GameEngine::new(
            vec![question("History", "100")],
            players,
            ScriptedInput::new(Vec::<String>::new()),
        );
        assert!(matches!(result, Err(EngineError::BadRosterSize(5))));
    }

    #[test]
    fn malformed_selection_self_loops() {
        let mut engine = engine(vec![question("History", "100")], &["History"]);
        engine.advance_player_turn();
        assert_eq!(engine.state(), GameState::SelectQuestion);
        engine.advance().unwrap();
        assert_eq!(engine.state(), GameState::SelectQuestion);
        assert!(engine.selected_question().is_none());
    }

    #[test]
    fn non_numeric_value_self_loops() {
        let mut engine = engine(vec![question("History", "100")], &["History,abc"]);
        engine.advance_player_turn();
        engine.advance().unwrap();
        assert_eq!(engine.state(), GameState::SelectQuestion);
    }

    #[test]
    fn selection_matching_is_defensive() {
        let mut engine = engine(vec![question("World History", "100")], &[" world history , 100 "]);
        engine.advance_player_turn();
        engine.advance().unwrap();
        assert_eq!(engine.state(), GameState::AskQuestion);
        assert!(engine.selected_question().is_some());
    }

    #[test]
    fn quit_during_selection_ends_game() {
        let mut engine = engine(vec![question("History", "100")], &["QUIT"]);
        engine.advance_player_turn();
        engine.advance().unwrap();
        assert_eq!(engine.state(), GameState::GameOver);
    }

    #[test]
    fn all_picked_board_goes_terminal() {
        let mut q = question("History", "100");
        q.mark_picked();
        let mut engine = engine(vec![q], &[]);
        engine.advance_player_turn();
        assert_eq!(engine.state(), GameState::GameOver);
    }
}
