//! Core game records: players, questions and completed turns.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Labels used when presenting answer options.
pub const OPTION_LABELS: [&str; OPTION_COUNT] = ["A", "B", "C", "D"];

/// A player in the game.
///
/// Identity is fixed at setup; the score is mutated only by the
/// score-update step of the state machine.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Player's numeric id (1-based, assigned at setup).
    id: u32,
    /// Display name.
    name: String,
    /// Signed running score, starts at 0.
    score: i64,
}

impl Player {
    /// Creates a player with a zero score.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
        }
    }

    /// Applies a signed score delta.
    pub fn apply_delta(&mut self, delta: i64) {
        self.score += delta;
    }
}

/// A trivia question loaded from a question file.
///
/// Immutable after load except for the `picked` flag, which flips
/// false to true exactly once when the question is scored.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct Question {
    /// Category the question belongs to.
    category: String,
    /// Point value; non-negative.
    value: u32,
    /// The question text shown to the player.
    text: String,
    /// Exactly four answer options, shown as A-D.
    options: [String; OPTION_COUNT],
    /// The correct answer string.
    correct_answer: String,
    /// Whether this question has already been played.
    picked: bool,
}

impl Question {
    /// Creates a question from raw source-file fields.
    ///
    /// The point value arrives as text in every supported file format;
    /// anything that does not parse as a non-negative integer becomes 0.
    pub fn from_raw(
        category: impl Into<String>,
        raw_value: &str,
        text: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_answer: impl Into<String>,
    ) -> Self {
        let value = raw_value.trim().parse().unwrap_or(0);
        Self {
            category: category.into(),
            value,
            text: text.into(),
            options,
            correct_answer: correct_answer.into(),
            picked: false,
        }
    }

    /// Marks the question as played. One-way: never reset.
    pub fn mark_picked(&mut self) {
        self.picked = true;
    }

    /// Whether this question answers to the given selection.
    ///
    /// Category comparison trims whitespace and ignores ASCII case.
    pub fn matches(&self, category: &str, value: u32) -> bool {
        self.category.trim().eq_ignore_ascii_case(category.trim()) && self.value == value
    }
}

/// An immutable record of one completed turn.
///
/// Created at the end of the scoring step and appended to the engine's
/// ledger; never mutated afterwards.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameTurn {
    /// Id of the player who took the turn.
    player_id: u32,
    /// Name of the player who took the turn.
    player_name: String,
    /// Category of the question played.
    category: String,
    /// Point value of the question played.
    question_value: u32,
    /// Text of the question played.
    question_text: String,
    /// The raw answer the player gave.
    given_answer: String,
    /// Whether the answer was correct.
    correct: bool,
    /// Signed points earned: +value when correct, -value when not.
    points_earned: i64,
    /// The player's total score immediately after this turn.
    running_total: i64,
}

impl GameTurn {
    /// Records a completed turn.
    pub fn new(
        player: &Player,
        question: &Question,
        given_answer: impl Into<String>,
        correct: bool,
        points_earned: i64,
    ) -> Self {
        Self {
            player_id: *player.id(),
            player_name: player.name().clone(),
            category: question.category().clone(),
            question_value: *question.value(),
            question_text: question.text().clone(),
            given_answer: given_answer.into(),
            correct,
            points_earned,
            running_total: *player.score(),
        }
    }
}

/// The winning player, if there is one.
///
/// Strict maximum score, first player in roster order on ties. A
/// winner is only declared when the top score is strictly positive;
/// an all-zero or all-negative game has no winner. The end screen and
/// every report format apply this same rule.
pub fn winner(players: &[Player]) -> Option<&Player> {
    let mut best: Option<&Player> = None;
    for p in players {
        match best {
            Some(b) if p.score() > b.score() => best = Some(p),
            None => best = Some(p),
            _ => {}
        }
    }
    best.filter(|p| *p.score() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_value_defaults_to_zero() {
        let q = Question::from_raw("History", "lots", "Q?", Default::default(), "A");
        assert_eq!(*q.value(), 0);
    }

    #[test]
    fn value_is_trimmed_before_parsing() {
        let q = Question::from_raw("History", " 200 ", "Q?", Default::default(), "A");
        assert_eq!(*q.value(), 200);
    }

    #[test]
    fn category_match_is_trimmed_and_case_insensitive() {
        let q = Question::from_raw("World History", "100", "Q?", Default::default(), "A");
        assert!(q.matches("  world history ", 100));
        assert!(!q.matches("world history", 200));
        assert!(!q.matches("geography", 100));
    }

    #[test]
    fn winner_requires_positive_score() {
        let mut a = Player::new(1, "Alice");
        let b = Player::new(2, "Bob");
        assert!(winner(&[a.clone(), b.clone()]).is_none());

        a.apply_delta(-300);
        assert!(winner(&[a.clone(), b.clone()]).is_none());

        a.apply_delta(400);
        let players = [a, b];
        let w = winner(&players).unwrap();
        assert_eq!(w.name(), "Alice");
    }

    #[test]
    fn winner_tie_goes_to_first_seen() {
        let mut a = Player::new(1, "Alice");
        let mut b = Player::new(2, "Bob");
        a.apply_delta(200);
        b.apply_delta(200);
        let players = [a, b];
        let w = winner(&players).unwrap();
        assert_eq!(w.name(), "Alice");
    }

    #[test]
    fn picked_flag_is_one_way() {
        let mut q = Question::from_raw("Math", "100", "Q?", Default::default(), "A");
        assert!(!*q.picked());
        q.mark_picked();
        assert!(*q.picked());
    }
}
