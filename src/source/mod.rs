//! Question sources.
//!
//! The board is loaded once at startup from a CSV, JSON or XML file;
//! the format is chosen from the file extension. The engine only sees
//! the resulting `Vec<Question>` and never cares which format fed it.

mod csv;
mod json;
mod xml;

use crate::model::Question;
use derive_more::{Display, Error};
use std::io;
use std::path::Path;
use tracing::{info, instrument};

/// Supported question file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFormat {
    /// `Category,Value,Question,OptionA..OptionD,CorrectAnswer` rows.
    Csv,
    /// An array of question objects.
    Json,
    /// `<QuestionItem>` elements.
    Xml,
}

impl QuestionFormat {
    /// Chooses the format from a file extension.
    ///
    /// # Errors
    ///
    /// Fails for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("xml") => Ok(Self::Xml),
            _ => Err(ParseError::new(format!(
                "unsupported question file type: {}",
                path.display()
            ))),
        }
    }
}

/// Question parsing error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Question source error: {} at {}:{}", message, file, line)]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ParseError {
    /// Creates a new parse error with caller location tracking.
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

impl From<io::Error> for ParseError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        Self::new(format!("I/O error: {err}"))
    }
}

impl From<::csv::Error> for ParseError {
    #[track_caller]
    fn from(err: ::csv::Error) -> Self {
        Self::new(format!("CSV error: {err}"))
    }
}

impl From<serde_json::Error> for ParseError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {err}"))
    }
}

impl From<quick_xml::DeError> for ParseError {
    #[track_caller]
    fn from(err: quick_xml::DeError) -> Self {
        Self::new(format!("XML error: {err}"))
    }
}

/// Loads the question board from the given file.
///
/// # Errors
///
/// Fails when the extension is unsupported, the file cannot be read,
/// or its contents do not parse in the chosen format. An empty but
/// well-formed file is not an error here; the engine rejects an empty
/// board before play starts.
#[instrument(fields(path = %path.display()))]
pub fn load_questions(path: &Path) -> Result<Vec<Question>, ParseError> {
    let format = QuestionFormat::from_path(path)?;
    let data = std::fs::read_to_string(path)?;
    let questions = match format {
        QuestionFormat::Csv => csv::parse(&data)?,
        QuestionFormat::Json => json::parse(&data)?,
        QuestionFormat::Xml => xml::parse(&data)?,
    };
    info!(count = questions.len(), "questions loaded");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension_case_insensitively() {
        assert_eq!(
            QuestionFormat::from_path(Path::new("game.CSV")).unwrap(),
            QuestionFormat::Csv
        );
        assert_eq!(
            QuestionFormat::from_path(Path::new("dir/game.json")).unwrap(),
            QuestionFormat::Json
        );
        assert_eq!(
            QuestionFormat::from_path(Path::new("game.xml")).unwrap(),
            QuestionFormat::Xml
        );
        assert!(QuestionFormat::from_path(Path::new("game.yaml")).is_err());
        assert!(QuestionFormat::from_path(Path::new("game")).is_err());
    }
}
