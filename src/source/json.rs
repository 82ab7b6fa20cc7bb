//! JSON question format.
//!
//! An array of objects, each with `Category`, `Value` (number or
//! string), `Question`, an `Options` object keyed `A`-`D`, and
//! `CorrectAnswer`.

use super::ParseError;
use crate::model::Question;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Value")]
    value: serde_json::Value,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Options")]
    options: RawOptions,
    #[serde(rename = "CorrectAnswer")]
    correct_answer: String,
}

#[derive(Debug, Deserialize)]
struct RawOptions {
    #[serde(rename = "A")]
    a: String,
    #[serde(rename = "B")]
    b: String,
    #[serde(rename = "C")]
    c: String,
    #[serde(rename = "D")]
    d: String,
}

pub(super) fn parse(data: &str) -> Result<Vec<Question>, ParseError> {
    let raw: Vec<RawQuestion> = serde_json::from_str(data)?;
    Ok(raw
        .into_iter()
        .map(|q| {
            // Value may be a JSON number or a string holding one.
            let value = match &q.value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Question::from_raw(
                q.category,
                &value,
                q.question,
                [q.options.a, q.options.b, q.options.c, q.options.d],
                q.correct_answer,
            )
        })
        .collect())
}
