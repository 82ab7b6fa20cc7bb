//! XML question format.
//!
//! A document whose root contains `<QuestionItem>` elements, each
//! holding `Category`, `Value`, `QuestionText`, an `Options` element
//! with `OptionA`-`OptionD`, and `CorrectAnswer`.

use super::ParseError;
use crate::model::Question;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(rename = "QuestionItem", default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "QuestionText")]
    text: String,
    #[serde(rename = "Options")]
    options: RawOptions,
    #[serde(rename = "CorrectAnswer")]
    correct_answer: String,
}

#[derive(Debug, Deserialize)]
struct RawOptions {
    #[serde(rename = "OptionA")]
    a: String,
    #[serde(rename = "OptionB")]
    b: String,
    #[serde(rename = "OptionC")]
    c: String,
    #[serde(rename = "OptionD")]
    d: String,
}

pub(super) fn parse(data: &str) -> Result<Vec<Question>, ParseError> {
    let file: QuestionFile = quick_xml::de::from_str(data)?;
    Ok(file
        .items
        .into_iter()
        .map(|item| {
            Question::from_raw(
                item.category,
                &item.value,
                item.text,
                [item.options.a, item.options.b, item.options.c, item.options.d],
                item.correct_answer,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<QuestionSet>
    <QuestionItem>
        <Category>History</Category>
        <Value>100</Value>
        <QuestionText>Year of the moon landing?</QuestionText>
        <Options>
            <OptionA>1969</OptionA>
            <OptionB>1972</OptionB>
            <OptionC>1961</OptionC>
            <OptionD>1958</OptionD>
        </Options>
        <CorrectAnswer>1969</CorrectAnswer>
    </QuestionItem>
    <QuestionItem>
        <Category>Math</Category>
        <Value>oops</Value>
        <QuestionText>What is 7 x 8?</QuestionText>
        <Options>
            <OptionA>54</OptionA>
            <OptionB>56</OptionB>
            <OptionC>58</OptionC>
            <OptionD>64</OptionD>
        </Options>
        <CorrectAnswer>56</CorrectAnswer>
    </QuestionItem>
</QuestionSet>"#;

    #[test]
    fn parses_question_items() {
        let questions = parse(SAMPLE).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category(), "History");
        assert_eq!(*questions[0].value(), 100);
        assert_eq!(questions[0].options()[3], "1958");
    }

    #[test]
    fn bad_value_defaults_to_zero() {
        let questions = parse(SAMPLE).unwrap();
        assert_eq!(*questions[1].value(), 0);
    }

    #[test]
    fn document_without_items_is_empty() {
        let questions = parse("<QuestionSet></QuestionSet>").unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn truncated_document_is_an_error() {
        assert!(parse("<QuestionSet><QuestionItem>").is_err());
    }
}
