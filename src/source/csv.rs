//! CSV question format.
//!
//! Expected layout, header included:
//! `Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer`

use super::ParseError;
use crate::model::Question;

const HEADER: [&str; 8] = [
    "Category",
    "Value",
    "Question",
    "OptionA",
    "OptionB",
    "OptionC",
    "OptionD",
    "CorrectAnswer",
];

pub(super) fn parse(data: &str) -> Result<Vec<Question>, ParseError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().ne(HEADER) {
        return Err(ParseError::new(format!(
            "CSV file has wrong columns: {headers:?}"
        )));
    }

    let mut questions = Vec::new();
    for record in reader.records() {
        let record = record?;
        let options = [
            record[3].to_string(),
            record[4].to_string(),
            record[5].to_string(),
            record[6].to_string(),
        ];
        questions.push(Question::from_raw(
            &record[0], &record[1], &record[2], options, &record[7],
        ));
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer
History,100,Year of the moon landing?,1969,1972,1961,1958,1969
Math,200,What is 7 x 8?,54,56,58,64,56
";

    #[test]
    fn parses_rows_after_header() {
        let questions = parse(SAMPLE).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category(), "History");
        assert_eq!(*questions[1].value(), 200);
        assert_eq!(questions[1].correct_answer(), "56");
        assert_eq!(questions[0].options()[0], "1969");
    }

    #[test]
    fn rejects_wrong_header() {
        let data = "Cat,Val\nHistory,100\n";
        assert!(parse(data).is_err());
    }

    #[test]
    fn quoted_category_may_contain_commas() {
        let data = "\
Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer
\"Variables & Data Types\",300,Q?,a,b,c,d,a
";
        let questions = parse(data).unwrap();
        assert_eq!(questions[0].category(), "Variables & Data Types");
    }

    #[test]
    fn bad_value_defaults_to_zero() {
        let data = "\
Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer
History,plenty,Q?,a,b,c,d,a
";
        let questions = parse(data).unwrap();
        assert_eq!(*questions[0].value(), 0);
    }
}
