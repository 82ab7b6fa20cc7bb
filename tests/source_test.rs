//! Tests for loading question boards from files in every format.

use std::path::Path;
use trivia_night::source::load_questions;

const CSV: &str = "\
Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer
History,100,Year of the moon landing?,1969,1972,1961,1958,1969
\"Variables & Data Types\",200,Which is an integer type?,f64,i32,bool,str,i32
";

const JSON: &str = r#"[
    {
        "Category": "History",
        "Value": 100,
        "Question": "Year of the moon landing?",
        "Options": {"A": "1969", "B": "1972", "C": "1961", "D": "1958"},
        "CorrectAnswer": "1969"
    }
]"#;

const XML: &str = r#"<?xml version="1.0"?>
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
</QuestionSet>"#;

fn write_and_load(name: &str, contents: &str) -> Vec<trivia_night::Question> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    load_questions(&path).unwrap()
}

#[test]
fn loads_csv_board() {
    let questions = write_and_load("board.csv", CSV);
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[1].category(), "Variables & Data Types");
    assert_eq!(*questions[1].value(), 200);
}

#[test]
fn loads_json_board() {
    let questions = write_and_load("board.json", JSON);
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].correct_answer(), "1969");
}

#[test]
fn loads_xml_board() {
    let questions = write_and_load("board.xml", XML);
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].options()[1], "1972");
}

#[test]
fn all_formats_agree_on_the_same_question() {
    let csv = write_and_load("board.csv", CSV);
    let json = write_and_load("board.json", JSON);
    let xml = write_and_load("board.xml", XML);

    for q in [&csv[0], &json[0], &xml[0]] {
        assert_eq!(q.category(), "History");
        assert_eq!(*q.value(), 100);
        assert_eq!(q.correct_answer(), "1969");
        assert!(!*q.picked());
    }
}

#[test]
fn unsupported_extension_is_rejected() {
    assert!(load_questions(Path::new("board.yaml")).is_err());
}

#[test]
fn missing_file_is_an_error() {
    assert!(load_questions(Path::new("no/such/board.csv")).is_err());
}
