//! Curriculum Loading Integration Tests
//!
//! Tests for loading and validating the curriculum data file.

use std::io::Write;

use syllabus::{Curriculum, DataLoadError};
use tempfile::NamedTempFile;

fn write_temp(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

#[tokio::test]
async fn test_load_valid_file() {
    let file = write_temp(
        r#"{
            "subject": "Information & Communication Technology",
            "grade": "Grade 12",
            "units": [
                {"unit_number": 1, "unit_title": "Intro to Databases", "periods": 6, "topics": ["ER Modeling"]}
            ]
        }"#,
    );

    let curriculum = Curriculum::load(file.path()).await.unwrap();
    assert_eq!(curriculum.units.len(), 1);
    assert_eq!(curriculum.units[0].topics, vec!["ER Modeling".to_string()]);
}

#[tokio::test]
async fn test_duplicate_unit_numbers_fail_without_partial_data() {
    let file = write_temp(
        r#"{
            "subject": "ICT",
            "grade": "Grade 12",
            "units": [
                {"unit_number": 1, "unit_title": "Intro to Databases", "periods": 6, "topics": ["ER Modeling"]},
                {"unit_number": 2, "unit_title": "Networks", "periods": 4, "topics": ["OSI"]},
                {"unit_number": 1, "unit_title": "Duplicate", "periods": 2, "topics": ["Other"]}
            ]
        }"#,
    );

    let result = Curriculum::load(file.path()).await;
    match result {
        Err(DataLoadError::DuplicateUnitNumber(number)) => assert_eq!(number, 1),
        other => panic!("Expected DuplicateUnitNumber, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_fails() {
    let file = write_temp(r#"{"subject": "ICT", "grade": "12", "units": [ {"unit_number": 1 "#);

    let result = Curriculum::load(file.path()).await;
    assert!(matches!(result, Err(DataLoadError::Parse(_))));
}

#[tokio::test]
async fn test_missing_topics_field_fails() {
    let file = write_temp(
        r#"{
            "subject": "ICT",
            "grade": "12",
            "units": [{"unit_number": 1, "unit_title": "A", "periods": 1}]
        }"#,
    );

    let result = Curriculum::load(file.path()).await;
    assert!(matches!(result, Err(DataLoadError::Parse(_))));
}

#[tokio::test]
async fn test_bundled_sample_data_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/curriculum.json");

    let curriculum = Curriculum::load(&path).await.unwrap();
    assert!(!curriculum.units.is_empty());
    assert!(curriculum.topic_count() > 0);
}
