//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::ReviewXaiError;
    use crate::errors::Result;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = ReviewXaiError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_unknown_column_names_the_column() {
        let error = ReviewXaiError::UnknownColumn("review_text".to_string());
        let display = format!("{error}");
        assert!(display.contains("review_text"));
    }

    #[test]
    fn test_empty_corpus_display() {
        let display = format!("{}", ReviewXaiError::EmptyCorpus);
        assert!(display.contains("no extractable terms"));
    }

    #[test]
    fn test_config_error() {
        let error = ReviewXaiError::Config("Invalid configuration".to_string());
        assert!(matches!(error, ReviewXaiError::Config(_)));
        assert!(format!("{error}").contains("configuration"));
    }

    // ====== Classification Tests ======

    #[test]
    fn test_input_errors_are_classified() {
        assert!(ReviewXaiError::EmptyCorpus.is_input_error());
        assert!(ReviewXaiError::UnknownColumn("x".into()).is_input_error());
        assert!(ReviewXaiError::InvalidInput("x".into()).is_input_error());
        assert!(!ReviewXaiError::Render("font".into()).is_input_error());
        assert!(!ReviewXaiError::Custom("x".into()).is_input_error());
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: ReviewXaiError = io_err.into();
        assert!(matches!(err, ReviewXaiError::Io(_)));
        assert!(format!("{err}").contains("File not found"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err: ReviewXaiError = json_err.into();
        assert!(matches!(err, ReviewXaiError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: ReviewXaiError = toml_err.into();
        assert!(matches!(err, ReviewXaiError::TomlParsing(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn inner() -> Result<()> {
            Err(ReviewXaiError::EmptyCorpus)
        }
        fn outer() -> Result<u32> {
            inner()?;
            Ok(1)
        }
        assert!(matches!(outer(), Err(ReviewXaiError::EmptyCorpus)));
    }
}
