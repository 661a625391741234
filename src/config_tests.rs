//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::ReviewXaiError;

    // ====== Default Value Tests ======

    #[test]
    fn test_default_analysis_settings() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.keyword_count, 5);
        assert_eq!(config.analysis.max_features, 100);
        assert!((config.analysis.positive_threshold - 0.1).abs() < f64::EPSILON);
        assert!((config.analysis.negative_threshold + 0.1).abs() < f64::EPSILON);
        assert!(config.analysis.stopwords_path.is_none());
    }

    #[test]
    fn test_default_wordcloud_settings() {
        let config = WordCloudConfig::default();
        assert_eq!((config.width, config.height), (800, 400));
        assert_eq!(config.max_words, 50);
        assert!(config.seed.is_none());
        assert!(config.collocations);
    }

    #[test]
    fn test_default_histogram_bins() {
        assert_eq!(AppConfig::default().histogram_bins(), 30);
    }

    #[test]
    fn test_default_server_addr() {
        assert_eq!(AppConfig::default().server_addr(), "127.0.0.1:8501");
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.keyword_count(), 5);
        assert_eq!(config.wordcloud.max_words, 50);
    }

    #[test]
    fn test_collocations_switch() {
        let config = AppConfig::from_toml_str("[wordcloud]\ncollocations = false\n").unwrap();
        assert!(!config.wordcloud.collocations);
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [analysis]
            keyword_count = 8

            [wordcloud]
            seed = 42

            [server]
            port = 9000
            cors = true
        "#;
        let config = AppConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.keyword_count(), 8);
        assert_eq!(config.analysis.max_features, 100);
        assert_eq!(config.wordcloud.seed, Some(42));
        assert_eq!(config.wordcloud.width, 800);
        assert!(config.wordcloud.collocations);
        assert_eq!(config.server.port, 9000);
        assert!(config.server.cors);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::from_file("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(ReviewXaiError::Io(_))));
    }

    // ====== Validation Tests ======

    #[test]
    fn test_zero_keyword_count_rejected() {
        let result = AppConfig::from_toml_str("[analysis]\nkeyword_count = 0\n");
        assert!(matches!(result, Err(ReviewXaiError::Config(_))));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let toml = "[analysis]\npositive_threshold = -0.5\nnegative_threshold = 0.5\n";
        let result = AppConfig::from_toml_str(toml);
        assert!(matches!(result, Err(ReviewXaiError::Config(_))));
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let result = AppConfig::from_toml_str("[wordcloud]\nwidth = 0\n");
        assert!(matches!(result, Err(ReviewXaiError::Config(_))));
    }

    #[test]
    fn test_bad_background_rejected() {
        let result = AppConfig::from_toml_str("[wordcloud]\nbackground = \"white\"\n");
        assert!(matches!(result, Err(ReviewXaiError::Config(_))));
    }

    #[test]
    fn test_zero_bins_rejected() {
        let result = AppConfig::from_toml_str("[charts]\nhistogram_bins = 0\n");
        assert!(matches!(result, Err(ReviewXaiError::Config(_))));
    }
}
