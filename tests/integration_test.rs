use std::io::Write;

use reviewxai::cli::ConsoleView;
use reviewxai::cli::RESULTS_FILE;
use reviewxai::dashboard::Dashboard;
use reviewxai::dashboard::ReviewTable;
use reviewxai::models::BatchLabel;
use reviewxai::AppConfig;
use reviewxai::Result;
use reviewxai::SentimentLabel;

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

fn seeded_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.wordcloud.seed = Some(42);
    config
}

#[test]
fn test_batch_csv_round_trip() -> Result<()> {
    let csv = write_csv(
        "id,review\n\
         1,great!\n\
         2,\n\
         3,terrible!!\n\
         4,\"The battery is good, the screen is great\"\n",
    );
    let out_dir = tempfile::tempdir()?;

    let table = ReviewTable::from_path(csv.path())?;
    let dashboard = Dashboard::from_config(&seeded_config())?;
    let mut view = ConsoleView::new().with_out_dir(out_dir.path());
    let report = dashboard.analyze_batch(&table, "review", &mut view)?;

    let labels: Vec<BatchLabel> = report.table.sentiments().iter().map(|s| s.label).collect();
    assert_eq!(
        labels,
        vec![
            BatchLabel::Positive,
            BatchLabel::Unknown,
            BatchLabel::Negative,
            BatchLabel::Positive
        ]
    );
    let polarities: Vec<f64> = report.table.sentiments().iter().map(|s| s.polarity).collect();
    assert!(polarities[0] > 0.1);
    assert!(polarities[1].abs() < f64::EPSILON);
    assert!(polarities[2] < -0.1);

    assert_eq!(report.label_counts[0].label, BatchLabel::Positive);
    assert_eq!(report.label_counts[0].count, 2);

    let written = std::fs::read_to_string(out_dir.path().join(RESULTS_FILE))?;
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("id,review,Sentiment,Polarity"));
    assert!(lines.nth(1).is_some_and(|line| line.starts_with("2,,Unknown,0")));
    Ok(())
}

#[test]
fn test_batch_rejects_unknown_column() -> Result<()> {
    let csv = write_csv("id,review\n1,fine\n");
    let table = ReviewTable::from_path(csv.path())?;
    let dashboard = Dashboard::from_config(&AppConfig::default())?;
    let result = dashboard.analyze_batch(&table, "comments", &mut ConsoleView::new());
    assert!(matches!(
        result,
        Err(reviewxai::ReviewXaiError::UnknownColumn(_))
    ));
    Ok(())
}

#[test]
fn test_single_review_end_to_end() -> Result<()> {
    let dashboard = Dashboard::from_config(&AppConfig::default())?;
    let report = dashboard
        .analyze_single(
            "This is the worst purchase I have ever made.",
            &mut ConsoleView::new(),
        )?
        .expect("non-blank review is analyzed");
    assert_eq!(report.sentiment.label, SentimentLabel::Negative);
    assert!(report.sentiment.polarity < -0.1);
    assert!(report.keywords.iter().any(|k| k.contains("purchase")));
    Ok(())
}

#[test]
fn test_custom_stopword_file() -> Result<()> {
    let mut stopwords = tempfile::NamedTempFile::new()?;
    writeln!(stopwords, "battery")?;
    writeln!(stopwords, "the")?;

    let mut config = AppConfig::default();
    config.analysis.stopwords_path = Some(stopwords.path().to_path_buf());
    let dashboard = Dashboard::from_config(&config)?;
    let report = dashboard
        .analyze_single("The battery is wonderful", &mut ConsoleView::new())?
        .expect("analyzed");
    assert!(report.keywords.iter().all(|k| !k.contains("battery")));
    Ok(())
}

#[test]
fn test_config_file_drives_dashboard() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "[analysis]\nkeyword_count = 2\n\n[charts]\nhistogram_bins = 10")?;
    let config = AppConfig::from_file(file.path())?;

    let dashboard = Dashboard::from_config(&config)?;
    let report = dashboard
        .analyze_single(
            "Fast delivery, sturdy packaging, friendly courier, fair price",
            &mut ConsoleView::new(),
        )?
        .expect("analyzed");
    assert_eq!(report.keywords.len(), 2);

    let table = ReviewTable::from_csv_str("review\ngood\nbad\nfine\n")?;
    let batch = dashboard.analyze_batch(&table, "review", &mut ConsoleView::new())?;
    assert_eq!(batch.histogram.len(), 10);
    Ok(())
}
