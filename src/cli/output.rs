//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `ReviewXAI` CLI

use std::path::Path;
use std::path::PathBuf;

use tracing::warn;

use crate::analysis::wordcloud::CloudLayout;
use crate::charts;
use crate::dashboard::BatchTable;
use crate::dashboard::DashboardView;
use crate::dashboard::Gauge;
use crate::dashboard::Metric;
use crate::models::HistogramBin;
use crate::models::LabelCount;
use crate::AppConfig;
use crate::Result;

pub const RESULTS_FILE: &str = "results.csv";
pub const PIE_FILE: &str = "sentiment_pie.png";
pub const HISTOGRAM_FILE: &str = "polarity_histogram.png";
pub const WORDCLOUD_FILE: &str = "wordcloud.png";

/// Rows of the annotated table echoed to the terminal
const TABLE_ROWS_SHOWN: usize = 20;
const CELL_WIDTH: usize = 40;
const GAUGE_WIDTH: usize = 41;
const BAR_WIDTH: usize = 40;

/// Safely truncate a string at character boundary (not byte boundary)
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

fn cell(value: &Option<String>) -> String {
    match value {
        Some(text) => truncate_str(&text.replace('\n', " "), CELL_WIDTH),
        None => "<missing>".to_string(),
    }
}

/// Text rendering of the polarity gauge, e.g. `-1 [-----|----] +1`
#[must_use]
pub fn gauge_line(value: f64) -> String {
    let position = (((value.clamp(-1.0, 1.0) + 1.0) / 2.0) * (GAUGE_WIDTH - 1) as f64).round();
    let position = position as usize;
    let bar: String = (0..GAUGE_WIDTH)
        .map(|i| {
            if i == position {
                '|'
            } else if i == GAUGE_WIDTH / 2 {
                '+'
            } else {
                '-'
            }
        })
        .collect();
    format!("-1 [{bar}] +1  ({value:+.3})")
}

pub fn print_config(config: &AppConfig) {
    println!("📋 ReviewXAI Configuration:");
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🔎 Analysis:");
    println!("  Keywords shown: {}", config.analysis.keyword_count);
    println!("  Max features: {}", config.analysis.max_features);
    println!(
        "  Thresholds: negative < {} | positive > {}",
        config.analysis.negative_threshold, config.analysis.positive_threshold
    );
    match &config.analysis.stopwords_path {
        Some(path) => println!("  Stopwords: {}", path.display()),
        None => println!("  Stopwords: bundled English list"),
    }
    println!();

    println!("☁️  Word cloud:");
    println!(
        "  Size: {}x{}",
        config.wordcloud.width, config.wordcloud.height
    );
    println!("  Max words: {}", config.wordcloud.max_words);
    println!("  Background: {}", config.wordcloud.background);
    match config.wordcloud.seed {
        Some(seed) => println!("  Seed: {seed}"),
        None => println!("  Seed: random"),
    }
    println!();

    println!("📊 Charts:");
    println!("  Histogram bins: {}", config.charts.histogram_bins);
    println!("  Output dir: {}", config.charts.output_dir.display());
    println!();

    println!("🌐 Server:");
    println!("  Address: {}", config.server_addr());
    println!("  CORS: {}", config.server.cors);
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}

/// Terminal dashboard; charts are written as PNGs when a target is set
#[derive(Debug, Default)]
pub struct ConsoleView {
    out_dir: Option<PathBuf>,
    gauge_path: Option<PathBuf>,
    written: Vec<PathBuf>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write results.csv and chart PNGs into `dir`
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn with_gauge_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.gauge_path = Some(path.into());
        self
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn target(&self, file: &str) -> Option<PathBuf> {
        self.out_dir.as_ref().map(|dir| dir.join(file))
    }

    /// Save a rendered chart; a failed render only warns so the text output survives
    fn save_chart<F>(&mut self, path: Option<PathBuf>, what: &str, render: F)
    where
        F: FnOnce() -> Result<image::RgbImage>,
    {
        let Some(path) = path else {
            return;
        };
        match render().and_then(|image| charts::save_png(&image, &path)) {
            Ok(()) => {
                print_success(&format!("Saved {what} to {}", path.display()));
                self.written.push(path);
            }
            Err(e) => {
                warn!("Failed to render {}: {}", what, e);
                print_warning(&format!("Could not render {what}: {e}"));
            }
        }
    }
}

impl DashboardView for ConsoleView {
    fn warning(&mut self, message: &str) -> Result<()> {
        print_warning(message);
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        print_info(message);
        Ok(())
    }

    fn metrics(&mut self, metrics: &[Metric]) -> Result<()> {
        println!();
        for metric in metrics {
            println!("  {:<12} {}", format!("{}:", metric.label), metric.value);
        }
        Ok(())
    }

    fn gauge(&mut self, gauge: &Gauge) -> Result<()> {
        println!("  {}", gauge_line(gauge.value));
        println!();
        let path = self.gauge_path.clone();
        self.save_chart(path, "polarity gauge", || {
            charts::draw_gauge(gauge.value, &gauge.bands, &gauge.bar_color)
        });
        Ok(())
    }

    fn keywords(&mut self, keywords: &[String]) -> Result<()> {
        println!("🔑 Keywords: {}", keywords.join(", "));
        Ok(())
    }

    fn preview(&mut self, headers: &[String], rows: &[Vec<Option<String>>]) -> Result<()> {
        println!("📄 Preview ({} rows):", rows.len());
        println!("  {}", headers.join(" | "));
        for row in rows {
            let cells: Vec<String> = row.iter().map(cell).collect();
            println!("  {}", cells.join(" | "));
        }
        println!();
        Ok(())
    }

    fn table(&mut self, table: &BatchTable) -> Result<()> {
        println!("📋 Results ({} rows):", table.len());
        println!("  {}", table.headers().join(" | "));
        for row in table.rows().iter().take(TABLE_ROWS_SHOWN) {
            let mut cells: Vec<String> = row.cells.iter().map(cell).collect();
            cells.push(row.sentiment.clone());
            cells.push(format!("{:.3}", row.polarity));
            println!("  {}", cells.join(" | "));
        }
        if table.len() > TABLE_ROWS_SHOWN {
            println!("  ... {} more rows", table.len() - TABLE_ROWS_SHOWN);
        }
        println!();

        if let Some(path) = self.target(RESULTS_FILE) {
            table.save_csv(&path)?;
            print_success(&format!("Saved results to {}", path.display()));
            self.written.push(path);
        }
        Ok(())
    }

    fn pie(&mut self, counts: &[LabelCount]) -> Result<()> {
        let total: usize = counts.iter().map(|c| c.count).sum();
        println!("🥧 Sentiment distribution:");
        for count in counts {
            let share = if total == 0 {
                0.0
            } else {
                count.count as f64 * 100.0 / total as f64
            };
            println!("  {:<9} {:>6} ({share:.1}%)", count.label.as_str(), count.count);
        }
        println!();

        let path = self.target(PIE_FILE);
        self.save_chart(path, "sentiment distribution", || charts::draw_pie(counts));
        Ok(())
    }

    fn histogram(&mut self, bins: &[HistogramBin]) -> Result<()> {
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        println!("📊 Polarity distribution:");
        for bin in bins.iter().filter(|b| b.count > 0) {
            let bar = "█".repeat((bin.count * BAR_WIDTH).div_ceil(peak));
            println!("  {:+.2}..{:+.2} {bar} {}", bin.start, bin.end, bin.count);
        }
        println!();

        let path = self.target(HISTOGRAM_FILE);
        self.save_chart(path, "polarity histogram", || charts::draw_histogram(bins));
        Ok(())
    }

    fn word_cloud(&mut self, layout: &CloudLayout) -> Result<()> {
        let words: Vec<&str> = layout.words.iter().take(10).map(|w| w.word.as_str()).collect();
        println!("☁️  Word cloud: {}", words.join(", "));

        let path = self.target(WORDCLOUD_FILE);
        self.save_chart(path, "word cloud", || charts::draw_word_cloud(layout));
        Ok(())
    }
}

/// Make sure an output directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
