//! The review dashboard controller
//!
//! `Dashboard` wires the scorer, keyword ranker and word cloud together and
//! pushes every panel to a `DashboardView`. The CLI renders panels to the
//! terminal and PNG files, the HTTP API collects them into JSON.

pub mod table;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

pub use self::table::BatchRow;
pub use self::table::BatchTable;
pub use self::table::ReviewColumn;
pub use self::table::ReviewTable;
use crate::analysis::keywords::KeywordRanker;
use crate::analysis::sentiment::LexiconScorer;
use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::wordcloud::CloudLayout;
use crate::analysis::wordcloud::WordCloud;
use crate::config::AppConfig;
use crate::lexicon::Lexicons;
use crate::models::gauge_bands;
use crate::models::BatchLabel;
use crate::models::GaugeBand;
use crate::models::HistogramBin;
use crate::models::LabelCount;
use crate::models::RowSentiment;
use crate::models::SentimentResult;
use crate::models::Thresholds;
use crate::ReviewXaiError;
use crate::Result;

pub const EMPTY_TEXT_WARNING: &str = "Please enter some text to analyze.";
pub const NO_KEYWORDS_NOTICE: &str = "No keywords found.";
pub const EMPTY_CLOUD_NOTICE: &str = "Not enough words to build a word cloud.";
pub const EMPTY_HISTOGRAM_NOTICE: &str = "No rows to plot.";
/// Rows shown in the batch preview
pub const PREVIEW_ROWS: usize = 5;

/// A labelled figure in the metrics row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Polarity gauge over [-1, 1]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    pub bands: Vec<GaugeBand>,
    pub bar_color: String,
}

/// Render target of the dashboard panels
pub trait DashboardView {
    fn warning(&mut self, message: &str) -> Result<()>;
    fn notice(&mut self, message: &str) -> Result<()>;
    fn metrics(&mut self, metrics: &[Metric]) -> Result<()>;
    fn gauge(&mut self, gauge: &Gauge) -> Result<()>;
    fn keywords(&mut self, keywords: &[String]) -> Result<()>;
    /// First rows of an uploaded table
    fn preview(&mut self, headers: &[String], rows: &[Vec<Option<String>>]) -> Result<()>;
    fn table(&mut self, table: &BatchTable) -> Result<()>;
    fn pie(&mut self, counts: &[LabelCount]) -> Result<()>;
    fn histogram(&mut self, bins: &[HistogramBin]) -> Result<()>;
    fn word_cloud(&mut self, layout: &CloudLayout) -> Result<()>;
}

/// Outcome of analyzing one review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleReport {
    pub sentiment: SentimentResult,
    pub confidence: f64,
    pub keywords: Vec<String>,
}

/// Outcome of analyzing one column of a table
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub table: BatchTable,
    pub label_counts: Vec<LabelCount>,
    pub histogram: Vec<HistogramBin>,
    pub cloud: Option<CloudLayout>,
}

#[derive(Debug, Clone)]
pub struct Dashboard<S = LexiconScorer> {
    scorer: S,
    ranker: KeywordRanker,
    cloud: WordCloud,
    thresholds: Thresholds,
    keyword_count: usize,
    histogram_bins: usize,
}

impl Dashboard<LexiconScorer> {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let lexicons = Lexicons::from_config(&config.analysis)?;
        Ok(Self::with_lexicons(config, lexicons))
    }

    pub fn with_lexicons(config: &AppConfig, lexicons: Arc<Lexicons>) -> Self {
        let thresholds = Thresholds::from(&config.analysis);
        let scorer = LexiconScorer::new(Arc::clone(&lexicons), thresholds);
        Self::with_scorer(config, lexicons, scorer)
    }
}

impl<S: SentimentScorer> Dashboard<S> {
    pub fn with_scorer(config: &AppConfig, lexicons: Arc<Lexicons>, scorer: S) -> Self {
        Self {
            scorer,
            ranker: KeywordRanker::new(Arc::clone(&lexicons), config.analysis.max_features),
            cloud: WordCloud::new(lexicons, &config.wordcloud),
            thresholds: Thresholds::from(&config.analysis),
            keyword_count: config.keyword_count(),
            histogram_bins: config.histogram_bins(),
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score one review and show sentiment, confidence, gauge and keywords
    ///
    /// Blank input only raises a warning and returns `None`.
    pub fn analyze_single<V: DashboardView + ?Sized>(
        &self,
        text: &str,
        view: &mut V,
    ) -> Result<Option<SingleReport>> {
        if text.trim().is_empty() {
            view.warning(EMPTY_TEXT_WARNING)?;
            return Ok(None);
        }

        let sentiment = self.scorer.score(text);
        let confidence = sentiment.confidence();
        info!(
            "Analyzed review: {} ({:.3})",
            sentiment.label, sentiment.polarity
        );

        view.metrics(&[
            Metric::new("Sentiment", sentiment.label.to_string()),
            Metric::new("Polarity Score", format!("{:.2}", sentiment.polarity)),
            Metric::new("Confidence", format!("{confidence:.1}%")),
        ])?;
        view.gauge(&Gauge {
            value: sentiment.polarity,
            bands: gauge_bands(&self.thresholds),
            bar_color: sentiment.display_color().to_string(),
        })?;

        let keywords = match self.ranker.top_terms(&[text], self.keyword_count) {
            Ok(keywords) => {
                if keywords.is_empty() {
                    view.notice(NO_KEYWORDS_NOTICE)?;
                } else {
                    view.keywords(&keywords)?;
                }
                keywords
            }
            Err(ReviewXaiError::EmptyCorpus) => {
                debug!("Review has no rankable words");
                view.notice(NO_KEYWORDS_NOTICE)?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Some(SingleReport {
            sentiment,
            confidence,
            keywords,
        }))
    }

    /// Score every row of `column` and show the annotated table and charts
    ///
    /// Missing cells are labelled `Unknown` with polarity 0.0 and never
    /// reach the scorer.
    pub fn analyze_batch<V: DashboardView + ?Sized>(
        &self,
        table: &ReviewTable,
        column: &str,
        view: &mut V,
    ) -> Result<BatchReport> {
        view.preview(table.headers(), table.head(PREVIEW_ROWS))?;
        let reviews = table.column(column)?;

        let sentiments: Vec<RowSentiment> = reviews
            .values()
            .iter()
            .map(|cell| match cell {
                Some(text) => RowSentiment::from(self.scorer.score(text)),
                None => RowSentiment::UNKNOWN,
            })
            .collect();

        let polarities: Vec<f64> = sentiments.iter().map(|s| s.polarity).collect();
        let label_counts = label_counts(&sentiments);
        let histogram = polarity_histogram(&polarities, self.histogram_bins);
        info!(
            "Analyzed {} rows of column '{}': {:?}",
            sentiments.len(),
            column,
            label_counts
                .iter()
                .map(|c| (c.label.as_str(), c.count))
                .collect::<Vec<_>>()
        );

        let batch = BatchTable::new(table.clone(), sentiments)?;
        view.table(&batch)?;
        view.pie(&label_counts)?;
        if histogram.is_empty() {
            view.notice(EMPTY_HISTOGRAM_NOTICE)?;
        } else {
            view.histogram(&histogram)?;
        }

        let cloud = match self.cloud.layout(&reviews.corpus()) {
            Ok(layout) => {
                view.word_cloud(&layout)?;
                Some(layout)
            }
            Err(ReviewXaiError::EmptyCorpus) => {
                warn!("Column '{}' has no words for a word cloud", column);
                view.notice(EMPTY_CLOUD_NOTICE)?;
                None
            }
            Err(e) => return Err(e),
        };

        Ok(BatchReport {
            table: batch,
            label_counts,
            histogram,
            cloud,
        })
    }
}

/// Rows per label, most frequent first; absent labels are omitted
pub fn label_counts(sentiments: &[RowSentiment]) -> Vec<LabelCount> {
    const ORDER: [BatchLabel; 4] = [
        BatchLabel::Positive,
        BatchLabel::Neutral,
        BatchLabel::Negative,
        BatchLabel::Unknown,
    ];

    let mut counts: HashMap<BatchLabel, usize> = HashMap::new();
    for sentiment in sentiments {
        *counts.entry(sentiment.label).or_insert(0) += 1;
    }

    let mut result: Vec<LabelCount> = ORDER
        .iter()
        .filter_map(|label| {
            counts.get(label).map(|&count| LabelCount {
                label: *label,
                count,
            })
        })
        .collect();
    // stable, so equal counts keep label order
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}

/// Equal-width bins over the observed range of `values`
///
/// A degenerate range is widened to `value ± 0.5`. Every bin is half-open
/// except the last, which also holds the maximum.
pub fn polarity_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (low, high) = if max - min < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (high - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &value in values {
        let index = (((value - low) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: low + width * i as f64,
            end: if i + 1 == bins {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}
