use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Bar color of the polarity gauge, shared by every label
pub const POLARITY_BAR_COLOR: &str = "#8FC7A3";

/// Discrete sentiment derived from a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Map polarity onto a label; both thresholds are exclusive
    pub fn from_polarity(polarity: f64, thresholds: &Thresholds) -> Self {
        if polarity > thresholds.positive {
            Self::Positive
        } else if polarity < thresholds.negative {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label cutoffs for polarity scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: crate::config::default_positive_threshold(),
            negative: crate::config::default_negative_threshold(),
        }
    }
}

impl From<&crate::config::AnalysisConfig> for Thresholds {
    fn from(config: &crate::config::AnalysisConfig) -> Self {
        Self {
            positive: config.positive_threshold,
            negative: config.negative_threshold,
        }
    }
}

/// Sentiment of a single review text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Polarity in [-1, 1]
    pub polarity: f64,
}

impl SentimentResult {
    /// `|polarity| * 100`
    pub fn confidence(&self) -> f64 {
        self.polarity.abs() * 100.0
    }

    pub fn display_color(&self) -> &'static str {
        POLARITY_BAR_COLOR
    }
}

/// Per-row label of a batch run; `Unknown` marks a missing text cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchLabel {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl BatchLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<SentimentLabel> for BatchLabel {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => Self::Positive,
            SentimentLabel::Neutral => Self::Neutral,
            SentimentLabel::Negative => Self::Negative,
        }
    }
}

impl fmt::Display for BatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived fields appended to one batch row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowSentiment {
    pub label: BatchLabel,
    pub polarity: f64,
}

impl RowSentiment {
    pub const UNKNOWN: Self = Self {
        label: BatchLabel::Unknown,
        polarity: 0.0,
    };
}

impl From<SentimentResult> for RowSentiment {
    fn from(result: SentimentResult) -> Self {
        Self {
            label: result.label.into(),
            polarity: result.polarity,
        }
    }
}

/// Count of one label in a batch, for the distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: BatchLabel,
    pub count: usize,
}

/// One bar of the polarity histogram; `start` inclusive, `end` exclusive except for the last bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Colored polarity range drawn behind the gauge needle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub color: String,
}

/// Gauge bands: red-ish negative, yellow-ish neutral, green-ish positive
pub fn gauge_bands(thresholds: &Thresholds) -> Vec<GaugeBand> {
    vec![
        GaugeBand {
            from: -1.0,
            to: thresholds.negative,
            color: "#7A3E3E".to_string(),
        },
        GaugeBand {
            from: thresholds.negative,
            to: thresholds.positive,
            color: "#A7A878".to_string(),
        },
        GaugeBand {
            from: thresholds.positive,
            to: 1.0,
            color: "#3E6B4A".to_string(),
        },
    ]
}
