//! API request and response types

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::analysis::wordcloud::PlacedWord;
use crate::dashboard::BatchRow;
use crate::dashboard::Gauge;
use crate::dashboard::Metric;
use crate::models::HistogramBin;
use crate::models::LabelCount;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Single review request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    /// Overrides the configured keyword count
    #[serde(default)]
    pub keywords: Option<usize>,
}

/// CSV batch request; `csv` is the file content including the header row
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub csv: String,
    pub column: String,
}

/// Keyword ranking request
#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub documents: Vec<String>,
    #[serde(default)]
    pub n: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordScore {
    pub term: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<KeywordScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<BatchRow>,
}

/// Placed words plus the rendered PNG, when fonts were available
#[derive(Debug, Clone, Serialize)]
pub struct WordCloudPanel {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
    pub png_base64: Option<String>,
}

/// Every panel produced by one dashboard run
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub warnings: Vec<String>,
    pub notices: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge: Option<Gauge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<TablePreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie: Option<Vec<LabelCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<HistogramBin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_cloud: Option<WordCloudPanel>,
    pub generated_at: DateTime<Utc>,
}

impl Default for DashboardReport {
    fn default() -> Self {
        Self {
            warnings: Vec::new(),
            notices: Vec::new(),
            metrics: Vec::new(),
            gauge: None,
            keywords: None,
            preview: None,
            table: None,
            pie: None,
            histogram: None,
            word_cloud: None,
            generated_at: Utc::now(),
        }
    }
}
