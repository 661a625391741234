use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of keywords shown for a single review
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,
    /// Vocabulary cap of the keyword ranker
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,
    /// Replaces the bundled English stopword list when set
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,
}

pub(crate) fn default_keyword_count() -> usize {
    5
}

pub(crate) fn default_max_features() -> usize {
    100
}

pub(crate) fn default_positive_threshold() -> f64 {
    0.1
}

pub(crate) fn default_negative_threshold() -> f64 {
    -0.1
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keyword_count: default_keyword_count(),
            max_features: default_max_features(),
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
            stopwords_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudConfig {
    #[serde(default = "default_cloud_width")]
    pub width: u32,
    #[serde(default = "default_cloud_height")]
    pub height: u32,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default = "default_background")]
    pub background: String,
    /// Fixed layout seed; a fresh seed is drawn per render when unset
    #[serde(default)]
    pub seed: Option<u64>,
    /// Merge strongly associated word pairs into two-word terms
    #[serde(default = "default_collocations")]
    pub collocations: bool,
}

pub(crate) fn default_cloud_width() -> u32 {
    800
}

pub(crate) fn default_cloud_height() -> u32 {
    400
}

pub(crate) fn default_max_words() -> usize {
    50
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_collocations() -> bool {
    true
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: default_cloud_width(),
            height: default_cloud_height(),
            max_words: default_max_words(),
            background: default_background(),
            seed: None,
            collocations: default_collocations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

pub(crate) fn default_histogram_bins() -> usize {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reviewxai-output")
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            histogram_bins: default_histogram_bins(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub(crate) fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub wordcloud: WordCloudConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!("Using config.example.toml. Create config.toml to customize settings.");
            Self::from_file("config.example.toml")
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings the analysis pipeline cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        let analysis = &self.analysis;
        if analysis.keyword_count == 0 {
            return Err(crate::ReviewXaiError::Config(
                "analysis.keyword_count must be at least 1".to_string(),
            ));
        }
        if analysis.max_features == 0 {
            return Err(crate::ReviewXaiError::Config(
                "analysis.max_features must be at least 1".to_string(),
            ));
        }
        if analysis.negative_threshold > analysis.positive_threshold {
            return Err(crate::ReviewXaiError::Config(format!(
                "analysis.negative_threshold ({}) is above analysis.positive_threshold ({})",
                analysis.negative_threshold, analysis.positive_threshold
            )));
        }
        if self.wordcloud.width == 0 || self.wordcloud.height == 0 {
            return Err(crate::ReviewXaiError::Config(
                "wordcloud.width and wordcloud.height must be non-zero".to_string(),
            ));
        }
        if self.wordcloud.max_words == 0 {
            return Err(crate::ReviewXaiError::Config(
                "wordcloud.max_words must be at least 1".to_string(),
            ));
        }
        if crate::charts::parse_hex_color(&self.wordcloud.background).is_none() {
            return Err(crate::ReviewXaiError::Config(format!(
                "wordcloud.background is not a #RRGGBB color: {}",
                self.wordcloud.background
            )));
        }
        if self.charts.histogram_bins == 0 {
            return Err(crate::ReviewXaiError::Config(
                "charts.histogram_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get keyword count for single-review analysis
    pub fn keyword_count(&self) -> usize {
        self.analysis.keyword_count
    }

    /// Get histogram bin count
    pub fn histogram_bins(&self) -> usize {
        self.charts.histogram_bins
    }

    /// Get server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
