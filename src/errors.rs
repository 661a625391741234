use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewXaiError {
    #[error("Corpus has no extractable terms")]
    EmptyCorpus,

    #[error("Column not found: {0}")]
    UnknownColumn(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl ReviewXaiError {
    /// Errors caused by what the caller supplied, as opposed to internal failures
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCorpus | Self::UnknownColumn(_) | Self::InvalidInput(_) | Self::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReviewXaiError>;
