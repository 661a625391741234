//! ReviewXAI: explainable review analytics
//!
//! Sentiment scoring, TF-IDF keywords and word clouds over product reviews,
//! served through a terminal dashboard and an HTTP API.

pub mod analysis;
pub mod api;
pub mod charts;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod lexicon;
pub mod logging;
pub mod models;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod errors_tests;

pub use analysis::extract_keywords;
pub use analysis::normalize_text;
pub use analysis::LexiconScorer;
pub use analysis::SentimentScorer;
pub use config::AppConfig;
pub use dashboard::Dashboard;
pub use dashboard::DashboardView;
pub use errors::*;
pub use lexicon::Lexicons;
pub use models::SentimentLabel;
pub use models::SentimentResult;
