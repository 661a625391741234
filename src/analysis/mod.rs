//! Text analysis: normalization, sentiment, keywords and word clouds

pub mod keywords;
pub mod normalize;
pub mod sentiment;
pub mod wordcloud;

pub use keywords::extract_keywords;
pub use keywords::KeywordRanker;
pub use keywords::ScoredTerm;
pub use normalize::normalize_text;
pub use sentiment::LexiconScorer;
pub use sentiment::SentimentScorer;
pub use wordcloud::CloudLayout;
pub use wordcloud::WordCloud;
