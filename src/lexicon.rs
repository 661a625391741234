//! Word lists shared by the analysis pipeline
//!
//! The English stopword list, the polarity lexicon and the intensifier table
//! are embedded at compile time and parsed once per process. A stopword list
//! from disk can replace the embedded one through configuration.

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::debug;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::Result;

const STOPWORDS_EN: &str = include_str!("../data/stopwords_en.txt");
const POLARITY_LEXICON: &str = include_str!("../data/polarity_lexicon.tsv");
const INTENSIFIERS: &str = include_str!("../data/intensifiers.tsv");

lazy_static! {
    static ref SHARED: Arc<Lexicons> = Arc::new(Lexicons::embedded());
}

/// Immutable lexical resources
#[derive(Debug, Clone)]
pub struct Lexicons {
    stopwords: HashSet<String>,
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Lexicons {
    /// Process-wide embedded lexicons, parsed on first use
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Lexicons for the given analysis settings
    ///
    /// Without a configured stopword file this is the shared instance.
    pub fn from_config(config: &AnalysisConfig) -> Result<Arc<Self>> {
        match &config.stopwords_path {
            Some(path) => Ok(Arc::new(Self::shared().with_stopwords_file(path)?)),
            None => Ok(Self::shared()),
        }
    }

    fn embedded() -> Self {
        let lexicons = Self {
            stopwords: parse_word_list(STOPWORDS_EN),
            polarity: parse_weighted_list(POLARITY_LEXICON),
            intensifiers: parse_weighted_list(INTENSIFIERS),
        };
        debug!(
            "Loaded embedded lexicons: {} stopwords, {} polarity entries, {} intensifiers",
            lexicons.stopwords.len(),
            lexicons.polarity.len(),
            lexicons.intensifiers.len()
        );
        lexicons
    }

    /// Copy of these lexicons with the stopword list read from a file (one word per line)
    pub fn with_stopwords_file<P: AsRef<Path>>(&self, path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let stopwords = parse_word_list(&content);
        info!(
            "Loaded {} stopwords from {}",
            stopwords.len(),
            path.as_ref().display()
        );
        Ok(Self {
            stopwords,
            ..self.clone()
        })
    }

    /// Copy of these lexicons with an explicit stopword list
    pub fn with_stopwords<I, S>(&self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            ..self.clone()
        }
    }

    /// Case-insensitive stopword check
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        word.chars().any(char::is_uppercase) && self.stopwords.contains(&word.to_lowercase())
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Polarity of a lowercase word, if it carries sentiment
    pub fn polarity(&self, word: &str) -> Option<f64> {
        self.polarity.get(word).copied()
    }

    /// Multiplier of a lowercase intensifier such as "very"
    pub fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }
}

fn is_comment_or_blank(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

fn parse_word_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter(|line| !is_comment_or_blank(line))
        .map(|line| line.trim().to_lowercase())
        .collect()
}

fn parse_weighted_list(content: &str) -> HashMap<String, f64> {
    let mut map = HashMap::new();
    for line in content.lines().filter(|line| !is_comment_or_blank(line)) {
        if let Some((word, score_str)) = line.split_once('\t') {
            if let Ok(score) = score_str.trim().parse::<f64>() {
                map.insert(word.trim().to_lowercase(), score);
            }
        }
    }
    map
}
