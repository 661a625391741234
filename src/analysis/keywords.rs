//! TF-IDF keyword ranking over unigrams and bigrams

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::normalize::normalize_text;
use crate::lexicon::Lexicons;
use crate::ReviewXaiError;
use crate::Result;

/// Shortest token kept by the ranker
const MIN_TOKEN_LEN: usize = 2;

/// A ranked term with its corpus-level score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

/// Ranks terms of a corpus by summed, row-normalized TF-IDF weight
#[derive(Debug, Clone)]
pub struct KeywordRanker {
    lexicons: Arc<Lexicons>,
    max_features: usize,
}

impl KeywordRanker {
    pub fn new(lexicons: Arc<Lexicons>, max_features: usize) -> Self {
        Self {
            lexicons,
            max_features: max_features.max(1),
        }
    }

    /// The `n` highest-scoring terms, best first
    ///
    /// Returns fewer than `n` terms when the vocabulary is smaller, and an
    /// empty list when every term is a stopword. Fails with `EmptyCorpus`
    /// when there are no documents or all of them normalize to nothing.
    pub fn top_terms<S: AsRef<str>>(&self, documents: &[S], n: usize) -> Result<Vec<String>> {
        Ok(self
            .score_terms(documents)?
            .into_iter()
            .take(n)
            .map(|scored| scored.term)
            .collect())
    }

    /// Every vocabulary term with its summed TF-IDF score, best first
    ///
    /// Equal scores are ordered alphabetically.
    pub fn score_terms<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<ScoredTerm>> {
        let normalized: Vec<String> = documents
            .iter()
            .map(|doc| normalize_text(doc.as_ref()))
            .collect();
        if normalized.iter().all(String::is_empty) {
            return Err(ReviewXaiError::EmptyCorpus);
        }

        let doc_terms: Vec<Vec<String>> = normalized.iter().map(|doc| self.terms(doc)).collect();
        let vocabulary = self.vocabulary(&doc_terms);
        if vocabulary.is_empty() {
            debug!("Corpus of {} documents has only stopwords", documents.len());
            return Ok(Vec::new());
        }

        let n_docs = doc_terms.len() as f64;
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &doc_terms {
            let mut seen: Vec<&str> = terms
                .iter()
                .map(String::as_str)
                .filter(|t| vocabulary.contains_key(t))
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Smoothed inverse document frequency
        let idf = |term: &str| -> f64 {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        };

        let mut totals: HashMap<&str, f64> = HashMap::new();
        for terms in &doc_terms {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for term in terms.iter().filter(|t| vocabulary.contains_key(t.as_str())) {
                *counts.entry(term.as_str()).or_insert(0) += 1;
            }

            let weights: Vec<(&str, f64)> = counts
                .into_iter()
                .map(|(term, count)| (term, count as f64 * idf(term)))
                .collect();
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm == 0.0 {
                continue;
            }
            for (term, weight) in weights {
                *totals.entry(term).or_insert(0.0) += weight / norm;
            }
        }

        let mut ranked: Vec<ScoredTerm> = vocabulary
            .keys()
            .map(|term| ScoredTerm {
                term: (*term).to_string(),
                score: totals.get(term).copied().unwrap_or(0.0),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.term.cmp(&b.term)));

        debug!(
            "Ranked {} terms over {} documents",
            ranked.len(),
            documents.len()
        );
        Ok(ranked)
    }

    /// Unigrams and bigrams of a normalized document, stopwords removed first
    fn terms(&self, normalized: &str) -> Vec<String> {
        let tokens: Vec<&str> = normalized
            .split(' ')
            .filter(|t| t.len() >= MIN_TOKEN_LEN && !self.lexicons.is_stopword(t))
            .collect();

        let mut terms: Vec<String> = tokens.iter().map(|t| (*t).to_string()).collect();
        terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        terms
    }

    /// The `max_features` most frequent terms across the corpus
    fn vocabulary<'a>(&self, doc_terms: &'a [Vec<String>]) -> BTreeMap<&'a str, usize> {
        let mut frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for term in doc_terms.iter().flatten() {
            *frequency.entry(term.as_str()).or_insert(0) += 1;
        }
        if frequency.len() <= self.max_features {
            return frequency;
        }

        // Alphabetical iteration plus a stable sort keeps ties alphabetical
        let mut by_frequency: Vec<(&str, usize)> = frequency.into_iter().collect();
        by_frequency.sort_by(|a, b| b.1.cmp(&a.1));
        by_frequency.truncate(self.max_features);
        by_frequency.into_iter().collect()
    }
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new(Lexicons::shared(), crate::config::default_max_features())
    }
}

/// Top `n` keywords of `documents` with the shared English stopwords
pub fn extract_keywords<S: AsRef<str>>(documents: &[S], n: usize) -> Result<Vec<String>> {
    KeywordRanker::default().top_terms(documents, n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_single_review_keywords() {
        let keywords = extract_keywords(
            &["The battery life is great, battery charges fast and the screen is sharp."],
            5,
        )
        .unwrap();
        assert_eq!(keywords.len(), 5);
        assert_eq!(keywords[0], "battery");
        assert!(keywords.iter().all(|k| !k.split(' ').any(|w| w == "the" || w == "is")));
    }

    #[test]
    fn test_includes_bigrams() {
        let ranked = KeywordRanker::default()
            .score_terms(&["customer service", "customer service was slow"])
            .unwrap();
        let terms: HashSet<&str> = ranked.iter().map(|s| s.term.as_str()).collect();
        assert!(terms.contains("customer service"));
        assert!(terms.contains("service slow"));
    }

    #[test]
    fn test_fewer_terms_than_requested() {
        let keywords = extract_keywords(&["battery", "screen", "price"], 5).unwrap();
        let set: HashSet<&str> = keywords.iter().map(String::as_str).collect();
        assert_eq!(keywords.len(), 3);
        assert_eq!(set, HashSet::from(["battery", "screen", "price"]));
    }

    #[test]
    fn test_stopword_only_corpus_is_empty() {
        let keywords = extract_keywords(&["the and of it", "is was!!"], 5).unwrap();
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_single_letter_tokens_dropped() {
        let keywords = extract_keywords(&["x y z"], 5).unwrap();
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_empty_corpus_errors() {
        assert!(matches!(
            extract_keywords(&["", "  ", "123 !!!"], 5),
            Err(ReviewXaiError::EmptyCorpus)
        ));
        let none: [&str; 0] = [];
        assert!(matches!(
            extract_keywords(&none, 5),
            Err(ReviewXaiError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_idempotent() {
        let docs = [
            "Great phone, great camera.",
            "Camera quality is poor in low light.",
            "Battery lasts two days; phone feels premium.",
        ];
        let first = extract_keywords(&docs, 5).unwrap();
        let second = extract_keywords(&docs, 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scores_sorted_descending() {
        let ranked = KeywordRanker::default()
            .score_terms(&["red apple red", "green apple", "green pear ripe"])
            .unwrap();
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_frequent_shared_term_wins() {
        let keywords = extract_keywords(
            &[
                "shipping was slow",
                "slow shipping again",
                "shipping box damaged",
            ],
            1,
        )
        .unwrap();
        assert_eq!(keywords, vec!["shipping".to_string()]);
    }

    #[test]
    fn test_vocabulary_cap() {
        let ranker = KeywordRanker::new(Lexicons::shared(), 3);
        let ranked = ranker
            .score_terms(&["alpha alpha alpha beta beta gamma delta epsilon"])
            .unwrap();
        assert_eq!(ranked.len(), 3);
        let terms: HashSet<&str> = ranked.iter().map(|s| s.term.as_str()).collect();
        assert!(terms.contains("alpha"));
        assert!(terms.contains("beta"));
    }

    #[test]
    fn test_custom_stopwords() {
        let lexicons = Arc::new(Lexicons::shared().with_stopwords(["battery"]));
        let ranker = KeywordRanker::new(lexicons, 100);
        let keywords = ranker.top_terms(&["battery screen"], 5).unwrap();
        assert_eq!(keywords, vec!["screen".to_string()]);
    }
}
