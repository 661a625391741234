//! Lexicon-based polarity scoring
//!
//! Raw text is tokenized here directly, without the keyword normalizer, so
//! that apostrophes ("isn't") and sentence punctuation stay meaningful.

use std::sync::Arc;

use tracing::trace;

use crate::lexicon::Lexicons;
use crate::models::SentimentLabel;
use crate::models::SentimentResult;
use crate::models::Thresholds;

/// Negated sentiment words are flipped and damped by this factor
const NEGATION_FACTOR: f64 = -0.5;
/// Words a negation may look ahead before it lapses
const NEGATION_WINDOW: usize = 3;
/// Per-'!' amplification of the final score, up to `MAX_EXCLAMATIONS`
const EXCLAMATION_BOOST: f64 = 0.05;
const MAX_EXCLAMATIONS: usize = 3;

/// Anything that turns text into a sentiment result
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentResult;
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for Arc<T> {
    fn score(&self, text: &str) -> SentimentResult {
        (**self).score(text)
    }
}

/// Pattern scorer over the polarity lexicon
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicons: Arc<Lexicons>,
    thresholds: Thresholds,
}

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    /// Sentence punctuation; ends any pending negation or intensifier
    Boundary,
}

impl LexiconScorer {
    pub fn new(lexicons: Arc<Lexicons>, thresholds: Thresholds) -> Self {
        Self {
            lexicons,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Polarity in [-1, 1]; 0.0 when no sentiment-bearing word is found
    pub fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let assessments = self.assess(&tokens);
        if assessments.is_empty() {
            return 0.0;
        }

        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        let polarity = mean * (1.0 + EXCLAMATION_BOOST * exclamations as f64);
        trace!(
            "{} assessments, mean {:.3}, {} exclamations",
            assessments.len(),
            mean,
            exclamations
        );
        polarity.clamp(-1.0, 1.0)
    }

    fn assess(&self, tokens: &[Token]) -> Vec<f64> {
        let mut assessments = Vec::new();
        let mut negation_left = 0usize;
        let mut multiplier = 1.0;

        for (i, token) in tokens.iter().enumerate() {
            let word = match token {
                Token::Word(word) => word.as_str(),
                Token::Boundary => {
                    negation_left = 0;
                    multiplier = 1.0;
                    continue;
                }
            };

            if is_negation(word) {
                negation_left = NEGATION_WINDOW;
                multiplier = 1.0;
                continue;
            }

            if let Some(intensity) = self.lexicons.intensity(word) {
                if self.modifies_next(tokens.get(i + 1)) {
                    multiplier *= intensity;
                    continue;
                }
            }

            if let Some(polarity) = self.lexicons.polarity(word) {
                let mut score = polarity * multiplier;
                if negation_left > 0 {
                    score *= NEGATION_FACTOR;
                }
                assessments.push(score.clamp(-1.0, 1.0));
                negation_left = 0;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
            multiplier = 1.0;
        }

        assessments
    }

    /// An intensifier only counts when a sentiment word or another intensifier follows
    fn modifies_next(&self, next: Option<&Token>) -> bool {
        match next {
            Some(Token::Word(next)) => {
                self.lexicons.polarity(next).is_some() || self.lexicons.intensity(next).is_some()
            }
            _ => false,
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(Lexicons::shared(), Thresholds::default())
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentResult {
        let polarity = self.polarity(text);
        SentimentResult {
            label: SentimentLabel::from_polarity(polarity, &self.thresholds),
            polarity,
        }
    }
}

fn is_negation(word: &str) -> bool {
    matches!(
        word,
        "not" | "no" | "never" | "neither" | "nor" | "cannot" | "without" | "hardly" | "nothing"
    ) || word.ends_with("n't")
}

/// Lowercase words (letters with inner apostrophes) and sentence boundaries
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        let word = current.trim_matches('\'');
        if !word.is_empty() {
            tokens.push(Token::Word(word.to_string()));
        }
        current.clear();
    };

    for c in text.chars() {
        if c.is_alphabetic() {
            current.extend(c.to_lowercase());
        } else if c == '\'' || c == '\u{2019}' {
            current.push('\'');
        } else {
            flush(&mut current, &mut tokens);
            if matches!(c, '.' | '!' | '?' | ';' | ',') && tokens.last() != Some(&Token::Boundary)
            {
                tokens.push(Token::Boundary);
            }
        }
    }
    flush(&mut current, &mut tokens);

    tokens
}
