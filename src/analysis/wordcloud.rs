//! Word-cloud vocabulary weighting and layout
//!
//! Weighting is deterministic. Adjacent word pairs that co-occur far more
//! often than chance (Dunning log-likelihood) become single two-word terms.
//! Layout places words largest first along an Archimedean spiral over a
//! coarse occupancy grid; start points, rotation and colors come from a
//! seedable RNG.

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbImage;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::config::WordCloudConfig;
use crate::lexicon::Lexicons;
use crate::ReviewXaiError;
use crate::Result;

/// Viridis samples, dark to light
pub const VIRIDIS: [(u8, u8, u8); 8] = [
    (68, 1, 84),
    (70, 50, 126),
    (54, 92, 141),
    (39, 127, 142),
    (31, 161, 135),
    (74, 193, 109),
    (160, 218, 57),
    (223, 227, 24),
];

const RELATIVE_SCALING: f64 = 0.5;
const PREFER_HORIZONTAL: f64 = 0.9;
const MIN_FONT_SIZE: f64 = 4.0;
const FONT_STEP: f64 = 2.0;
/// Side of one occupancy cell in pixels
const CELL: u32 = 4;
/// Minimum log-likelihood score for a word pair to count as one term
const COLLOCATION_THRESHOLD: f64 = 30.0;

/// Surface-form counts grouped under a lowercase key
type Forms = HashMap<String, HashMap<String, usize>>;

/// A vocabulary entry with its frequency relative to the most frequent word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudWord {
    pub word: String,
    pub count: usize,
    pub weight: f64,
}

/// A word positioned on the canvas; `(x, y)` is the top-left of its box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f64,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudLayout {
    pub width: u32,
    pub height: u32,
    pub background: (u8, u8, u8),
    pub words: Vec<PlacedWord>,
}

#[derive(Debug, Clone)]
pub struct WordCloud {
    lexicons: Arc<Lexicons>,
    width: u32,
    height: u32,
    max_words: usize,
    background: (u8, u8, u8),
    seed: Option<u64>,
    collocations: bool,
}

impl WordCloud {
    pub fn new(lexicons: Arc<Lexicons>, config: &WordCloudConfig) -> Self {
        Self {
            lexicons,
            width: config.width.max(CELL),
            height: config.height.max(CELL),
            max_words: config.max_words.max(1),
            background: crate::charts::parse_hex_color(&config.background)
                .unwrap_or((255, 255, 255)),
            seed: config.seed,
            collocations: config.collocations,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Most frequent non-stopword words, heaviest first
    pub fn weights(&self, text: &str) -> Result<Vec<CloudWord>> {
        let counts = self.count_words(text);
        if counts.is_empty() {
            return Err(ReviewXaiError::EmptyCorpus);
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_words);

        let max = ranked[0].1 as f64;
        Ok(ranked
            .into_iter()
            .map(|(word, count)| CloudWord {
                weight: count as f64 / max,
                word,
                count,
            })
            .collect())
    }

    /// Weigh and place the words of `text`
    pub fn layout(&self, text: &str) -> Result<CloudLayout> {
        let words = self.weights(text)?;
        Ok(self.layout_words(&words))
    }

    /// Rasterize the cloud of `text`
    pub fn render(&self, text: &str) -> Result<RgbImage> {
        let layout = self.layout(text)?;
        crate::charts::draw_word_cloud(&layout)
    }

    pub fn layout_words(&self, words: &[CloudWord]) -> CloudLayout {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut grid = OccupancyGrid::new(self.width, self.height);
        let mut placed = Vec::with_capacity(words.len());

        let mut font_size = match words.first() {
            Some(first) => self.initial_font_size(&first.word),
            None => MIN_FONT_SIZE,
        };
        let mut last_weight = 1.0;

        for entry in words {
            font_size = ((RELATIVE_SCALING * (entry.weight / last_weight) + (1.0 - RELATIVE_SCALING))
                * font_size)
                .round();
            let rotated = rng.gen::<f64>() >= PREFER_HORIZONTAL;

            let mut spot = None;
            while font_size >= MIN_FONT_SIZE {
                let (w, h) = text_box(&entry.word, font_size, rotated);
                spot = grid.find_spot(w, h, &mut rng);
                if spot.is_some() {
                    break;
                }
                font_size -= FONT_STEP;
            }
            let Some((x, y, w, h)) = spot else {
                debug!(
                    "Canvas full after {} of {} words",
                    placed.len(),
                    words.len()
                );
                break;
            };

            grid.occupy(x, y, w, h);
            placed.push(PlacedWord {
                word: entry.word.clone(),
                font_size,
                x,
                y,
                width: w,
                height: h,
                rotated,
                color: VIRIDIS[rng.gen_range(0..VIRIDIS.len())],
            });
            last_weight = entry.weight;
        }

        CloudLayout {
            width: self.width,
            height: self.height,
            background: self.background,
            words: placed,
        }
    }

    /// Largest font at which the top word fits comfortably across the canvas
    fn initial_font_size(&self, word: &str) -> f64 {
        let by_width = f64::from(self.width) * 0.9 / text_width(word, 1.0);
        let by_height = f64::from(self.height) * 0.4;
        by_width.min(by_height).floor().max(MIN_FONT_SIZE)
    }

    /// Term counts keyed by the most common surface form of each term
    fn count_words(&self, text: &str) -> HashMap<String, usize> {
        let tokens = self.content_tokens(text);

        let mut forms: Forms = HashMap::new();
        for word in &tokens {
            *forms
                .entry(word.to_lowercase())
                .or_default()
                .entry(word.clone())
                .or_insert(0) += 1;
        }

        // Fold "screens" into "screen" when both occur
        let plurals: Vec<String> = forms
            .keys()
            .filter(|key| {
                key.ends_with('s')
                    && !key.ends_with("ss")
                    && key.len() > 3
                    && forms.contains_key(&key[..key.len() - 1])
            })
            .cloned()
            .collect();
        let mut folded: HashMap<String, String> = HashMap::new();
        for plural in plurals {
            let singular_key = plural[..plural.len() - 1].to_string();
            if let Some(plural_forms) = forms.remove(&plural) {
                let total: usize = plural_forms.values().sum();
                if let Some(singular) = forms.get_mut(&singular_key) {
                    let best = best_form(singular);
                    *singular.entry(best).or_insert(0) += total;
                }
            }
            folded.insert(plural, singular_key);
        }

        let mut counts: HashMap<String, (String, usize)> = forms
            .into_iter()
            .map(|(key, surface)| {
                let total = surface.values().sum();
                (key, (best_form(&surface), total))
            })
            .collect();
        if self.collocations {
            merge_collocations(&tokens, &folded, &mut counts);
        }

        counts
            .into_values()
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Non-stopword tokens in text order, possessives stripped
    fn content_tokens(&self, text: &str) -> Vec<String> {
        cloud_tokens(text)
            .into_iter()
            .filter(|word| !self.lexicons.is_stopword(word))
            .filter_map(|word| {
                let stem = strip_possessive(&word);
                (!stem.is_empty() && !self.lexicons.is_stopword(stem)).then(|| stem.to_string())
            })
            .collect()
    }
}

/// Replace strongly associated adjacent pairs with one two-word term
///
/// A kept pair takes its count away from both of its words; words left at
/// zero are dropped by the caller.
fn merge_collocations(
    tokens: &[String],
    folded: &HashMap<String, String>,
    counts: &mut HashMap<String, (String, usize)>,
) {
    let mut bigrams: Forms = HashMap::new();
    for pair in tokens.windows(2) {
        let surface = format!("{} {}", pair[0], pair[1]);
        *bigrams
            .entry(surface.to_lowercase())
            .or_default()
            .entry(surface)
            .or_insert(0) += 1;
    }

    let unigram_totals: HashMap<String, usize> = counts
        .iter()
        .map(|(key, (_, count))| (key.clone(), *count))
        .collect();
    let unigram_key = |word: &str| folded.get(word).cloned().unwrap_or_else(|| word.to_string());

    let mut keys: Vec<&String> = bigrams.keys().collect();
    keys.sort();
    for key in keys {
        let Some((first, second)) = key.split_once(' ') else {
            continue;
        };
        let (first, second) = (unigram_key(first), unigram_key(second));
        let surface = &bigrams[key];
        let count: usize = surface.values().sum();
        let score = collocation_score(
            count,
            unigram_totals.get(&first).copied().unwrap_or(0),
            unigram_totals.get(&second).copied().unwrap_or(0),
            tokens.len(),
        );
        if score <= COLLOCATION_THRESHOLD {
            continue;
        }

        debug!("Collocation '{}' x{} (score {:.1})", key, count, score);
        for word in [&first, &second] {
            if let Some((_, total)) = counts.get_mut(word) {
                *total = total.saturating_sub(count);
            }
        }
        counts.insert(key.clone(), (best_form(surface), count));
    }
}

/// Dunning log-likelihood ratio of a pair seen `pair` times against chance
fn collocation_score(pair: usize, first: usize, second: usize, total: usize) -> f64 {
    if first == 0 || second == 0 || total <= first || total <= second {
        return 0.0;
    }
    let (c12, c1, c2, n) = (pair as f64, first as f64, second as f64, total as f64);
    let p = c2 / n;
    let p1 = c12 / c1;
    let p2 = (c2 - c12) / (n - c1);
    -2.0 * (log_likelihood(c12, c1, p) + log_likelihood(c2 - c12, n - c1, p)
        - log_likelihood(c12, c1, p1)
        - log_likelihood(c2 - c12, n - c1, p2))
}

fn log_likelihood(k: f64, n: f64, x: f64) -> f64 {
    x.max(1e-10).ln() * k + (1.0 - x).max(1e-10).ln() * (n - k)
}

impl Default for WordCloud {
    fn default() -> Self {
        Self::new(Lexicons::shared(), &WordCloudConfig::default())
    }
}

/// Most frequent surface form; among ties the lowercase-leaning (byte-wise last) form wins
fn best_form(surface: &HashMap<String, usize>) -> String {
    surface
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(form, _)| form.clone())
        .unwrap_or_default()
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .unwrap_or(word)
        .trim_end_matches('\'')
}

/// Words of letters and digits with inner apostrophes; pure numbers dropped
fn cloud_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars().chain(std::iter::once(' ')) {
        if c.is_alphanumeric() || (c == '\'' && !current.is_empty()) {
            current.push(c);
        } else if !current.is_empty() {
            let token = current.trim_end_matches('\'');
            if token.chars().any(char::is_alphabetic) {
                tokens.push(token.to_string());
            }
            current.clear();
        }
    }
    tokens
}

/// Advance of one glyph relative to the font size, rounded up from common sans-serif metrics
fn glyph_advance(c: char) -> f64 {
    match c {
        'm' | 'w' | 'M' | 'W' => 1.0,
        'i' | 'j' | 'l' | '\'' | '.' => 0.32,
        'f' | 'r' | 't' | 'I' => 0.45,
        c if c.is_uppercase() => 0.8,
        c if c.is_ascii() => 0.66,
        // CJK and other wide scripts
        _ => 1.0,
    }
}

fn text_width(word: &str, font_size: f64) -> f64 {
    let advance: f64 = word.chars().map(glyph_advance).sum();
    advance.max(glyph_advance('m')) * font_size
}

/// Estimated pixel box of `word` at `font_size`, padded for rendering slack
fn text_box(word: &str, font_size: f64, rotated: bool) -> (u32, u32) {
    let w = text_width(word, font_size).ceil() as u32 + 4;
    let h = (font_size * 1.15).ceil() as u32 + 2;
    if rotated {
        (h, w)
    } else {
        (w, h)
    }
}

struct OccupancyGrid {
    width: u32,
    height: u32,
    cols: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(CELL);
        let rows = height.div_ceil(CELL);
        Self {
            width,
            height,
            cols,
            rows,
            cells: vec![false; (cols * rows) as usize],
        }
    }

    fn cell_span(start: u32, len: u32) -> (u32, u32) {
        (start / CELL, (start + len).div_ceil(CELL))
    }

    fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if x + w > self.width || y + h > self.height {
            return false;
        }
        let (c0, c1) = Self::cell_span(x, w);
        let (r0, r1) = Self::cell_span(y, h);
        (r0..r1.min(self.rows)).all(|r| {
            (c0..c1.min(self.cols)).all(|c| !self.cells[(r * self.cols + c) as usize])
        })
    }

    fn occupy(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let (c0, c1) = Self::cell_span(x, w);
        let (r0, r1) = Self::cell_span(y, h);
        for r in r0..r1.min(self.rows) {
            for c in c0..c1.min(self.cols) {
                self.cells[(r * self.cols + c) as usize] = true;
            }
        }
    }

    /// Walk a spiral from a random start until a `w`×`h` box fits
    fn find_spot(&self, w: u32, h: u32, rng: &mut StdRng) -> Option<(u32, u32, u32, u32)> {
        if w > self.width || h > self.height {
            return None;
        }
        let max_x = f64::from(self.width - w);
        let max_y = f64::from(self.height - h);
        let cx = rng.gen_range(0.25..=0.75) * max_x;
        let cy = rng.gen_range(0.25..=0.75) * max_y;
        let aspect = f64::from(self.height) / f64::from(self.width);
        let max_radius = f64::from(self.width.max(self.height));

        let mut theta: f64 = 0.0;
        loop {
            let radius = f64::from(CELL) * theta / 2.0;
            if radius > max_radius {
                return None;
            }
            let x = (cx + radius * theta.cos()).round();
            let y = (cy + radius * aspect * theta.sin()).round();
            if (0.0..=max_x).contains(&x) && (0.0..=max_y).contains(&y) {
                let (x, y) = (x as u32, y as u32);
                if self.is_free(x, y, w, h) {
                    return Some((x, y, w, h));
                }
            }
            // Keep successive spiral points about one cell apart
            theta += (2.0 / theta.max(1.0)).min(0.5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    const REVIEWS: &str = "Great battery. Battery life is great! The screen is bright, \
        screens never crack. Shipping was slow; shipping box damaged. Great price, great value.";

    #[test]
    fn test_weights_rank_by_frequency() {
        let words = WordCloud::default().weights(REVIEWS).unwrap();
        assert_eq!(words[0].word, "great");
        assert_eq!(words[0].count, 4);
        assert!((words[0].weight - 1.0).abs() < f64::EPSILON);
        assert!(words.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(words.iter().all(|w| w.weight > 0.0 && w.weight <= 1.0));
    }

    #[test]
    fn test_stopwords_excluded() {
        let words = WordCloud::default().weights(REVIEWS).unwrap();
        for stop in ["the", "is", "was"] {
            assert!(words.iter().all(|w| !w.word.eq_ignore_ascii_case(stop)));
        }
    }

    #[test]
    fn test_case_variants_and_plurals_merge() {
        let words = WordCloud::default().weights(REVIEWS).unwrap();
        let battery: Vec<&CloudWord> = words
            .iter()
            .filter(|w| w.word.eq_ignore_ascii_case("battery"))
            .collect();
        assert_eq!(battery.len(), 1);
        assert_eq!(battery[0].count, 2);

        let screen = words.iter().find(|w| w.word == "screen").unwrap();
        assert_eq!(screen.count, 2);
        assert!(words.iter().all(|w| w.word != "screens"));
    }

    #[test]
    fn test_possessive_stripped() {
        let words = WordCloud::default().weights("seller's seller reply").unwrap();
        let seller = words.iter().find(|w| w.word == "seller").unwrap();
        assert_eq!(seller.count, 2);
    }

    #[test]
    fn test_numbers_dropped() {
        let words = WordCloud::default().weights("2024 model 5 stars").unwrap();
        assert!(words.iter().all(|w| w.word != "2024" && w.word != "5"));
    }

    #[test]
    fn test_max_words_cap() {
        let text: String = (0..80).map(|i| format!("word{i} ")).collect();
        let words = WordCloud::default().weights(&text).unwrap();
        assert_eq!(words.len(), 50);
    }

    #[test]
    fn test_empty_text_errors() {
        let cloud = WordCloud::default();
        assert!(matches!(cloud.weights(""), Err(ReviewXaiError::EmptyCorpus)));
        assert!(matches!(
            cloud.weights("the and is of!!"),
            Err(ReviewXaiError::EmptyCorpus)
        ));
        assert!(matches!(cloud.layout("   "), Err(ReviewXaiError::EmptyCorpus)));
    }

    #[test]
    fn test_layout_stays_in_bounds_without_overlap() {
        let cloud = WordCloud::default().with_seed(7);
        let layout = cloud.layout(REVIEWS).unwrap();
        assert_eq!((layout.width, layout.height), (800, 400));
        assert!(!layout.words.is_empty());
        for word in &layout.words {
            assert!(word.x + word.width <= layout.width);
            assert!(word.y + word.height <= layout.height);
            assert!(word.font_size >= MIN_FONT_SIZE);
        }
        for (i, a) in layout.words.iter().enumerate() {
            for b in &layout.words[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_layout_largest_word_first() {
        let layout = WordCloud::default().with_seed(1).layout(REVIEWS).unwrap();
        let first = &layout.words[0];
        assert_eq!(first.word, "great");
        assert!(layout.words.iter().all(|w| w.font_size <= first.font_size));
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let a = WordCloud::default().with_seed(99).layout(REVIEWS).unwrap();
        let b = WordCloud::default().with_seed(99).layout(REVIEWS).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weights_are_independent_of_seed() {
        let a = WordCloud::default().with_seed(1).weights(REVIEWS).unwrap();
        let b = WordCloud::default().with_seed(2).weights(REVIEWS).unwrap();
        assert_eq!(a, b);
    }

    fn collocation_text() -> String {
        (0..10)
            .map(|i| format!("Battery life word{i}a word{i}b. "))
            .collect()
    }

    #[test]
    fn test_repeated_pair_becomes_one_term() {
        let words = WordCloud::default().weights(&collocation_text()).unwrap();
        assert_eq!(words[0].word, "Battery life");
        assert_eq!(words[0].count, 10);
        // both words were consumed by the pair
        assert!(words
            .iter()
            .all(|w| !w.word.eq_ignore_ascii_case("battery") && !w.word.eq_ignore_ascii_case("life")));
        assert!(words.iter().any(|w| w.word == "word3a"));
    }

    #[test]
    fn test_collocations_can_be_disabled() {
        let config = WordCloudConfig {
            collocations: false,
            ..WordCloudConfig::default()
        };
        let words = WordCloud::new(Lexicons::shared(), &config)
            .weights(&collocation_text())
            .unwrap();
        assert!(words.iter().all(|w| !w.word.contains(' ')));
        let battery = words.iter().find(|w| w.word == "Battery").unwrap();
        assert_eq!(battery.count, 10);
    }

    #[test]
    fn test_chance_pairs_stay_separate() {
        let words = WordCloud::default().weights(REVIEWS).unwrap();
        assert!(words.iter().all(|w| !w.word.contains(' ')));
    }

    #[test]
    fn test_collocation_score() {
        // 10 joint sightings out of 10 each in 40 tokens
        let score = collocation_score(10, 10, 10, 40);
        assert!((score - 44.99).abs() < 0.01, "{score}");
        assert!(collocation_score(1, 1, 1, 40) < COLLOCATION_THRESHOLD);
        assert!(collocation_score(3, 3, 3, 3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wide_glyphs_get_wider_boxes() {
        let (wide, _) = text_box("mmmm", 20.0, false);
        let (narrow, _) = text_box("iiii", 20.0, false);
        // a sans-serif "m" advances close to a full em
        assert!(wide >= 80, "{wide}");
        assert!(narrow < wide);
        let (_, h) = text_box("g", 20.0, false);
        assert!(h > 20);
    }

    #[test]
    fn test_text_box_rotation_swaps_sides() {
        let (w, h) = text_box("battery", 20.0, false);
        assert_eq!(text_box("battery", 20.0, true), (h, w));
        assert!(w > h);
    }
}
