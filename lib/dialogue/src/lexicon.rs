//! Lexicon-based sentiment scoring.
//!
//! The score of a text is the mean weight of the lexicon words it contains.
//! There is no negation handling, no phrase matching and no punctuation
//! stripping: `"hopeless."` is not the word `"hopeless"`.

use std::collections::HashMap;

/// Built-in word weights.
const BUILTIN_WEIGHTS: [(&str, f64); 9] = [
    ("happy", 1.9),
    ("sad", -1.6),
    ("hopeless", -2.0),
    ("good", 1.5),
    ("bad", -1.3),
    ("help", 0.5),
    ("terrible", -2.1),
    ("great", 2.0),
    ("distress", -1.8),
];

/// An immutable word to valence table.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    weights: HashMap<String, f64>,
}

impl SentimentLexicon {
    /// Builds a lexicon from `(word, weight)` pairs.
    ///
    /// Words are lowercased. Zero weights carry no opinion and are dropped,
    /// so they never count towards the average.
    pub fn from_entries<I, W>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, f64)>,
        W: AsRef<str>,
    {
        let weights = entries
            .into_iter()
            .filter(|(_, weight)| *weight != 0.0)
            .map(|(word, weight)| (word.as_ref().to_lowercase(), weight))
            .collect();
        Self { weights }
    }

    /// Returns the weight of a single, already lowercased word.
    #[must_use]
    pub fn weight(&self, word: &str) -> Option<f64> {
        self.weights.get(word).copied()
    }

    /// Number of words in the lexicon.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the lexicon has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Scores `text` as the average weight of its lexicon words.
    ///
    /// Returns exactly `0.0` when no token matches, including for empty input.
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let (sum, matches) = lowered
            .split_whitespace()
            .filter_map(|token| self.weight(token))
            .fold((0.0, 0u32), |(sum, n), weight| (sum + weight, n + 1));

        if matches == 0 {
            0.0
        } else {
            sum / f64::from(matches)
        }
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::from_entries(BUILTIN_WEIGHTS)
    }
}
