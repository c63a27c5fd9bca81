//! Word frequency counting

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Words ignored when counting, stored lowercase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    /// Build the set, lowercasing every entry
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()).collect())
    }

    /// Whether `word` (already lowercase) is ignored
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    /// Number of stop words
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Strip ASCII punctuation and lowercase
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect::<String>().to_lowercase()
}

/// Whitespace tokens that are longer than one character, purely alphabetic
/// and not stop words, lowercased
#[must_use]
pub fn filter_words(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| {
            word.chars().count() > 1
                && word.chars().all(char::is_alphabetic)
                && !stop_words.contains(word)
        })
        .collect()
}

/// Occurrences of each word
#[must_use]
pub fn count_word_frequencies<S: AsRef<str>>(words: &[S]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

/// A word and how often it appears
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// The word
    pub word: String,
    /// Occurrences
    pub count: usize,
}

/// The `n` most frequent words, ties in alphabetical order
#[must_use]
pub fn most_common(counts: &HashMap<String, usize>, n: usize) -> Vec<WordCount> {
    let mut ranked: Vec<WordCount> = counts
        .iter()
        .map(|(word, count)| WordCount {
            word: word.clone(),
            count: *count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(n);
    ranked
}

/// Full pipeline over raw text
#[must_use]
pub fn top_words(text: &str, stop_words: &StopWords, n: usize) -> Vec<WordCount> {
    let words = filter_words(&clean_text(text), stop_words);
    log::debug!("{} words left after filtering", words.len());
    most_common(&count_word_frequencies(&words), n)
}
