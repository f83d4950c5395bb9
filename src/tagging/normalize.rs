//! Canonical matching surface for free text.
//!
//! Normalisation lowercases, folds the German umlauts and sharp s into ASCII
//! digraphs, blanks out everything that is neither a word character nor
//! whitespace and collapses whitespace runs. Stopword stripping runs on top
//! of that and removes whole boilerplate words or phrases.

/// Fixed substitution table applied after lowercasing.
const DIACRITIC_FOLDS: [(char, &str); 4] = [('ä', "ae"), ('ö', "oe"), ('ü', "ue"), ('ß', "ss")];

/// Lowercases, folds diacritics, blanks punctuation and collapses whitespace.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match DIACRITIC_FOLDS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => folded.push_str(to),
            None if is_word_char(c) || c.is_whitespace() => folded.push(c),
            None => folded.push(' '),
        }
    }
    collapse_whitespace(&folded)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normaliser with an optional stopword list.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    stopwords: Vec<String>,
}

impl Normalizer {
    /// Stopwords are normalised the same way as the text; empty entries are dropped.
    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = stopwords
            .into_iter()
            .map(|phrase| normalize_text(phrase.as_ref()))
            .filter(|phrase| !phrase.is_empty())
            .collect();
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &[String] {
        &self.stopwords
    }

    /// Full pipeline: [`normalize_text`] followed by stopword stripping.
    pub fn normalize(&self, text: &str) -> String {
        let normalized = normalize_text(text);
        if self.stopwords.is_empty() {
            return normalized;
        }
        self.strip_stopwords(&normalized)
    }

    /// Removes every whole-word occurrence of each stopword from normalised text.
    ///
    /// Stopwords are applied one after another; within one stopword the
    /// replacement is left to right and non-overlapping, so two adjacent
    /// copies sharing a separator leave the second copy in place.
    pub fn strip_stopwords(&self, normalized: &str) -> String {
        let mut padded = format!(" {normalized} ");
        for phrase in &self.stopwords {
            padded = padded.replace(&format!(" {phrase} "), " ");
        }
        collapse_whitespace(&padded)
    }
}
