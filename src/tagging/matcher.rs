use regex::Regex;

/// A normalised phrase compiled for repeated matching against normalised text.
///
/// Single words match on word boundaries, so `lead` does not fire inside
/// `leader`. Phrases containing a space match as plain substrings.
#[derive(Debug, Clone)]
pub struct Phrase {
    text: String,
    pattern: PhrasePattern,
}

#[derive(Debug, Clone)]
enum PhrasePattern {
    Never,
    Word(Regex),
    Substring,
}

impl Phrase {
    /// Compiles an already normalised phrase.
    pub fn compile(normalized: impl Into<String>) -> Result<Self, regex::Error> {
        let text = normalized.into();
        let pattern = if text.is_empty() {
            PhrasePattern::Never
        } else if text.contains(' ') {
            PhrasePattern::Substring
        } else {
            PhrasePattern::Word(Regex::new(&format!(r"\b{}\b", regex::escape(&text)))?)
        };
        Ok(Self { text, pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_multi_word(&self) -> bool {
        matches!(self.pattern, PhrasePattern::Substring)
    }

    /// True when the phrase occurs in `text`, which must already be normalised.
    pub fn matches(&self, text: &str) -> bool {
        match &self.pattern {
            PhrasePattern::Never => false,
            PhrasePattern::Word(re) => re.is_match(text),
            PhrasePattern::Substring => text.contains(self.text.as_str()),
        }
    }
}

/// Keyword hit used by the multi-label tagger.
///
/// Multi-word keywords match as substrings of the text; single-word keywords
/// match when any word of the text starts with them (`consult` hits
/// `consulting`). Both sides must already be normalised.
pub fn keyword_hit(text: &str, words: &[&str], keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    if keyword.contains(' ') {
        return text.contains(keyword);
    }
    words.iter().any(|word| word.starts_with(keyword))
}
