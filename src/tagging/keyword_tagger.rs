use indexmap::IndexMap;
use serde::Serialize;

use super::matcher::keyword_hit;
use super::normalize::{normalize_text, Normalizer};
use crate::model::KeywordMap;

/// Best label of a keyword map and its smoothed confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMatch {
    pub label: Option<String>,
    pub confidence: f64,
    pub hits: usize,
}

impl BestMatch {
    fn none() -> Self {
        Self {
            label: None,
            confidence: 0.0,
            hits: 0,
        }
    }
}

/// Profile and subprofile proposed for one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileTag {
    pub profile_id: Option<String>,
    pub subprofile_id: Option<String>,
    pub confidence: f64,
}

/// Text prepared once and matched against any number of keyword maps.
#[derive(Debug, Clone)]
pub struct TaggedText {
    normalized: String,
}

impl TaggedText {
    pub fn new(normalizer: &Normalizer, text: &str) -> Self {
        Self {
            normalized: normalizer.normalize(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Number of distinct keywords of one label that hit the text.
    pub fn keyword_hits<S: AsRef<str>>(&self, keywords: &[S]) -> usize {
        let words: Vec<&str> = self.normalized.split(' ').collect();
        keywords
            .iter()
            .map(|keyword| normalize_text(keyword.as_ref()))
            .filter(|keyword| keyword_hit(&self.normalized, &words, keyword))
            .count()
    }

    /// Hit count per label, in map order.
    pub fn scores(&self, keywords: &KeywordMap) -> IndexMap<String, usize> {
        keywords
            .iter()
            .map(|(label, words)| (label.clone(), self.keyword_hits(words)))
            .collect()
    }

    /// Label with the most hits. Confidence is `best / (best + second + 1)`.
    pub fn best_match(&self, keywords: &KeywordMap) -> BestMatch {
        best_of(&self.scores(keywords))
    }

    /// Every label with at least one hit; non-exclusive, in map order.
    pub fn layers(&self, keywords: &KeywordMap) -> Vec<String> {
        keywords
            .iter()
            .filter(|(_, words)| self.keyword_hits(words) > 0)
            .map(|(label, _)| label.clone())
            .collect()
    }
}

fn best_of(scores: &IndexMap<String, usize>) -> BestMatch {
    let mut ranked: Vec<(&String, usize)> = scores.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let Some(&(label, best)) = ranked.first() else {
        return BestMatch::none();
    };
    if best == 0 {
        return BestMatch::none();
    }
    let second = ranked.get(1).map(|(_, score)| *score).unwrap_or(0);
    BestMatch {
        label: Some(label.clone()),
        confidence: best as f64 / (best + second + 1) as f64,
        hits: best,
    }
}

/// Multi-label keyword tagger for profiles, subprofiles and layer values.
#[derive(Debug, Clone, Default)]
pub struct KeywordTagger {
    normalizer: Normalizer,
}

impl KeywordTagger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare(&self, text: &str) -> TaggedText {
        TaggedText::new(&self.normalizer, text)
    }

    pub fn best_match(&self, text: &str, keywords: &KeywordMap) -> BestMatch {
        self.prepare(text).best_match(keywords)
    }

    pub fn layers(&self, text: &str, keywords: &KeywordMap) -> Vec<String> {
        self.prepare(text).layers(keywords)
    }

    /// Picks a profile, then the best subprofile among that profile's children.
    ///
    /// `subprofile_parent` maps a subprofile id to its parent profile id;
    /// subprofiles without a parent entry are never considered.
    pub fn tag_profile(
        &self,
        text: &str,
        profile_keywords: &KeywordMap,
        subprofile_keywords: &KeywordMap,
        subprofile_parent: &IndexMap<String, String>,
    ) -> ProfileTag {
        let prepared = self.prepare(text);
        let profile = prepared.best_match(profile_keywords);
        let Some(profile_id) = profile.label else {
            return ProfileTag {
                profile_id: None,
                subprofile_id: None,
                confidence: 0.0,
            };
        };
        let children: KeywordMap = subprofile_keywords
            .iter()
            .filter(|(sub_id, _)| subprofile_parent.get(*sub_id) == Some(&profile_id))
            .map(|(sub_id, words)| (sub_id.clone(), words.clone()))
            .collect();
        let subprofile = prepared.best_match(&children);
        ProfileTag {
            profile_id: Some(profile_id),
            subprofile_id: subprofile.label,
            confidence: profile.confidence,
        }
    }
}
