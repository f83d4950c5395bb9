use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use super::error::DictionaryError;
use super::matcher::Phrase;
use super::normalize::{normalize_text, Normalizer};
use super::role_dictionary::{RoleDictionary, RolePhrases};
use crate::config::ScoringRules;
use crate::model::UNKNOWN_ROLE;

/// Result label of a classification: one declared role or the unknown sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleLabel {
    Role(String),
    Unknown,
}

impl RoleLabel {
    pub fn as_str(&self) -> &str {
        match self {
            RoleLabel::Role(id) => id,
            RoleLabel::Unknown => UNKNOWN_ROLE,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, RoleLabel::Unknown)
    }
}

impl fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RoleLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How much the classifier reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    #[default]
    Label,
    Debug,
}

/// Gate that turned the top candidate into an unknown result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    LowConfidence,
    NarrowMargin,
    ConfusablePair,
}

/// Full scoring breakdown of one classification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationDebug {
    pub normalized_text: String,
    /// Score per role, in declaration order.
    pub scores: IndexMap<String, u32>,
    pub strong_hits: IndexMap<String, Vec<String>>,
    /// Weak phrases that contributed to the score; capped matches are left out.
    pub weak_hits: IndexMap<String, Vec<String>>,
    /// Top-ranked role before any gate ran.
    pub candidate_role: RoleLabel,
    pub best_role: RoleLabel,
    pub best_score: u32,
    pub second_role: RoleLabel,
    pub second_score: u32,
    pub rejection: Option<Rejection>,
}

/// Label plus the optional breakdown requested with [`Detail::Debug`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleClassification {
    pub label: RoleLabel,
    pub debug: Option<ClassificationDebug>,
}

#[derive(Debug, Clone)]
struct WeakPhrase {
    phrase: Phrase,
    neutral: bool,
}

#[derive(Debug, Clone)]
struct RoleEntry {
    id: String,
    strong: Vec<Phrase>,
    weak: Vec<WeakPhrase>,
}

#[derive(Debug, Default)]
struct RoleTally<'a> {
    score: u32,
    weak_points: u32,
    neutral_points: u32,
    strong_hits: Vec<&'a str>,
    weak_hits: Vec<&'a str>,
}

/// Keyword-tier classifier assigning a text to one role family.
///
/// Immutable once built; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    roles: Vec<RoleEntry>,
    normalizer: Normalizer,
    rules: ScoringRules,
    confusable_pairs: Vec<(usize, usize)>,
}

impl RoleClassifier {
    pub fn builder() -> RoleClassifierBuilder {
        RoleClassifierBuilder::default()
    }

    /// Classifier over the built-in reference dictionary with default scoring.
    pub fn reference() -> Result<Self, DictionaryError> {
        Self::from_dictionary(&RoleDictionary::reference(), ScoringRules::default())
    }

    pub fn from_dictionary(
        dictionary: &RoleDictionary,
        rules: ScoringRules,
    ) -> Result<Self, DictionaryError> {
        let mut builder = Self::builder()
            .rules(rules)
            .neutral_weak(dictionary.neutral_weak.iter())
            .stopwords(dictionary.stopwords.iter());
        for role in &dictionary.roles {
            builder = builder.role(role.id.clone(), role.strong.iter(), role.weak.iter());
        }
        for [a, b] in &dictionary.confusable_pairs {
            builder = builder.confusable_pair(a.clone(), b.clone());
        }
        builder.build()
    }

    /// Role ids in declaration (tie-break) order.
    pub fn role_ids(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|role| role.id.as_str())
    }

    /// Best role for a title and optional summary, or [`RoleLabel::Unknown`].
    pub fn classify(&self, title: &str, summary: Option<&str>) -> RoleLabel {
        self.classify_with(title, summary, Detail::Label).label
    }

    pub fn classify_with(
        &self,
        title: &str,
        summary: Option<&str>,
        detail: Detail,
    ) -> RoleClassification {
        let combined = [title, summary.unwrap_or("")]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let normalized = self.normalizer.normalize(&combined);
        let tallies = self.score(&normalized);

        let mut ranking: Vec<usize> = (0..self.roles.len()).collect();
        ranking.sort_by(|&a, &b| tallies[b].score.cmp(&tallies[a].score));
        let best = ranking[0];
        let second = ranking.get(1).copied();
        let best_score = tallies[best].score;
        let second_score = second.map(|idx| tallies[idx].score).unwrap_or(0);

        let rules = &self.rules;
        let has_strong = !tallies[best].strong_hits.is_empty();
        let confident = (has_strong && best_score >= rules.min_strong_score)
            || best_score >= rules.min_score;
        let mut rejection = if !confident {
            Some(Rejection::LowConfidence)
        } else if best_score.saturating_sub(second_score) < rules.min_margin {
            Some(Rejection::NarrowMargin)
        } else {
            None
        };
        let confusable = self.confusable_pairs.iter().any(|&(a, b)| {
            tallies[a].score >= rules.confusable_min_score
                && tallies[b].score >= rules.confusable_min_score
        });
        if confusable {
            rejection = Some(Rejection::ConfusablePair);
        }

        let candidate = RoleLabel::Role(self.roles[best].id.clone());
        let label = match rejection {
            None => candidate.clone(),
            Some(_) => RoleLabel::Unknown,
        };

        let debug = match detail {
            Detail::Label => None,
            Detail::Debug => Some(ClassificationDebug {
                scores: self.collect(&tallies, |tally| tally.score),
                strong_hits: self.collect(&tallies, |tally| owned_hits(&tally.strong_hits)),
                weak_hits: self.collect(&tallies, |tally| owned_hits(&tally.weak_hits)),
                candidate_role: candidate,
                best_role: label.clone(),
                best_score,
                second_role: second
                    .map(|idx| RoleLabel::Role(self.roles[idx].id.clone()))
                    .unwrap_or(RoleLabel::Unknown),
                second_score,
                rejection,
                normalized_text: normalized,
            }),
        };
        RoleClassification { label, debug }
    }

    fn score<'a>(&'a self, normalized: &str) -> Vec<RoleTally<'a>> {
        let rules = &self.rules;
        self.roles
            .iter()
            .map(|role| {
                let mut tally = RoleTally::default();
                for phrase in &role.strong {
                    if phrase.matches(normalized) {
                        tally.score += rules.strong_weight;
                        tally.strong_hits.push(phrase.as_str());
                    }
                }
                for weak in &role.weak {
                    if !weak.phrase.matches(normalized) {
                        continue;
                    }
                    if weak.neutral && tally.neutral_points >= rules.neutral_weak_cap {
                        continue;
                    }
                    if tally.weak_points >= rules.weak_cap {
                        continue;
                    }
                    tally.weak_points += 1;
                    if weak.neutral {
                        tally.neutral_points += 1;
                    }
                    tally.score += rules.weak_weight;
                    tally.weak_hits.push(weak.phrase.as_str());
                }
                tally
            })
            .collect()
    }

    fn collect<T>(
        &self,
        tallies: &[RoleTally<'_>],
        f: impl Fn(&RoleTally<'_>) -> T,
    ) -> IndexMap<String, T> {
        self.roles
            .iter()
            .zip(tallies)
            .map(|(role, tally)| (role.id.clone(), f(tally)))
            .collect()
    }
}

fn owned_hits(hits: &[&str]) -> Vec<String> {
    hits.iter().map(|hit| hit.to_string()).collect()
}

/// Collects roles, phrase tiers and gates, then validates them into a [`RoleClassifier`].
#[derive(Debug, Clone, Default)]
pub struct RoleClassifierBuilder {
    roles: Vec<RolePhrases>,
    neutral_weak: Vec<String>,
    stopwords: Vec<String>,
    confusable_pairs: Vec<(String, String)>,
    rules: ScoringRules,
}

impl RoleClassifierBuilder {
    /// Declares a role. Declaration order is the tie-break order.
    pub fn role<I, J, S, T>(mut self, id: impl Into<String>, strong: I, weak: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        self.roles.push(RolePhrases {
            id: id.into(),
            strong: strong.into_iter().map(|p| p.as_ref().to_string()).collect(),
            weak: weak.into_iter().map(|p| p.as_ref().to_string()).collect(),
        });
        self
    }

    pub fn neutral_weak<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.neutral_weak
            .extend(phrases.into_iter().map(|p| p.as_ref().to_string()));
        self
    }

    pub fn stopwords<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(phrases.into_iter().map(|p| p.as_ref().to_string()));
        self
    }

    pub fn confusable_pair(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.confusable_pairs.push((a.into(), b.into()));
        self
    }

    pub fn rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn build(self) -> Result<RoleClassifier, DictionaryError> {
        if self.roles.is_empty() {
            return Err(DictionaryError::NoRoles);
        }
        let neutral: HashSet<String> = normalize_all(&self.neutral_weak).into_iter().collect();

        let mut seen = HashSet::new();
        let mut roles = Vec::with_capacity(self.roles.len());
        for role in &self.roles {
            if !seen.insert(role.id.as_str()) {
                return Err(DictionaryError::DuplicateRole(role.id.clone()));
            }
            if role.strong.iter().all(|p| p.is_empty()) && role.weak.iter().all(|p| p.is_empty()) {
                return Err(DictionaryError::EmptyRole(role.id.clone()));
            }
            let strong = normalize_all(&role.strong);
            let weak = normalize_all(&role.weak);
            let strong_set: HashSet<&str> = strong.iter().map(String::as_str).collect();
            if let Some(shared) = weak
                .iter()
                .find(|p| !p.is_empty() && strong_set.contains(p.as_str()))
            {
                return Err(DictionaryError::PhraseInBothTiers {
                    role: role.id.clone(),
                    phrase: shared.clone(),
                });
            }
            roles.push(RoleEntry {
                id: role.id.clone(),
                strong: strong.into_iter().map(compile).collect::<Result<_, _>>()?,
                weak: weak
                    .into_iter()
                    .map(|p| {
                        let neutral = neutral.contains(&p);
                        compile(p).map(|phrase| WeakPhrase { phrase, neutral })
                    })
                    .collect::<Result<_, _>>()?,
            });
        }

        let position = |id: &str| roles.iter().position(|role: &RoleEntry| role.id == id);
        let mut confusable_pairs = Vec::with_capacity(self.confusable_pairs.len());
        for (a, b) in &self.confusable_pairs {
            match (position(a.as_str()), position(b.as_str())) {
                (Some(ia), Some(ib)) => confusable_pairs.push((ia, ib)),
                _ => return Err(DictionaryError::UnknownConfusableRole(a.clone(), b.clone())),
            }
        }

        Ok(RoleClassifier {
            roles,
            normalizer: Normalizer::with_stopwords(&self.stopwords),
            rules: self.rules,
            confusable_pairs,
        })
    }
}

/// Normalises raw phrases, dropping empty raw entries only.
fn normalize_all(phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| normalize_text(p))
        .collect()
}

fn compile(phrase: String) -> Result<Phrase, DictionaryError> {
    Phrase::compile(phrase.clone())
        .map_err(|source| DictionaryError::InvalidPhrase { phrase, source })
}
