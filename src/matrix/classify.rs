//! Scores taxonomy items and matrix cells from sell/to_whom/value tags.
//!
//! Tags either come in directly or are pulled out of free text with the
//! substring keywords of `keywords.yaml`.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::model::{KeywordMap, MatrixData, TagKeywords};

pub const DEFAULT_TOP_N: usize = 5;

const SELL_WEIGHT: f64 = 1.5;
const TO_WHOM_WEIGHT: f64 = 1.0;
const VALUE_WEIGHT: f64 = 1.5;
const HINT_BONUS: f64 = 2.0;
const SELL_CELL_WEIGHT: f64 = 1.2;
const VALUE_CELL_WEIGHT: f64 = 1.1;
const TAXONOMY_CELL_WEIGHT: f64 = 0.3;

/// Tags per classifier, sorted and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSet {
    pub sell: Vec<String>,
    pub to_whom: Vec<String>,
    pub value: Vec<String>,
}

impl TagSet {
    pub fn new<S: AsRef<str>>(sell: &[S], to_whom: &[S], value: &[S]) -> Self {
        Self {
            sell: sorted_unique(sell),
            to_whom: sorted_unique(to_whom),
            value: sorted_unique(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sell.is_empty() && self.to_whom.is_empty() && self.value.is_empty()
    }

    fn groups(&self) -> [(&'static str, &[String]); 3] {
        [
            ("sell", &self.sell),
            ("to_whom", &self.to_whom),
            ("value", &self.value),
        ]
    }

    /// One `group: a, b` line per non-empty group.
    pub fn explanation(&self) -> Vec<String> {
        self.groups()
            .into_iter()
            .filter(|(_, tags)| !tags.is_empty())
            .map(|(name, tags)| format!("{}: {}", name, tags.join(", ")))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixClassification {
    pub tags: TagSet,
    /// `(taxonomy id, score)`, best first, scores rounded to two decimals.
    pub taxonomy_scores: Vec<(String, f64)>,
    /// `(cell id, score)`, best first, scores rounded to two decimals.
    pub cell_scores: Vec<(String, f64)>,
    pub explanation: Vec<String>,
    pub confidence: f64,
}

/// Classifies explicit tags. At most `top_n` taxonomy items and cells are returned.
pub fn classify_by_tags<S: AsRef<str>>(
    matrix: &MatrixData,
    sell: &[S],
    to_whom: &[S],
    value: &[S],
    top_n: usize,
) -> MatrixClassification {
    classify(matrix, TagSet::new(sell, to_whom, value), None, top_n)
}

/// Extracts tags from `text` and classifies them; taxonomy hints found in the
/// text add a bonus to their taxonomy item.
pub fn classify_by_text(matrix: &MatrixData, text: &str, top_n: usize) -> MatrixClassification {
    let lowered = text.to_lowercase();
    let tags = extract_tags(&matrix.keywords.tags, &lowered);
    classify(matrix, tags, Some(&lowered), top_n)
}

fn classify(
    matrix: &MatrixData,
    tags: TagSet,
    text: Option<&str>,
    top_n: usize,
) -> MatrixClassification {
    let mut taxonomy_scores = score_taxonomy(matrix, &tags, text);
    let mut cell_scores = score_cells(matrix, &tags);
    let confidence = confidence(&taxonomy_scores);
    taxonomy_scores.truncate(top_n);
    cell_scores.truncate(top_n);
    debug!(
        taxonomy = taxonomy_scores.len(),
        cells = cell_scores.len(),
        confidence,
        "classified against the matrix"
    );
    MatrixClassification {
        explanation: tags.explanation(),
        tags,
        taxonomy_scores,
        cell_scores,
        confidence,
    }
}

fn sorted_unique<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `text` must already be lowercase.
fn extract_tags(keywords: &TagKeywords, text: &str) -> TagSet {
    let matching = |group: &KeywordMap| -> Vec<String> {
        group
            .iter()
            .filter(|(_, words)| words.iter().any(|word| text.contains(&word.to_lowercase())))
            .map(|(tag, _)| tag.clone())
            .collect()
    };
    TagSet::new(
        &matching(&keywords.sell),
        &matching(&keywords.to_whom),
        &matching(&keywords.value),
    )
}

fn overlap(tags: &[String], item: &[String]) -> usize {
    tags.iter().filter(|tag| item.contains(tag)).count()
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

fn rank(scores: &mut [(String, f64)]) {
    scores.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

fn score_taxonomy(matrix: &MatrixData, tags: &TagSet, text: Option<&str>) -> Vec<(String, f64)> {
    let text = text.filter(|text| !text.is_empty());
    let mut scores = Vec::new();
    for item in &matrix.taxonomy {
        let mut score = overlap(&tags.sell, &item.sell) as f64 * SELL_WEIGHT
            + overlap(&tags.to_whom, &item.to_whom) as f64 * TO_WHOM_WEIGHT
            + overlap(&tags.value, &item.value) as f64 * VALUE_WEIGHT;
        if let Some(text) = text {
            let hinted = matrix
                .keywords
                .taxonomy_hints
                .get(&item.id)
                .is_some_and(|hints| hints.iter().any(|hint| text.contains(&hint.to_lowercase())));
            if hinted {
                score += HINT_BONUS;
            }
        }
        if score > 0.0 {
            scores.push((item.id.clone(), round2(score)));
        }
    }
    rank(&mut scores);
    scores
}

fn score_cells(matrix: &MatrixData, tags: &TagSet) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    let mappings = &matrix.mappings;
    for tag in &tags.sell {
        if let Some(item) = mappings.sell_items.get(tag) {
            for cell in item.cells() {
                *totals.entry(cell).or_default() += SELL_CELL_WEIGHT;
            }
        }
    }
    for tag in &tags.value {
        if let Some(item) = mappings.value_measures.get(tag) {
            for cell in item.cells() {
                *totals.entry(cell).or_default() += VALUE_CELL_WEIGHT;
            }
        }
    }
    for item in &matrix.taxonomy {
        if overlap(&tags.sell, &item.sell) > 0 || overlap(&tags.value, &item.value) > 0 {
            for cell in &item.typical_cells {
                *totals.entry(cell).or_default() += TAXONOMY_CELL_WEIGHT;
            }
        }
    }

    let mut scores: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(cell, score)| (cell.to_string(), score))
        .collect();
    rank(&mut scores);
    for (_, score) in &mut scores {
        *score = round2(*score);
    }
    scores
}

fn confidence(taxonomy_scores: &[(String, f64)]) -> f64 {
    match taxonomy_scores.first() {
        None => 0.1,
        Some((_, top)) if *top >= 5.0 => 0.9,
        Some((_, top)) if *top >= 3.0 => 0.7,
        Some((_, top)) if *top >= 1.0 => 0.5,
        Some(_) => 0.3,
    }
}
