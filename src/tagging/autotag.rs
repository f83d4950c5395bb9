//! Write-back policies on top of the classifiers.
//!
//! Both policies only fill fields that are unset, so operator-entered labels
//! survive any number of reloads.

use indexmap::IndexMap;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, warn};

use super::keyword_tagger::KeywordTagger;
use super::role_classifier::{ClassificationDebug, Detail, RoleClassifier, RoleLabel};
use crate::config::ProfileTaggingSettings;
use crate::model::{
    ActivityProfileDefinition, ActivitySubprofileDefinition, AutoTaggingKeywords,
    KeywordMap, RoleTagged, Variant, UNKNOWN_ROLE,
};

/// Examples kept per role in a backfill report.
pub const EXAMPLES_PER_ROLE: usize = 10;
/// Unknown records listed by the report's `Display` output.
pub const UNKNOWNS_SHOWN: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillOptions {
    /// Reclassify records that already carry a role.
    pub force: bool,
    /// Keep the scoring breakdown of every classified record.
    pub debug: bool,
}

/// One record that went through the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDecision {
    pub id: String,
    pub title: String,
    pub label: RoleLabel,
    pub debug: Option<ClassificationDebug>,
}

impl RoleDecision {
    /// Single-record explanation: score, runner-up and the hits of the chosen role.
    pub fn explain(&self) -> Option<String> {
        let debug = self.debug.as_ref()?;
        let role = self.label.as_str();
        Some(format!(
            "{}: {} -> {} (score {}, second {}:{})\n  strong: {:?}\n  weak: {:?}",
            self.id,
            self.title,
            role,
            debug.best_score,
            debug.second_role,
            debug.second_score,
            debug.strong_hits.get(role),
            debug.weak_hits.get(role),
        ))
    }
}

/// Outcome of a role family backfill pass.
#[derive(Debug, Clone, Default)]
pub struct RoleBackfillReport {
    /// Records per role: declared roles first, then `UNKNOWN`, then any foreign labels.
    pub counts: IndexMap<String, usize>,
    /// Leading entries of `counts` printed in the distribution; foreign labels are left out.
    listed_roles: usize,
    /// Up to [`EXAMPLES_PER_ROLE`] `(id, title)` pairs per declared role.
    pub examples: IndexMap<String, Vec<(String, String)>>,
    /// Classified records that ended up unknown, in input order.
    pub unknowns: Vec<(String, String)>,
    pub decisions: Vec<RoleDecision>,
    /// True when at least one record was written.
    pub updated: bool,
}

impl RoleBackfillReport {
    fn new(classifier: &RoleClassifier) -> Self {
        let mut counts: IndexMap<String, usize> = classifier
            .role_ids()
            .map(|id| (id.to_string(), 0))
            .collect();
        counts.insert(UNKNOWN_ROLE.to_string(), 0);
        let listed_roles = counts.len();
        let examples = classifier
            .role_ids()
            .map(|id| (id.to_string(), Vec::new()))
            .collect();
        Self {
            counts,
            listed_roles,
            examples,
            ..Self::default()
        }
    }

    fn record(&mut self, role: &str, id: &str, title: &str) {
        *self.counts.entry(role.to_string()).or_insert(0) += 1;
        if let Some(examples) = self.examples.get_mut(role) {
            if examples.len() < EXAMPLES_PER_ROLE {
                examples.push((id.to_string(), title.to_string()));
            }
        }
    }

    pub fn count(&self, role: &str) -> usize {
        self.counts.get(role).copied().unwrap_or(0)
    }
}

impl fmt::Display for RoleBackfillReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Role distribution:")?;
        for (role, count) in self.counts.iter().take(self.listed_roles) {
            writeln!(f, "- {role}: {count}")?;
        }

        writeln!(f, "\nUnknown (top {UNKNOWNS_SHOWN}):")?;
        for (id, title) in self.unknowns.iter().take(UNKNOWNS_SHOWN) {
            writeln!(f, "- {id}: {title}")?;
        }

        writeln!(f, "\nExamples per role:")?;
        for (role, examples) in &self.examples {
            writeln!(f, "\n{role}:")?;
            for (id, title) in examples {
                writeln!(f, "- {title} ({id})")?;
            }
        }
        Ok(())
    }
}

/// Fills the role family of every record that has none.
///
/// Pending records are classified in parallel; labels are written back and
/// counted in input order, so the report is identical from run to run.
pub fn backfill_role_families<T>(
    records: &mut [T],
    classifier: &RoleClassifier,
    options: BackfillOptions,
) -> RoleBackfillReport
where
    T: RoleTagged + Sync,
{
    let mut report = RoleBackfillReport::new(classifier);
    let detail = if options.debug {
        Detail::Debug
    } else {
        Detail::Label
    };

    let pending: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| options.force || !record.has_role_family())
        .map(|(idx, _)| idx)
        .collect();
    let shared: &[T] = records;
    let classified: Vec<_> = pending
        .par_iter()
        .map(|&idx| {
            let record = &shared[idx];
            classifier.classify_with(record.title(), record.summary(), detail)
        })
        .collect();
    let mut results = pending.into_iter().zip(classified).peekable();

    for (idx, record) in records.iter_mut().enumerate() {
        let Some((_, result)) = results.next_if(|(pending_idx, _)| *pending_idx == idx) else {
            let role = record.role_family().to_string();
            report.record(&role, record.record_id(), record.title());
            continue;
        };

        let label = result.label;
        debug!(
            id = record.record_id(),
            role = label.as_str(),
            previous = record.role_family(),
            "classified role family"
        );
        record.set_role_family(label.as_str());
        report.updated = true;
        report.record(label.as_str(), record.record_id(), record.title());
        if label.is_unknown() {
            report
                .unknowns
                .push((record.record_id().to_string(), record.title().to_string()));
        }
        report.decisions.push(RoleDecision {
            id: record.record_id().to_string(),
            title: record.title().to_string(),
            label,
            debug: result.debug,
        });
    }
    report
}

/// Profile, subprofile and layer backfill for loaded variants.
#[derive(Debug, Clone)]
pub struct ProfileTagging {
    tagger: KeywordTagger,
    profile_keywords: KeywordMap,
    subprofile_keywords: KeywordMap,
    subprofile_parent: IndexMap<String, String>,
    work_format_keywords: KeywordMap,
    entry_level_keywords: KeywordMap,
    confidence_threshold: f64,
}

/// Counters of one [`ProfileTagging::apply_all`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileTaggingSummary {
    pub profiles: usize,
    pub subprofiles: usize,
    pub rejected: usize,
    pub work_formats: usize,
    pub entry_levels: usize,
}

impl ProfileTagging {
    /// Merges definition tags with the auto-tagging tables; definition tags come first.
    pub fn new(
        profiles: &[ActivityProfileDefinition],
        subprofiles: &[ActivitySubprofileDefinition],
        keywords: &AutoTaggingKeywords,
        settings: &ProfileTaggingSettings,
    ) -> Self {
        let profile_keywords = merge_keywords(
            profiles.iter().map(|p| (p.id.as_str(), p.tags.as_slice())),
            &keywords.profile_keywords,
        );
        let subprofile_keywords = merge_keywords(
            subprofiles.iter().map(|s| (s.id.as_str(), s.tags.as_slice())),
            &keywords.subprofile_keywords,
        );
        let subprofile_parent = subprofiles
            .iter()
            .map(|s| (s.id.clone(), s.parent_profile_id.clone()))
            .collect();
        Self {
            tagger: KeywordTagger::new(),
            profile_keywords,
            subprofile_keywords,
            subprofile_parent,
            work_format_keywords: keywords.work_format_keywords.clone(),
            entry_level_keywords: keywords.entry_level_keywords.clone(),
            confidence_threshold: settings.confidence_threshold,
        }
    }

    pub fn profile_keywords(&self) -> &KeywordMap {
        &self.profile_keywords
    }

    pub fn apply_all(&self, variants: &mut [Variant]) -> ProfileTaggingSummary {
        let mut summary = ProfileTaggingSummary::default();
        for variant in variants.iter_mut() {
            self.apply(variant, &mut summary);
        }
        summary
    }

    fn apply(&self, variant: &mut Variant, summary: &mut ProfileTaggingSummary) {
        let text = variant.tagging_text();

        if variant.profile_id.as_deref().map_or(true, str::is_empty) {
            let tag = self.tagger.tag_profile(
                &text,
                &self.profile_keywords,
                &self.subprofile_keywords,
                &self.subprofile_parent,
            );
            match tag.profile_id {
                Some(profile_id) if tag.confidence >= self.confidence_threshold => {
                    variant.profile_id = Some(profile_id);
                    summary.profiles += 1;
                    if let Some(subprofile_id) = tag.subprofile_id {
                        variant.subprofile_id = Some(subprofile_id);
                        summary.subprofiles += 1;
                    }
                }
                Some(profile_id) => {
                    warn!(
                        id = %variant.id,
                        profile = %profile_id,
                        confidence = tag.confidence,
                        threshold = self.confidence_threshold,
                        "profile match below confidence threshold"
                    );
                    summary.rejected += 1;
                }
                None => {}
            }
        }

        if variant.work_format_ids.is_empty() {
            variant.work_format_ids = self.tagger.layers(&text, &self.work_format_keywords);
            if !variant.work_format_ids.is_empty() {
                summary.work_formats += 1;
            }
        }
        if variant.entry_level_ids.is_empty() {
            variant.entry_level_ids = self.tagger.layers(&text, &self.entry_level_keywords);
            if !variant.entry_level_ids.is_empty() {
                summary.entry_levels += 1;
            }
        }
    }
}

fn merge_keywords<'a>(
    definitions: impl Iterator<Item = (&'a str, &'a [String])>,
    extra: &KeywordMap,
) -> KeywordMap {
    let mut merged = KeywordMap::new();
    for (id, tags) in definitions {
        if !tags.is_empty() {
            merged.entry(id.to_string()).or_default().extend(tags.iter().cloned());
        }
    }
    for (id, words) in extra {
        merged
            .entry(id.clone())
            .or_default()
            .extend(words.iter().cloned());
    }
    merged
}
