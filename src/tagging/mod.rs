pub mod autotag;
pub mod error;
pub mod keyword_tagger;
pub mod matcher;
pub mod normalize;
pub mod role_classifier;
pub mod role_dictionary;

pub use autotag::{
    backfill_role_families, BackfillOptions, ProfileTagging, ProfileTaggingSummary,
    RoleBackfillReport, RoleDecision,
};
pub use error::DictionaryError;
pub use keyword_tagger::{BestMatch, KeywordTagger, ProfileTag, TaggedText};
pub use matcher::{keyword_hit, Phrase};
pub use normalize::{normalize_text, Normalizer};
pub use role_classifier::{
    ClassificationDebug, Detail, Rejection, RoleClassification, RoleClassifier,
    RoleClassifierBuilder, RoleLabel,
};
pub use role_dictionary::{RoleDictionary, RolePhrases};

use anyhow::Result;

use crate::config::RoleClassifierSettings;

/// Builds the role classifier described by the configuration section.
///
/// Uses the YAML dictionary when one is configured, the built-in one otherwise.
pub fn role_classifier_from_settings(settings: &RoleClassifierSettings) -> Result<RoleClassifier> {
    let dictionary = match &settings.dictionary {
        Some(path) => RoleDictionary::from_yaml_file(path)?,
        None => RoleDictionary::reference(),
    };
    Ok(RoleClassifier::from_dictionary(&dictionary, settings.rules)?)
}
