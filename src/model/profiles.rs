use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered label -> keyword list map, as written in the YAML tables.
pub type KeywordMap = IndexMap<String, Vec<String>>;

/// Top-level activity profile (`activity_profiles.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfileDefinition {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Keywords that double as auto-tagging hints.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Refinement of a profile (`activity_subprofiles.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySubprofileDefinition {
    pub id: String,
    pub parent_profile_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Work format layer value (`work_formats.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkFormatDefinition {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry level layer value (`entry_levels.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLevelDefinition {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keyword tables driving the multi-label tagger (`auto_tagging.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoTaggingKeywords {
    #[serde(default)]
    pub profile_keywords: KeywordMap,
    #[serde(default)]
    pub subprofile_keywords: KeywordMap,
    #[serde(default)]
    pub work_format_keywords: KeywordMap,
    #[serde(default)]
    pub entry_level_keywords: KeywordMap,
}
