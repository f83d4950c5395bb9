//! Configuration primitives for the money map tooling.
//!
//! Stored in a machine-readable TOML file located at:
//!   $MONEY_MAP_HOME/config.toml when the variable is set
//!   $XDG_CONFIG_HOME/MoneyMap/config.toml on Linux
//!   %APPDATA%/MoneyMap/config.toml on Windows
//!   ~/Library/Application Support/MoneyMap/config.toml on macOS
//!
//! Every section falls back to the reference constants, so an empty or
//! partial file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding the YAML/JSON dataset. `MONEY_MAP_DATA_DIR` wins over this value.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Weights, caps and gates of the role family classifier.
    #[serde(default)]
    pub role_classifier: RoleClassifierSettings,
    /// Acceptance policy of the profile/subprofile tagger.
    #[serde(default)]
    pub profile_tagging: ProfileTaggingSettings,
    /// Variant generator knobs and coverage thresholds.
    #[serde(default)]
    pub generator: GeneratorSettings,
}

/// Scoring constants of the role family classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    #[serde(default = "default_strong_weight")]
    pub strong_weight: u32,
    #[serde(default = "default_weak_weight")]
    pub weak_weight: u32,
    /// Maximum number of weak phrases that may score for one role.
    #[serde(default = "default_weak_cap")]
    pub weak_cap: u32,
    /// Maximum number of neutral weak phrases that may score for one role.
    #[serde(default = "default_neutral_weak_cap")]
    pub neutral_weak_cap: u32,
    /// Score required when the candidate has at least one strong hit.
    #[serde(default = "default_min_strong_score")]
    pub min_strong_score: u32,
    /// Score required without any strong hit.
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    /// Minimum distance between the best and the runner-up score.
    #[serde(default = "default_min_margin")]
    pub min_margin: u32,
    /// Score at which both members of a confusable pair count as "heavy".
    #[serde(default = "default_confusable_min_score")]
    pub confusable_min_score: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            strong_weight: default_strong_weight(),
            weak_weight: default_weak_weight(),
            weak_cap: default_weak_cap(),
            neutral_weak_cap: default_neutral_weak_cap(),
            min_strong_score: default_min_strong_score(),
            min_score: default_min_score(),
            min_margin: default_min_margin(),
            confusable_min_score: default_confusable_min_score(),
        }
    }
}

const fn default_strong_weight() -> u32 {
    3
}

const fn default_weak_weight() -> u32 {
    1
}

const fn default_weak_cap() -> u32 {
    4
}

const fn default_neutral_weak_cap() -> u32 {
    2
}

const fn default_min_strong_score() -> u32 {
    3
}

const fn default_min_score() -> u32 {
    4
}

const fn default_min_margin() -> u32 {
    2
}

const fn default_confusable_min_score() -> u32 {
    3
}

/// Role classifier section: scoring rules plus an optional dictionary override.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoleClassifierSettings {
    #[serde(default)]
    pub rules: ScoringRules,
    /// YAML role dictionary replacing the built-in reference phrases.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
}

/// Profile tagging acceptance policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileTaggingSettings {
    /// Minimum best-match confidence before a profile is written to a record.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for ProfileTaggingSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

const fn default_confidence_threshold() -> f64 {
    0.45
}

/// Variant generator tuning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Packaging sets are added until an archetype has this many modifier sets.
    #[serde(default = "default_min_variants_per_archetype")]
    pub min_variants_per_archetype: usize,
    /// Hard cap on modifier sets per archetype.
    #[serde(default = "default_max_mod_sets")]
    pub max_mod_sets: usize,
    #[serde(default)]
    pub thresholds: CoverageThresholds,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_variants_per_archetype: default_min_variants_per_archetype(),
            max_mod_sets: default_max_mod_sets(),
            thresholds: CoverageThresholds::default(),
        }
    }
}

const fn default_min_variants_per_archetype() -> usize {
    4
}

const fn default_max_mod_sets() -> usize {
    6
}

/// Minimum bucket sizes checked by the coverage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageThresholds {
    #[serde(default = "default_mechanism_min")]
    pub mechanism: usize,
    #[serde(default = "default_bucket_min")]
    pub role_family: usize,
    #[serde(default = "default_bucket_min")]
    pub matrix_cell: usize,
    #[serde(default = "default_sell_tag_min")]
    pub sell_tag: usize,
    #[serde(default = "default_bucket_min")]
    pub to_whom_tag: usize,
    #[serde(default = "default_bucket_min")]
    pub value_tag: usize,
    #[serde(default = "default_total_min")]
    pub total: usize,
    /// How many colliding normalized titles the report lists.
    #[serde(default = "default_suspicious_titles_shown")]
    pub suspicious_titles_shown: usize,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            mechanism: default_mechanism_min(),
            role_family: default_bucket_min(),
            matrix_cell: default_bucket_min(),
            sell_tag: default_sell_tag_min(),
            to_whom_tag: default_bucket_min(),
            value_tag: default_bucket_min(),
            total: default_total_min(),
            suspicious_titles_shown: default_suspicious_titles_shown(),
        }
    }
}

const fn default_mechanism_min() -> usize {
    25
}

const fn default_bucket_min() -> usize {
    20
}

const fn default_sell_tag_min() -> usize {
    15
}

const fn default_total_min() -> usize {
    350
}

const fn default_suspicious_titles_shown() -> usize {
    20
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Returns the directory holding `config.toml`.
///
/// Order of precedence:
/// 1. `MONEY_MAP_HOME` environment variable.
/// 2. OS-specific config directory via `directories::BaseDirs`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("MONEY_MAP_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS config directory")?;
    Ok(base_dirs.config_dir().join("MoneyMap"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Resolves the dataset directory.
///
/// Order of precedence:
/// 1. `MONEY_MAP_DATA_DIR` environment variable.
/// 2. `data_dir` from the config file.
/// 3. `./data` relative to the working directory.
pub fn data_dir(config: &AppConfig) -> PathBuf {
    if let Ok(path) = env::var("MONEY_MAP_DATA_DIR") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("data"))
}
