use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{first_existing, read_document, read_optional_yaml};
use crate::config::AppConfig;
use crate::model::{
    ActivityProfileDefinition, ActivitySubprofileDefinition, AutoTaggingKeywords,
    EntryLevelDefinition, RawVariant, Variant, VariantsFile, WorkFormatDefinition,
};
use crate::tagging::{
    backfill_role_families, role_classifier_from_settings, BackfillOptions, ProfileTagging,
};

const VARIANTS_DIR: &str = "variants";
const FALLBACK_VARIANTS_FILE: &str = "variants.yaml";
const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

#[derive(Debug, Default, Deserialize)]
struct ActivityProfilesFile {
    #[serde(default)]
    activity_profiles: Vec<ActivityProfileDefinition>,
}

#[derive(Debug, Default, Deserialize)]
struct ActivitySubprofilesFile {
    #[serde(default)]
    activity_subprofiles: Vec<ActivitySubprofileDefinition>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkFormatsFile {
    #[serde(default)]
    work_formats: Vec<WorkFormatDefinition>,
}

#[derive(Debug, Default, Deserialize)]
struct EntryLevelsFile {
    #[serde(default)]
    entry_levels: Vec<EntryLevelDefinition>,
}

#[derive(Debug, Default, Deserialize)]
struct AutoTaggingFile {
    #[serde(default)]
    auto_tagging: AutoTaggingKeywords,
}

/// Fully tagged variants plus the definition tables they refer to.
#[derive(Debug, Clone, Default)]
pub struct VariantCatalog {
    /// Ordered by id.
    pub variants: Vec<Variant>,
    pub activity_profiles: Vec<ActivityProfileDefinition>,
    pub activity_subprofiles: Vec<ActivitySubprofileDefinition>,
    pub work_formats: Vec<WorkFormatDefinition>,
    pub entry_levels: Vec<EntryLevelDefinition>,
    pub auto_tagging: AutoTaggingKeywords,
    by_id: HashMap<String, usize>,
    by_way: IndexMap<String, Vec<usize>>,
    by_cell: IndexMap<String, Vec<usize>>,
}

impl VariantCatalog {
    fn index(&mut self) {
        self.by_id.clear();
        self.by_way.clear();
        self.by_cell.clear();
        for (idx, variant) in self.variants.iter().enumerate() {
            self.by_id.insert(variant.id.clone(), idx);
            self.by_way
                .entry(variant.primary_way_id.clone())
                .or_default()
                .push(idx);
            for cell in &variant.matrix_cells {
                self.by_cell.entry(cell.clone()).or_default().push(idx);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Variant> {
        self.by_id.get(id).map(|&idx| &self.variants[idx])
    }

    /// Variants whose primary way (mechanism) is `way_id`, in id order.
    pub fn by_way(&self, way_id: &str) -> Vec<&Variant> {
        self.lookup(&self.by_way, way_id)
    }

    /// Variants placed in matrix cell `cell_id`, in id order.
    pub fn by_cell(&self, cell_id: &str) -> Vec<&Variant> {
        self.lookup(&self.by_cell, cell_id)
    }

    fn lookup(&self, index: &IndexMap<String, Vec<usize>>, key: &str) -> Vec<&Variant> {
        index
            .get(key)
            .map(|ids| ids.iter().map(|&idx| &self.variants[idx]).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

fn candidates(dir: &Path, stem: &str) -> Vec<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .collect()
}

fn record_id(record: &RawVariant, path: &Path) -> Result<String> {
    match record.0.get("id").and_then(Value::as_str) {
        Some(id) => Ok(id.to_string()),
        None => bail!("Variant without a string id in {:?}", path),
    }
}

/// Reads the base variants table and layers the manual overrides on top.
///
/// Returns the raw records keyed (and therefore ordered) by id.
pub fn load_raw_variants(data_dir: &Path) -> Result<BTreeMap<String, Map<String, Value>>> {
    let variants_dir = data_dir.join(VARIANTS_DIR);
    let base_path = match first_existing(&candidates(&variants_dir, "variants.generated")) {
        Some(path) => path,
        None => {
            let fallback = data_dir.join(FALLBACK_VARIANTS_FILE);
            if !fallback.exists() {
                bail!("Data file not found: {:?}", fallback);
            }
            fallback
        }
    };

    let base: VariantsFile<RawVariant> = read_document(&base_path)?;
    let mut records = BTreeMap::new();
    for record in base.variants {
        records.insert(record_id(&record, &base_path)?, record.0);
    }
    info!(path = ?base_path, count = records.len(), "loaded base variants");

    if let Some(manual_path) = first_existing(&candidates(&variants_dir, "variants.manual")) {
        let manual: VariantsFile<RawVariant> = read_document(&manual_path)?;
        let count = manual.variants.len();
        for record in manual.variants {
            let id = record_id(&record, &manual_path)?;
            match records.get_mut(&id) {
                Some(base) => base.extend(record.0),
                None => {
                    records.insert(id, record.0);
                }
            }
        }
        info!(path = ?manual_path, count, "applied manual variant overrides");
    }
    Ok(records)
}

/// Loads the variant catalog from `data_dir` and backfills unset labels.
pub fn load_catalog(data_dir: &Path, config: &AppConfig) -> Result<VariantCatalog> {
    let raw = load_raw_variants(data_dir)?;
    let mut variants = Vec::with_capacity(raw.len());
    for (id, record) in raw {
        let variant: Variant = serde_json::from_value(Value::Object(record))
            .with_context(|| format!("Invalid variant record '{}'", id))?;
        variants.push(variant);
    }

    let activity_profiles = read_optional_yaml::<ActivityProfilesFile>(
        &data_dir.join("activity_profiles.yaml"),
    )?
    .activity_profiles;
    let activity_subprofiles = read_optional_yaml::<ActivitySubprofilesFile>(
        &data_dir.join("activity_subprofiles.yaml"),
    )?
    .activity_subprofiles;
    let work_formats =
        read_optional_yaml::<WorkFormatsFile>(&data_dir.join("work_formats.yaml"))?.work_formats;
    let entry_levels =
        read_optional_yaml::<EntryLevelsFile>(&data_dir.join("entry_levels.yaml"))?.entry_levels;
    let auto_tagging =
        read_optional_yaml::<AutoTaggingFile>(&data_dir.join("auto_tagging.yaml"))?.auto_tagging;

    let classifier = role_classifier_from_settings(&config.role_classifier)
        .context("Failed to build role classifier")?;
    let roles = backfill_role_families(&mut variants, &classifier, BackfillOptions::default());
    let tagging = ProfileTagging::new(
        &activity_profiles,
        &activity_subprofiles,
        &auto_tagging,
        &config.profile_tagging,
    );
    let profiles = tagging.apply_all(&mut variants);
    info!(
        variants = variants.len(),
        roles_classified = roles.decisions.len(),
        profiles_tagged = profiles.profiles,
        profiles_rejected = profiles.rejected,
        "variant catalog ready"
    );

    let mut catalog = VariantCatalog {
        variants,
        activity_profiles,
        activity_subprofiles,
        work_formats,
        entry_levels,
        auto_tagging,
        ..VariantCatalog::default()
    };
    catalog.index();
    Ok(catalog)
}
