//! Offline expansion of archetypes and modifiers into the variants table.

pub mod apply;
pub mod archetype;
pub mod compat;
pub mod coverage;
pub mod selection;
pub mod stable_hash;

pub use apply::{apply_modifiers, channel_state, normalize_risk_level, AppliedVariant, CELL_PRIORITY};
pub use archetype::{Archetype, ArchetypesFile, Modifier, ModifierCategory, ModifiersFile};
pub use compat::{lookup as mechanism_compat, MechanismCompat, MECHANISMS};
pub use coverage::CoverageReport;
pub use selection::{select_mod_sets, ModSet};
pub use stable_hash::StableHash;

use anyhow::{bail, Result};
use rayon::prelude::*;
use serde_json::Map;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::GeneratorSettings;
use crate::data::{read_yaml, write_json_pretty};
use crate::model::{ActivityProfile, Variant, VariantsFile};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("archetype '{arch_id}' uses mechanism '{mechanism_id}' without a compatibility entry")]
    UnknownMechanism {
        arch_id: String,
        mechanism_id: String,
    },

    #[error("archetype '{arch_id}' references unknown matrix cell '{cell}'")]
    UnknownMatrixCell { arch_id: String, cell: String },
}

/// Lowercases, trims and collapses inner whitespace.
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    mechanism_id: String,
    title: String,
    role_family: String,
    sell_tags: Vec<String>,
    to_whom_tags: Vec<String>,
    value_tags: Vec<String>,
}

fn sorted(items: &[String]) -> Vec<String> {
    let mut items = items.to_vec();
    items.sort();
    items
}

fn expand_archetype(
    archetype: &Archetype,
    modifiers: &[Modifier],
    settings: &GeneratorSettings,
) -> Result<Vec<(DedupKey, Variant)>, GeneratorError> {
    let compat = compat::lookup(&archetype.mechanism_id).ok_or_else(|| {
        GeneratorError::UnknownMechanism {
            arch_id: archetype.arch_id.clone(),
            mechanism_id: archetype.mechanism_id.clone(),
        }
    })?;

    let mut expanded = Vec::new();
    for mod_set in select_mod_sets(archetype, modifiers, compat, settings) {
        let applied = apply_modifiers(archetype, &mod_set, compat)?;
        let mod_key = mod_set
            .iter()
            .map(|m| m.id.as_str())
            .collect::<Vec<_>>()
            .join(".");
        let key = DedupKey {
            mechanism_id: archetype.mechanism_id.clone(),
            title: normalize_title(&applied.title),
            role_family: archetype.role_family.clone(),
            sell_tags: sorted(&applied.sell_tags),
            to_whom_tags: sorted(&applied.to_whom_tags),
            value_tags: sorted(&applied.value_tags),
        };
        let variant = Variant {
            id: format!("{}.{}.{}", archetype.mechanism_id, archetype.arch_id, mod_key),
            title: applied.title,
            kind: archetype.kind.clone(),
            primary_way_id: archetype.mechanism_id.clone(),
            matrix_cells: applied.matrix_cells,
            sell_tags: applied.sell_tags,
            to_whom_tags: applied.to_whom_tags,
            value_tags: applied.value_tags,
            risk_level: normalize_risk_level(&archetype.risk_level, &mod_set).to_string(),
            activity: archetype.activity.clone(),
            scalability: archetype.scalability.clone(),
            outside_market: archetype.outside_market,
            requirements: Vec::new(),
            first_steps: Vec::new(),
            success_metrics: Vec::new(),
            related_variant_ids: Vec::new(),
            notes: Some(applied.notes),
            bridge_ids: applied.bridge_ids,
            route_ids: applied.route_ids,
            channel_state: channel_state(&mod_set),
            activity_profile: ActivityProfile {
                role_family: archetype.role_family.clone(),
                ..ActivityProfile::default()
            },
            profile_id: None,
            subprofile_id: None,
            work_format_ids: Vec::new(),
            entry_level_ids: Vec::new(),
            keywords: Vec::new(),
            extra: Map::new(),
        };
        expanded.push((key, variant));
    }
    Ok(expanded)
}

/// Expands every archetype and drops later duplicates.
///
/// Archetypes are expanded in parallel; deduplication runs afterwards in
/// archetype order, so the first variant with a given key always wins.
pub fn build_variants(
    archetypes: &[Archetype],
    modifiers: &[Modifier],
    settings: &GeneratorSettings,
) -> Result<Vec<Variant>, GeneratorError> {
    let expanded = archetypes
        .par_iter()
        .map(|archetype| expand_archetype(archetype, modifiers, settings))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut variants = Vec::new();
    for (key, variant) in expanded.into_iter().flatten() {
        if seen.insert(key) {
            variants.push(variant);
        }
    }
    Ok(variants)
}

/// Input and output locations of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPaths {
    pub archetypes: PathBuf,
    pub modifiers: PathBuf,
    pub output: PathBuf,
}

impl GeneratorPaths {
    /// Standard layout under `<data_dir>/variants/`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        let dir = data_dir.join("variants");
        Self {
            archetypes: dir.join("archetypes.yaml"),
            modifiers: dir.join("modifiers.yaml"),
            output: dir.join("variants.generated.json"),
        }
    }
}

/// Variants written by [`run`] and their coverage report.
#[derive(Debug, Clone)]
pub struct Generation {
    pub variants: Vec<Variant>,
    pub report: CoverageReport,
}

/// Reads both tables, writes the variants file and builds the coverage report.
///
/// The output is written even when coverage thresholds are missed.
pub fn run(paths: &GeneratorPaths, settings: &GeneratorSettings) -> Result<Generation> {
    for input in [&paths.archetypes, &paths.modifiers] {
        if !input.exists() {
            bail!("Generator input not found: {:?}", input);
        }
    }
    let archetypes = read_yaml::<ArchetypesFile>(&paths.archetypes)?.archetypes;
    let modifiers = read_yaml::<ModifiersFile>(&paths.modifiers)?.modifiers;

    let variants = build_variants(&archetypes, &modifiers, settings)?;
    let file = VariantsFile {
        variants,
        extra: Map::new(),
    };
    write_json_pretty(&paths.output, &file)?;
    info!(
        archetypes = archetypes.len(),
        modifiers = modifiers.len(),
        variants = file.variants.len(),
        output = ?paths.output,
        "wrote generated variants"
    );

    let report = CoverageReport::build(&file.variants, settings.thresholds);
    if !report.is_ok() {
        warn!(
            violations = report.violations.len(),
            "coverage thresholds missed"
        );
    }
    Ok(Generation {
        variants: file.variants,
        report,
    })
}
