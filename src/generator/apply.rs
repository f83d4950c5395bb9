use std::collections::HashSet;

use super::archetype::{Archetype, Modifier};
use super::compat::MechanismCompat;
use super::GeneratorError;
use crate::model::{ChannelState, CELL_IDS};

/// Matrix cells in output order; cells outside this list are rejected.
pub const CELL_PRIORITY: [&str; 8] = CELL_IDS;

pub const MAX_SELL_TAGS: usize = 3;
pub const MAX_TO_WHOM_TAGS: usize = 2;
pub const MAX_VALUE_TAGS: usize = 2;
pub const MAX_MATRIX_CELLS: usize = 3;
pub const MAX_BRIDGES: usize = 8;
pub const MAX_ROUTES: usize = 3;

/// Text and tag lists of an archetype after a modifier set was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedVariant {
    pub title: String,
    pub notes: String,
    pub sell_tags: Vec<String>,
    pub to_whom_tags: Vec<String>,
    pub value_tags: Vec<String>,
    pub matrix_cells: Vec<String>,
    pub bridge_ids: Vec<String>,
    pub route_ids: Vec<String>,
}

/// Appends `extra` to `items`, keeping the first occurrence of every value.
fn merge_unique(items: &mut Vec<String>, extra: &[String]) {
    let mut seen: HashSet<String> = items.iter().cloned().collect();
    for item in extra {
        if seen.insert(item.clone()) {
            items.push(item.clone());
        }
    }
}

fn unique(items: &[String]) -> Vec<String> {
    let mut result = Vec::with_capacity(items.len());
    merge_unique(&mut result, items);
    result
}

fn capped(mut items: Vec<String>, limit: usize) -> Vec<String> {
    items.truncate(limit);
    items
}

/// Keeps allowed values; falls back to the first allowed value when nothing is left.
fn filter_allowed(items: Vec<String>, allowed: &[&str]) -> Vec<String> {
    let kept: Vec<String> = items
        .into_iter()
        .filter(|item| allowed.contains(&item.as_str()))
        .collect();
    if !kept.is_empty() {
        return kept;
    }
    allowed.first().map(|v| vec![v.to_string()]).unwrap_or_default()
}

fn order_cells(arch_id: &str, cells: Vec<String>) -> Result<Vec<String>, GeneratorError> {
    let mut ranked = Vec::with_capacity(cells.len());
    for cell in cells {
        match CELL_PRIORITY.iter().position(|known| *known == cell) {
            Some(rank) => ranked.push((rank, cell)),
            None => {
                return Err(GeneratorError::UnknownMatrixCell {
                    arch_id: arch_id.to_string(),
                    cell,
                })
            }
        }
    }
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked
        .into_iter()
        .take(MAX_MATRIX_CELLS)
        .map(|(_, cell)| cell)
        .collect())
}

/// Applies a modifier set to an archetype, then filters and caps every tag list.
pub fn apply_modifiers(
    archetype: &Archetype,
    mod_set: &[&Modifier],
    compat: &MechanismCompat,
) -> Result<AppliedVariant, GeneratorError> {
    let base = &archetype.base_classifiers;
    let mut title = archetype.base_title.clone();
    let mut notes = archetype.base_desc.clone();
    let mut sell_tags = unique(&base.sell);
    let mut to_whom_tags = unique(&base.to_whom);
    let mut value_tags = unique(&base.measure);
    let mut matrix_cells = unique(&archetype.base_matrix_cells);
    let mut bridge_ids = unique(&archetype.default_bridges);
    let mut route_ids = unique(&archetype.default_routes);

    for modifier in mod_set {
        let changes = &modifier.changes;
        title.push_str(&changes.title_suffix);
        if !changes.desc_suffix.is_empty() {
            notes = format!("{notes} {}", changes.desc_suffix);
        }
        merge_unique(&mut sell_tags, &changes.sell_add);
        merge_unique(&mut to_whom_tags, &changes.to_whom_add);
        merge_unique(&mut value_tags, &changes.measure_add);
        merge_unique(&mut matrix_cells, &changes.matrix_add);
        merge_unique(&mut bridge_ids, &changes.bridges_add);
        merge_unique(&mut route_ids, &changes.routes_add);
    }

    Ok(AppliedVariant {
        title,
        notes,
        sell_tags: capped(sell_tags, MAX_SELL_TAGS),
        to_whom_tags: capped(filter_allowed(to_whom_tags, compat.to_whom), MAX_TO_WHOM_TAGS),
        value_tags: capped(filter_allowed(value_tags, compat.measure), MAX_VALUE_TAGS),
        matrix_cells: order_cells(&archetype.arch_id, matrix_cells)?,
        bridge_ids: capped(bridge_ids, MAX_BRIDGES),
        route_ids: capped(route_ids, MAX_ROUTES),
    })
}

/// `high` stays high; `medium` turns high with a risk modifier and low otherwise.
pub fn normalize_risk_level(risk_level: &str, mod_set: &[&Modifier]) -> &'static str {
    match risk_level {
        "high" => "high",
        "medium" if mod_set.iter().any(|m| m.is_risk()) => "high",
        _ => "low",
    }
}

pub fn channel_state(mod_set: &[&Modifier]) -> ChannelState {
    let mut state = ChannelState::default();
    for modifier in mod_set {
        state.enable(&modifier.id);
    }
    state
}
