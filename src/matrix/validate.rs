//! Cross-reference checks over the loaded dataset.

use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;
use tracing::warn;

use crate::data::AppData;
use crate::model::{MatrixData, Variant, CELL_IDS, REQUIRED_AXES};

/// One broken reference in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Missing required axes: activity, scalability, risk")]
    MissingAxes,

    #[error("Missing cells: {}", .0.join(", "))]
    MissingCells(Vec<String>),

    #[error("Unexpected cells: {}", .0.join(", "))]
    UnexpectedCells(Vec<String>),

    #[error("Cell {cell}: invalid {axis} value '{value}'")]
    CellAxis {
        cell: String,
        axis: &'static str,
        value: String,
    },

    #[error("Mappings must define sell_items, to_whom_items and value_measures")]
    IncompleteMappings,

    #[error("Taxonomy {item}: unknown {field} tags: {}", .tags.join(", "))]
    TaxonomyTags {
        item: String,
        field: &'static str,
        tags: Vec<String>,
    },

    #[error("Taxonomy {item}: unknown cells: {}", .cells.join(", "))]
    TaxonomyCells { item: String, cells: Vec<String> },

    #[error("Variant {variant}: unknown primary_way_id '{way}'")]
    VariantWay { variant: String, way: String },

    #[error("Variant {variant}: unknown matrix cells: {}", .cells.join(", "))]
    VariantCells { variant: String, cells: Vec<String> },

    #[error("Variant {variant}: unknown {field}: {}", .tags.join(", "))]
    VariantTags {
        variant: String,
        field: &'static str,
        tags: Vec<String>,
    },

    #[error("Variant {variant}: invalid {field} '{value}'")]
    VariantAxis {
        variant: String,
        field: &'static str,
        value: String,
    },

    #[error("Path {path}: unknown cells: {}", .cells.join(", "))]
    PathCells { path: String, cells: Vec<String> },

    #[error("Bridge {bridge}: unknown {end} cell '{cell}'")]
    BridgeCell {
        bridge: String,
        end: &'static str,
        cell: String,
    },
}

/// Sorted, de-duplicated entries of `values` that are not in `known`.
fn unknown(values: &[String], known: &HashSet<&str>) -> Vec<String> {
    values
        .iter()
        .filter(|value| !known.contains(value.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

struct AxisValues<'a>(HashMap<&'a str, HashSet<&'a str>>);

impl AxisValues<'_> {
    fn allows(&self, axis: &str, value: &str) -> bool {
        self.0.get(axis).is_some_and(|values| values.contains(value))
    }
}

pub fn validate_app_data(data: &AppData) -> Vec<ValidationIssue> {
    validate(&data.matrix, &data.catalog.variants)
}

/// Checks the matrix tables and `variants` against each other.
///
/// Returns every issue found, in table order; an empty list means the
/// dataset is consistent.
pub fn validate(matrix: &MatrixData, variants: &[Variant]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let axes = AxisValues(
        matrix
            .axes
            .iter()
            .map(|axis| {
                let values = axis.values.iter().map(String::as_str).collect::<HashSet<_>>();
                (axis.id.as_str(), values)
            })
            .collect(),
    );
    if REQUIRED_AXES.iter().any(|axis| !axes.0.contains_key(*axis)) {
        issues.push(ValidationIssue::MissingAxes);
    }

    let cell_ids: BTreeSet<&str> = matrix.cells.iter().map(|cell| cell.id.as_str()).collect();
    let expected: BTreeSet<&str> = CELL_IDS.into_iter().collect();
    if cell_ids != expected {
        let missing: Vec<String> = expected.difference(&cell_ids).map(|c| c.to_string()).collect();
        let extra: Vec<String> = cell_ids.difference(&expected).map(|c| c.to_string()).collect();
        if !missing.is_empty() {
            issues.push(ValidationIssue::MissingCells(missing));
        }
        if !extra.is_empty() {
            issues.push(ValidationIssue::UnexpectedCells(extra));
        }
    }

    for cell in &matrix.cells {
        for (axis, value) in [
            ("activity", &cell.activity),
            ("scalability", &cell.scalability),
            ("risk", &cell.risk),
        ] {
            if !axes.allows(axis, value) {
                issues.push(ValidationIssue::CellAxis {
                    cell: cell.id.clone(),
                    axis,
                    value: value.clone(),
                });
            }
        }
    }

    let mappings = &matrix.mappings;
    if mappings.sell_items.is_empty()
        || mappings.to_whom_items.is_empty()
        || mappings.value_measures.is_empty()
    {
        issues.push(ValidationIssue::IncompleteMappings);
    }
    let sell_keys: HashSet<&str> = mappings.sell_items.keys().map(String::as_str).collect();
    let to_whom_keys: HashSet<&str> = mappings.to_whom_items.keys().map(String::as_str).collect();
    let value_keys: HashSet<&str> = mappings.value_measures.keys().map(String::as_str).collect();
    let known_cells: HashSet<&str> = cell_ids.iter().copied().collect();

    for item in &matrix.taxonomy {
        for (field, tags, known) in [
            ("sell", &item.sell, &sell_keys),
            ("to_whom", &item.to_whom, &to_whom_keys),
            ("value", &item.value, &value_keys),
        ] {
            let tags = unknown(tags, known);
            if !tags.is_empty() {
                issues.push(ValidationIssue::TaxonomyTags {
                    item: item.id.clone(),
                    field,
                    tags,
                });
            }
        }
        let cells = unknown(&item.typical_cells, &known_cells);
        if !cells.is_empty() {
            issues.push(ValidationIssue::TaxonomyCells {
                item: item.id.clone(),
                cells,
            });
        }
    }

    let ways: HashSet<&str> = matrix.taxonomy.iter().map(|item| item.id.as_str()).collect();
    for variant in variants {
        if !ways.contains(variant.primary_way_id.as_str()) {
            issues.push(ValidationIssue::VariantWay {
                variant: variant.id.clone(),
                way: variant.primary_way_id.clone(),
            });
        }
        let cells = unknown(&variant.matrix_cells, &known_cells);
        if !cells.is_empty() {
            issues.push(ValidationIssue::VariantCells {
                variant: variant.id.clone(),
                cells,
            });
        }
        for (field, tags, known) in [
            ("sell_tags", &variant.sell_tags, &sell_keys),
            ("to_whom_tags", &variant.to_whom_tags, &to_whom_keys),
            ("value_tags", &variant.value_tags, &value_keys),
        ] {
            let tags = unknown(tags, known);
            if !tags.is_empty() {
                issues.push(ValidationIssue::VariantTags {
                    variant: variant.id.clone(),
                    field,
                    tags,
                });
            }
        }
        for (field, axis, value) in [
            ("risk_level", "risk", &variant.risk_level),
            ("activity", "activity", &variant.activity),
            ("scalability", "scalability", &variant.scalability),
        ] {
            if !axes.allows(axis, value) {
                issues.push(ValidationIssue::VariantAxis {
                    variant: variant.id.clone(),
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    for path in &matrix.paths {
        let cells = unknown(&path.sequence, &known_cells);
        if !cells.is_empty() {
            issues.push(ValidationIssue::PathCells {
                path: path.id.clone(),
                cells,
            });
        }
    }

    for bridge in &matrix.bridges {
        for (end, cell) in [("from", &bridge.from_cell), ("to", &bridge.to_cell)] {
            if !known_cells.contains(cell.as_str()) {
                issues.push(ValidationIssue::BridgeCell {
                    bridge: bridge.id.clone(),
                    end,
                    cell: cell.clone(),
                });
            }
        }
    }

    for issue in &issues {
        warn!(%issue, "dataset issue");
    }
    issues
}
