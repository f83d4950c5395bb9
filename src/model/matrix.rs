//! Reference tables of the money matrix: axes, cells, taxonomy, tag
//! mappings, paths between cells and the bridges that connect them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::profiles::KeywordMap;

/// The eight matrix cells: four active (`A*`) and four passive (`P*`).
pub const CELL_IDS: [&str; 8] = ["A1", "A2", "A3", "A4", "P1", "P2", "P3", "P4"];

/// Axes every dataset must declare; cells and variants are checked against them.
pub const REQUIRED_AXES: [&str; 3] = ["activity", "scalability", "risk"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub id: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub labels: IndexMap<String, String>,
}

/// One matrix cell with its position on the three axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: String,
    pub activity: String,
    pub scalability: String,
    pub risk: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub typical_cells: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MappingItem {
    pub fn cells(&self) -> &[String] {
        self.typical_cells.as_deref().unwrap_or_default()
    }
}

/// Known tag values per classifier (`mappings.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    #[serde(default)]
    pub sell_items: IndexMap<String, MappingItem>,
    #[serde(default)]
    pub to_whom_items: IndexMap<String, MappingItem>,
    #[serde(default)]
    pub value_measures: IndexMap<String, MappingItem>,
}

/// A way of earning money (`taxonomy.yaml`); variants point at it through `primary_way_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sell: Vec<String>,
    pub to_whom: Vec<String>,
    pub value: Vec<String>,
    pub typical_cells: Vec<String>,
    #[serde(default)]
    pub outside_market: bool,
    #[serde(default)]
    pub risk_notes: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Ordered route through the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub sequence: Vec<String>,
    #[serde(default)]
    pub note: String,
}

/// Transition from one cell to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeItem {
    pub id: String,
    #[serde(rename = "from", alias = "from_cell")]
    pub from_cell: String,
    #[serde(rename = "to", alias = "to_cell")]
    pub to_cell: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mechanisms: Vec<String>,
    #[serde(default)]
    pub checks: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Substring keywords per tag value, grouped by classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagKeywords {
    #[serde(default)]
    pub sell: KeywordMap,
    #[serde(default)]
    pub to_whom: KeywordMap,
    #[serde(default)]
    pub value: KeywordMap,
}

/// Keyword tables of `keywords.yaml` used by text classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixKeywords {
    #[serde(default)]
    pub tags: TagKeywords,
    /// Taxonomy id -> phrases that point straight at that way of earning.
    #[serde(default)]
    pub taxonomy_hints: KeywordMap,
}

/// Every reference table of the dataset, as loaded from the data directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixData {
    pub axes: Vec<Axis>,
    pub cells: Vec<Cell>,
    pub taxonomy: Vec<TaxonomyItem>,
    pub mappings: Mappings,
    pub paths: Vec<PathItem>,
    pub bridges: Vec<BridgeItem>,
    pub keywords: MatrixKeywords,
}
