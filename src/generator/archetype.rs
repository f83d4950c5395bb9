use serde::{Deserialize, Serialize};

use crate::model::UNKNOWN_ROLE;

/// Classifier values of an archetype before modifiers run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseClassifiers {
    #[serde(default)]
    pub sell: Vec<String>,
    #[serde(default)]
    pub to_whom: Vec<String>,
    #[serde(default)]
    pub measure: Vec<String>,
}

/// Base template of one money mechanism (`variants/archetypes.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub arch_id: String,
    pub mechanism_id: String,
    pub base_title: String,
    #[serde(default)]
    pub base_desc: String,
    #[serde(default)]
    pub base_classifiers: BaseClassifiers,
    #[serde(default)]
    pub base_matrix_cells: Vec<String>,
    #[serde(default)]
    pub default_bridges: Vec<String>,
    #[serde(default)]
    pub default_routes: Vec<String>,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default = "unknown_role")]
    pub role_family: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub scalability: String,
    #[serde(default)]
    pub outside_market: bool,
}

fn unknown_role() -> String {
    UNKNOWN_ROLE.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierCategory {
    Channel,
    Packaging,
    Risk,
    /// Categories the generator does not select from.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliesTo {
    /// Empty means every mechanism.
    #[serde(default)]
    pub mechanisms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierChanges {
    #[serde(default)]
    pub title_suffix: String,
    #[serde(default)]
    pub desc_suffix: String,
    #[serde(default)]
    pub sell_add: Vec<String>,
    #[serde(default)]
    pub to_whom_add: Vec<String>,
    #[serde(default)]
    pub measure_add: Vec<String>,
    #[serde(default)]
    pub matrix_add: Vec<String>,
    #[serde(default)]
    pub bridges_add: Vec<String>,
    #[serde(default)]
    pub routes_add: Vec<String>,
}

/// Composable change applied to an archetype (`variants/modifiers.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: String,
    pub category: ModifierCategory,
    #[serde(default)]
    pub applies_to: AppliesTo,
    #[serde(default)]
    pub changes: ModifierChanges,
}

impl Modifier {
    pub fn applies_to(&self, mechanism_id: &str) -> bool {
        self.applies_to.mechanisms.is_empty()
            || self.applies_to.mechanisms.iter().any(|m| m == mechanism_id)
    }

    pub fn is_risk(&self) -> bool {
        self.category == ModifierCategory::Risk
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchetypesFile {
    #[serde(default)]
    pub archetypes: Vec<Archetype>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifiersFile {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}
