use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::role_family::{is_unset_role, UNKNOWN_ROLE};

/// Channel switches toggled by modifiers of the same id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelState {
    #[serde(default)]
    pub automation: bool,
    #[serde(default)]
    pub channel_system: bool,
    #[serde(default)]
    pub delegation: bool,
    #[serde(default)]
    pub subscription: bool,
}

impl ChannelState {
    /// Turns on the switch named `key`. Returns false for names that are not channel switches.
    pub fn enable(&mut self, key: &str) -> bool {
        let slot = match key {
            "automation" => &mut self.automation,
            "channel_system" => &mut self.channel_system,
            "delegation" => &mut self.delegation,
            "subscription" => &mut self.subscription,
            _ => return false,
        };
        *slot = true;
        true
    }
}

/// Nature-of-work block attached to each variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfile {
    #[serde(default)]
    pub task_profile: Vec<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub social_intensity: Option<String>,
    #[serde(default = "default_role_family")]
    pub role_family: String,
}

impl Default for ActivityProfile {
    fn default() -> Self {
        Self {
            task_profile: Vec::new(),
            environment: None,
            social_intensity: None,
            role_family: default_role_family(),
        }
    }
}

fn default_role_family() -> String {
    UNKNOWN_ROLE.to_string()
}

/// One concrete income mechanism as stored in the variants tables.
///
/// Fields the tooling does not interpret are kept in `extra` so a record
/// survives a load/save cycle unchanged.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub primary_way_id: String,
    #[serde(default)]
    pub matrix_cells: Vec<String>,
    #[serde(default)]
    pub sell_tags: Vec<String>,
    #[serde(default)]
    pub to_whom_tags: Vec<String>,
    #[serde(default)]
    pub value_tags: Vec<String>,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub scalability: String,
    #[serde(default)]
    pub outside_market: bool,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub first_steps: Vec<String>,
    #[serde(default)]
    pub success_metrics: Vec<String>,
    #[serde(default)]
    pub related_variant_ids: Vec<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub bridge_ids: Vec<String>,
    #[serde(default)]
    pub route_ids: Vec<String>,
    #[serde(default)]
    pub channel_state: ChannelState,
    #[serde(default)]
    pub activity_profile: ActivityProfile,
    pub profile_id: Option<String>,
    pub subprofile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub work_format_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_level_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Variant {
    /// Free text fed to the profile tagger: title, notes and record keywords.
    pub fn tagging_text(&self) -> String {
        let keywords = self.keywords.join(" ");
        [self.title.as_str(), self.notes.as_deref().unwrap_or(""), keywords.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Top-level shape of every variants file: `{"variants": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantsFile<T> {
    #[serde(default = "Vec::new")]
    pub variants: Vec<T>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record whose role family can be backfilled by the classifier.
pub trait RoleTagged {
    fn record_id(&self) -> &str;
    fn title(&self) -> &str;
    fn summary(&self) -> Option<&str>;
    fn role_family(&self) -> &str;
    fn set_role_family(&mut self, role_family: &str);

    fn has_role_family(&self) -> bool {
        !is_unset_role(self.role_family())
    }
}

impl RoleTagged for Variant {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    fn role_family(&self) -> &str {
        &self.activity_profile.role_family
    }

    fn set_role_family(&mut self, role_family: &str) {
        self.activity_profile.role_family = role_family.to_string();
    }
}

/// Untyped variant record edited in place by the backfill tool.
///
/// Only `activity_profile.role_family` is ever written; every other key
/// keeps its original position and value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawVariant(pub Map<String, Value>);

impl RawVariant {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Makes sure `activity_profile` is a mapping carrying a `role_family` key.
    pub fn ensure_activity_profile(&mut self) {
        let slot = self
            .0
            .entry("activity_profile")
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Some(profile) = slot.as_object_mut() {
            profile
                .entry("role_family")
                .or_insert_with(|| Value::String(UNKNOWN_ROLE.into()));
        }
    }
}

impl RoleTagged for RawVariant {
    fn record_id(&self) -> &str {
        self.str_field("id").unwrap_or("")
    }

    fn title(&self) -> &str {
        self.str_field("title").unwrap_or("")
    }

    fn summary(&self) -> Option<&str> {
        self.str_field("notes")
    }

    fn role_family(&self) -> &str {
        self.0
            .get("activity_profile")
            .and_then(|profile| profile.get("role_family"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    fn set_role_family(&mut self, role_family: &str) {
        self.ensure_activity_profile();
        if let Some(profile) = self
            .0
            .get_mut("activity_profile")
            .and_then(Value::as_object_mut)
        {
            profile.insert("role_family".into(), Value::String(role_family.to_string()));
        }
    }
}
