pub mod matrix;
pub mod profiles;
pub mod role_family;
pub mod variant;

pub use matrix::{
    Axis, BridgeItem, Cell, MappingItem, Mappings, MatrixData, MatrixKeywords, PathItem,
    TagKeywords, TaxonomyItem, CELL_IDS, REQUIRED_AXES,
};
pub use profiles::{
    ActivityProfileDefinition, ActivitySubprofileDefinition, AutoTaggingKeywords,
    EntryLevelDefinition, KeywordMap, WorkFormatDefinition,
};
pub use role_family::{is_unset_role, role_family_label, RoleFamily, UNKNOWN_ROLE};
pub use variant::{ActivityProfile, ChannelState, RawVariant, RoleTagged, Variant, VariantsFile};
