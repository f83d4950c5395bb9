pub mod config;
pub mod data;
pub mod generator;
pub mod logging;
pub mod matrix;
pub mod model;
pub mod tagging;

// Re-export commonly used types for convenience.
pub use config::AppConfig;
pub use data::{load_app_data, load_catalog, AppData, VariantCatalog};
pub use matrix::{classify_by_tags, classify_by_text, validate_app_data};
pub use model::{MatrixData, RoleFamily, Variant};
pub use tagging::{KeywordTagger, RoleClassifier, RoleLabel};
