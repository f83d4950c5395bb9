//! Checks and scoring against the matrix reference tables.

pub mod classify;
pub mod validate;

pub use classify::{
    classify_by_tags, classify_by_text, MatrixClassification, TagSet, DEFAULT_TOP_N,
};
pub use validate::{validate, validate_app_data, ValidationIssue};
