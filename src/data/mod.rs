//! File access for the YAML/JSON dataset.

pub mod app_data;
pub mod catalog;

pub use app_data::{load_app_data, load_matrix_data, AppData, MATRIX_FILES};
pub use catalog::{load_catalog, VariantCatalog};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a YAML document. An empty file yields `T::default()`.
pub fn read_yaml<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    if data.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&data).with_context(|| format!("Failed to parse YAML {:?}", path))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse JSON {:?}", path))
}

/// Reads JSON for `.json` files and YAML for everything else.
pub fn read_document<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => read_json(path),
        _ => read_yaml(path),
    }
}

/// Like [`read_yaml`], but a missing file yields `T::default()`.
pub fn read_optional_yaml<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    read_yaml(path)
}

/// Writes pretty-printed JSON (two-space indent, non-ASCII kept as is).
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    fs::write(path, data).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// First path of `candidates` that exists.
pub fn first_existing<'a, I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    candidates.into_iter().find(|path| path.exists()).cloned()
}
