use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use super::catalog::{load_catalog, VariantCatalog};
use super::read_yaml;
use crate::config::AppConfig;
use crate::model::{
    Axis, BridgeItem, Cell, Mappings, MatrixData, MatrixKeywords, PathItem, TaxonomyItem,
};

/// Reference tables that must all be present in the data directory.
pub const MATRIX_FILES: [&str; 7] = [
    "axes.yaml",
    "cells.yaml",
    "taxonomy.yaml",
    "mappings.yaml",
    "paths.yaml",
    "bridges.yaml",
    "keywords.yaml",
];

#[derive(Debug, Default, Deserialize)]
struct AxesFile {
    #[serde(default)]
    axes: Vec<Axis>,
}

#[derive(Debug, Default, Deserialize)]
struct CellsFile {
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Debug, Default, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    taxonomy: Vec<TaxonomyItem>,
}

#[derive(Debug, Default, Deserialize)]
struct PathsFile {
    #[serde(default)]
    paths: Vec<PathItem>,
}

#[derive(Debug, Default, Deserialize)]
struct BridgesFile {
    #[serde(default)]
    bridges: Vec<BridgeItem>,
}

#[derive(Debug, Default, Deserialize)]
struct KeywordsFile {
    #[serde(default)]
    keywords: MatrixKeywords,
}

/// The whole dataset: matrix reference tables plus the variant catalog.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub matrix: MatrixData,
    pub catalog: VariantCatalog,
}

/// Loads the matrix reference tables. Every file of [`MATRIX_FILES`] is required.
pub fn load_matrix_data(data_dir: &Path) -> Result<MatrixData> {
    for name in MATRIX_FILES {
        let path = data_dir.join(name);
        if !path.exists() {
            bail!("Data file not found: {:?}", path);
        }
    }

    let matrix = MatrixData {
        axes: read_yaml::<AxesFile>(&data_dir.join("axes.yaml"))?.axes,
        cells: read_yaml::<CellsFile>(&data_dir.join("cells.yaml"))?.cells,
        taxonomy: read_yaml::<TaxonomyFile>(&data_dir.join("taxonomy.yaml"))?.taxonomy,
        mappings: read_yaml::<Mappings>(&data_dir.join("mappings.yaml"))?,
        paths: read_yaml::<PathsFile>(&data_dir.join("paths.yaml"))?.paths,
        bridges: read_yaml::<BridgesFile>(&data_dir.join("bridges.yaml"))?.bridges,
        keywords: read_yaml::<KeywordsFile>(&data_dir.join("keywords.yaml"))?.keywords,
    };
    info!(
        axes = matrix.axes.len(),
        cells = matrix.cells.len(),
        taxonomy = matrix.taxonomy.len(),
        paths = matrix.paths.len(),
        bridges = matrix.bridges.len(),
        "loaded matrix tables"
    );
    Ok(matrix)
}

/// Loads the matrix tables and the variant catalog from one data directory.
pub fn load_app_data(data_dir: &Path, config: &AppConfig) -> Result<AppData> {
    let matrix = load_matrix_data(data_dir)?;
    let catalog = load_catalog(data_dir, config)?;
    Ok(AppData { matrix, catalog })
}
