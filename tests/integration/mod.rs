use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self { workspace }
    }

    pub fn data_dir(&self) -> &Path {
        self.workspace.path()
    }

    pub fn variants_dir(&self) -> PathBuf {
        self.data_dir().join("variants")
    }

    /// Writes `contents` to `relative` under the data dir, creating parents.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.data_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    pub fn seed_matrix_tables(&self) {
        for (name, contents) in support::MATRIX_TABLES {
            self.write(name, contents);
        }
    }

    pub fn seed_generator_inputs(&self) {
        self.write("variants/archetypes.yaml", support::ARCHETYPES_YAML);
        self.write("variants/modifiers.yaml", support::MODIFIERS_YAML);
    }
}

mod catalog_loading;
mod dataset_checks;
mod role_classifier;
mod variant_generator;
pub mod support;
