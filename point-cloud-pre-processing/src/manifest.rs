/// Elevation dataset manifest shared with the terrain reconstruction config.
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top level of the YAML configuration. Keys other than
/// `input_elevation` belong to other tools and are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Manifest {
    pub input_elevation: Vec<ElevationGroup>,
}

/// One group of LAS/LAZ datasets sharing the same processing options.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ElevationGroup {
    #[serde(default)]
    pub datasets: Vec<PathBuf>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text).map_err(|source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Dataset paths in manifest order, groups flattened.
    pub fn datasets(&self) -> Vec<&Path> {
        self.input_elevation
            .iter()
            .flat_map(|group| group.datasets.iter().map(PathBuf::as_path))
            .collect()
    }
}
