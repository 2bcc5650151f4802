use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::domain::ToolProfile;

const SEED_CATALOGUE: &str = include_str!("../../../data/seed_catalogue.json");

/// Failure reading a JSON data file (catalogue, answers, overrides).
#[derive(Debug, thiserror::Error)]
pub enum DataFileError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Catalogue bundled with the crate, used when no catalogue file is configured.
pub fn seed_catalogue() -> Result<Vec<ToolProfile>, DataFileError> {
    serde_json::from_str(SEED_CATALOGUE).map_err(|source| DataFileError::Parse {
        origin: "bundled seed catalogue".to_string(),
        source,
    })
}

/// Catalogue from `path` when given, otherwise the bundled seed.
pub fn load_catalogue(path: Option<&Path>) -> Result<Vec<ToolProfile>, DataFileError> {
    match path {
        Some(path) => load_json_file(path),
        None => seed_catalogue(),
    }
}

pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataFileError> {
    let raw = fs::read_to_string(path).map_err(|source| DataFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataFileError::Parse {
        origin: path.display().to_string(),
        source,
    })
}
