//! bf-plant: plant definition I/O.
//!
//! A plant file is the whole `PlantState` snapshot in YAML: the runtime
//! shape and the file shape are deliberately the same, since the store's
//! contract is whole-entity replacement. Loading always validates.

pub mod validate;

pub use validate::{validate_plant, ValidationError};

use bf_model::PlantState;
use std::path::{Path, PathBuf};

pub type PlantResult<T> = Result<T, PlantError>;

#[derive(Debug, thiserror::Error)]
pub enum PlantError {
    #[error("failed to read plant file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write plant file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("plant file parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Load and validate a plant file.
pub fn load_plant(path: &Path) -> PlantResult<PlantState> {
    let content = std::fs::read_to_string(path).map_err(|source| PlantError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let state: PlantState = serde_yaml::from_str(&content)?;
    validate_plant(&state)?;
    Ok(state)
}

/// Write a plant file.
pub fn save_plant(path: &Path, state: &PlantState) -> PlantResult<()> {
    let content = serde_yaml::to_string(state)?;
    std::fs::write(path, content).map_err(|source| PlantError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
