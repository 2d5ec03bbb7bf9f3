use crate::core::calc::calculation::CalculationOutput;
use crate::core::models::atom::Atom;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArchivedAtom {
    label: String,
    position: [f64; 3],
}

/// On-disk layout of an archived calculation output.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ArchivedOutput {
    energy: Option<f64>,
    frequencies: Option<Vec<f64>>,
    normal_modes: Option<Vec<Vec<[f64; 3]>>>,
    final_atoms: Option<Vec<ArchivedAtom>>,
}

impl From<ArchivedOutput> for CalculationOutput {
    fn from(archived: ArchivedOutput) -> Self {
        Self {
            frequencies: archived.frequencies,
            normal_modes: archived.normal_modes.map(|modes| {
                modes
                    .into_iter()
                    .map(|mode| mode.into_iter().map(Vector3::from).collect())
                    .collect()
            }),
            final_atoms: archived.final_atoms.map(|atoms| {
                atoms
                    .into_iter()
                    .map(|a| Atom::new(&a.label, Point3::from(a.position)))
                    .collect()
            }),
            energy: archived.energy,
        }
    }
}

/// Parses an archived calculation output from a TOML document.
///
/// # Arguments
///
/// * `content` - The TOML text.
/// * `origin` - Where the text came from, used in error messages.
pub fn parse_output(content: &str, origin: &str) -> Result<CalculationOutput, ArchiveError> {
    let archived: ArchivedOutput = toml::from_str(content).map_err(|e| ArchiveError::Toml {
        path: origin.to_string(),
        source: e,
    })?;
    Ok(archived.into())
}

/// Reads an archived calculation output from a TOML file.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if the file cannot be read and
/// [`ArchiveError::Toml`] if it is not a valid archive.
pub fn read_output(path: &Path) -> Result<CalculationOutput, ArchiveError> {
    let content = std::fs::read_to_string(path).map_err(|e| ArchiveError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_output(&content, &path.to_string_lossy())
}
