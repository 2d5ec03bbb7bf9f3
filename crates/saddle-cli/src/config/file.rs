use crate::error::{CliError, Result};
use saddlecheck::core::calc::method::Method;
use saddlecheck::core::calc::request::PointCharge;
use nalgebra::Point3;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileBondRearrangement {
    #[serde(default)]
    pub forming: Vec<(usize, usize)>,
    #[serde(default)]
    pub breaking: Vec<(usize, usize)>,
}

/// A QM/MM point charge; `position` is in Angstroms.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilePointCharge {
    pub charge: f64,
    pub position: [f64; 3],
}

impl From<FilePointCharge> for PointCharge {
    fn from(file: FilePointCharge) -> Self {
        PointCharge::new(file.charge, Point3::from(file.position))
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileMethod {
    pub name: Option<String>,
    #[serde(default)]
    pub hess_keywords: Vec<String>,
    #[serde(default)]
    pub opt_keywords: Vec<String>,
}

impl FileMethod {
    /// Resolves the method, taking the name from `cli_name`, then the file,
    /// then `default_name`.
    pub fn resolve(self, cli_name: Option<&str>, default_name: &str) -> Method {
        let name = cli_name
            .map(str::to_string)
            .or(self.name)
            .unwrap_or_else(|| default_name.to_string());
        Method::new(&name)
            .with_hess_keywords(self.hess_keywords)
            .with_opt_keywords(self.opt_keywords)
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileMethods {
    pub high: Option<FileMethod>,
    pub low: Option<FileMethod>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileThresholds {
    pub freq_threshold: Option<f64>,
    pub contribution_threshold: Option<f64>,
    pub displacement_magnitude: Option<f64>,
    pub linkage_displacement_magnitude: Option<f64>,
    pub bond_delta_threshold: Option<f64>,
    pub spurious_bond_tolerance: Option<f64>,
    pub graph_tolerance: Option<f64>,
}

/// A validation job as written in the TOML job file.
///
/// Relative paths are resolved against the directory holding the job file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub name: Option<String>,
    pub ts: Option<PathBuf>,
    pub reactant: Option<PathBuf>,
    pub product: Option<PathBuf>,
    /// Archived Hessian to attach to the candidate instead of looking one up.
    pub hessian: Option<PathBuf>,
    pub results_dir: Option<PathBuf>,
    pub charge: Option<i32>,
    pub mult: Option<u32>,
    pub n_cores: Option<usize>,
    pub bond_rearrangement: Option<FileBondRearrangement>,
    /// Point charges embedding the TS in Hessian calculations.
    #[serde(default)]
    pub point_charges: Vec<FilePointCharge>,
    pub methods: Option<FileMethods>,
    pub thresholds: Option<FileThresholds>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading job file from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
