use saddlecheck::core::calc::calculation::CalculationOutput;
use saddlecheck::core::calc::error::CalculationError;
use saddlecheck::core::calc::request::CalculationRequest;
use saddlecheck::core::calc::traits::Calculator;
use saddlecheck::core::io::archive;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A calculator that replays archived outputs instead of running an external
/// code.
///
/// A request named `name` is answered from `<results_dir>/<name>.toml`. A
/// missing archive counts as a calculation that produced no output.
pub struct ArchiveCalculator {
    results_dir: PathBuf,
}

impl ArchiveCalculator {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn archive_path(&self, name: &str) -> PathBuf {
        self.results_dir.join(format!("{}.toml", name))
    }

    fn replay(&self, request: &CalculationRequest<'_>) -> Result<CalculationOutput, CalculationError> {
        let path = self.archive_path(&request.name);
        debug!(
            name = %request.name,
            kind = %request.kind,
            method = %request.method,
            keywords = ?request.keywords(),
            n_cores = request.n_cores,
            point_charges = request.point_charges.len(),
            "Looking up archived calculation at {:?}", path
        );

        if !path.is_file() {
            info!(name = %request.name, "No archived output found at {:?}", path);
            return Err(CalculationError::NoCalculationOutput(request.name.clone()));
        }

        archive::read_output(&path).map_err(|e| CalculationError::Failed {
            name: request.name.clone(),
            message: e.to_string(),
        })
    }
}

impl Calculator for ArchiveCalculator {
    fn run_hessian(
        &self,
        request: &CalculationRequest<'_>,
    ) -> Result<CalculationOutput, CalculationError> {
        self.replay(request)
    }

    fn run_optimization(
        &self,
        request: &CalculationRequest<'_>,
    ) -> Result<CalculationOutput, CalculationError> {
        self.replay(request)
    }
}
