use super::error::CalculationError;
use super::method::{CalculationKind, Method};
use super::request::CalculationRequest;
use super::traits::Calculator;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::Vector3;
use std::fmt;
use tracing::{debug, warn};

/// Index of a normal mode in the full 3N list of a Hessian calculation.
///
/// For a non-linear molecule modes 0–2 are translations and 3–5 rotations;
/// vibrational modes start at 6, ordered by frequency, so the most imaginary
/// mode of a saddle point is mode 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeNumber(usize);

impl ModeNumber {
    /// The lowest vibrational mode; the reaction coordinate at a first-order saddle point.
    pub const PRIMARY_IMAGINARY: Self = Self(6);
    /// The second vibrational mode, imaginary only at a higher-order saddle point.
    pub const SECOND_IMAGINARY: Self = Self(7);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw data parsed from a finished calculation. Every field is optional
/// because an external code may stop before producing any of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationOutput {
    /// Vibrational frequencies in cm⁻¹; imaginary frequencies are negative.
    pub frequencies: Option<Vec<f64>>,
    /// Per-atom displacement vectors for each of the 3N normal modes.
    pub normal_modes: Option<Vec<Vec<Vector3<f64>>>>,
    /// Atoms at the final geometry.
    pub final_atoms: Option<Vec<Atom>>,
    /// Final electronic energy in Hartrees.
    pub energy: Option<f64>,
}

/// A calculation that has been run, together with the structure it was run on.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub name: String,
    pub kind: CalculationKind,
    pub method: Method,
    /// The structure the calculation was requested for.
    pub input: Structure,
    /// `None` if the calculator returned no output at all.
    pub output: Option<CalculationOutput>,
}

impl Calculation {
    pub fn new(
        name: &str,
        kind: CalculationKind,
        method: Method,
        input: Structure,
        output: Option<CalculationOutput>,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            method,
            input,
            output,
        }
    }

    /// Runs a request on a calculator and wraps the result.
    ///
    /// This blocks until the calculator returns. A calculator error is logged
    /// and recorded as a calculation without output so that later accessors
    /// report the data as missing.
    pub fn run<C: Calculator + ?Sized>(calculator: &C, request: &CalculationRequest<'_>) -> Self {
        debug!(name = %request.name, kind = %request.kind, method = %request.method, "Running calculation.");

        let result = match request.kind {
            CalculationKind::Hessian => calculator.run_hessian(request),
            CalculationKind::Optimization => calculator.run_optimization(request),
        };

        let output = match result {
            Ok(output) => Some(output),
            Err(e) => {
                warn!(name = %request.name, "Calculation returned no usable output: {}", e);
                None
            }
        };

        Self {
            name: request.name.clone(),
            kind: request.kind,
            method: request.method.clone(),
            input: request.structure.clone(),
            output,
        }
    }

    /// Imaginary frequencies (negative values), most negative first.
    ///
    /// Empty if the calculation has no frequencies.
    pub fn imag_freqs(&self) -> Vec<f64> {
        let mut freqs: Vec<f64> = self
            .output
            .as_ref()
            .and_then(|o| o.frequencies.as_ref())
            .map(|f| f.iter().copied().filter(|&v| v < 0.0).collect())
            .unwrap_or_default();
        freqs.sort_by(f64::total_cmp);
        freqs
    }

    /// Per-atom displacement vectors of a normal mode.
    ///
    /// # Errors
    ///
    /// * [`CalculationError::NoCalculationOutput`] if the calculation produced nothing.
    /// * [`CalculationError::NoNormalModesFound`] if the requested mode is unavailable.
    pub fn normal_mode_displacements(
        &self,
        mode: ModeNumber,
    ) -> Result<&[Vector3<f64>], CalculationError> {
        let output = self.output_or_err()?;
        output
            .normal_modes
            .as_ref()
            .and_then(|modes| modes.get(mode.index()))
            .filter(|vectors| !vectors.is_empty())
            .map(Vec::as_slice)
            .ok_or_else(|| CalculationError::NoNormalModesFound {
                name: self.name.clone(),
                mode: mode.index(),
            })
    }

    /// Atoms at the final geometry of the calculation.
    ///
    /// # Errors
    ///
    /// * [`CalculationError::NoCalculationOutput`] if the calculation produced nothing.
    /// * [`CalculationError::AtomsNotFound`] if no final geometry was produced.
    pub fn final_atoms(&self) -> Result<&[Atom], CalculationError> {
        let output = self.output_or_err()?;
        output
            .final_atoms
            .as_deref()
            .filter(|atoms| !atoms.is_empty())
            .ok_or_else(|| CalculationError::AtomsNotFound(self.name.clone()))
    }

    pub fn energy(&self) -> Option<f64> {
        self.output.as_ref().and_then(|o| o.energy)
    }

    fn output_or_err(&self) -> Result<&CalculationOutput, CalculationError> {
        self.output
            .as_ref()
            .ok_or_else(|| CalculationError::NoCalculationOutput(self.name.clone()))
    }
}
