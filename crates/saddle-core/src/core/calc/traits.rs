use super::calculation::CalculationOutput;
use super::error::CalculationError;
use super::request::CalculationRequest;
use crate::core::models::structure::Structure;
use tracing::debug;

/// An external electronic-structure engine.
///
/// Every call blocks until the calculation has finished. Timeouts and
/// cancellation are the implementor's responsibility; a calculation that did
/// not complete should be reported as an error, which the pipeline treats as
/// missing data.
pub trait Calculator {
    /// Runs a Hessian (frequency) calculation.
    ///
    /// A successful output should carry the frequencies, the per-atom
    /// displacement vectors of every normal mode in mode-number order and the
    /// final atoms.
    fn run_hessian(
        &self,
        request: &CalculationRequest<'_>,
    ) -> Result<CalculationOutput, CalculationError>;

    /// Runs a geometry optimization.
    ///
    /// A successful output should carry the final atoms and energy.
    fn run_optimization(
        &self,
        request: &CalculationRequest<'_>,
    ) -> Result<CalculationOutput, CalculationError>;
}

/// External conformer search for a reactant or product.
///
/// The validation pipeline calls this before comparing optimized structures
/// against a reactant or product. Where the conformers are kept is up to the
/// implementor; the comparison only reads the structure's own graph.
pub trait ConformerGenerator {
    fn populate_conformers(&self, structure: &mut Structure);
}

/// A conformer generator that leaves structures unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConformers;

impl ConformerGenerator for NoConformers {
    fn populate_conformers(&self, structure: &mut Structure) {
        debug!(name = %structure.name, "Conformer generation disabled; keeping the input geometry only.");
    }
}
