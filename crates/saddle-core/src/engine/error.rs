use crate::core::models::bonds::RearrangementError;
use crate::core::utils::geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Atom count mismatch for {context}: expected {expected}, found {found}")]
    AtomCountMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Atom index {index} is out of range for a structure with {n_atoms} atoms")]
    AtomIndexOutOfRange { index: usize, n_atoms: usize },

    #[error("Invalid bond rearrangement: {source}")]
    Rearrangement {
        #[from]
        source: RearrangementError,
    },

    #[error("Normal-mode displacement failed: {source}")]
    Displacement {
        #[from]
        source: GeometryError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
