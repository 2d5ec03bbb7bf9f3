use thiserror::Error;

/// Conditions under which an external calculation did not produce the data
/// the pipeline asked for.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Calculation '{0}' produced no output")]
    NoCalculationOutput(String),

    #[error("No normal modes found in calculation '{name}' (mode {mode})")]
    NoNormalModesFound { name: String, mode: usize },

    #[error("No final atoms found in calculation '{0}'")]
    AtomsNotFound(String),

    #[error("Calculation '{name}' failed: {message}")]
    Failed { name: String, message: String },
}
