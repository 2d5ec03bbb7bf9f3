//! # Engine Module
//!
//! The stateful layer of the validation pipeline.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Thresholds and tolerances with documented defaults
//! - **Candidate** ([`candidate`]) - The TS guess, its reactant and product, and its attached calculation
//! - **Context** ([`context`]) - Collaborators and settings shared by every task of a validation
//! - **Progress Monitoring** ([`progress`]) - Stage and calculation events for front-ends
//! - **Error Handling** ([`error`]) - Data-integrity failures that abort a validation
//! - **Tasks** ([`tasks`]) - The individual checks, cheapest first
//!
//! ## Error Policy
//!
//! Missing calculation data never escapes a task as an error: it is logged
//! and turned into a negative verdict. Only inconsistencies between related
//! data (atom counts, atom indices) surface as [`error::EngineError`].

pub mod candidate;
pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;
