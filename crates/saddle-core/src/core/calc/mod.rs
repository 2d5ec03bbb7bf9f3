//! # Calculation Abstraction
//!
//! The validation pipeline never runs electronic-structure codes itself. It
//! describes what it needs as a [`request::CalculationRequest`], hands it to a
//! [`traits::Calculator`], and reads the answer back through the accessors of
//! [`calculation::Calculation`], which express missing data as errors that the
//! caller converts into a negative verdict.
//!
//! - [`method`] - Electronic-structure methods and their keyword sets
//! - [`request`] - Calculation requests and QM/MM point charges
//! - [`calculation`] - Calculation results and the normal-mode numbering convention
//! - [`traits`] - External collaborators: calculators and conformer generators
//! - [`error`] - Missing-data conditions reported by calculations

pub mod calculation;
pub mod error;
pub mod method;
pub mod request;
pub mod traits;
