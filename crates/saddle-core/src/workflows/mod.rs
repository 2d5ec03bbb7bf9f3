//! # Workflows Module
//!
//! High-level entry points for validating the imaginary mode of a
//! transition-state candidate.
//!
//! ## Overview
//!
//! Workflows tie the engine tasks together in order of increasing cost. Each
//! entry point takes the calculation method explicitly; resolving a default
//! method is left to the caller.
//!
//! - **Validation Workflow** ([`validate`]) - The quick screen on its own, and
//!   the full pipeline escalating from the screen to the displacement check
//!   and finally to the optimization-based linkage check.

pub mod validate;
