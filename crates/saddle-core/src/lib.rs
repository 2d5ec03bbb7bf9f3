//! # Saddlecheck Core Library
//!
//! Validation of transition-state (TS) candidates produced during automated
//! reaction-pathway search. Given a stationary point with a significant
//! imaginary vibrational frequency, the library decides whether that imaginary
//! mode corresponds to the intended bond-forming/bond-breaking event linking a
//! reactant to a product.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`,
//!   `BondRearrangement`), geometry and normal-mode utilities, connectivity
//!   graphs, file I/O, and the abstraction over external electronic-structure
//!   calculations (`Calculator`).
//!
//! - **[`engine`]: The Logic Core.** The stateful layer holding the TS
//!   candidate, validation configuration, progress reporting and the
//!   individual validation tasks (quick screen, displacement check,
//!   optimization-based linkage).
//!
//! - **[`workflows`]: The Public API.** Escalating-cost validation pipelines
//!   tying the engine tasks together behind two boolean entry points.

pub mod core;
pub mod engine;
pub mod workflows;
