//! # Core Module
//!
//! Fundamental building blocks for transition-state validation.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, structures and declared bond rearrangements
//! - **External Calculations** ([`calc`]) - Methods, requests, results and the `Calculator` trait
//! - **Connectivity** ([`graph`]) - Distance-based bond graphs and chemical isomorphism
//! - **File I/O** ([`io`]) - XYZ structures and archived calculation outputs
//! - **Utilities** ([`utils`]) - Element data and normal-mode geometry helpers

pub mod calc;
pub mod graph;
pub mod io;
pub mod models;
pub mod utils;
