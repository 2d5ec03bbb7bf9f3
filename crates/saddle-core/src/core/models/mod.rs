//! # Core Models Module
//!
//! Data structures describing the molecular species a TS validation reads.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with an element label and Cartesian position
//! - [`structure`] - Ordered atoms plus charge, multiplicity, energy and connectivity
//! - [`bonds`] - Normalized atom-index pairs and the declared bond rearrangement
//!
//! ## Usage
//!
//! ```ignore
//! use saddlecheck::core::models::{atom::Atom, structure::Structure};
//! use nalgebra::Point3;
//!
//! let atoms = vec![
//!     Atom::new("H", Point3::new(0.0, 0.0, 0.0)),
//!     Atom::new("H", Point3::new(0.74, 0.0, 0.0)),
//! ];
//! let mut h2 = Structure::new("h2", atoms, 0, 1);
//! h2.make_graph(0.25);
//! ```

pub mod atom;
pub mod bonds;
pub mod structure;
