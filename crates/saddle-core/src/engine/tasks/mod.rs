//! Individual checks applied to a transition-state candidate.
//!
//! Each submodule implements one stage of imaginary-mode validation, from the
//! cheap frequency screen that only reads a Hessian to the linkage check that
//! optimizes displaced geometries. Stages are composed into pipelines by
//! [`crate::workflows`].

pub mod contribution;
pub mod displacement;
pub mod linkage;
pub mod screen;
pub mod spurious;
