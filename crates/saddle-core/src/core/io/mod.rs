//! Provides input/output functionality for structures and calculation results.
//!
//! Structures are read and written through the [`traits::StructureFile`]
//! interface ([`xyz`] implements it for the XYZ format). Results of external
//! calculations can be archived as TOML documents and read back with
//! [`archive`], which lets a validation be replayed without rerunning the
//! electronic-structure code.

pub mod archive;
pub mod traits;
pub mod xyz;
