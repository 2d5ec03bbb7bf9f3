//! Job configuration: the TOML job file, built-in defaults and command-line
//! overrides, merged with precedence CLI > file > defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
