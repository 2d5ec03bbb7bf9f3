use std::path::PathBuf;

/// Values used when neither the command line nor the job file sets them.
///
/// Numeric thresholds are not listed here; they default inside the core
/// `ValidationConfigBuilder`.
pub struct DefaultsConfig {
    pub high_method: String,
    pub low_method: String,
    pub results_dir: PathBuf,
    pub ts_name: String,
    pub charge: i32,
    pub mult: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            high_method: "orca".to_string(),
            low_method: "xtb".to_string(),
            results_dir: PathBuf::from("results"),
            ts_name: "ts_guess".to_string(),
            charge: 0,
            mult: 1,
        }
    }
}
