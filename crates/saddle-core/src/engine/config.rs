use crate::core::graph::DEFAULT_REL_TOLERANCE;
use thiserror::Error;

pub const DEFAULT_FREQ_THRESHOLD: f64 = -50.0;
pub const DEFAULT_CONTRIBUTION_THRESHOLD: f64 = 0.1;
pub const DEFAULT_DISPLACEMENT_MAGNITUDE: f64 = 1.0;
pub const DEFAULT_LINKAGE_DISPLACEMENT_MAGNITUDE: f64 = 1.0;
pub const DEFAULT_BOND_DELTA_THRESHOLD: f64 = 0.3;
pub const DEFAULT_SPURIOUS_BOND_TOLERANCE: f64 = 0.3;
pub const DEFAULT_N_CORES: usize = 1;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Thresholds and tolerances used by the validation tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    /// The most negative imaginary frequency must lie below this value (cm⁻¹).
    pub freq_threshold: f64,
    /// Minimum relative contribution of the active atoms to the imaginary mode.
    pub contribution_threshold: f64,
    /// Scale factor applied to the imaginary mode when displacing the TS.
    pub displacement_magnitude: f64,
    /// Scale factor for the displaced starting points of the linkage optimizations.
    pub linkage_displacement_magnitude: f64,
    /// Minimum change in a forming/breaking bond length (Å) on displacement.
    pub bond_delta_threshold: f64,
    /// Relative bond tolerance used when looking for unwanted bonds.
    pub spurious_bond_tolerance: f64,
    /// Relative bond tolerance used for ordinary connectivity graphs.
    pub graph_tolerance: f64,
    /// Cores requested for each external calculation.
    pub n_cores: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            freq_threshold: DEFAULT_FREQ_THRESHOLD,
            contribution_threshold: DEFAULT_CONTRIBUTION_THRESHOLD,
            displacement_magnitude: DEFAULT_DISPLACEMENT_MAGNITUDE,
            linkage_displacement_magnitude: DEFAULT_LINKAGE_DISPLACEMENT_MAGNITUDE,
            bond_delta_threshold: DEFAULT_BOND_DELTA_THRESHOLD,
            spurious_bond_tolerance: DEFAULT_SPURIOUS_BOND_TOLERANCE,
            graph_tolerance: DEFAULT_REL_TOLERANCE,
            n_cores: DEFAULT_N_CORES,
        }
    }
}

/// Builds a [`ValidationConfig`]; any value not set keeps its default.
#[derive(Default)]
pub struct ValidationConfigBuilder {
    freq_threshold: Option<f64>,
    contribution_threshold: Option<f64>,
    displacement_magnitude: Option<f64>,
    linkage_displacement_magnitude: Option<f64>,
    bond_delta_threshold: Option<f64>,
    spurious_bond_tolerance: Option<f64>,
    graph_tolerance: Option<f64>,
    n_cores: Option<usize>,
}

impl ValidationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn freq_threshold(mut self, threshold: f64) -> Self {
        self.freq_threshold = Some(threshold);
        self
    }
    pub fn contribution_threshold(mut self, threshold: f64) -> Self {
        self.contribution_threshold = Some(threshold);
        self
    }
    pub fn displacement_magnitude(mut self, magnitude: f64) -> Self {
        self.displacement_magnitude = Some(magnitude);
        self
    }
    pub fn linkage_displacement_magnitude(mut self, magnitude: f64) -> Self {
        self.linkage_displacement_magnitude = Some(magnitude);
        self
    }
    pub fn bond_delta_threshold(mut self, threshold: f64) -> Self {
        self.bond_delta_threshold = Some(threshold);
        self
    }
    pub fn spurious_bond_tolerance(mut self, tolerance: f64) -> Self {
        self.spurious_bond_tolerance = Some(tolerance);
        self
    }
    pub fn graph_tolerance(mut self, tolerance: f64) -> Self {
        self.graph_tolerance = Some(tolerance);
        self
    }
    pub fn n_cores(mut self, n: usize) -> Self {
        self.n_cores = Some(n);
        self
    }

    pub fn build(self) -> Result<ValidationConfig, ConfigError> {
        let defaults = ValidationConfig::default();
        let config = ValidationConfig {
            freq_threshold: self.freq_threshold.unwrap_or(defaults.freq_threshold),
            contribution_threshold: self
                .contribution_threshold
                .unwrap_or(defaults.contribution_threshold),
            displacement_magnitude: self
                .displacement_magnitude
                .unwrap_or(defaults.displacement_magnitude),
            linkage_displacement_magnitude: self
                .linkage_displacement_magnitude
                .unwrap_or(defaults.linkage_displacement_magnitude),
            bond_delta_threshold: self
                .bond_delta_threshold
                .unwrap_or(defaults.bond_delta_threshold),
            spurious_bond_tolerance: self
                .spurious_bond_tolerance
                .unwrap_or(defaults.spurious_bond_tolerance),
            graph_tolerance: self.graph_tolerance.unwrap_or(defaults.graph_tolerance),
            n_cores: self.n_cores.unwrap_or(defaults.n_cores),
        };
        config.validate()?;
        Ok(config)
    }
}

impl ValidationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name, value, reason| {
            Err(ConfigError::InvalidParameter {
                name,
                value,
                reason,
            })
        };

        if !self.freq_threshold.is_finite() || self.freq_threshold > 0.0 {
            return invalid(
                "freq_threshold",
                self.freq_threshold,
                "must be a finite, non-positive frequency",
            );
        }
        if !(0.0..1.0).contains(&self.contribution_threshold) {
            return invalid(
                "contribution_threshold",
                self.contribution_threshold,
                "must lie in [0, 1)",
            );
        }
        for (name, value) in [
            ("displacement_magnitude", self.displacement_magnitude),
            (
                "linkage_displacement_magnitude",
                self.linkage_displacement_magnitude,
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(name, value, "must be positive");
            }
        }
        for (name, value) in [
            ("bond_delta_threshold", self.bond_delta_threshold),
            ("spurious_bond_tolerance", self.spurious_bond_tolerance),
            ("graph_tolerance", self.graph_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(name, value, "must be non-negative");
            }
        }
        if self.n_cores == 0 {
            return invalid("n_cores", 0.0, "at least one core is required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_overrides_yields_defaults() {
        let config = ValidationConfigBuilder::new().build().unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.freq_threshold, -50.0);
        assert_eq!(config.contribution_threshold, 0.1);
        assert_eq!(config.displacement_magnitude, 1.0);
        assert_eq!(config.linkage_displacement_magnitude, 1.0);
        assert_eq!(config.bond_delta_threshold, 0.3);
        assert_eq!(config.spurious_bond_tolerance, 0.3);
        assert_eq!(config.graph_tolerance, 0.25);
        assert_eq!(config.n_cores, 1);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = ValidationConfigBuilder::new()
            .freq_threshold(-100.0)
            .contribution_threshold(0.2)
            .displacement_magnitude(0.5)
            .linkage_displacement_magnitude(0.8)
            .bond_delta_threshold(0.1)
            .spurious_bond_tolerance(0.4)
            .graph_tolerance(0.2)
            .n_cores(8)
            .build()
            .unwrap();

        assert_eq!(config.freq_threshold, -100.0);
        assert_eq!(config.contribution_threshold, 0.2);
        assert_eq!(config.displacement_magnitude, 0.5);
        assert_eq!(config.linkage_displacement_magnitude, 0.8);
        assert_eq!(config.bond_delta_threshold, 0.1);
        assert_eq!(config.spurious_bond_tolerance, 0.4);
        assert_eq!(config.graph_tolerance, 0.2);
        assert_eq!(config.n_cores, 8);
    }

    #[test]
    fn build_rejects_positive_frequency_threshold() {
        let result = ValidationConfigBuilder::new().freq_threshold(10.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "freq_threshold",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_out_of_range_values() {
        assert!(ValidationConfigBuilder::new()
            .contribution_threshold(1.0)
            .build()
            .is_err());
        assert!(ValidationConfigBuilder::new()
            .displacement_magnitude(0.0)
            .build()
            .is_err());
        assert!(ValidationConfigBuilder::new()
            .linkage_displacement_magnitude(-1.0)
            .build()
            .is_err());
        assert!(ValidationConfigBuilder::new()
            .spurious_bond_tolerance(-0.1)
            .build()
            .is_err());
        assert!(ValidationConfigBuilder::new().n_cores(0).build().is_err());
    }
}
