use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileThresholds};
use super::models::AppConfig;
use crate::cli::JobArgs;
use crate::error::{CliError, Result};
use saddlecheck::core::models::bonds::BondRearrangement;
use saddlecheck::engine::config as core_config;
use std::path::{Path, PathBuf};

pub fn build_config(args: &JobArgs) -> Result<AppConfig> {
    let file_config = FileConfig::from_file(&args.config)?;
    let base_dir = args
        .config
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    merge(args, file_config, &base_dir)
}

fn merge(args: &JobArgs, file_config: FileConfig, base_dir: &Path) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let ts_path = required_path(file_config.ts, "ts", base_dir)?;
    let reactant_path = required_path(file_config.reactant, "reactant", base_dir)?;
    let product_path = required_path(file_config.product, "product", base_dir)?;
    let hessian_path = file_config.hessian.map(|p| resolve_path(base_dir, p));

    let results_dir = match &args.results_dir {
        Some(dir) => dir.clone(),
        None => resolve_path(
            base_dir,
            file_config.results_dir.unwrap_or(defaults.results_dir),
        ),
    };

    let rearrangement_file = file_config.bond_rearrangement.ok_or_else(|| {
        CliError::Config("job file requires a `[bond-rearrangement]` table".to_string())
    })?;
    let bond_rearrangement =
        BondRearrangement::new(rearrangement_file.forming, rearrangement_file.breaking)
            .map_err(|e| CliError::Config(e.to_string()))?;

    let methods = file_config.methods.unwrap_or_default();
    let high_method = methods
        .high
        .unwrap_or_default()
        .resolve(args.high_method.as_deref(), &defaults.high_method);
    let low_method = methods
        .low
        .unwrap_or_default()
        .resolve(args.low_method.as_deref(), &defaults.low_method);

    let thresholds = file_config.thresholds.unwrap_or_default();
    let core_config = build_core_config(args, thresholds, file_config.n_cores)?;

    Ok(AppConfig {
        name: file_config.name.unwrap_or(defaults.ts_name),
        ts_path,
        reactant_path,
        product_path,
        hessian_path,
        results_dir,
        charge: file_config.charge.unwrap_or(defaults.charge),
        mult: file_config.mult.unwrap_or(defaults.mult),
        bond_rearrangement,
        point_charges: file_config
            .point_charges
            .into_iter()
            .map(Into::into)
            .collect(),
        high_method,
        low_method,
        core_config,
    })
}

fn build_core_config(
    args: &JobArgs,
    thresholds: FileThresholds,
    file_n_cores: Option<usize>,
) -> Result<core_config::ValidationConfig> {
    let mut builder = core_config::ValidationConfigBuilder::new();

    if let Some(v) = args.freq_threshold.or(thresholds.freq_threshold) {
        builder = builder.freq_threshold(v);
    }
    if let Some(v) = args
        .contribution_threshold
        .or(thresholds.contribution_threshold)
    {
        builder = builder.contribution_threshold(v);
    }
    if let Some(v) = args
        .displacement_magnitude
        .or(thresholds.displacement_magnitude)
    {
        builder = builder.displacement_magnitude(v);
    }
    if let Some(v) = thresholds.linkage_displacement_magnitude {
        builder = builder.linkage_displacement_magnitude(v);
    }
    if let Some(v) = args.bond_delta_threshold.or(thresholds.bond_delta_threshold) {
        builder = builder.bond_delta_threshold(v);
    }
    if let Some(v) = thresholds.spurious_bond_tolerance {
        builder = builder.spurious_bond_tolerance(v);
    }
    if let Some(v) = thresholds.graph_tolerance {
        builder = builder.graph_tolerance(v);
    }
    if let Some(n) = args.n_cores.or(file_n_cores) {
        builder = builder.n_cores(n);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

fn required_path(value: Option<PathBuf>, key: &str, base_dir: &Path) -> Result<PathBuf> {
    value
        .map(|p| resolve_path(base_dir, p))
        .ok_or_else(|| CliError::Config(format!("job file requires `{}`", key)))
}

fn resolve_path(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const JOB: &str = r#"
ts = "ts.xyz"
reactant = "structures/reactant.xyz"
product = "/abs/product.xyz"
mult = 2

[bond-rearrangement]
forming = [[0, 1]]
breaking = [[1, 2]]

[methods.high]
hess-keywords = ["Freq"]

[thresholds]
freq-threshold = -100.0
contribution-threshold = 0.2
graph-tolerance = 0.2
linkage-displacement-magnitude = 0.6

[[point-charges]]
charge = -1.0
position = [6.0, 0.0, 0.0]
"#;

    fn args(config: PathBuf) -> JobArgs {
        JobArgs {
            config,
            results_dir: None,
            high_method: None,
            low_method: None,
            freq_threshold: None,
            contribution_threshold: None,
            displacement_magnitude: None,
            bond_delta_threshold: None,
            n_cores: None,
        }
    }

    fn write_job(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn file_values_override_defaults() {
        let (dir, path) = write_job(JOB);
        let config = build_config(&args(path)).unwrap();

        assert_eq!(config.name, "ts_guess");
        assert_eq!(config.ts_path, dir.path().join("ts.xyz"));
        assert_eq!(config.reactant_path, dir.path().join("structures/reactant.xyz"));
        assert_eq!(config.product_path, PathBuf::from("/abs/product.xyz"));
        assert_eq!(config.results_dir, dir.path().join("results"));
        assert!(config.hessian_path.is_none());
        assert_eq!(config.charge, 0);
        assert_eq!(config.mult, 2);

        assert_eq!(config.high_method.name, "orca");
        assert_eq!(config.high_method.hess_keywords, vec!["Freq"]);
        assert_eq!(config.low_method.name, "xtb");

        assert_eq!(config.core_config.freq_threshold, -100.0);
        assert_eq!(config.core_config.contribution_threshold, 0.2);
        assert_eq!(config.core_config.graph_tolerance, 0.2);
        assert_eq!(config.core_config.bond_delta_threshold, 0.3);
        assert_eq!(config.core_config.displacement_magnitude, 1.0);
        assert_eq!(config.core_config.linkage_displacement_magnitude, 0.6);
        assert_eq!(config.point_charges.len(), 1);
        assert_eq!(config.point_charges[0].charge, -1.0);
        assert_eq!(config.bond_rearrangement.active_atoms().len(), 3);
    }

    #[test]
    fn cli_values_override_file() {
        let (_dir, path) = write_job(JOB);
        let mut cli = args(path);
        cli.freq_threshold = Some(-75.0);
        cli.high_method = Some("gaussian".to_string());
        cli.results_dir = Some(PathBuf::from("/tmp/archives"));
        cli.n_cores = Some(16);

        let config = build_config(&cli).unwrap();
        assert_eq!(config.core_config.freq_threshold, -75.0);
        assert_eq!(config.core_config.contribution_threshold, 0.2);
        assert_eq!(config.core_config.n_cores, 16);
        assert_eq!(config.high_method.name, "gaussian");
        assert_eq!(config.high_method.hess_keywords, vec!["Freq"]);
        assert_eq!(config.results_dir, PathBuf::from("/tmp/archives"));
    }

    #[test]
    fn missing_structure_is_a_config_error() {
        let (_dir, path) = write_job(
            "ts = \"ts.xyz\"\nreactant = \"r.xyz\"\n[bond-rearrangement]\nforming = [[0, 1]]\n",
        );
        let result = build_config(&args(path));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("product")));
    }

    #[test]
    fn invalid_rearrangement_is_a_config_error() {
        let (_dir, path) = write_job(
            "ts = \"t.xyz\"\nreactant = \"r.xyz\"\nproduct = \"p.xyz\"\n[bond-rearrangement]\nforming = [[0, 1]]\nbreaking = [[1, 0]]\n",
        );
        assert!(matches!(build_config(&args(path)), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_threshold_is_a_config_error() {
        let (_dir, path) = write_job(JOB);
        let mut cli = args(path);
        cli.freq_threshold = Some(50.0);
        assert!(matches!(build_config(&cli), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_job_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = build_config(&args(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
