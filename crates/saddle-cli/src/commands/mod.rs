pub mod screen;
pub mod validate;

use crate::cli::JobArgs;
use crate::config::builder::build_config;
use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use saddlecheck::core::calc::calculation::Calculation;
use saddlecheck::core::calc::method::CalculationKind;
use saddlecheck::core::io::{archive, traits::StructureFile, xyz::XyzFile};
use saddlecheck::core::models::structure::Structure;
use saddlecheck::engine::candidate::TsCandidate;
use saddlecheck::workflows::validate::ValidationReport;
use std::path::Path;
use tracing::info;

fn read_structure(path: &Path) -> Result<Structure> {
    info!("Loading structure from {:?}", path);
    let (structure, _) = XyzFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(structure)
}

/// Loads the job's structures and builds the candidate, attaching an archived
/// Hessian if the job names one.
pub(crate) fn load_job(args: &JobArgs) -> Result<(AppConfig, TsCandidate)> {
    info!("Merging configuration from job file and CLI arguments...");
    let config = build_config(args)?;

    let ts = read_structure(&config.ts_path)?;
    let mut reactant = read_structure(&config.reactant_path)?;
    let mut product = read_structure(&config.product_path)?;
    for structure in [&mut reactant, &mut product] {
        structure.charge = config.charge;
        structure.mult = config.mult;
    }

    let mut candidate = TsCandidate::new(
        &config.name,
        ts.atoms,
        reactant,
        product,
        config.bond_rearrangement.clone(),
        config.core_config.graph_tolerance,
    )?
    .with_point_charges(config.point_charges.clone());

    if let Some(path) = &config.hessian_path {
        info!("Attaching archived Hessian from {:?}", path);
        let output = archive::read_output(path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        let calc = Calculation::new(
            &format!("{}_hess", candidate.name()),
            CalculationKind::Hessian,
            config.high_method.clone(),
            candidate.structure.clone(),
            Some(output),
        );
        candidate.attach_calculation(calc)?;
    }

    Ok((config, candidate))
}

pub(crate) fn print_report(name: &str, report: &ValidationReport) {
    let freqs = report
        .imag_freqs
        .iter()
        .map(|f| format!("{:.1}", f))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Imaginary frequencies (cm⁻¹): [{}]", freqs);

    if report.valid {
        println!(
            "✓ {} has the correct imaginary mode (decided by: {}).",
            name, report.decided_by
        );
    } else {
        println!(
            "✗ {} does not have the correct imaginary mode (rejected by: {}).",
            name, report.decided_by
        );
    }
}
