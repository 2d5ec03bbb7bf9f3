use super::{load_job, print_report};
use crate::archive::ArchiveCalculator;
use crate::cli::JobArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use saddlecheck::core::calc::traits::NoConformers;
use saddlecheck::engine::context::ValidationContext;
use saddlecheck::engine::progress::ProgressReporter;
use saddlecheck::workflows::validate::{self, ValidationReport};
use tracing::info;

pub fn run(args: JobArgs) -> Result<ValidationReport> {
    let (config, mut candidate) = load_job(&args)?;

    let calculator = ArchiveCalculator::new(&config.results_dir);
    info!("Replaying calculations from {:?}", calculator.results_dir());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let context = ValidationContext::new(
        &calculator,
        &NoConformers,
        &config.low_method,
        &config.core_config,
        &reporter,
    );

    println!("Validating the imaginary mode of {}...", candidate.name());
    info!(
        high = %config.high_method,
        low = %config.low_method,
        "Invoking the core validation workflow..."
    );
    let report = validate::run(&mut candidate, None, &context, &config.high_method)?;

    print_report(candidate.name(), &report);
    Ok(report)
}
