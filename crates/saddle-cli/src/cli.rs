use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Saddlecheck Developers",
    version,
    about = "Saddlecheck CLI - Validates that the imaginary mode of a transition-state guess links the intended reactant and product.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run only the quick imaginary-mode screen (frequency and active-atom contribution).
    Screen(JobArgs),
    /// Run the full validation: screen, displacement check, then optimization-based linkage.
    Validate(JobArgs),
}

/// Arguments shared by the `screen` and `validate` subcommands.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    // --- Core Arguments ---
    /// Path to the job file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Directory holding archived calculation outputs, one `<name>.toml` per calculation.
    #[arg(short, long, value_name = "PATH")]
    pub results_dir: Option<PathBuf>,

    // --- Method Overrides ---
    /// Override the name of the high-level method.
    #[arg(long, value_name = "NAME")]
    pub high_method: Option<String>,

    /// Override the name of the low-level method used for re-optimization.
    #[arg(long, value_name = "NAME")]
    pub low_method: Option<String>,

    // --- Threshold Overrides ---
    /// Override the imaginary frequency threshold (cm⁻¹, non-positive).
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub freq_threshold: Option<f64>,

    /// Override the minimum relative contribution of the active atoms.
    #[arg(long, value_name = "FLOAT")]
    pub contribution_threshold: Option<f64>,

    /// Override the displacement magnitude along the imaginary mode.
    #[arg(long, value_name = "FLOAT")]
    pub displacement_magnitude: Option<f64>,

    /// Override the bond-length change required for a forming or breaking bond (Å).
    #[arg(long, value_name = "FLOAT")]
    pub bond_delta_threshold: Option<f64>,

    /// Override the number of cores requested for each calculation.
    #[arg(short, long, value_name = "INT")]
    pub n_cores: Option<usize>,
}
