use crate::core::calc::calculation::Calculation;
use crate::core::calc::method::Method;
use crate::core::calc::traits::{Calculator, ConformerGenerator};
use crate::engine::candidate::TsCandidate;
use crate::engine::context::ValidationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::tasks;
use std::fmt;
use tracing::{info, instrument, warn};

/// The validation stage that settled a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Screen,
    Displacement,
    Linkage,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Screen => "Screen",
            Stage::Displacement => "Displacement",
            Stage::Linkage => "Linkage",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub decided_by: Stage,
    /// Imaginary frequencies of the calculation used, most negative first.
    pub imag_freqs: Vec<f64>,
}

impl ValidationReport {
    fn new(valid: bool, decided_by: Stage, candidate: &TsCandidate) -> Self {
        Self {
            valid,
            decided_by,
            imag_freqs: candidate
                .calc
                .as_ref()
                .map(Calculation::imag_freqs)
                .unwrap_or_default(),
        }
    }
}

/// Runs the quick imaginary-mode screen and reports the verdict.
///
/// A Hessian is calculated at `method` and attached if the candidate has no
/// calculation yet.
#[instrument(skip_all, name = "screen_workflow", fields(name = %candidate.name()))]
pub fn screen<C, G>(
    candidate: &mut TsCandidate,
    context: &ValidationContext<'_, C, G>,
    method: &Method,
) -> Result<ValidationReport, EngineError>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    context.reporter.report(Progress::StageStart {
        name: Stage::Screen.name(),
    });
    let screened = tasks::screen::run(candidate, context, method);
    context.reporter.report(Progress::StageFinish);
    let valid = screened?;

    Ok(ValidationReport::new(valid, Stage::Screen, candidate))
}

/// Whether the candidate could have the intended imaginary mode, judged from
/// a Hessian calculation alone.
pub fn could_have_correct_imag_mode<C, G>(
    candidate: &mut TsCandidate,
    context: &ValidationContext<'_, C, G>,
    method: &Method,
) -> Result<bool, EngineError>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    screen(candidate, context, method).map(|report| report.valid)
}

/// Runs the full imaginary-mode validation.
///
/// A supplied `calc` replaces the candidate's attached calculation. The
/// stages run cheapest first: a failed screen rejects the candidate, a
/// passed displacement check accepts it, and otherwise the linkage check
/// decides.
///
/// # Errors
///
/// Returns an [`EngineError`] only for inconsistent data, such as a
/// calculation whose atom count differs from the candidate's.
#[instrument(skip_all, name = "validation_workflow", fields(name = %candidate.name()))]
pub fn run<C, G>(
    candidate: &mut TsCandidate,
    calc: Option<Calculation>,
    context: &ValidationContext<'_, C, G>,
    method: &Method,
) -> Result<ValidationReport, EngineError>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    if let Some(calc) = calc {
        candidate.attach_calculation(calc)?;
    }

    // === Stage 1: Quick screen ===
    let report = screen(candidate, context, method)?;
    if !report.valid {
        warn!("Species does not have the correct imaginary mode.");
        return Ok(report);
    }

    let Some(calc) = candidate.calc.as_ref() else {
        return Err(EngineError::Internal(
            "screen finished without attaching a calculation".to_string(),
        ));
    };

    // === Stage 2: Displacement check ===
    context.reporter.report(Progress::StageStart {
        name: Stage::Displacement.name(),
    });
    let displaced = tasks::displacement::run(calc, &candidate.bond_rearrangement, context.config);
    context.reporter.report(Progress::StageFinish);
    if displaced? {
        info!("Displacement of the active atoms along the imaginary mode forms and breaks the correct bonds.");
        return Ok(ValidationReport::new(true, Stage::Displacement, candidate));
    }

    // === Stage 3: Optimization-based linkage ===
    context.reporter.report(Progress::StageStart {
        name: Stage::Linkage.name(),
    });
    let linked = tasks::linkage::run(
        calc,
        &mut candidate.reactant,
        &mut candidate.product,
        context,
        method,
    );
    context.reporter.report(Progress::StageFinish);
    let linked = linked?;

    if linked {
        info!("Imaginary mode links reactants and products.");
    } else {
        warn!("Species does not have the correct imaginary mode.");
    }
    Ok(ValidationReport::new(linked, Stage::Linkage, candidate))
}

/// Whether the candidate has the intended imaginary mode.
///
/// Boolean form of [`run`].
pub fn has_correct_imag_mode<C, G>(
    candidate: &mut TsCandidate,
    calc: Option<Calculation>,
    context: &ValidationContext<'_, C, G>,
    method: &Method,
) -> Result<bool, EngineError>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    run(candidate, calc, context, method).map(|report| report.valid)
}
