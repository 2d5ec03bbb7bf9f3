use super::config::ValidationConfig;
use super::progress::{Progress, ProgressReporter};
use crate::core::calc::calculation::Calculation;
use crate::core::calc::method::Method;
use crate::core::calc::request::CalculationRequest;
use crate::core::calc::traits::{Calculator, ConformerGenerator};

/// Collaborators and settings shared by every task of one validation.
///
/// The high-level method is not part of the context: each entry point takes
/// it explicitly. The low-level method is only used to re-optimize displaced
/// structures when the high-level minima fail to match.
pub struct ValidationContext<'a, C, G>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    pub calculator: &'a C,
    pub conformers: &'a G,
    pub low_method: &'a Method,
    pub config: &'a ValidationConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a, C, G> ValidationContext<'a, C, G>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    pub fn new(
        calculator: &'a C,
        conformers: &'a G,
        low_method: &'a Method,
        config: &'a ValidationConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            calculator,
            conformers,
            low_method,
            config,
            reporter,
        }
    }

    /// Runs one external calculation, blocking until it returns.
    pub fn run_calculation(&self, request: &CalculationRequest<'_>) -> Calculation {
        self.reporter.report(Progress::CalculationStart {
            name: request.name.clone(),
        });
        let calc = Calculation::run(self.calculator, request);
        self.reporter.report(Progress::CalculationFinish);
        calc
    }
}
