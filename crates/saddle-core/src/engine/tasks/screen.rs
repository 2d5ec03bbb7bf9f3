use super::contribution;
use crate::core::calc::calculation::Calculation;
use crate::core::calc::method::Method;
use crate::core::calc::traits::{Calculator, ConformerGenerator};
use crate::engine::candidate::TsCandidate;
use crate::engine::config::ValidationConfig;
use crate::engine::context::ValidationContext;
use crate::engine::error::EngineError;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// Quick screen of a candidate's imaginary mode.
///
/// Runs a Hessian calculation at `method` if none is attached and attaches
/// it, then checks the attached calculation with [`evaluate`]. An attached
/// calculation is used as-is.
#[instrument(skip_all, name = "screen_task", fields(name = %candidate.name()))]
pub fn run<C, G>(
    candidate: &mut TsCandidate,
    context: &ValidationContext<'_, C, G>,
    method: &Method,
) -> Result<bool, EngineError>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    let calc = match candidate.calc.take() {
        Some(calc) => calc,
        None => candidate.run_hessian(context, method),
    };
    let calc = candidate.calc.insert(calc);

    evaluate(
        calc,
        candidate.bond_rearrangement.active_atoms(),
        context.config,
    )
}

/// Decides from a Hessian calculation alone whether the candidate could have
/// the intended imaginary mode.
///
/// The most negative frequency must lie below the frequency threshold and the
/// active atoms must contribute enough to the primary imaginary mode. Several
/// imaginary frequencies are logged but do not fail the screen.
pub fn evaluate(
    calc: &Calculation,
    active_atoms: &BTreeSet<usize>,
    config: &ValidationConfig,
) -> Result<bool, EngineError> {
    let imag_freqs = calc.imag_freqs();

    let Some(&most_negative) = imag_freqs.first() else {
        warn!(calc = %calc.name, "Hessian had no imaginary modes.");
        return Ok(false);
    };

    if imag_freqs.len() > 1 {
        warn!(
            calc = %calc.name,
            count = imag_freqs.len(),
            "Hessian had more than one imaginary mode; using the most negative."
        );
    }

    if most_negative > config.freq_threshold {
        warn!(
            frequency = most_negative,
            threshold = config.freq_threshold,
            "Imaginary mode is too small to be significant."
        );
        return Ok(false);
    }

    if !contribution::run(calc, active_atoms, config.contribution_threshold)? {
        warn!("Species does not have the correct imaginary mode.");
        return Ok(false);
    }

    info!(frequency = most_negative, "Species could have the correct imaginary mode.");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calc::request::PointCharge;
    use crate::engine::config::ValidationConfigBuilder;
    use crate::engine::progress::ProgressReporter;
    use crate::engine::testing::{
        self, CountingConformers, GOOD_MODE, HESSIAN_NAME, ScriptedCalculator,
    };
    use nalgebra::Point3;

    fn screen_with(calculator: &ScriptedCalculator, candidate: &mut TsCandidate) -> bool {
        let config = ValidationConfig::default();
        let reporter = ProgressReporter::new();
        let low = Method::new("xtb");
        let conformers = CountingConformers::default();
        let context = ValidationContext::new(calculator, &conformers, &low, &config, &reporter);
        run(candidate, &context, &Method::new("orca")).unwrap()
    }

    fn screen_frequencies(frequencies: &[f64]) -> bool {
        let calculator = ScriptedCalculator::new()
            .with(HESSIAN_NAME, testing::hessian_output(frequencies, GOOD_MODE));
        let mut candidate = testing::candidate();
        screen_with(&calculator, &mut candidate)
    }

    #[test]
    fn no_imaginary_frequency_fails() {
        assert!(!screen_frequencies(&[120.0, 340.5, 1600.0]));
        assert!(!screen_frequencies(&[]));
    }

    #[test]
    fn imaginary_frequency_above_threshold_fails() {
        assert!(!screen_frequencies(&[-40.0, 120.0]));
        assert!(!screen_frequencies(&[-49.99, 120.0]));
    }

    #[test]
    fn imaginary_frequency_below_threshold_passes() {
        assert!(screen_frequencies(&[-80.0, 120.0]));
        assert!(screen_frequencies(&[-50.0, 120.0]));
    }

    #[test]
    fn several_imaginary_frequencies_still_screen_the_primary_mode() {
        assert!(screen_frequencies(&[-30.0, -800.0, 120.0]));
    }

    #[test]
    fn missing_hessian_is_run_and_attached() {
        let calculator = ScriptedCalculator::new()
            .with(HESSIAN_NAME, testing::hessian_output(&[-800.0], GOOD_MODE));
        let mut candidate = testing::candidate();

        assert!(screen_with(&calculator, &mut candidate));
        assert_eq!(calculator.calls(), vec![HESSIAN_NAME.to_string()]);
        let calc = candidate.calc.as_ref().unwrap();
        assert_eq!(calc.name, HESSIAN_NAME);
        assert_eq!(calc.input.name, testing::TS_NAME);
    }

    #[test]
    fn hessian_request_carries_the_point_charges() {
        let calculator = ScriptedCalculator::new()
            .with(HESSIAN_NAME, testing::hessian_output(&[-800.0], GOOD_MODE));
        let charges = vec![
            PointCharge::new(-0.834, Point3::new(6.0, 0.0, 0.0)),
            PointCharge::new(0.417, Point3::new(6.6, 0.8, 0.0)),
        ];
        let mut candidate = testing::candidate().with_point_charges(charges.clone());

        assert!(screen_with(&calculator, &mut candidate));
        let requests = calculator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].point_charges, charges);
        assert_eq!(requests[0].structure.atoms, testing::ts_atoms());
    }

    #[test]
    fn attached_calculation_is_reused() {
        let calculator = ScriptedCalculator::new();
        let mut candidate = testing::candidate();
        candidate
            .attach_calculation(testing::hessian_calc(Some(testing::hessian_output(
                &[-800.0],
                GOOD_MODE,
            ))))
            .unwrap();

        assert!(screen_with(&calculator, &mut candidate));
        assert!(calculator.calls().is_empty());
    }

    #[test]
    fn failed_hessian_is_a_negative_verdict() {
        let calculator = ScriptedCalculator::new();
        let mut candidate = testing::candidate();

        assert!(!screen_with(&calculator, &mut candidate));
        let calc = candidate.calc.as_ref().unwrap();
        assert!(calc.output.is_none());
    }

    #[test]
    fn repeated_screens_agree_without_recalculating() {
        let calculator = ScriptedCalculator::new()
            .with(HESSIAN_NAME, testing::hessian_output(&[-800.0], GOOD_MODE));
        let mut candidate = testing::candidate();

        let first = screen_with(&calculator, &mut candidate);
        let second = screen_with(&calculator, &mut candidate);
        assert_eq!(first, second);
        assert_eq!(calculator.calls().len(), 1);
    }

    #[test]
    fn evaluate_fails_on_low_active_contribution() {
        let calc = testing::hessian_calc(Some(testing::hessian_output(&[-800.0], GOOD_MODE)));
        let strict = ValidationConfigBuilder::new()
            .contribution_threshold(0.2)
            .build()
            .unwrap();

        assert!(!evaluate(&calc, &BTreeSet::from([1]), &strict).unwrap());
        assert!(evaluate(&calc, &BTreeSet::from([1]), &ValidationConfig::default()).unwrap());
    }

    #[test]
    fn evaluate_respects_custom_frequency_threshold() {
        let calc = testing::hessian_calc(Some(testing::hessian_output(&[-80.0], GOOD_MODE)));
        let strict = ValidationConfigBuilder::new()
            .freq_threshold(-100.0)
            .build()
            .unwrap();
        let active = BTreeSet::from([0, 1, 2]);

        assert!(!evaluate(&calc, &active, &strict).unwrap());
        assert!(evaluate(&calc, &active, &ValidationConfig::default()).unwrap());
    }
}
