use crate::core::calc::calculation::{Calculation, ModeNumber};
use crate::core::models::atom::Atom;
use crate::engine::error::EngineError;
use nalgebra::Vector3;
use std::collections::BTreeSet;
use tracing::{error, info, instrument, warn};

/// Weight given to one Å of normal-mode displacement relative to one atomic
/// mass unit.
const DISPLACEMENT_WEIGHT: f64 = 10.0;

/// Relative contribution of a set of atoms to a normal mode.
///
/// Each atom is weighted by `atomic_weight + 10 * |displacement|`; the result
/// is the summed weight of `active_atoms` over the summed weight of all atoms.
///
/// # Errors
///
/// * [`EngineError::AtomCountMismatch`] if the mode does not have one vector per atom.
/// * [`EngineError::AtomIndexOutOfRange`] if an active atom does not exist.
pub fn contribution_ratio(
    atoms: &[Atom],
    displacements: &[Vector3<f64>],
    active_atoms: &BTreeSet<usize>,
) -> Result<f64, EngineError> {
    if atoms.len() != displacements.len() {
        return Err(EngineError::AtomCountMismatch {
            context: "normal-mode displacements",
            expected: atoms.len(),
            found: displacements.len(),
        });
    }
    if let Some(&index) = active_atoms.iter().next_back() {
        if index >= atoms.len() {
            return Err(EngineError::AtomIndexOutOfRange {
                index,
                n_atoms: atoms.len(),
            });
        }
    }

    let weights: Vec<f64> = atoms
        .iter()
        .zip(displacements)
        .map(|(atom, disp)| atom.atomic_weight() + DISPLACEMENT_WEIGHT * disp.norm())
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Ok(0.0);
    }
    let active: f64 = active_atoms.iter().map(|&i| weights[i]).sum();
    Ok(active / total)
}

/// Whether the active atoms contribute more than `threshold` to the primary
/// imaginary mode of a Hessian calculation.
///
/// Missing normal modes or final atoms give `Ok(false)`.
#[instrument(skip_all, name = "contribution_task")]
pub fn run(
    calc: &Calculation,
    active_atoms: &BTreeSet<usize>,
    threshold: f64,
) -> Result<bool, EngineError> {
    info!(threshold, "Checking the active atoms contribute to the imaginary mode.");

    let displacements = match calc.normal_mode_displacements(ModeNumber::PRIMARY_IMAGINARY) {
        Ok(displacements) => displacements,
        Err(e) => {
            error!("No imaginary normal mode displacements to analyse: {}", e);
            return Ok(false);
        }
    };
    let atoms = match calc.final_atoms() {
        Ok(atoms) => atoms,
        Err(e) => {
            error!("No final atoms to weight the imaginary mode: {}", e);
            return Ok(false);
        }
    };

    let ratio = contribution_ratio(atoms, displacements, active_atoms)?;
    if ratio > threshold {
        info!(
            contribution = %format!("{:.3}", ratio),
            "Significant contribution from the active atoms to the imaginary mode."
        );
        Ok(true)
    } else {
        warn!(
            contribution = %format!("{:.3}", ratio),
            "No significant contribution from the active atoms to the imaginary mode."
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{self, GOOD_MODE};
    use nalgebra::Point3;

    fn hydrogens(n: usize) -> Vec<Atom> {
        (0..n)
            .map(|i| Atom::new("H", Point3::new(i as f64, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn ratio_weights_mass_and_displacement() {
        let atoms = testing::ts_atoms();
        let disps: Vec<Vector3<f64>> = GOOD_MODE.iter().map(|&v| Vector3::from(v)).collect();

        let ratio = contribution_ratio(&atoms, &disps, &BTreeSet::from([1])).unwrap();
        let h = 1.008 + 10.0 * 0.6;
        let expected = h / (18.998 + h + 35.453);
        assert!((ratio - expected).abs() < 1e-9);

        let all = contribution_ratio(&atoms, &disps, &BTreeSet::from([0, 1, 2])).unwrap();
        assert!((all - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_is_unchanged_by_uniform_scaling_for_uniform_atoms() {
        let atoms = hydrogens(4);
        let active = BTreeSet::from([0, 3]);
        for scale in [0.1, 1.0, 7.5] {
            let disps = vec![
                Vector3::new(scale, 0.0, 0.0),
                Vector3::new(0.0, -scale, 0.0),
                Vector3::new(0.0, 0.0, scale),
                Vector3::new(-scale, 0.0, 0.0),
            ];
            let ratio = contribution_ratio(&atoms, &disps, &active).unwrap();
            assert!((ratio - 0.5).abs() < 1e-12, "scale {scale} gave {ratio}");
        }
    }

    #[test]
    fn ratio_rejects_inconsistent_inputs() {
        let atoms = hydrogens(2);
        let short = vec![Vector3::zeros()];
        assert!(matches!(
            contribution_ratio(&atoms, &short, &BTreeSet::from([0])),
            Err(EngineError::AtomCountMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));

        let disps = vec![Vector3::zeros(); 2];
        assert!(matches!(
            contribution_ratio(&atoms, &disps, &BTreeSet::from([5])),
            Err(EngineError::AtomIndexOutOfRange { index: 5, n_atoms: 2 })
        ));
    }

    #[test]
    fn run_compares_against_threshold() {
        let calc = testing::hessian_calc(Some(testing::hessian_output(&[-800.0], GOOD_MODE)));
        let hydrogen_only = BTreeSet::from([1]);

        assert!(run(&calc, &hydrogen_only, 0.1).unwrap());
        assert!(!run(&calc, &hydrogen_only, 0.2).unwrap());
    }

    #[test]
    fn run_without_normal_modes_is_false() {
        let mut output = testing::hessian_output(&[-800.0], GOOD_MODE);
        output.normal_modes = None;
        let calc = testing::hessian_calc(Some(output));
        assert!(!run(&calc, &BTreeSet::from([0, 1, 2]), 0.1).unwrap());

        let empty = testing::hessian_calc(None);
        assert!(!run(&empty, &BTreeSet::from([0, 1, 2]), 0.1).unwrap());
    }

    #[test]
    fn run_without_final_atoms_is_false() {
        let mut output = testing::hessian_output(&[-800.0], GOOD_MODE);
        output.final_atoms = None;
        let calc = testing::hessian_calc(Some(output));
        assert!(!run(&calc, &BTreeSet::from([0, 1, 2]), 0.1).unwrap());
    }
}
