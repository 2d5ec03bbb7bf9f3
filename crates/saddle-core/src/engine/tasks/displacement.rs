use super::spurious;
use crate::core::calc::calculation::{Calculation, ModeNumber};
use crate::core::models::bonds::{BondPair, BondRearrangement};
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use crate::engine::config::ValidationConfig;
use crate::engine::error::EngineError;
use tracing::{debug, info, instrument, warn};

/// Displaces the final geometry of a Hessian calculation along a normal mode.
///
/// The displaced structure takes the charge and multiplicity of the
/// calculation's input structure and carries no graph.
///
/// # Return
///
/// Returns `Ok(None)` if the calculation has no final atoms or no
/// displacement vectors for `mode`.
///
/// # Errors
///
/// Returns [`EngineError::Displacement`] if the mode does not have one vector
/// per atom.
pub fn displaced_structure(
    calc: &Calculation,
    mode: ModeNumber,
    magnitude: f64,
    name: &str,
) -> Result<Option<Structure>, EngineError> {
    debug!(calc = %calc.name, %mode, magnitude, "Displacing along normal mode.");

    let atoms = match calc.final_atoms() {
        Ok(atoms) => atoms,
        Err(e) => {
            warn!("Cannot displace along mode {}: {}", mode, e);
            return Ok(None);
        }
    };
    let displacements = match calc.normal_mode_displacements(mode) {
        Ok(displacements) => displacements,
        Err(e) => {
            warn!("Cannot displace along mode {}: {}", mode, e);
            return Ok(None);
        }
    };

    let displaced = geometry::displace_along_mode(atoms, displacements, magnitude)?;
    Ok(Some(Structure::new(
        name,
        displaced,
        calc.input.charge,
        calc.input.mult,
    )))
}

fn pair_distance(structure: &Structure, pair: &BondPair) -> Result<f64, EngineError> {
    structure
        .distance(pair.first(), pair.second())
        .ok_or(EngineError::AtomIndexOutOfRange {
            index: pair.second(),
            n_atoms: structure.n_atoms(),
        })
}

/// Whether every forming bond shortens and every breaking bond lengthens by
/// more than `delta_threshold` going from `ts` to `trial`.
///
/// # Errors
///
/// * [`EngineError::AtomCountMismatch`] if the structures differ in size.
/// * [`EngineError::AtomIndexOutOfRange`] if a bond refers to a missing atom.
pub fn bonds_change_correctly(
    ts: &Structure,
    trial: &Structure,
    rearrangement: &BondRearrangement,
    delta_threshold: f64,
) -> Result<bool, EngineError> {
    if ts.n_atoms() != trial.n_atoms() {
        return Err(EngineError::AtomCountMismatch {
            context: "displaced structure",
            expected: ts.n_atoms(),
            found: trial.n_atoms(),
        });
    }

    let mut correct = Vec::with_capacity(rearrangement.all().len());
    for bond in rearrangement.forming() {
        let shortening = pair_distance(ts, bond)? - pair_distance(trial, bond)?;
        correct.push(shortening > delta_threshold);
    }
    for bond in rearrangement.breaking() {
        let lengthening = pair_distance(trial, bond)? - pair_distance(ts, bond)?;
        correct.push(lengthening > delta_threshold);
    }

    debug!(structure = %trial.name, ?correct, "Forming and breaking bonds with the expected displacement.");
    Ok(correct.iter().all(|&ok| ok))
}

/// Whether displacing along the primary imaginary mode forms and breaks the
/// rearrangement's bonds.
///
/// The TS geometry is the calculation's input. Forward and backward
/// displacements are both tried as the product side; either is accepted.
/// Missing calculation data gives `Ok(false)`.
#[instrument(skip_all, name = "displacement_task", fields(calc = %calc.name))]
pub fn run(
    calc: &Calculation,
    rearrangement: &BondRearrangement,
    config: &ValidationConfig,
) -> Result<bool, EngineError> {
    info!("Checking displacement along the imaginary mode forms the correct bonds.");
    let ts = &calc.input;
    let magnitude = config.displacement_magnitude;
    let mode = ModeNumber::PRIMARY_IMAGINARY;

    let forward = displaced_structure(calc, mode, magnitude, "f_displaced")?;
    let backward = displaced_structure(calc, mode, -magnitude, "b_displaced")?;
    let (Some(forward), Some(backward)) = (forward, backward) else {
        return Ok(false);
    };

    if spurious::generates_other_bonds(
        ts,
        &forward,
        &backward,
        rearrangement,
        config.spurious_bond_tolerance,
    ) {
        warn!("Imaginary mode generates bonds that are not active.");
        return Ok(false);
    }

    for trial in [&forward, &backward] {
        if bonds_change_correctly(ts, trial, rearrangement, config.bond_delta_threshold)? {
            info!(structure = %trial.name, "Displacement afforded the correct bond forming and breaking.");
            return Ok(true);
        }
    }

    warn!("Displacement along the imaginary mode did not form and break the correct bonds.");
    Ok(false)
}
