use crate::core::models::atom::Atom;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GeometryError {
    #[error("Cannot displace {atoms} atoms along a mode with {vectors} displacement vectors")]
    LengthMismatch { atoms: usize, vectors: usize },
}

/// Displaces every atom along a normal mode.
///
/// Each atom `i` is translated by `magnitude * displacements[i]`. The input
/// atoms are left untouched.
///
/// # Arguments
///
/// * `atoms` - Atoms to displace.
/// * `displacements` - Per-atom normal-mode displacement vectors.
/// * `magnitude` - Scale factor; negative values displace backwards.
///
/// # Errors
///
/// Returns [`GeometryError::LengthMismatch`] if the number of displacement
/// vectors differs from the number of atoms.
pub fn displace_along_mode(
    atoms: &[Atom],
    displacements: &[Vector3<f64>],
    magnitude: f64,
) -> Result<Vec<Atom>, GeometryError> {
    if atoms.len() != displacements.len() {
        return Err(GeometryError::LengthMismatch {
            atoms: atoms.len(),
            vectors: displacements.len(),
        });
    }

    Ok(atoms
        .iter()
        .zip(displacements)
        .map(|(atom, disp)| {
            let mut displaced = atom.clone();
            displaced.translate(&(disp * magnitude));
            displaced
        })
        .collect())
}
