use crate::core::utils::elements;
use nalgebra::{Point3, Vector3};

/// Represents a single atom of a molecular structure.
///
/// Only the attributes read by the validation pipeline are carried: the
/// element label (e.g. `"C"`, `"Cl"`) and the Cartesian position in Angstroms.
/// Atom identity across related structures is given by its index in the
/// owning structure, not by any field on the atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element label of the atom (e.g. "C", "H", "Br").
    pub label: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element label and a position.
    ///
    /// # Arguments
    ///
    /// * `label` - The element label. Surrounding whitespace is stripped.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(label: &str, position: Point3<f64>) -> Self {
        Self {
            label: label.trim().to_string(),
            position,
        }
    }

    /// Translates the atom by a displacement vector.
    pub fn translate(&mut self, vec: &Vector3<f64>) {
        self.position += vec;
    }

    /// Returns the standard atomic weight of this atom's element in amu.
    pub fn atomic_weight(&self) -> f64 {
        elements::atomic_weight(&self.label)
    }

    /// Returns the covalent radius of this atom's element in Angstroms.
    pub fn covalent_radius(&self) -> f64 {
        elements::covalent_radius(&self.label)
    }

    /// Distance in Angstroms between this atom and another.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        (self.position - other.position).norm()
    }
}
