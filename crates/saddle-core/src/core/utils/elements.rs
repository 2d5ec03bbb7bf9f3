use phf::{Map, phf_map};
use tracing::warn;

/// Atomic weight assumed for labels missing from the table, in amu.
pub const DEFAULT_ATOMIC_WEIGHT: f64 = 70.0;

/// Covalent radius assumed for labels missing from the table, in Angstroms.
pub const DEFAULT_COVALENT_RADIUS: f64 = 1.5;

static ATOMIC_WEIGHTS: Map<&'static str, f64> = phf_map! {
    "H" => 1.008, "He" => 4.003,
    "Li" => 6.941, "Be" => 9.012, "B" => 10.811, "C" => 12.011, "N" => 14.007,
    "O" => 15.999, "F" => 18.998, "Ne" => 20.180,
    "Na" => 22.990, "Mg" => 24.305, "Al" => 26.982, "Si" => 28.086, "P" => 30.974,
    "S" => 32.065, "Cl" => 35.453, "Ar" => 39.948,
    "K" => 39.098, "Ca" => 40.078, "Sc" => 44.956, "Ti" => 47.867, "V" => 50.942,
    "Cr" => 51.996, "Mn" => 54.938, "Fe" => 55.845, "Co" => 58.933, "Ni" => 58.693,
    "Cu" => 63.546, "Zn" => 65.38, "Ga" => 69.723, "Ge" => 72.64, "As" => 74.922,
    "Se" => 78.96, "Br" => 79.904, "Kr" => 83.798,
    "Rb" => 85.468, "Sr" => 87.62, "Pd" => 106.42, "Ag" => 107.868, "Sn" => 118.71,
    "I" => 126.904, "Pt" => 195.084, "Au" => 196.967,
};

static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.31, "He" => 0.28,
    "Li" => 1.28, "Be" => 0.96, "B" => 0.84, "C" => 0.76, "N" => 0.71,
    "O" => 0.66, "F" => 0.57, "Ne" => 0.58,
    "Na" => 1.66, "Mg" => 1.41, "Al" => 1.21, "Si" => 1.11, "P" => 1.07,
    "S" => 1.05, "Cl" => 1.02, "Ar" => 1.06,
    "K" => 2.03, "Ca" => 1.76, "Sc" => 1.70, "Ti" => 1.60, "V" => 1.53,
    "Cr" => 1.39, "Mn" => 1.39, "Fe" => 1.32, "Co" => 1.26, "Ni" => 1.24,
    "Cu" => 1.32, "Zn" => 1.22, "Ga" => 1.22, "Ge" => 1.20, "As" => 1.19,
    "Se" => 1.20, "Br" => 1.20, "Kr" => 1.16,
    "Rb" => 2.20, "Sr" => 1.95, "Pd" => 1.39, "Ag" => 1.45, "Sn" => 1.39,
    "I" => 1.39, "Pt" => 1.36, "Au" => 1.36,
};

/// Normalizes an element label to its table key ("CL" and "cl" become "Cl").
fn normalize(label: &str) -> String {
    let mut chars = label.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Standard atomic weight for an element label in amu.
///
/// Unknown labels fall back to [`DEFAULT_ATOMIC_WEIGHT`].
pub fn atomic_weight(label: &str) -> f64 {
    match ATOMIC_WEIGHTS.get(normalize(label).as_str()) {
        Some(weight) => *weight,
        None => {
            warn!(label, "Unknown element, using default atomic weight.");
            DEFAULT_ATOMIC_WEIGHT
        }
    }
}

/// Single-bond covalent radius for an element label in Angstroms.
///
/// Unknown labels fall back to [`DEFAULT_COVALENT_RADIUS`].
pub fn covalent_radius(label: &str) -> f64 {
    match COVALENT_RADII.get(normalize(label).as_str()) {
        Some(radius) => *radius,
        None => {
            warn!(label, "Unknown element, using default covalent radius.");
            DEFAULT_COVALENT_RADIUS
        }
    }
}
