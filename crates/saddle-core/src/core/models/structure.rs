use super::atom::Atom;
use crate::core::graph::{self, MolecularGraph};

/// Represents a molecular species: an ordered list of atoms plus the
/// properties the validation pipeline reads or forwards to calculations.
///
/// The atom order is load-bearing. A TS candidate, its reactant and its
/// product share the same ordering so that an index names the same chemical
/// atom in all three.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Name used to derive calculation names.
    pub name: String,
    /// Ordered atoms of the structure.
    pub atoms: Vec<Atom>,
    /// Total molecular charge.
    pub charge: i32,
    /// Spin multiplicity.
    pub mult: u32,
    /// Energy from the most recent calculation, in Hartrees.
    pub energy: Option<f64>,
    /// Connectivity graph, absent until built or after the atoms change.
    pub graph: Option<MolecularGraph>,
}

impl Structure {
    /// Creates a new structure with no energy or graph.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the structure.
    /// * `atoms` - The ordered atoms.
    /// * `charge` - Total molecular charge.
    /// * `mult` - Spin multiplicity.
    pub fn new(name: &str, atoms: Vec<Atom>, charge: i32, mult: u32) -> Self {
        Self {
            name: name.to_string(),
            atoms,
            charge,
            mult,
            energy: None,
            graph: None,
        }
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Distance in Angstroms between atoms `i` and `j`.
    ///
    /// # Return
    ///
    /// Returns `None` if either index is out of range.
    pub fn distance(&self, i: usize, j: usize) -> Option<f64> {
        let a = self.atoms.get(i)?;
        let b = self.atoms.get(j)?;
        Some(a.distance_to(b))
    }

    /// Replaces the atoms of the structure. Any existing graph is discarded
    /// because it no longer describes the new coordinates.
    pub fn set_atoms(&mut self, atoms: Vec<Atom>) {
        self.atoms = atoms;
        self.graph = None;
    }

    /// Builds and stores the connectivity graph from the current coordinates.
    ///
    /// # Arguments
    ///
    /// * `rel_tolerance` - Relative tolerance on the covalent bond length.
    pub fn make_graph(&mut self, rel_tolerance: f64) -> &MolecularGraph {
        self.graph.insert(graph::build_graph(&self.atoms, rel_tolerance))
    }

    /// Builds the graph only if none is present.
    pub fn ensure_graph(&mut self, rel_tolerance: f64) -> &MolecularGraph {
        self.graph
            .get_or_insert_with(|| graph::build_graph(&self.atoms, rel_tolerance))
    }

    /// Whether this structure has the same connectivity as `other`.
    ///
    /// Structures without atoms or without a graph are never isomorphic to
    /// anything.
    pub fn is_isomorphic_to(&self, other: &Structure) -> bool {
        if self.atoms.is_empty() || other.atoms.is_empty() {
            return false;
        }
        match (&self.graph, &other.graph) {
            (Some(a), Some(b)) => graph::are_isomorphic(a, b),
            _ => false,
        }
    }
}
