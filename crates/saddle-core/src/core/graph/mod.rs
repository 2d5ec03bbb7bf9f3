//! # Connectivity Graphs
//!
//! Distance-based bond graphs and chemical graph isomorphism.
//!
//! Nodes are atom indices labelled with element symbols; edges are inferred
//! bonds. A bond is assigned between atoms `i` and `j` when their separation
//! is below `(1 + tolerance) * (r_i + r_j)`, with `r` the covalent radius.
//! Graphs carry no bond orders and serve only to compare connectivity.

use crate::core::models::atom::Atom;
use crate::core::models::bonds::BondPair;
use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::BTreeSet;

/// Relative bond-length tolerance used when no other value is requested.
pub const DEFAULT_REL_TOLERANCE: f64 = 0.25;

#[derive(Debug, Clone, Default)]
pub struct MolecularGraph {
    graph: UnGraph<String, ()>,
}

impl MolecularGraph {
    /// Creates a graph with one node per label and no edges.
    pub fn with_nodes<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut graph = UnGraph::default();
        for label in labels {
            graph.add_node(label.to_string());
        }
        Self { graph }
    }

    pub fn n_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn n_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Adds an edge between two atoms. Returns `false` if either atom is not
    /// a node of the graph; adding an existing edge is a no-op.
    pub fn add_edge(&mut self, i: usize, j: usize) -> bool {
        let n = self.n_nodes();
        if i >= n || j >= n || i == j {
            return false;
        }
        let (a, b) = (NodeIndex::new(i), NodeIndex::new(j));
        self.graph.update_edge(a, b, ());
        true
    }

    /// All edges as normalized atom-index pairs.
    pub fn edges(&self) -> BTreeSet<BondPair> {
        self.graph
            .edge_references()
            .map(|e| BondPair::new(e.source().index(), e.target().index()))
            .collect()
    }

    /// Edges present in `self` that are absent from `reference`.
    pub fn edges_not_in(&self, reference: &MolecularGraph) -> BTreeSet<BondPair> {
        let reference_edges = reference.edges();
        self.edges()
            .into_iter()
            .filter(|bond| !reference_edges.contains(bond))
            .collect()
    }
}

impl PartialEq for MolecularGraph {
    /// Node-by-node equality of labels and edges; unlike [`are_isomorphic`]
    /// this respects atom indices.
    fn eq(&self, other: &Self) -> bool {
        self.graph.node_weights().eq(other.graph.node_weights()) && self.edges() == other.edges()
    }
}

/// Builds a connectivity graph from atomic coordinates.
///
/// # Arguments
///
/// * `atoms` - Atoms in index order; node `i` corresponds to `atoms[i]`.
/// * `rel_tolerance` - Relative tolerance applied to the sum of covalent radii.
pub fn build_graph(atoms: &[Atom], rel_tolerance: f64) -> MolecularGraph {
    let mut graph = MolecularGraph::with_nodes(atoms.iter().map(|a| a.label.as_str()));
    let radii: Vec<f64> = atoms.iter().map(Atom::covalent_radius).collect();

    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            let max_length = (1.0 + rel_tolerance) * (radii[i] + radii[j]);
            if atoms[i].distance_to(&atoms[j]) < max_length {
                graph.add_edge(i, j);
            }
        }
    }
    graph
}

/// Whether two graphs describe the same connectivity, matching atoms by
/// element label.
pub fn are_isomorphic(a: &MolecularGraph, b: &MolecularGraph) -> bool {
    if a.n_nodes() != b.n_nodes() || a.n_edges() != b.n_edges() {
        return false;
    }
    is_isomorphic_matching(&a.graph, &b.graph, |x, y| x == y, |_, _| true)
}
