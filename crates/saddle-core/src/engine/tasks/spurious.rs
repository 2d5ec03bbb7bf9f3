use crate::core::graph::{self, MolecularGraph};
use crate::core::models::bonds::{BondPair, BondRearrangement};
use crate::core::models::structure::Structure;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Bonds present in `displaced` but absent from `ts` that are not part of
/// the declared rearrangement.
pub fn unexpected_bonds(
    ts: &MolecularGraph,
    displaced: &MolecularGraph,
    rearrangement: &BondRearrangement,
) -> BTreeSet<BondPair> {
    displaced
        .edges_not_in(ts)
        .into_iter()
        .filter(|bond| !rearrangement.all().contains(bond))
        .collect()
}

/// Whether displacing along the mode creates bonds outside the rearrangement.
///
/// Graphs for the TS and both displaced structures are rebuilt with
/// `rel_tolerance`, normally looser than the ordinary graph tolerance so that
/// large displacements do not hide a new contact. The structures' own graphs
/// are left untouched.
pub fn generates_other_bonds(
    ts: &Structure,
    forward: &Structure,
    backward: &Structure,
    rearrangement: &BondRearrangement,
    rel_tolerance: f64,
) -> bool {
    let ts_graph = graph::build_graph(&ts.atoms, rel_tolerance);

    for displaced in [forward, backward] {
        let displaced_graph = graph::build_graph(&displaced.atoms, rel_tolerance);
        let unexpected = unexpected_bonds(&ts_graph, &displaced_graph, rearrangement);
        if !unexpected.is_empty() {
            warn!(
                structure = %displaced.name,
                new_bonds = ?displaced_graph.edges_not_in(&ts_graph),
                rearrangement = ?rearrangement.all(),
                "Displacement forms bonds that are not part of the rearrangement."
            );
            return true;
        }
    }

    info!("Imaginary mode does not generate any other unwanted bonds.");
    false
}
