use super::displacement::displaced_structure;
use crate::core::calc::calculation::{Calculation, ModeNumber};
use crate::core::calc::method::Method;
use crate::core::calc::request::CalculationRequest;
use crate::core::calc::traits::{Calculator, ConformerGenerator};
use crate::core::models::structure::Structure;
use crate::engine::context::ValidationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use tracing::{error, info, instrument, warn};

/// Optimizes `structure` in place at `method`.
///
/// On success the atoms and energy are replaced by the optimized ones and the
/// graph is rebuilt. On failure the graph is cleared, so the structure
/// matches nothing.
fn optimise<C, G>(
    structure: &mut Structure,
    context: &ValidationContext<'_, C, G>,
    method: &Method,
    name: String,
) where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    let calc = context.run_calculation(&CalculationRequest::optimization(
        name,
        structure,
        method,
        context.config.n_cores,
    ));

    match calc.final_atoms() {
        Ok(atoms) => {
            structure.set_atoms(atoms.to_vec());
            structure.energy = calc.energy();
            structure.make_graph(context.config.graph_tolerance);
        }
        Err(e) => {
            error!(structure = %structure.name, "Displaced optimization failed: {}", e);
            structure.graph = None;
        }
    }
}

/// Whether the optimized displaced structures are the reactant and product,
/// in either assignment.
pub fn links_reactant_and_product(
    forward: &Structure,
    backward: &Structure,
    reactant: &Structure,
    product: &Structure,
) -> bool {
    if forward.atoms.is_empty() || backward.atoms.is_empty() {
        warn!("Atoms not set in the displaced structures; cannot check isomorphism.");
        return false;
    }

    if backward.is_isomorphic_to(reactant) && forward.is_isomorphic_to(product) {
        info!("Forward displacement leads to products and backward to reactants.");
        return true;
    }
    if forward.is_isomorphic_to(reactant) && backward.is_isomorphic_to(product) {
        info!("Backward displacement leads to products and forward to reactants.");
        return true;
    }
    false
}

/// Whether the primary imaginary mode links the reactant and product.
///
/// Both displaced geometries are optimized at `method` and compared with the
/// reactant and product by graph isomorphism. If they do not match, both are
/// re-optimized at the context's low-level method and compared once more.
/// Conformers of the reactant and product are populated first but do not
/// enter the comparison.
#[instrument(skip_all, name = "linkage_task", fields(calc = %calc.name))]
pub fn run<C, G>(
    calc: &Calculation,
    reactant: &mut Structure,
    product: &mut Structure,
    context: &ValidationContext<'_, C, G>,
    method: &Method,
) -> Result<bool, EngineError>
where
    C: Calculator + ?Sized,
    G: ConformerGenerator + ?Sized,
{
    info!("Displacing along the imaginary mode to check it links reactants and products.");

    context.conformers.populate_conformers(reactant);
    context.conformers.populate_conformers(product);
    reactant.ensure_graph(context.config.graph_tolerance);
    product.ensure_graph(context.config.graph_tolerance);

    let magnitude = context.config.linkage_displacement_magnitude;
    let mode = ModeNumber::PRIMARY_IMAGINARY;
    let forward = displaced_structure(calc, mode, magnitude, &format!("{}_forwards", calc.name))?;
    let backward =
        displaced_structure(calc, mode, -magnitude, &format!("{}_backwards", calc.name))?;
    let (Some(mut forward), Some(mut backward)) = (forward, backward) else {
        return Ok(false);
    };

    for structure in [&mut forward, &mut backward] {
        let name = structure.name.clone();
        optimise(structure, context, method, name);
    }
    if links_reactant_and_product(&forward, &backward, reactant, product) {
        return Ok(true);
    }

    // The two levels of theory need not share minima.
    context.reporter.report(Progress::Message(format!(
        "Re-optimizing displaced structures with {}",
        context.low_method
    )));
    for structure in [&mut forward, &mut backward] {
        let name = format!("{}_ll_opt", structure.name);
        optimise(structure, context, context.low_method, name);
    }
    if links_reactant_and_product(&forward, &backward, reactant, product) {
        return Ok(true);
    }

    let edges = |s: &Structure| s.graph.as_ref().map(|g| g.edges());
    info!(forward_edges = ?edges(&forward), backward_edges = ?edges(&backward), "Displaced structures do not link reactants and products.");
    Ok(false)
}
