use super::context::ValidationContext;
use super::error::EngineError;
use crate::core::calc::calculation::Calculation;
use crate::core::calc::method::Method;
use crate::core::calc::request::{CalculationRequest, PointCharge};
use crate::core::calc::traits::{Calculator, ConformerGenerator};
use crate::core::models::atom::Atom;
use crate::core::models::bonds::BondRearrangement;
use crate::core::models::structure::Structure;
use tracing::{info, warn};

/// A transition-state guess awaiting validation.
///
/// The TS structure, reactant and product share one atom ordering. The most
/// recent calculation run on the TS is attached in `calc` and is replaced, not
/// merged, whenever a stage runs a new one.
#[derive(Debug, Clone)]
pub struct TsCandidate {
    pub structure: Structure,
    pub reactant: Structure,
    pub product: Structure,
    pub bond_rearrangement: BondRearrangement,
    pub calc: Option<Calculation>,
    /// Point charges embedding the TS in Hessian calculations.
    pub point_charges: Vec<PointCharge>,
}

impl TsCandidate {
    /// Creates a candidate from a TS guess geometry.
    ///
    /// Charge and multiplicity are taken from the reactant. Reactant and
    /// product graphs are built if missing, and the TS starts with a copy of
    /// the reactant graph.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the TS guess; calculation names derive from it.
    /// * `atoms` - TS guess atoms, in the reactant's atom order.
    /// * `reactant` - The reactant structure.
    /// * `product` - The product structure.
    /// * `bond_rearrangement` - Bonds expected to form and break.
    /// * `graph_tolerance` - Relative tolerance for reactant/product graphs.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AtomCountMismatch`] if the three structures do
    /// not have the same number of atoms, and
    /// [`EngineError::AtomIndexOutOfRange`] if the rearrangement refers to a
    /// non-existent atom.
    pub fn new(
        name: &str,
        atoms: Vec<Atom>,
        mut reactant: Structure,
        mut product: Structure,
        bond_rearrangement: BondRearrangement,
        graph_tolerance: f64,
    ) -> Result<Self, EngineError> {
        let n_atoms = atoms.len();
        for (context, structure) in [("reactant", &reactant), ("product", &product)] {
            if structure.n_atoms() != n_atoms {
                return Err(EngineError::AtomCountMismatch {
                    context,
                    expected: n_atoms,
                    found: structure.n_atoms(),
                });
            }
        }
        if let Some(index) = bond_rearrangement.max_atom_index() {
            if index >= n_atoms {
                return Err(EngineError::AtomIndexOutOfRange { index, n_atoms });
            }
        }

        reactant.ensure_graph(graph_tolerance);
        product.ensure_graph(graph_tolerance);

        let mut structure = Structure::new(name, atoms, reactant.charge, reactant.mult);
        warn!(name, "Setting the graph of the TS guess from the reactant.");
        structure.graph = reactant.graph.clone();

        Ok(Self {
            structure,
            reactant,
            product,
            bond_rearrangement,
            calc: None,
            point_charges: Vec::new(),
        })
    }

    pub fn with_point_charges(mut self, point_charges: Vec<PointCharge>) -> Self {
        self.point_charges = point_charges;
        self
    }

    pub fn name(&self) -> &str {
        &self.structure.name
    }

    pub fn n_atoms(&self) -> usize {
        self.structure.n_atoms()
    }

    /// Attaches a calculation run elsewhere, replacing any current one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AtomCountMismatch`] if the calculation was run
    /// on a structure with a different number of atoms.
    pub fn attach_calculation(&mut self, calc: Calculation) -> Result<(), EngineError> {
        if calc.input.n_atoms() != self.n_atoms() {
            return Err(EngineError::AtomCountMismatch {
                context: "attached calculation",
                expected: self.n_atoms(),
                found: calc.input.n_atoms(),
            });
        }
        self.calc = Some(calc);
        Ok(())
    }

    /// Runs a Hessian calculation on the TS geometry without attaching it.
    pub fn run_hessian<C, G>(
        &self,
        context: &ValidationContext<'_, C, G>,
        method: &Method,
    ) -> Calculation
    where
        C: Calculator + ?Sized,
        G: ConformerGenerator + ?Sized,
    {
        info!(name = self.name(), %method, "Calculating the Hessian.");
        let request = CalculationRequest::hessian(
            format!("{}_hess", self.name()),
            &self.structure,
            method,
            context.config.n_cores,
            &self.point_charges,
        );
        context.run_calculation(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calc::method::CalculationKind;
    use crate::core::graph::DEFAULT_REL_TOLERANCE;
    use nalgebra::Point3;

    fn structure(name: &str, xs: &[f64]) -> Structure {
        let atoms = xs
            .iter()
            .map(|&x| Atom::new("H", Point3::new(x, 0.0, 0.0)))
            .collect();
        Structure::new(name, atoms, -1, 2)
    }

    fn rearrangement() -> BondRearrangement {
        BondRearrangement::new([(0, 1)], [(1, 2)]).unwrap()
    }

    #[test]
    fn new_candidate_inherits_reactant_properties() {
        let candidate = TsCandidate::new(
            "ts_guess",
            structure("ts", &[0.0, 1.0, 2.0]).atoms,
            structure("r", &[0.0, 2.0, 2.74]),
            structure("p", &[0.0, 0.74, 2.8]),
            rearrangement(),
            DEFAULT_REL_TOLERANCE,
        )
        .unwrap();

        assert_eq!(candidate.name(), "ts_guess");
        assert_eq!(candidate.structure.charge, -1);
        assert_eq!(candidate.structure.mult, 2);
        assert!(candidate.calc.is_none());
        assert!(candidate.reactant.graph.is_some());
        assert!(candidate.product.graph.is_some());

        let ts_edges = candidate.structure.graph.as_ref().unwrap().edges();
        let reactant_edges = candidate.reactant.graph.as_ref().unwrap().edges();
        assert_eq!(ts_edges, reactant_edges);
    }

    #[test]
    fn new_candidate_rejects_mismatched_atom_counts() {
        let result = TsCandidate::new(
            "ts_guess",
            structure("ts", &[0.0, 1.0, 2.0]).atoms,
            structure("r", &[0.0, 2.0]),
            structure("p", &[0.0, 0.74, 2.8]),
            rearrangement(),
            DEFAULT_REL_TOLERANCE,
        );
        assert!(matches!(
            result,
            Err(EngineError::AtomCountMismatch {
                context: "reactant",
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn new_candidate_rejects_out_of_range_rearrangement() {
        let result = TsCandidate::new(
            "ts_guess",
            structure("ts", &[0.0, 1.0]).atoms,
            structure("r", &[0.0, 2.0]),
            structure("p", &[0.0, 0.74]),
            rearrangement(),
            DEFAULT_REL_TOLERANCE,
        );
        assert!(matches!(
            result,
            Err(EngineError::AtomIndexOutOfRange {
                index: 2,
                n_atoms: 2
            })
        ));
    }

    #[test]
    fn attach_calculation_checks_atom_count() {
        let mut candidate = TsCandidate::new(
            "ts_guess",
            structure("ts", &[0.0, 1.0, 2.0]).atoms,
            structure("r", &[0.0, 2.0, 2.74]),
            structure("p", &[0.0, 0.74, 2.8]),
            rearrangement(),
            DEFAULT_REL_TOLERANCE,
        )
        .unwrap();

        let wrong = Calculation::new(
            "other_hess",
            CalculationKind::Hessian,
            Method::new("orca"),
            structure("other", &[0.0]),
            None,
        );
        assert!(candidate.attach_calculation(wrong).is_err());
        assert!(candidate.calc.is_none());

        let right = Calculation::new(
            "ts_guess_hess",
            CalculationKind::Hessian,
            Method::new("orca"),
            candidate.structure.clone(),
            None,
        );
        candidate.attach_calculation(right).unwrap();
        assert_eq!(candidate.calc.as_ref().unwrap().name, "ts_guess_hess");
    }
}
