//! Shared fixtures for engine and workflow tests.
//!
//! The model reaction is F + H-Cl -> F-H + Cl on the x axis with atoms
//! ordered F (0), H (1), Cl (2). The F-H bond forms and the H-Cl bond breaks.

use super::candidate::TsCandidate;
use crate::core::calc::calculation::{Calculation, CalculationOutput};
use crate::core::calc::error::CalculationError;
use crate::core::calc::method::{CalculationKind, Method};
use crate::core::calc::request::{CalculationRequest, PointCharge};
use crate::core::calc::traits::{Calculator, ConformerGenerator};
use crate::core::graph::DEFAULT_REL_TOLERANCE;
use crate::core::models::atom::Atom;
use crate::core::models::bonds::BondRearrangement;
use crate::core::models::structure::Structure;
use nalgebra::{Point3, Vector3};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub(crate) const TS_NAME: &str = "ts_guess";
pub(crate) const HESSIAN_NAME: &str = "ts_guess_hess";

/// H moves towards F by 0.6 Å per unit displacement.
pub(crate) const GOOD_MODE: [[f64; 3]; 3] = [[0.0; 3], [-0.6, 0.0, 0.0], [0.0; 3]];
/// H moves by only 0.2 Å, below the default bond-change threshold.
pub(crate) const SOFT_MODE: [[f64; 3]; 3] = [[0.0; 3], [-0.2, 0.0, 0.0], [0.0; 3]];
/// Cl also collapses onto F, creating an F-Cl bond.
pub(crate) const SPURIOUS_MODE: [[f64; 3]; 3] =
    [[0.0; 3], [-0.6, 0.0, 0.0], [-1.0, 0.0, 0.0]];

pub(crate) fn fhcl(h_x: f64, cl_x: f64) -> Vec<Atom> {
    vec![
        Atom::new("F", Point3::new(0.0, 0.0, 0.0)),
        Atom::new("H", Point3::new(h_x, 0.0, 0.0)),
        Atom::new("Cl", Point3::new(cl_x, 0.0, 0.0)),
    ]
}

pub(crate) fn ts_atoms() -> Vec<Atom> {
    fhcl(1.3, 2.9)
}

/// Separated F and H-Cl.
pub(crate) fn reactant_atoms() -> Vec<Atom> {
    fhcl(3.0, 4.27)
}

/// F-H and separated Cl.
pub(crate) fn product_atoms() -> Vec<Atom> {
    fhcl(0.92, 4.0)
}

pub(crate) fn reactant() -> Structure {
    Structure::new("reactant", reactant_atoms(), 0, 2)
}

pub(crate) fn product() -> Structure {
    Structure::new("product", product_atoms(), 0, 2)
}

pub(crate) fn rearrangement() -> BondRearrangement {
    BondRearrangement::new([(0, 1)], [(1, 2)]).unwrap()
}

pub(crate) fn candidate() -> TsCandidate {
    TsCandidate::new(
        TS_NAME,
        ts_atoms(),
        reactant(),
        product(),
        rearrangement(),
        DEFAULT_REL_TOLERANCE,
    )
    .unwrap()
}

/// Six zero-frequency modes followed by `mode6`.
pub(crate) fn normal_modes(mode6: [[f64; 3]; 3]) -> Vec<Vec<Vector3<f64>>> {
    let mut modes = vec![vec![Vector3::zeros(); 3]; 6];
    modes.push(mode6.iter().map(|&v| Vector3::from(v)).collect());
    modes
}

pub(crate) fn hessian_output(frequencies: &[f64], mode6: [[f64; 3]; 3]) -> CalculationOutput {
    CalculationOutput {
        frequencies: Some(frequencies.to_vec()),
        normal_modes: Some(normal_modes(mode6)),
        final_atoms: Some(ts_atoms()),
        energy: Some(-560.1),
    }
}

pub(crate) fn optimised_output(atoms: Vec<Atom>) -> CalculationOutput {
    CalculationOutput {
        final_atoms: Some(atoms),
        energy: Some(-560.2),
        ..Default::default()
    }
}

/// A finished Hessian calculation on the TS geometry.
pub(crate) fn hessian_calc(output: Option<CalculationOutput>) -> Calculation {
    Calculation::new(
        HESSIAN_NAME,
        CalculationKind::Hessian,
        Method::new("orca"),
        Structure::new(TS_NAME, ts_atoms(), 0, 2),
        output,
    )
}

/// A calculation request as seen by [`ScriptedCalculator`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) name: String,
    pub(crate) structure: Structure,
    pub(crate) point_charges: Vec<PointCharge>,
}

/// Replays canned outputs keyed by calculation name and records every request.
#[derive(Default)]
pub(crate) struct ScriptedCalculator {
    outputs: HashMap<String, CalculationOutput>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedCalculator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, name: &str, output: CalculationOutput) -> Self {
        self.outputs.insert(name.to_string(), output);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.name.clone()).collect()
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn respond(&self, request: &CalculationRequest<'_>) -> Result<CalculationOutput, CalculationError> {
        self.requests.borrow_mut().push(RecordedRequest {
            name: request.name.clone(),
            structure: request.structure.clone(),
            point_charges: request.point_charges.to_vec(),
        });
        self.outputs
            .get(&request.name)
            .cloned()
            .ok_or_else(|| CalculationError::NoCalculationOutput(request.name.clone()))
    }
}

impl Calculator for ScriptedCalculator {
    fn run_hessian(
        &self,
        request: &CalculationRequest<'_>,
    ) -> Result<CalculationOutput, CalculationError> {
        self.respond(request)
    }

    fn run_optimization(
        &self,
        request: &CalculationRequest<'_>,
    ) -> Result<CalculationOutput, CalculationError> {
        self.respond(request)
    }
}

/// Counts conformer requests per structure name.
#[derive(Default)]
pub(crate) struct CountingConformers {
    total: Cell<usize>,
    names: RefCell<Vec<String>>,
}

impl CountingConformers {
    pub(crate) fn total(&self) -> usize {
        self.total.get()
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.names.borrow().clone()
    }
}

impl ConformerGenerator for CountingConformers {
    fn populate_conformers(&self, structure: &mut Structure) {
        self.total.set(self.total.get() + 1);
        self.names.borrow_mut().push(structure.name.clone());
    }
}
