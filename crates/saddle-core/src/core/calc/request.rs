use super::method::{CalculationKind, Method};
use crate::core::models::structure::Structure;
use nalgebra::Point3;

/// A fixed point charge surrounding the QM region, e.g. from explicit solvent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    pub charge: f64,
    pub position: Point3<f64>,
}

impl PointCharge {
    pub fn new(charge: f64, position: Point3<f64>) -> Self {
        Self { charge, position }
    }
}

/// Everything an external calculator needs to run one calculation.
#[derive(Debug, Clone)]
pub struct CalculationRequest<'a> {
    /// Unique calculation name; calculators may use it to locate outputs.
    pub name: String,
    pub kind: CalculationKind,
    pub structure: &'a Structure,
    pub method: &'a Method,
    /// Number of cores the calculation may use.
    pub n_cores: usize,
    /// Point charges embedding the structure. Empty for gas-phase or
    /// implicit-solvent calculations.
    pub point_charges: &'a [PointCharge],
}

impl<'a> CalculationRequest<'a> {
    pub fn hessian(
        name: String,
        structure: &'a Structure,
        method: &'a Method,
        n_cores: usize,
        point_charges: &'a [PointCharge],
    ) -> Self {
        Self {
            name,
            kind: CalculationKind::Hessian,
            structure,
            method,
            n_cores,
            point_charges,
        }
    }

    pub fn optimization(
        name: String,
        structure: &'a Structure,
        method: &'a Method,
        n_cores: usize,
    ) -> Self {
        Self {
            name,
            kind: CalculationKind::Optimization,
            structure,
            method,
            n_cores,
            point_charges: &[],
        }
    }

    /// Method keywords matching the kind of this request.
    pub fn keywords(&self) -> &'a [String] {
        self.method.keywords(self.kind)
    }
}
