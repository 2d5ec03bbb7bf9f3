use saddlecheck::core::calc::method::Method;
use saddlecheck::core::calc::request::PointCharge;
use saddlecheck::core::models::bonds::BondRearrangement;
use saddlecheck::engine::config::ValidationConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub name: String,
    pub ts_path: PathBuf,
    pub reactant_path: PathBuf,
    pub product_path: PathBuf,
    pub hessian_path: Option<PathBuf>,
    pub results_dir: PathBuf,
    pub charge: i32,
    pub mult: u32,
    pub bond_rearrangement: BondRearrangement,
    pub point_charges: Vec<PointCharge>,
    pub high_method: Method,
    pub low_method: Method,
    pub core_config: ValidationConfig,
}
