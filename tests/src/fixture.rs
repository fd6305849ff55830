//! A model holding one three-variable point.

use conic_constraint::Point3;
use conic_core::Domain;
use conic_expr::Assignment;
use conic_model::{Model, ModelConfig};

/// Model with variables `x`, `y` (reals) and `z` (caller-chosen domain).
pub struct ConeFixture {
    pub model: Model,
    pub point: Point3,
}

impl ConeFixture {
    pub fn new(z_domain: Domain) -> Self {
        Self::with_config(z_domain, ModelConfig::default())
    }

    pub fn with_config(z_domain: Domain, config: ModelConfig) -> Self {
        let mut model = Model::with_config("fixture", config).expect("valid config");
        let x = model.add_var("x", Domain::Reals).expect("fresh name");
        let y = model.add_var("y", Domain::Reals).expect("fresh name");
        let z = model.add_var("z", z_domain).expect("fresh name");
        Self {
            model,
            point: Point3::new(x, y, z),
        }
    }

    /// Assignment placing the point at `(x, y, z)`.
    pub fn at(&self, x: f64, y: f64, z: f64) -> Assignment {
        Assignment::new()
            .with(&self.point.x, x)
            .with(&self.point.y, y)
            .with(&self.point.z, z)
    }
}
