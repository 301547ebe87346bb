//! Core state types for the gravity sandbox.
//!
//! - `Body`   one circular mass: fixed radius/density, mutable position/velocity
//! - `BodyId` stable handle handed out by a `Space`
//!
//! Mass is derived, never stored: `density * radius^2 / 64`.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Empirical scaling between `density * radius^2` and mass
pub const MASS_SCALE: f64 = 64.0;

/// Below this separation two centres are treated as coincident
pub const COINCIDENCE_EPS: f64 = 1e-9;

/// Stable identifier of a body inside one `Space`.
/// Ids are never reused, so a removed body's id stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u64);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    radius: u32, // fixed at creation
    density: u32, // fixed at creation, 0..=1000 by convention
    pub position: NVec2, // centre in space coordinates
    pub velocity: NVec2, // space units per second
}

impl Body {
    /// New body at rest at `position`
    pub fn new(position: NVec2, radius: u32, density: u32) -> Self {
        Self {
            radius,
            density,
            position,
            velocity: NVec2::zeros(),
        }
    }

    /// Builder-style initial velocity
    pub fn with_velocity(mut self, velocity: NVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn density(&self) -> u32 {
        self.density
    }

    pub fn mass(&self) -> f64 {
        let r = self.radius as f64;
        self.density as f64 * r * r / MASS_SCALE
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn momentum(&self) -> NVec2 {
        self.mass() * self.velocity
    }

    /// Force exerted on `self` by `other` (G = 1).
    ///
    /// `d / |d|^3` keeps the direction from `self` toward `other` while giving
    /// the inverse-square magnitude `m_a * m_b / r^2`. Coincident centres have
    /// no direction, so the force is zero there instead of a division by zero.
    pub fn gravitational_force(&self, other: &Body) -> NVec2 {
        self.gravitational_force_within(other, COINCIDENCE_EPS)
    }

    /// Same as [`Body::gravitational_force`] with an explicit coincidence
    /// threshold: zero force when the centres are closer than `min_separation`.
    pub fn gravitational_force_within(&self, other: &Body, min_separation: f64) -> NVec2 {
        let d = other.position - self.position;
        let r = d.norm();
        if r < min_separation || r == 0.0 {
            return NVec2::zeros();
        }
        d * (self.mass() * other.mass() / (r * r * r))
    }

    /// Disks touch or overlap
    pub fn does_collide(&self, other: &Body) -> bool {
        let reach = self.radius as f64 + other.radius as f64;
        (self.position - other.position).norm() <= reach
    }

    /// `point` lies inside or on the disk
    pub fn contains(&self, point: &NVec2) -> bool {
        let r = self.radius as f64;
        (self.position - point).norm_squared() <= r * r
    }
}
