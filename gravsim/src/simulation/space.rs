//! The simulation space: owned bodies, the step loop and the viewport.
//!
//! Bodies keep insertion order and are addressed from outside by `BodyId`.
//! Indices stay valid only until the next removal; ids stay valid until that
//! body is removed.

use log::{debug, trace};

use crate::error::{GravError, Result};
use super::collision::{self, resolve_collisions};
use super::forces::ForceSet;
use super::integrator::symplectic_euler;
use super::params::Parameters;
use super::states::{Body, BodyId, NVec2};
use super::viewport::Viewport;

pub struct Space {
    bodies: Vec<Body>, // insertion order
    ids: Vec<BodyId>, // ids[i] names bodies[i]
    next_id: u64,
    forces: ForceSet,
    parameters: Parameters,
    pub viewport: Viewport,
    pub t: f64, // simulated time
}

impl Default for Space {
    fn default() -> Self {
        Self::new()
    }
}

impl Space {
    pub fn new() -> Self {
        Self::with_parameters(Parameters::default())
    }

    pub fn with_parameters(parameters: Parameters) -> Self {
        Self {
            bodies: Vec::new(),
            ids: Vec::new(),
            next_id: 0,
            forces: ForceSet::gravity(&parameters),
            parameters,
            viewport: Viewport::default(),
            t: 0.0,
        }
    }

    /// Replace the force terms (gravity is registered by default)
    pub fn with_forces(mut self, forces: ForceSet) -> Self {
        self.forces = forces;
        self
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    // =========================================================================================
    // Physics
    // =========================================================================================

    /// Advance every body by `dt`: gravity kick, drift, then one collision pass
    pub fn step(&mut self, dt: f64) {
        symplectic_euler(&mut self.bodies, &self.forces, dt);
        let resolved = resolve_collisions(&mut self.bodies, self.parameters.min_separation);
        if resolved > 0 {
            trace!("t = {:.4}: {} collision(s) resolved", self.t, resolved);
        }
        self.t += dt;
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        collision::total_momentum(&self.bodies)
    }

    // =========================================================================================
    // Collection
    // =========================================================================================

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        debug!("adding body {} (radius {}, density {})", id, body.radius(), body.density());
        self.bodies.push(body);
        self.ids.push(id);
        self.refresh_view_velocity();
        id
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<Body> {
        let index = self.index_of(id).ok_or(GravError::UnknownBody(id))?;
        self.ids.remove(index);
        let body = self.bodies.remove(index);
        debug!("removed body {}", id);
        self.refresh_view_velocity();
        Ok(body)
    }

    /// Drop every body; the viewport stays where it is
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.ids.clear();
        self.viewport.velocity = NVec2::zeros();
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: NVec2) -> Result<()> {
        let index = self.index_of(id).ok_or(GravError::UnknownBody(id))?;
        self.bodies[index].velocity = velocity;
        self.refresh_view_velocity();
        Ok(())
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn id_at(&self, index: usize) -> Option<BodyId> {
        self.ids.get(index).copied()
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        // ids are pushed in increasing order and removal keeps that order
        self.ids.binary_search(&id).ok()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.ids.iter().copied().zip(self.bodies.iter())
    }

    // =========================================================================================
    // Queries
    // =========================================================================================

    /// First body (in insertion order) whose disk contains `point`
    pub fn body_at(&self, point: NVec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.contains(&point))
            .map(|i| self.ids[i])
    }

    /// `candidate` would overlap an existing body
    pub fn collides_with(&self, candidate: &Body) -> bool {
        self.bodies.iter().any(|b| b.does_collide(candidate))
    }

    // =========================================================================================
    // Viewport
    // =========================================================================================

    pub fn scale(&mut self, factor: f64, focus: NVec2) {
        self.viewport.scale(factor, focus);
    }

    pub fn move_view(&mut self, delta: NVec2) {
        self.viewport.move_view(delta);
    }

    pub fn enlargement(&self) -> f64 {
        self.viewport.enlargement()
    }

    pub fn to_space(&self, on_view: NVec2, width: f64, height: f64) -> NVec2 {
        self.viewport.to_space(on_view, width, height)
    }

    pub fn to_view(&self, on_space: NVec2, width: f64, height: f64) -> NVec2 {
        self.viewport.to_view(on_space, width, height)
    }

    /// Centre the view on the body closest to the current centre
    pub fn go_to_nearest_body(&mut self) -> Option<BodyId> {
        let index = self.viewport.go_to_nearest(self.bodies.iter())?;
        Some(self.ids[index])
    }

    /// Recompute the follow drift from the current bodies
    pub fn refresh_view_velocity(&mut self) {
        self.viewport.velocity = Viewport::follow_velocity(self.bodies.iter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::Force;
    use approx::assert_relative_eq;

    fn body_at(x: f64, y: f64) -> Body {
        Body::new(NVec2::new(x, y), 10, 100)
    }

    #[test]
    fn ids_survive_removal_of_other_bodies() {
        let mut space = Space::new();
        let a = space.add_body(body_at(0.0, 0.0));
        let b = space.add_body(body_at(100.0, 0.0));
        let c = space.add_body(body_at(200.0, 0.0));

        let removed = space.remove_body(a).unwrap();
        assert_eq!(removed.position, NVec2::new(0.0, 0.0));
        assert_eq!(space.len(), 2);
        assert_eq!(space.body(b).unwrap().position.x, 100.0);
        assert_eq!(space.body(c).unwrap().position.x, 200.0);
        assert_eq!(space.index_of(c), Some(1));
        assert!(space.body(a).is_none());
    }

    #[test]
    fn stale_id_is_an_error() {
        let mut space = Space::new();
        let a = space.add_body(body_at(0.0, 0.0));
        space.remove_body(a).unwrap();

        assert!(matches!(space.remove_body(a), Err(GravError::UnknownBody(id)) if id == a));
        assert!(space.set_velocity(a, NVec2::new(1.0, 0.0)).is_err());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut space = Space::new();
        let a = space.add_body(body_at(0.0, 0.0));
        space.clear();
        let b = space.add_body(body_at(0.0, 0.0));
        assert_ne!(a, b);
        assert!(space.body(a).is_none());
    }

    #[test]
    fn body_at_returns_first_container() {
        let mut space = Space::new();
        let first = space.add_body(body_at(0.0, 0.0));
        let _second = space.add_body(body_at(5.0, 0.0));

        assert_eq!(space.body_at(NVec2::new(3.0, 0.0)), Some(first));
        assert_eq!(space.body_at(NVec2::new(500.0, 0.0)), None);
    }

    #[test]
    fn placement_check_against_all_bodies() {
        let mut space = Space::new();
        space.add_body(body_at(0.0, 0.0));
        space.add_body(body_at(100.0, 0.0));

        assert!(space.collides_with(&body_at(85.0, 0.0)));
        assert!(!space.collides_with(&body_at(50.0, 0.0)));
    }

    #[test]
    fn step_advances_time() {
        let mut space = Space::new();
        space.add_body(body_at(0.0, 0.0));
        space.step(0.25);
        space.step(0.25);
        assert_eq!(space.t, 0.5);
    }

    /// Same force on every body
    struct Uniform(NVec2);

    impl Force for Uniform {
        fn force(&self, bodies: &[Body], out: &mut [NVec2]) {
            for (f, _) in out.iter_mut().zip(bodies) {
                *f += self.0;
            }
        }
    }

    #[test]
    fn custom_force_set_replaces_gravity() {
        let mut space = Space::new().with_forces(ForceSet::new().with(Uniform(NVec2::new(0.0, 125.0))));
        let a = space.add_body(body_at(0.0, 0.0));
        let b = space.add_body(body_at(100.0, 0.0));
        let m = space.body(a).unwrap().mass();

        space.step(1.0);

        // no mutual attraction, only the uniform push
        for id in [a, b] {
            let v = space.body(id).unwrap().velocity;
            assert_eq!(v.x, 0.0);
            assert_relative_eq!(v.y, 125.0 / m, max_relative = 1e-12);
        }
    }

    #[test]
    fn totals_and_index_lookup() {
        let mut space = Space::new();
        assert_eq!(space.total_mass(), 0.0);
        assert_eq!(space.id_at(0), None);

        let a = space.add_body(body_at(0.0, 0.0));
        let b = space.add_body(Body::new(NVec2::new(100.0, 0.0), 8, 0));
        let c = space.add_body(Body::new(NVec2::new(200.0, 0.0), 8, 64));
        assert_eq!(space.total_mass(), 156.25 + 0.0 + 64.0);

        space.remove_body(b).unwrap();
        assert_eq!(space.id_at(0), Some(a));
        assert_eq!(space.id_at(1), Some(c));
        assert_eq!(space.id_at(2), None);
        assert_eq!(space.total_mass(), 156.25 + 64.0);
    }

    #[test]
    fn go_to_nearest_on_empty_space() {
        let mut space = Space::new();
        space.move_view(NVec2::new(4.0, 4.0));
        assert_eq!(space.go_to_nearest_body(), None);
        assert_eq!(space.viewport.position, NVec2::new(4.0, 4.0));
    }
}
