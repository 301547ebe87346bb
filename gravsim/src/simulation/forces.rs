//! Force contributors for the gravity sandbox
//!
//! Defines the `Force` trait, the `ForceSet` that sums registered terms per
//! body, and direct O(n^2) Newtonian gravity.

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Gravity only, configured from `params`
    pub fn gravity(params: &Parameters) -> Self {
        Self::new().with(NewtonianGravity::from(params))
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, bodies: &[Body], out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(bodies, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::gravity(&Parameters::default())
    }
}

/// Force sources operating on a body slice.
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn force(&self, bodies: &[Body], out: &mut [NVec2]);
}

/// Direct-sum Newtonian gravity, no softening.
/// Pairs closer than `min_separation` contribute nothing instead of dividing by zero
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_separation: f64, // coincidence guard
}

impl From<&Parameters> for NewtonianGravity {
    fn from(p: &Parameters) -> Self {
        Self {
            G: p.G,
            min_separation: p.min_separation,
        }
    }
}

impl Force for NewtonianGravity {
    fn force(&self, bodies: &[Body], out: &mut [NVec2]) {
        let n = bodies.len();

        // Each unordered pair once; j feels exactly the opposite of i
        for i in 0..n {
            let bi = &bodies[i];
            for j in (i + 1)..n {
                let f = self.G * bi.gravitational_force_within(&bodies[j], self.min_separation);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pair(dist: f64) -> Vec<Body> {
        vec![
            Body::new(NVec2::new(-dist / 2.0, 0.0), 10, 500),
            Body::new(NVec2::new(dist / 2.0, 0.0), 10, 500),
        ]
    }

    #[test]
    fn newton_third_law() {
        let bodies = pair(100.0);
        let forces = ForceSet::default();
        let mut out = vec![NVec2::zeros(); 2];
        forces.accumulate_forces(&bodies, &mut out);

        assert!(out[0].x > 0.0);
        assert_relative_eq!((out[0] + out[1]).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn gravitational_constant_scales_force() {
        let bodies = pair(50.0);
        let mut unit = vec![NVec2::zeros(); 2];
        let mut doubled = vec![NVec2::zeros(); 2];

        ForceSet::default().accumulate_forces(&bodies, &mut unit);
        let p = Parameters { G: 2.0, ..Parameters::default() };
        ForceSet::gravity(&p).accumulate_forces(&bodies, &mut doubled);

        assert_relative_eq!(doubled[0].x, 2.0 * unit[0].x, max_relative = 1e-12);
    }

    #[test]
    fn inverse_square_law() {
        let mut near = vec![NVec2::zeros(); 2];
        let mut far = vec![NVec2::zeros(); 2];
        let forces = ForceSet::default();
        forces.accumulate_forces(&pair(100.0), &mut near);
        forces.accumulate_forces(&pair(200.0), &mut far);

        assert_relative_eq!(near[0].norm() / far[0].norm(), 4.0, max_relative = 1e-12);
    }

    #[test]
    fn min_separation_below_default_still_attracts() {
        let bodies = pair(1e-10);
        let mut default = vec![NVec2::zeros(); 2];
        let mut fine = vec![NVec2::zeros(); 2];

        ForceSet::default().accumulate_forces(&bodies, &mut default);
        let p = Parameters { min_separation: 1e-12, ..Parameters::default() };
        ForceSet::gravity(&p).accumulate_forces(&bodies, &mut fine);

        assert_eq!(default[0], NVec2::zeros());
        assert!(fine[0].x > 0.0 && fine[0].x.is_finite());
        assert_eq!(fine[0], -fine[1]);
    }

    #[test]
    fn term_count_tracks_registered_forces() {
        assert!(ForceSet::new().is_empty());
        let gravity = ForceSet::default();
        assert_eq!(gravity.len(), 1);
        assert!(!gravity.is_empty());
        let doubled = ForceSet::gravity(&Parameters::default()).with(NewtonianGravity::from(&Parameters::default()));
        assert_eq!(doubled.len(), 2);
    }

    #[test]
    fn coincident_pair_is_skipped() {
        let bodies = pair(0.0);
        let mut out = vec![NVec2::new(7.0, 7.0); 2];
        ForceSet::default().accumulate_forces(&bodies, &mut out);
        assert_eq!(out[0], NVec2::zeros());
        assert_eq!(out[1], NVec2::zeros());
    }
}
