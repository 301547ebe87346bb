//! Fixed-step time integrator for the gravity sandbox
//!
//! Semi-implicit (symplectic) Euler: kick every massive body with the summed
//! force, then drift every body with its updated velocity.

use super::states::{Body, NVec2};
use super::forces::ForceSet;

/// Advance `bodies` by `dt`.
///
/// Zero-mass bodies are never kicked (there is no `F / m` for them) but still
/// drift with the velocity they already have.
pub fn symplectic_euler(bodies: &mut [Body], forces: &ForceSet, dt: f64) {
    let n = bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let mut f = vec![NVec2::zeros(); n];
    forces.accumulate_forces(bodies, &mut f);

    // Kick: v_n+1 = v_n + dt * F_n / m
    for (b, f) in bodies.iter_mut().zip(f.iter()) {
        let m = b.mass();
        if m != 0.0 {
            b.velocity += *f * (dt / m);
        }
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    for b in bodies.iter_mut() {
        b.position += b.velocity * dt;
    }
}
