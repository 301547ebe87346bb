//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant (`G`, fixed at 1 for the sandbox)
//! - separation below which two centres count as coincident

use crate::simulation::states::COINCIDENCE_EPS;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub min_separation: f64, // coincidence guard for force and collision axes
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 1.0,
            min_separation: COINCIDENCE_EPS,
        }
    }
}
