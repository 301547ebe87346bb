//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – frame driver options (sub-steps, frame interval, follow mode)
//! - [`ParametersConfig`] – physical constant and coincidence guard (optional)
//! - [`ViewportConfig`]   – initial view centre and zoom (optional)
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   sub_steps: 64           # fixed steps per frame
//!   frame_interval: 1.0     # simulated seconds per frame
//!   follow_objects: false   # view drifts with the bodies
//!
//! parameters:
//!   G: 1.0                  # gravitational constant
//!   min_separation: 1.0e-9  # centres closer than this count as coincident
//!
//! viewport:
//!   x: 0.0
//!   y: 0.0
//!   zoom: 0.0               # ln of the enlargement
//!
//! bodies:
//!   - x: [ -50.0, 0.0 ]
//!     v: [   0.0, 0.0 ]
//!     radius: 10
//!     density: 500
//!   - x: [  50.0, 0.0 ]
//!     v: [   0.0, 0.0 ]
//!     radius: 10
//!     density: 500
//! ```
//!
//! [`ScenarioConfig::validate`] applies the placement rules the interactive
//! front end used to enforce before a body was accepted.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GravError, Result};
use crate::simulation::engine::DEFAULT_SUB_STEPS;
use crate::simulation::states::{Body, NVec2};

/// Largest density a body may be given
pub const MAX_DENSITY: u32 = 1000;

fn default_sub_steps() -> u32 {
    DEFAULT_SUB_STEPS
}

fn default_frame_interval() -> f64 {
    1.0
}

/// Frame driver configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_sub_steps")]
    pub sub_steps: u32, // fixed steps per displayed frame
    #[serde(default = "default_frame_interval")]
    pub frame_interval: f64, // simulated seconds per frame
    #[serde(default)]
    pub follow_objects: bool, // view drifts with the mass-weighted mean velocity
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sub_steps: default_sub_steps(),
            frame_interval: default_frame_interval(),
            follow_objects: false,
        }
    }
}

/// Physical parameters; every field falls back to the sandbox default
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ParametersConfig {
    pub G: Option<f64>, // gravitational constant
    pub min_separation: Option<f64>, // coincidence guard
}

/// Initial view
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ViewportConfig {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub zoom: f64, // ln of the enlargement
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial centre `[x, y]` in space units
    #[serde(default)]
    pub v: Option<Vec<f64>>, // Initial velocity `[vx, vy]`, at rest when omitted
    pub radius: u32, // Disk radius, must be positive
    pub density: u32, // 0..=1000; zero makes the body inert to gravity
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // List of bodies that define the initial state of the space
}

fn vec2(index: usize, field: &str, raw: &[f64]) -> Result<NVec2> {
    match raw {
        [x, y] if x.is_finite() && y.is_finite() => Ok(NVec2::new(*x, *y)),
        [_, _] => Err(GravError::InvalidBody {
            index,
            reason: format!("`{field}` must be finite"),
        }),
        _ => Err(GravError::InvalidBody {
            index,
            reason: format!("`{field}` needs 2 components, got {}", raw.len()),
        }),
    }
}

impl BodyConfig {
    /// Check the ranges and build the runtime body
    pub fn to_body(&self, index: usize) -> Result<Body> {
        if self.radius == 0 {
            return Err(GravError::InvalidBody {
                index,
                reason: "radius may not be 0".into(),
            });
        }
        if self.density > MAX_DENSITY {
            return Err(GravError::InvalidBody {
                index,
                reason: format!("density may not be bigger than {MAX_DENSITY}"),
            });
        }
        let x = vec2(index, "x", &self.x)?;
        let v = match &self.v {
            Some(v) => vec2(index, "v", v)?,
            None => NVec2::zeros(),
        };
        Ok(Body::new(x, self.radius, self.density).with_velocity(v))
    }
}

impl ScenarioConfig {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build every body, rejecting bad ranges and overlapping placements
    pub fn validate(&self) -> Result<Vec<Body>> {
        let mut bodies: Vec<Body> = Vec::with_capacity(self.bodies.len());
        for (index, bc) in self.bodies.iter().enumerate() {
            let body = bc.to_body(index)?;
            if let Some(other) = bodies.iter().position(|b| b.does_collide(&body)) {
                return Err(GravError::InvalidBody {
                    index,
                    reason: format!("overlaps body {other}"),
                });
            }
            bodies.push(body);
        }
        Ok(bodies)
    }
}
