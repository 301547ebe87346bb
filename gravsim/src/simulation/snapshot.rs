//! Serializable state bundle for surviving a restart
//!
//! A flat record per body plus the viewport. Body ids are not stored: a
//! restored space hands out fresh ids in the saved order.
//!
//! ```yaml
//! view_x: 0.0
//! view_y: 0.0
//! zoom: 0.0
//! bodies:
//!   - radius: 10
//!     density: 500
//!     position: [ -50.0, 0.0 ]
//!     velocity: [ 0.0, 0.0 ]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use super::params::Parameters;
use super::space::Space;
use super::states::{Body, NVec2};
use super::viewport::Viewport;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub radius: u32,
    pub density: u32,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpaceSnapshot {
    pub view_x: f64,
    pub view_y: f64,
    pub zoom: f64,
    pub bodies: Vec<BodyRecord>,
}

impl From<&Body> for BodyRecord {
    fn from(b: &Body) -> Self {
        Self {
            radius: b.radius(),
            density: b.density(),
            position: [b.position.x, b.position.y],
            velocity: [b.velocity.x, b.velocity.y],
        }
    }
}

impl From<&BodyRecord> for Body {
    fn from(r: &BodyRecord) -> Self {
        Body::new(NVec2::new(r.position[0], r.position[1]), r.radius, r.density)
            .with_velocity(NVec2::new(r.velocity[0], r.velocity[1]))
    }
}

impl SpaceSnapshot {
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_yaml::to_writer(&mut writer, self)?;
        writer.flush()?;
        info!("saved {} bodies to {}", self.bodies.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let snapshot: SpaceSnapshot = serde_yaml::from_reader(reader)?;
        info!("loaded {} bodies from {}", snapshot.bodies.len(), path.display());
        Ok(snapshot)
    }
}

impl Space {
    pub fn snapshot(&self) -> SpaceSnapshot {
        SpaceSnapshot {
            view_x: self.viewport.position.x,
            view_y: self.viewport.position.y,
            zoom: self.viewport.zoom_level,
            bodies: self.bodies().iter().map(BodyRecord::from).collect(),
        }
    }

    pub fn from_snapshot(snapshot: &SpaceSnapshot, parameters: Parameters) -> Self {
        let mut space = Space::with_parameters(parameters);
        for record in &snapshot.bodies {
            space.add_body(Body::from(record));
        }
        space.viewport = Viewport::new(NVec2::new(snapshot.view_x, snapshot.view_y), snapshot.zoom);
        space.refresh_view_velocity();
        space
    }
}
