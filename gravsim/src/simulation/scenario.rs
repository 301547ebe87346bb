//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - the populated `Space` at t = 0, viewport included

use log::info;

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::snapshot::SpaceSnapshot;
use crate::simulation::space::Space;
use crate::simulation::states::NVec2;
use crate::simulation::viewport::Viewport;

/// Runtime bundle driven frame by frame by the binary
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub space: Space,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        // Engine (runtime) from EngineConfig
        let e_cfg = &cfg.engine;
        let engine = Engine::new(e_cfg.sub_steps, e_cfg.frame_interval, e_cfg.follow_objects)?;

        // Parameters (runtime) from ParametersConfig, gaps filled by defaults
        let defaults = Parameters::default();
        let parameters = Parameters {
            G: cfg.parameters.G.unwrap_or(defaults.G),
            min_separation: cfg.parameters.min_separation.unwrap_or(defaults.min_separation),
        };

        // Bodies: validated `BodyConfig`s, added in file order
        let mut space = Space::with_parameters(parameters.clone());
        for body in cfg.validate()? {
            space.add_body(body);
        }
        let v = &cfg.viewport;
        space.viewport = Viewport::new(NVec2::new(v.x, v.y), v.zoom);
        space.refresh_view_velocity();

        info!(
            "scenario built: {} bodies, {} sub-steps per frame, dt = {}",
            space.len(),
            engine.sub_steps,
            engine.dt()
        );

        Ok(Self {
            engine,
            parameters,
            space,
        })
    }

    /// Swap the space for a restored snapshot, keeping engine and parameters
    pub fn restore(&mut self, snapshot: &SpaceSnapshot) {
        self.space = Space::from_snapshot(snapshot, self.parameters.clone());
        info!("restored {} bodies from snapshot", self.space.len());
    }

    /// Run `frames` frames; returns how many actually advanced
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        (0..frames)
            .filter(|_| self.engine.advance_frame(&mut self.space))
            .count() as u64
    }
}
