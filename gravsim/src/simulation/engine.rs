//! Frame driver settings and the per-frame update
//!
//! One displayed frame is `sub_steps` fixed steps of
//! `frame_interval / sub_steps`; small steps keep close encounters stable.

use log::trace;

use crate::error::{GravError, Result};
use super::space::Space;

pub const DEFAULT_SUB_STEPS: u32 = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub sub_steps: u32, // fixed steps per frame
    pub frame_interval: f64, // simulated seconds per frame
    pub follow_objects: bool, // view drifts with the bodies
    pub paused: bool, // frames are skipped while paused
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            sub_steps: DEFAULT_SUB_STEPS,
            frame_interval: 1.0,
            follow_objects: false,
            paused: false,
        }
    }
}

impl Engine {
    pub fn new(sub_steps: u32, frame_interval: f64, follow_objects: bool) -> Result<Self> {
        let engine = Self {
            sub_steps,
            frame_interval,
            follow_objects,
            paused: false,
        };
        engine.validate()?;
        Ok(engine)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sub_steps == 0 {
            return Err(GravError::InvalidEngine("sub_steps must be positive".into()));
        }
        if !(self.frame_interval > 0.0 && self.frame_interval.is_finite()) {
            return Err(GravError::InvalidEngine(format!(
                "frame_interval must be positive, got {}",
                self.frame_interval
            )));
        }
        Ok(())
    }

    /// Length of one sub-step
    pub fn dt(&self) -> f64 {
        self.frame_interval / self.sub_steps as f64
    }

    /// Run one frame. Returns `false` (and leaves `space` alone) while paused.
    pub fn advance_frame(&self, space: &mut Space) -> bool {
        if self.paused {
            return false;
        }

        let dt = self.dt();
        for _ in 0..self.sub_steps {
            space.step(dt);
            if self.follow_objects {
                space.viewport.drift(dt);
            }
        }
        space.refresh_view_velocity();
        trace!("frame done at t = {:.4}", space.t);
        true
    }
}
