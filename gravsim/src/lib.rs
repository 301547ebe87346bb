pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, BodyId, NVec2};
pub use simulation::forces::{Force, ForceSet, NewtonianGravity};
pub use simulation::integrator::symplectic_euler;
pub use simulation::collision::{resolve_collisions, resolve_pair};
pub use simulation::params::Parameters;
pub use simulation::space::Space;
pub use simulation::viewport::Viewport;
pub use simulation::engine::Engine;
pub use simulation::snapshot::{BodyRecord, SpaceSnapshot};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, ViewportConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_step, bench_frame_curve};

pub use error::{GravError, Result};
