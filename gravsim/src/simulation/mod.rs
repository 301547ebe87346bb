pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod collision;
pub mod viewport;
pub mod space;
pub mod snapshot;
pub mod scenario;
