pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod integrator;
pub mod runtime;
pub mod shared;
pub mod spawn;

pub use collision::{resolve_collisions, CollisionReport, MergeEvent};
pub use config::SimConfig;
pub use diagnostics::{format_sim_error, SimError};
pub use engine::{Body, BodyId, Color};
pub use runtime::{
    get_body_states, BodyEdit, BodyState, CameraTarget, Command, Simulation, Snapshot, TickReport,
};
pub use shared::SharedSimulation;
