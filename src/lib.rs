//! Newtonian N-body orbit simulation around an immovable central mass.
//!
//! `physics` holds the vector, body and gravity primitives, `sim` the
//! velocity-Verlet engine and its run-state machine, and `orbital` the
//! read-side Keplerian analysis.

pub mod error;
pub mod io;
pub mod orbital;
pub mod physics;
pub mod sim;

pub use error::{PhysicsError, SimError, SimResult};
pub use orbital::{ElementsReport, OrbitalElements};
pub use physics::{Body, Vector3D};
pub use sim::{BodyParameters, Scenario, SimConfig, Simulation};
