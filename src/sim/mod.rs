pub mod config;
pub mod history;
pub mod integrator;
pub mod scenario;
pub mod simulator;
pub mod snapshot;

pub use config::SimConfig;
pub use history::BoundedHistory;
pub use integrator::verlet_step;
pub use scenario::{BodyParameters, Scenario};
pub use simulator::Simulation;
pub use snapshot::{BodySnapshot, EnergyBreakdown, HistoryEntry, SimulationState, TrajectoryReport};
