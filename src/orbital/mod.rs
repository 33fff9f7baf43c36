pub mod elements;
pub mod kepler;

pub use elements::{ElementsReport, OrbitalElements};
pub use kepler::{circular_velocity, predict_position, predict_position_full, solve_kepler};
