use serde::Serialize;

use crate::physics::body::Body;
use crate::physics::vector::Vector3D;

// ---------------------------------------------------------------------------
// Read-side payloads handed to the API layer
// ---------------------------------------------------------------------------

/// Full state of one body at the moment of the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub name: String,
    pub mass: f64,
    pub position: Vector3D,
    pub velocity: Vector3D,
    pub radius: f64,
    pub color: String,
    pub acceleration: Vector3D,
}

impl From<&Body> for BodySnapshot {
    fn from(b: &Body) -> Self {
        BodySnapshot {
            name: b.name.clone(),
            mass: b.mass,
            position: b.position,
            velocity: b.velocity,
            radius: b.radius,
            color: b.color.clone(),
            acceleration: b.acceleration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationState {
    pub time: f64,
    pub bodies: Vec<BodySnapshot>,
    pub is_running: bool,
}

/// One entry of the global history: every non-central body after a step.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub time: f64,
    pub bodies: Vec<BodySnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyBreakdown {
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub total_energy: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryReport {
    pub body_name: String,
    pub trajectory: Vec<Vector3D>,
    pub point_count: usize,
}
