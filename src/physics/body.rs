use crate::physics::constants::{
    CENTRAL_BODY_COLOR, CENTRAL_BODY_NAME, COINCIDENCE_EPSILON, DEFAULT_BODY_COLOR,
    DEFAULT_HISTORY_CAPACITY, G, SOLAR_MASS, SOLAR_RADIUS,
};
use crate::physics::vector::Vector3D;
use crate::sim::history::BoundedHistory;

// ---------------------------------------------------------------------------
// Celestial body
// ---------------------------------------------------------------------------

/// One gravitating object. `acceleration` is a cache of the last force pass,
/// not an independent input.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub mass: f64,                  // kg
    pub position: Vector3D,         // m
    pub velocity: Vector3D,         // m/s
    pub acceleration: Vector3D,     // m/s^2
    pub radius: f64,                // m, display only
    pub color: String,              // display only
    trajectory: BoundedHistory<Vector3D>,
}

impl Body {
    pub fn new(name: impl Into<String>, mass: f64, position: Vector3D, velocity: Vector3D) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
            acceleration: Vector3D::zeros(),
            radius: 0.0,
            color: DEFAULT_BODY_COLOR.to_string(),
            trajectory: BoundedHistory::new(DEFAULT_HISTORY_CAPACITY),
        }
    }

    /// The central anchor: solar mass at rest at the origin.
    pub fn sun() -> Self {
        Self::new(CENTRAL_BODY_NAME, SOLAR_MASS, Vector3D::zeros(), Vector3D::zeros())
            .with_radius(SOLAR_RADIUS)
            .with_color(CENTRAL_BODY_COLOR)
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Replace the trajectory window with an empty one of the given capacity.
    pub fn with_trajectory_capacity(mut self, capacity: usize) -> Self {
        self.trajectory = BoundedHistory::new(capacity);
        self
    }

    /// Newtonian attraction exerted on `self` by `other`, pointing toward `other`.
    /// Coincident bodies (separation below 1e-6 m) exert no force.
    pub fn gravitational_force_from(&self, other: &Body) -> Vector3D {
        let r_vec = other.position - self.position;
        let r = r_vec.magnitude();
        if r < COINCIDENCE_EPSILON {
            return Vector3D::zeros();
        }
        r_vec.normalize() * (G * self.mass * other.mass / (r * r))
    }

    /// Net gravitational acceleration from every body in `bodies` except `self`.
    ///
    /// `self` is skipped by address, so a distinct body with identical mass and
    /// position still contributes (and is then absorbed by the coincidence guard).
    pub fn acceleration_from(&self, bodies: &[Body]) -> Vector3D {
        let total_force: Vector3D = bodies
            .iter()
            .filter(|other| !std::ptr::eq(*other, self))
            .map(|other| self.gravitational_force_from(other))
            .sum();
        total_force / self.mass
    }

    // -----------------------------------------------------------------------
    // Energy
    // -----------------------------------------------------------------------

    pub fn kinetic_energy(&self) -> f64 {
        let v = self.velocity.magnitude();
        0.5 * self.mass * v * v
    }

    /// Two-body potential energy relative to `central`; `-inf` when coincident.
    pub fn potential_energy(&self, central: &Body) -> f64 {
        let r = (self.position - central.position).magnitude();
        if r < COINCIDENCE_EPSILON {
            return f64::NEG_INFINITY;
        }
        -G * self.mass * central.mass / r
    }

    pub fn total_energy(&self, central: &Body) -> f64 {
        self.kinetic_energy() + self.potential_energy(central)
    }

    // -----------------------------------------------------------------------
    // Trajectory
    // -----------------------------------------------------------------------

    pub fn trajectory(&self) -> &BoundedHistory<Vector3D> {
        &self.trajectory
    }

    /// Append the current position to the sliding trajectory window.
    pub fn record_position(&mut self) {
        self.trajectory.push(self.position);
    }

    pub fn clear_trajectory(&mut self) {
        self.trajectory.clear();
    }
}
