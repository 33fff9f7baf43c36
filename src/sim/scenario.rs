use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimResult;
use crate::physics::constants::{AU, DEFAULT_BODY_COLOR, EARTH_MASS};
use crate::physics::vector::Vector3D;
use crate::sim::config::SimConfig;

// ---------------------------------------------------------------------------
// Body creation request
// ---------------------------------------------------------------------------

/// Parameterised body description: distance in AU, speed in m/s, angle in
/// degrees measured from +x in the x/y plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParameters {
    pub name: String,
    pub mass: f64,                  // kg
    pub distance_from_sun: f64,     // AU
    pub initial_velocity: f64,      // m/s
    #[serde(default)]
    pub angle: f64,                 // deg
    #[serde(default)]
    pub radius: f64,                // m
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_BODY_COLOR.to_string()
}

impl BodyParameters {
    pub fn new(name: impl Into<String>, mass: f64, distance_from_sun: f64, initial_velocity: f64) -> Self {
        Self {
            name: name.into(),
            mass,
            distance_from_sun,
            initial_velocity,
            angle: 0.0,
            radius: 0.0,
            color: default_color(),
        }
    }

    pub fn angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Cartesian seed: position at polar angle theta, velocity along theta + 90 deg.
    /// Both lie in the z = 0 plane.
    pub fn initial_state(&self) -> (Vector3D, Vector3D) {
        let distance = self.distance_from_sun * AU;
        let theta = self.angle.to_radians();
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_v, cos_v) = (theta + std::f64::consts::FRAC_PI_2).sin_cos();

        let position = Vector3D::new(distance * cos_t, distance * sin_t, 0.0);
        let velocity = Vector3D::new(
            self.initial_velocity * cos_v,
            self.initial_velocity * sin_v,
            0.0,
        );
        (position, velocity)
    }
}

// ---------------------------------------------------------------------------
// Scenario files
// ---------------------------------------------------------------------------

/// A configuration plus the bodies to seed it with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    #[serde(default)]
    pub bodies: Vec<BodyParameters>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scenario");
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Mercury through Mars on circular seeds, spread in angle.
    pub fn inner_planets() -> Self {
        Scenario {
            config: SimConfig::default(),
            bodies: vec![
                BodyParameters::new("Mercury", 3.301e23, 0.387, 47_360.0)
                    .radius(2.4397e6)
                    .color("#b1b1b1"),
                BodyParameters::new("Venus", 4.867e24, 0.723, 35_020.0)
                    .angle(90.0)
                    .radius(6.0518e6)
                    .color("#e8cda2"),
                BodyParameters::new("Earth", EARTH_MASS, 1.0, 29_780.0)
                    .angle(180.0)
                    .radius(6.371e6)
                    .color("#4f7dd8"),
                BodyParameters::new("Mars", 6.417e23, 1.524, 24_070.0)
                    .angle(270.0)
                    .radius(3.3895e6)
                    .color("#c1440e"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn zero_angle_seed_is_on_x_axis_moving_y() {
        let p = BodyParameters::new("Earth", EARTH_MASS, 1.0, 29_780.0);
        let (pos, vel) = p.initial_state();
        assert_relative_eq!(pos.x, AU);
        assert_abs_diff_eq!(pos.y, 0.0);
        assert_abs_diff_eq!(vel.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(vel.y, 29_780.0);
        assert_eq!(pos.z, 0.0);
        assert_eq!(vel.z, 0.0);
    }

    #[test]
    fn velocity_is_tangential_at_any_angle() {
        for deg in [0.0, 33.0, 90.0, 200.0, 315.0] {
            let (pos, vel) = BodyParameters::new("X", 1.0, 2.0, 1000.0).angle(deg).initial_state();
            assert_abs_diff_eq!(pos.normalize().dot(&vel.normalize()), 0.0, epsilon = 1e-12);
            assert_relative_eq!(pos.magnitude(), 2.0 * AU, max_relative = 1e-12);
            assert_relative_eq!(vel.magnitude(), 1000.0, max_relative = 1e-12);
            // counter-clockwise motion: angular momentum along +z
            assert!(pos.cross(&vel).z > 0.0);
        }
    }

    #[test]
    fn request_defaults_from_json() {
        let p: BodyParameters = serde_json::from_str(
            r#"{ "name": "Ceres", "mass": 9.39e20, "distance_from_sun": 2.77, "initial_velocity": 17900 }"#,
        )
        .unwrap();
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.radius, 0.0);
        assert_eq!(p.color, "#ffffff");
    }

    #[test]
    fn scenario_from_json() {
        let s = Scenario::from_json_str(
            r#"{
                "config": { "time_step": 600.0 },
                "bodies": [ { "name": "Earth", "mass": 5.972e24, "distance_from_sun": 1.0, "initial_velocity": 29780 } ]
            }"#,
        )
        .unwrap();
        assert_eq!(s.config.time_step, 600.0);
        assert_eq!(s.bodies.len(), 1);
    }

    #[test]
    fn inner_planet_names_are_unique() {
        let s = Scenario::inner_planets();
        let mut names: Vec<&str> = s.bodies.iter().map(|b| b.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
