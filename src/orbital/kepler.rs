use nalgebra::{Rotation3, Vector3};

use crate::orbital::elements::OrbitalElements;
use crate::physics::constants::G;
use crate::physics::vector::Vector3D;

pub const KEPLER_TOLERANCE: f64 = 1e-10;
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Below this eccentricity the mean anomaly is returned unchanged.
const NEAR_CIRCULAR_ECC: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Kepler's equation
// ---------------------------------------------------------------------------

/// Solve M = E - e sin(E) for the eccentric anomaly by fixed-point iteration.
///
/// Stops once successive iterates differ by less than `tolerance` or after
/// `max_iterations`, returning the last iterate either way.
pub fn solve_kepler(mean_anomaly: f64, ecc: f64, tolerance: f64, max_iterations: usize) -> f64 {
    if ecc < NEAR_CIRCULAR_ECC {
        return mean_anomaly;
    }

    let mut ea = mean_anomaly;
    for _ in 0..max_iterations {
        let next = mean_anomaly + ecc * ea.sin();
        if (next - ea).abs() < tolerance {
            return next;
        }
        ea = next;
    }
    ea
}

/// Solve Kepler's equation with the default tolerance and iteration cap.
pub fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> f64 {
    solve_kepler(mean_anomaly, ecc, KEPLER_TOLERANCE, KEPLER_MAX_ITERATIONS)
}

/// True anomaly from eccentric anomaly (half-angle form).
pub fn true_anomaly_from_eccentric(ea: f64, ecc: f64) -> f64 {
    2.0 * ((1.0 + ecc).sqrt() * (ea / 2.0).sin()).atan2((1.0 - ecc).sqrt() * (ea / 2.0).cos())
}

// ---------------------------------------------------------------------------
// Position prediction
// ---------------------------------------------------------------------------

/// In-plane polar position (r, nu) after `time` seconds since periapsis.
fn orbit_plane_position(elements: &OrbitalElements, time: f64, central_mass: f64) -> (f64, f64) {
    let mu = G * central_mass;
    let a = elements.sma;
    let e = elements.ecc;

    let mean_motion = (mu / a.powi(3)).sqrt();
    let mean_anomaly = mean_motion * time;
    let ea = eccentric_anomaly(mean_anomaly, e);
    let nu = true_anomaly_from_eccentric(ea, e);
    let r = a * (1.0 - e * ea.cos());
    (r, nu)
}

/// Predicted position `time` seconds after periapsis passage.
///
/// Only the node rotation and an inclination tilt of z are applied; the
/// argument of periapsis is ignored. See [`predict_position_full`] for the
/// complete perifocal-to-inertial transform. Intended for bound orbits.
pub fn predict_position(elements: &OrbitalElements, time: f64, central_mass: f64) -> Vector3D {
    let (r, nu) = orbit_plane_position(elements, time, central_mass);
    let x_orb = r * nu.cos();
    let y_orb = r * nu.sin();

    let (sin_raan, cos_raan) = elements.raan.sin_cos();
    Vector3D::new(
        x_orb * cos_raan - y_orb * sin_raan,
        x_orb * sin_raan + y_orb * cos_raan,
        r * nu.sin() * elements.inc.sin(),
    )
}

/// Predicted position with the full Rz(raan) * Rx(inc) * Rz(argp) rotation.
pub fn predict_position_full(elements: &OrbitalElements, time: f64, central_mass: f64) -> Vector3D {
    let (r, nu) = orbit_plane_position(elements, time, central_mass);
    let perifocal = Vector3::new(r * nu.cos(), r * nu.sin(), 0.0);

    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), elements.raan)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), elements.inc)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), elements.argp);

    Vector3D::from(rot * perifocal)
}

/// Circular orbit speed at `distance` (m) around `central_mass` (kg).
pub fn circular_velocity(distance: f64, central_mass: f64) -> f64 {
    (G * central_mass / distance).sqrt()
}
