use std::f64::consts::PI;

use serde::Serialize;

use crate::physics::constants::G;
use crate::physics::vector::Vector3D;

/// Magnitudes below this count as a degenerate eccentricity or node vector.
const DEGENERATE_EPS: f64 = 1e-10;

/// Classical Keplerian orbital elements about a central mass.
/// Derived on demand from an instantaneous state; angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub sma: f64,           // semi-major axis, m (negative when unbound)
    pub ecc: f64,           // eccentricity
    pub inc: f64,           // inclination, rad
    pub raan: f64,          // longitude of ascending node, rad
    pub argp: f64,          // argument of periapsis, rad
    pub true_anom: f64,     // true anomaly, rad
    pub period: f64,        // s, infinite when unbound
    pub periapsis: Option<f64>, // m, only for e < 1
    pub apoapsis: Option<f64>,  // m, only for e < 1
}

impl OrbitalElements {
    /// Elements of a body at `pos`/`vel` relative to a central mass `central_mass` at rest.
    ///
    /// Circular or equatorial orbits leave the undefined angles at zero instead
    /// of failing.
    pub fn from_state(pos: &Vector3D, vel: &Vector3D, central_mass: f64) -> Self {
        let mu = G * central_mass;
        let r = pos.magnitude();
        let v = vel.magnitude();

        // Specific angular momentum
        let h = pos.cross(vel);
        let h_mag = h.magnitude();

        // Specific orbital energy; same closed form on both sides of e = 1
        let energy = 0.5 * v * v - mu / r;
        let sma = -mu / (2.0 * energy);

        // Eccentricity vector
        let e_vec = vel.cross(&h).scale(1.0 / mu) - pos.normalize();
        let ecc = e_vec.magnitude();

        // Inclination
        let inc = if h_mag > 0.0 {
            (h.z / h_mag).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        // Node vector
        let n = Vector3D::unit_z().cross(&h);
        let n_mag = n.magnitude();

        let raan = if n_mag > DEGENERATE_EPS {
            let raw = (n.x / n_mag).clamp(-1.0, 1.0).acos();
            if n.y < 0.0 { 2.0 * PI - raw } else { raw }
        } else {
            0.0
        };

        let argp = if n_mag > DEGENERATE_EPS && ecc > DEGENERATE_EPS {
            let w = (n.dot(&e_vec) / (n_mag * ecc)).clamp(-1.0, 1.0).acos();
            if e_vec.z < 0.0 { 2.0 * PI - w } else { w }
        } else {
            0.0
        };

        let true_anom = if ecc > DEGENERATE_EPS {
            let nu = (e_vec.dot(pos) / (ecc * r)).clamp(-1.0, 1.0).acos();
            if pos.dot(vel) < 0.0 { 2.0 * PI - nu } else { nu }
        } else {
            0.0
        };

        // Kepler's third law
        let period = if sma > 0.0 {
            2.0 * PI * (sma.powi(3) / mu).sqrt()
        } else {
            f64::INFINITY
        };

        let (periapsis, apoapsis) = if ecc < 1.0 {
            (Some(sma * (1.0 - ecc)), Some(sma * (1.0 + ecc)))
        } else {
            (None, None)
        };

        OrbitalElements {
            sma,
            ecc,
            inc,
            raan,
            argp,
            true_anom,
            period,
            periapsis,
            apoapsis,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.ecc < 1.0 && self.sma > 0.0
    }

    /// Degree-valued view for reporting.
    pub fn report(&self) -> ElementsReport {
        ElementsReport {
            semi_major_axis: self.sma,
            eccentricity: self.ecc,
            inclination: self.inc.to_degrees(),
            longitude_of_ascending_node: self.raan.to_degrees(),
            argument_of_periapsis: self.argp.to_degrees(),
            true_anomaly: self.true_anom.to_degrees(),
            period: self.period,
            periapsis: self.periapsis,
            apoapsis: self.apoapsis,
        }
    }
}

/// Element set as exposed to API clients: distances in m, angles in degrees,
/// period in s. `period` serialises as `null` when infinite.
#[derive(Debug, Clone, Serialize)]
pub struct ElementsReport {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    pub argument_of_periapsis: f64,
    pub true_anomaly: f64,
    pub period: f64,
    pub periapsis: Option<f64>,
    pub apoapsis: Option<f64>,
}
