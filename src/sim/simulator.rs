use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use crate::error::{SimError, SimResult};
use crate::orbital::elements::OrbitalElements;
use crate::physics::body::Body;
use crate::physics::gravity::refresh_accelerations;
use crate::sim::config::SimConfig;
use crate::sim::history::BoundedHistory;
use crate::sim::integrator::verlet_step;
use crate::sim::scenario::{BodyParameters, Scenario};
use crate::sim::snapshot::{
    BodySnapshot, EnergyBreakdown, HistoryEntry, SimulationState, TrajectoryReport,
};

/// Index of the central body; it never moves and is never removed.
const CENTRAL: usize = 0;

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// One N-body run around an immovable central mass.
///
/// Two run states: stopped (initial) and running. `step` only advances while
/// running. Cached accelerations are refreshed whenever a body is added, so a
/// step can always use them as a(t).
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    bodies: Vec<Body>,
    time: f64,
    running: bool,
    history: BoundedHistory<HistoryEntry>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_valid_config(SimConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SimConfig) -> Self {
        let mut central = Body::sun().with_trajectory_capacity(config.trajectory_capacity);
        central.mass = config.central_mass;
        Self {
            history: BoundedHistory::new(config.history_capacity),
            bodies: vec![central],
            time: 0.0,
            running: false,
            config,
        }
    }

    /// Build a stopped simulation seeded with every body of `scenario`.
    pub fn from_scenario(scenario: &Scenario) -> SimResult<Self> {
        let mut sim = Self::new(scenario.config.clone())?;
        for params in &scenario.bodies {
            sim.add_body_from_parameters(params)?;
        }
        Ok(sim)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// All bodies, central body first.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn central(&self) -> &Body {
        &self.bodies[CENTRAL]
    }

    pub fn history(&self) -> &BoundedHistory<HistoryEntry> {
        &self.history
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    pub fn body(&self, name: &str) -> SimResult<&Body> {
        self.index_of(name)
            .map(|i| &self.bodies[i])
            .ok_or_else(|| SimError::BodyNotFound(name.to_string()))
    }

    // -----------------------------------------------------------------------
    // Body creation
    // -----------------------------------------------------------------------

    /// Insert a fully specified body. Names must be unique, mass positive and
    /// radius non-negative.
    pub fn add_body(&mut self, body: Body) -> SimResult<BodySnapshot> {
        if self.index_of(&body.name).is_some() {
            warn!(name = %body.name, "rejected duplicate body");
            return Err(SimError::DuplicateBody(body.name));
        }
        if !(body.mass.is_finite() && body.mass > 0.0) {
            warn!(name = %body.name, mass = body.mass, "rejected body with invalid mass");
            return Err(SimError::InvalidMass { name: body.name, mass: body.mass });
        }
        if !(body.radius.is_finite() && body.radius >= 0.0) {
            warn!(name = %body.name, radius = body.radius, "rejected body with invalid radius");
            return Err(SimError::InvalidRadius { name: body.name, radius: body.radius });
        }

        let body = body.with_trajectory_capacity(self.config.trajectory_capacity);
        info!(name = %body.name, mass = body.mass, position = %body.position, "body added");
        self.bodies.push(body);

        // a new attractor changes every cached acceleration
        refresh_accelerations(&mut self.bodies, CENTRAL);
        debug!(bodies = self.bodies.len(), "accelerations primed");

        Ok(BodySnapshot::from(&self.bodies[self.bodies.len() - 1]))
    }

    /// Insert a body on a planar tangential seed (see [`BodyParameters::initial_state`]).
    pub fn add_body_from_parameters(&mut self, params: &BodyParameters) -> SimResult<BodySnapshot> {
        let (position, velocity) = params.initial_state();
        let body = Body::new(params.name.clone(), params.mass, position, velocity)
            .with_radius(params.radius)
            .with_color(params.color.clone());
        self.add_body(body)
    }

    // -----------------------------------------------------------------------
    // Run control
    // -----------------------------------------------------------------------

    pub fn start(&mut self) {
        if !self.running {
            info!(time = self.time, "simulation started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            info!(time = self.time, "simulation stopped");
        }
        self.running = false;
    }

    /// Stop, rewind to t = 0 and drop every body except the central one.
    pub fn reset(&mut self) {
        self.running = false;
        self.time = 0.0;
        self.bodies.truncate(CENTRAL + 1);
        for body in &mut self.bodies {
            body.clear_trajectory();
        }
        self.history.clear();
        info!("simulation reset");
    }

    /// Advance one effective time step if running; returns the simulated time.
    pub fn step(&mut self) -> f64 {
        if !self.running {
            return self.time;
        }

        let dt = self.config.effective_dt();
        verlet_step(&mut self.bodies, CENTRAL, dt);
        self.time += dt;

        self.history.push(HistoryEntry {
            time: self.time,
            bodies: self
                .bodies
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != CENTRAL)
                .map(|(_, b)| BodySnapshot::from(b))
                .collect(),
        });

        trace!(time = self.time, dt, "step");
        self.time
    }

    /// Run `n` steps (no-op while stopped); returns the simulated time.
    pub fn advance(&mut self, n: usize) -> f64 {
        for _ in 0..n {
            self.step();
        }
        self.time
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn state(&self) -> SimulationState {
        SimulationState {
            time: self.time,
            bodies: self.bodies.iter().map(BodySnapshot::from).collect(),
            is_running: self.running,
        }
    }

    /// Keplerian elements of `name` about the central body. The central body
    /// itself has no elements and reports as not found.
    pub fn orbital_elements(&self, name: &str) -> SimResult<OrbitalElements> {
        let idx = self
            .index_of(name)
            .filter(|&i| i != CENTRAL)
            .ok_or_else(|| SimError::BodyNotFound(name.to_string()))?;
        let body = &self.bodies[idx];
        let central = self.central();
        Ok(OrbitalElements::from_state(
            &(body.position - central.position),
            &(body.velocity - central.velocity),
            central.mass,
        ))
    }

    /// Kinetic, potential and total energy of every non-central body.
    pub fn energy_analysis(&self) -> BTreeMap<String, EnergyBreakdown> {
        let central = self.central();
        self.bodies[CENTRAL + 1..]
            .iter()
            .map(|b| {
                let breakdown = EnergyBreakdown {
                    kinetic_energy: b.kinetic_energy(),
                    potential_energy: b.potential_energy(central),
                    total_energy: b.total_energy(central),
                };
                (b.name.clone(), breakdown)
            })
            .collect()
    }

    /// Sum of the per-body energies reported by [`Self::energy_analysis`].
    pub fn total_energy(&self) -> f64 {
        let central = self.central();
        self.bodies[CENTRAL + 1..]
            .iter()
            .map(|b| b.total_energy(central))
            .sum()
    }

    pub fn trajectory(&self, name: &str) -> SimResult<TrajectoryReport> {
        let body = self.body(name)?;
        let trajectory = body.trajectory().to_vec();
        Ok(TrajectoryReport {
            body_name: body.name.clone(),
            point_count: trajectory.len(),
            trajectory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::kepler::circular_velocity;
    use crate::physics::constants::{AU, EARTH_MASS, SOLAR_MASS};
    use crate::physics::vector::Vector3D;
    use approx::assert_relative_eq;

    fn earth_params() -> BodyParameters {
        BodyParameters::new("Earth", EARTH_MASS, 1.0, 29_780.0)
    }

    fn running_with_earth() -> Simulation {
        let mut sim = Simulation::default();
        sim.add_body_from_parameters(&earth_params()).unwrap();
        sim.start();
        sim
    }

    #[test]
    fn starts_stopped_with_only_the_sun() {
        let sim = Simulation::default();
        assert!(!sim.is_running());
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.bodies().len(), 1);
        assert_eq!(sim.central().name, "Sun");
        assert_eq!(sim.central().mass, SOLAR_MASS);
    }

    #[test]
    fn earth_seed_matches_request() {
        let mut sim = Simulation::default();
        let snap = sim.add_body_from_parameters(&earth_params()).unwrap();
        assert_relative_eq!(snap.position.x, AU);
        assert_eq!(snap.position.y, 0.0);
        assert!(snap.velocity.x.abs() < 1e-9);
        assert_relative_eq!(snap.velocity.y, 29_780.0);
        assert_eq!(snap.color, "#ffffff");
        // acceleration primed toward the sun
        assert!(snap.acceleration.x < 0.0);
    }

    #[test]
    fn earth_curves_after_one_step() {
        let mut sim = running_with_earth();
        let t = sim.step();
        assert_eq!(t, 3600.0);
        let earth = sim.body("Earth").unwrap();
        assert!(earth.position.y > 0.0);
        assert!(earth.position.x < AU);
        assert!(earth.position.x > 0.999 * AU);
    }

    #[test]
    fn step_is_noop_when_stopped() {
        let mut sim = Simulation::default();
        sim.add_body_from_parameters(&earth_params()).unwrap();
        sim.start();
        sim.advance(3);
        sim.stop();

        let before = sim.state();
        let t = sim.step();
        let after = sim.state();

        assert_eq!(t, before.time);
        assert_eq!(after.time.to_bits(), before.time.to_bits());
        assert_eq!(after.bodies, before.bodies);
        assert_eq!(sim.history().len(), 3);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut sim = Simulation::default();
        sim.start();
        sim.start();
        assert!(sim.is_running());
        sim.stop();
        sim.stop();
        assert!(!sim.is_running());
    }

    #[test]
    fn reset_clears_everything_and_is_idempotent() {
        let mut sim = running_with_earth();
        sim.add_body_from_parameters(&BodyParameters::new("Mars", 6.417e23, 1.524, 24_070.0))
            .unwrap();
        sim.advance(10);

        sim.reset();
        assert_eq!(sim.bodies().len(), 1);
        assert_eq!(sim.bodies()[0].name, "Sun");
        assert_eq!(sim.time(), 0.0);
        assert!(!sim.is_running());
        assert!(sim.history().is_empty());
        assert!(sim.bodies().iter().all(|b| b.trajectory().is_empty()));

        let once = sim.state();
        sim.reset();
        let twice = sim.state();
        assert_eq!(once.bodies, twice.bodies);
        assert_eq!(once.time, twice.time);
        assert_eq!(once.is_running, twice.is_running);
    }

    #[test]
    fn names_can_be_reused_after_reset() {
        let mut sim = running_with_earth();
        sim.reset();
        assert!(sim.add_body_from_parameters(&earth_params()).is_ok());
    }

    #[test]
    fn trajectory_window_slides_after_capacity() {
        let mut sim = running_with_earth();
        sim.step();
        let first_point = sim.trajectory("Earth").unwrap().trajectory[0];

        sim.advance(1004);
        let report = sim.trajectory("Earth").unwrap();
        assert_eq!(report.point_count, 1000);
        assert_eq!(report.trajectory.len(), 1000);
        assert_ne!(report.trajectory[0], first_point);
        assert_eq!(*report.trajectory.last().unwrap(), sim.body("Earth").unwrap().position);
        assert_eq!(sim.history().len(), 1000);
    }

    #[test]
    fn history_excludes_central_body() {
        let mut sim = running_with_earth();
        sim.advance(2);
        let entry = sim.history().last().unwrap();
        assert_eq!(entry.time, 7200.0);
        assert_eq!(entry.bodies.len(), 1);
        assert_eq!(entry.bodies[0].name, "Earth");
    }

    #[test]
    fn speed_multiplier_scales_the_step() {
        let config = SimConfig { speed_multiplier: 24.0, ..SimConfig::default() };
        let mut sim = Simulation::new(config).unwrap();
        sim.start();
        assert_eq!(sim.step(), 86_400.0);
    }

    #[test]
    fn circular_seed_conserves_energy() {
        let mut sim = Simulation::default();
        let v = circular_velocity(AU, SOLAR_MASS);
        sim.add_body_from_parameters(&BodyParameters::new("Earth", EARTH_MASS, 1.0, v))
            .unwrap();
        sim.start();
        let e0 = sim.total_energy();
        for _ in 0..3000 {
            sim.step();
            let drift = ((sim.total_energy() - e0) / e0).abs();
            assert!(drift < 1e-5, "drift {:.3e} at t={}", drift, sim.time());
        }
    }

    #[test]
    fn circular_seed_has_circular_elements() {
        let mut sim = Simulation::default();
        for d in [0.5, 1.0, 3.0] {
            let v = circular_velocity(d * AU, SOLAR_MASS);
            let name = format!("P{d}");
            sim.add_body_from_parameters(&BodyParameters::new(name.clone(), 1.0e20, d, v).angle(40.0))
                .unwrap();
            let el = sim.orbital_elements(&name).unwrap();
            assert!(el.ecc < 1e-6, "ecc {:e}", el.ecc);
            assert_relative_eq!(el.sma, d * AU, max_relative = 1e-6);
        }
    }

    #[test]
    fn unknown_or_central_body_is_not_found() {
        let sim = Simulation::default();
        let err = sim.orbital_elements("Mars").unwrap_err();
        assert!(err.is_not_found());
        assert!(sim.orbital_elements("Sun").unwrap_err().is_not_found());
        assert!(sim.trajectory("Mars").unwrap_err().is_not_found());
        // the sun has a (permanently empty) trajectory
        assert_eq!(sim.trajectory("Sun").unwrap().point_count, 0);
    }

    #[test]
    fn energy_analysis_covers_non_central_bodies() {
        let mut sim = running_with_earth();
        sim.add_body_from_parameters(&BodyParameters::new("Mars", 6.417e23, 1.524, 24_070.0))
            .unwrap();
        let analysis = sim.energy_analysis();
        assert_eq!(analysis.len(), 2);
        assert!(!analysis.contains_key("Sun"));
        let earth = analysis["Earth"];
        assert!(earth.kinetic_energy > 0.0);
        assert!(earth.potential_energy < 0.0);
        assert_relative_eq!(earth.total_energy, earth.kinetic_energy + earth.potential_energy);
    }

    #[test]
    fn rejects_invalid_bodies() {
        let mut sim = Simulation::default();
        sim.add_body_from_parameters(&earth_params()).unwrap();
        assert!(matches!(
            sim.add_body_from_parameters(&earth_params()),
            Err(SimError::DuplicateBody(_))
        ));
        assert!(matches!(
            sim.add_body_from_parameters(&BodyParameters::new("Sun", 1.0, 2.0, 0.0)),
            Err(SimError::DuplicateBody(_))
        ));
        assert!(matches!(
            sim.add_body_from_parameters(&BodyParameters::new("Ghost", 0.0, 2.0, 0.0)),
            Err(SimError::InvalidMass { .. })
        ));
        assert!(matches!(
            sim.add_body_from_parameters(&BodyParameters::new("Neg", 1.0, 2.0, 0.0).radius(-1.0)),
            Err(SimError::InvalidRadius { .. })
        ));
        assert_eq!(sim.bodies().len(), 2);
    }

    #[test]
    fn direct_insertion_keeps_given_state() {
        let mut sim = Simulation::default();
        let pos = Vector3D::new(0.0, 0.0, 2.0 * AU);
        let vel = Vector3D::new(20_000.0, 0.0, 0.0);
        let snap = sim.add_body(Body::new("Polar", 1.0e22, pos, vel)).unwrap();
        assert_eq!(snap.position, pos);
        assert_eq!(snap.velocity, vel);
        let el = sim.orbital_elements("Polar").unwrap();
        assert_relative_eq!(el.inc.to_degrees(), 90.0, max_relative = 1e-9);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimConfig { time_step: -1.0, ..SimConfig::default() };
        assert!(matches!(Simulation::new(config), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn scenario_seeds_all_bodies() {
        let sim = Simulation::from_scenario(&Scenario::inner_planets()).unwrap();
        assert_eq!(sim.bodies().len(), 5);
        assert_eq!(sim.state().bodies[0].name, "Sun");
    }
}
