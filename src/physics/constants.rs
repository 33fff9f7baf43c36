// ---------------------------------------------------------------------------
// Physical constants (SI)
// ---------------------------------------------------------------------------

pub const G: f64 = 6.674_30e-11;          // m^3 kg^-1 s^-2
pub const SOLAR_MASS: f64 = 1.989e30;     // kg
pub const SOLAR_RADIUS: f64 = 6.96e8;     // m
pub const EARTH_MASS: f64 = 5.972e24;     // kg
pub const AU: f64 = 1.496e11;             // m
pub const MU_SUN: f64 = G * SOLAR_MASS;   // m^3/s^2

// ---------------------------------------------------------------------------
// Simulation defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_TIME_STEP: f64 = 3600.0;      // s (1 hour)
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Separations below this are treated as coincident bodies.
pub const COINCIDENCE_EPSILON: f64 = 1e-6;      // m

pub const CENTRAL_BODY_NAME: &str = "Sun";
pub const CENTRAL_BODY_COLOR: &str = "#FFD700";
pub const DEFAULT_BODY_COLOR: &str = "#ffffff";
