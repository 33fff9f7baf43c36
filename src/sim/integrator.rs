use crate::physics::body::Body;
use crate::physics::gravity::compute_accelerations;

// ---------------------------------------------------------------------------
// Velocity-Verlet (kick-drift-kick) over a body collection
// ---------------------------------------------------------------------------

/// Advance every body except `anchor` by `dt`.
///
/// Uses each body's cached `acceleration` as a(t), so callers must have primed
/// the caches before the first step. All positions are drifted before the
/// single force pass, so a(t + dt) never depends on iteration order.
pub fn verlet_step(bodies: &mut [Body], anchor: usize, dt: f64) {
    let half_dt = dt * 0.5;

    // Kick + drift
    for (i, body) in bodies.iter_mut().enumerate() {
        if i == anchor {
            continue;
        }
        body.velocity = body.velocity + body.acceleration * half_dt;
        body.position = body.position + body.velocity * dt;
    }

    // a(t + dt) from the fully drifted configuration
    let accelerations = compute_accelerations(bodies, anchor);

    // Kick + record
    for (i, (body, accel)) in bodies.iter_mut().zip(accelerations).enumerate() {
        if i == anchor {
            continue;
        }
        body.velocity = body.velocity + accel * half_dt;
        body.acceleration = accel;
        body.record_position();
    }
}
