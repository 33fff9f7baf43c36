use crate::physics::body::Body;
use crate::physics::vector::Vector3D;

// ---------------------------------------------------------------------------
// Pairwise-superposition gravity over a body collection
// ---------------------------------------------------------------------------

/// Net acceleration on `bodies[index]` from every other body.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `bodies`.
pub fn net_acceleration(index: usize, bodies: &[Body]) -> Vector3D {
    bodies[index].acceleration_from(bodies)
}

/// Accelerations for every body, evaluated against one fixed snapshot of
/// positions. The `anchor` entry (the immovable central body) is left at zero.
pub fn compute_accelerations(bodies: &[Body], anchor: usize) -> Vec<Vector3D> {
    (0..bodies.len())
        .map(|i| {
            if i == anchor {
                Vector3D::zeros()
            } else {
                net_acceleration(i, bodies)
            }
        })
        .collect()
}

/// Recompute and cache `acceleration` on every non-anchor body.
pub fn refresh_accelerations(bodies: &mut [Body], anchor: usize) {
    let accelerations = compute_accelerations(bodies, anchor);
    bodies
        .iter_mut()
        .zip(accelerations)
        .enumerate()
        .filter(|(i, _)| *i != anchor)
        .for_each(|(_, (body, accel))| body.acceleration = accel);
}
