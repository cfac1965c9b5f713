use crate::engine::Body;
use glam::DVec3;

/// Advance every body one frame with semi-implicit Euler
///
/// Order matters: velocity picks up the accumulated acceleration first, the
/// position then moves with the new velocity, and the acceleration is cleared
/// so next tick's forces start from zero.
pub fn integrate(bodies: &mut [Body]) {
    for body in bodies.iter_mut() {
        body.velocity += body.acceleration;
        body.position += body.velocity;
        body.acceleration = DVec3::ZERO;
    }
}

/// Keep a body inside the box `[-bounds, bounds]`, returning whether it hit a wall
///
/// Each axis is handled on its own: an extremity past the wall inverts that
/// velocity component scaled by `restitution`, and the position is clamped so
/// the extremity sits exactly on the wall.
pub fn contain(body: &mut Body, bounds: DVec3, restitution: f64) -> bool {
    let mut hit = false;
    for axis in 0..3 {
        let limit = bounds[axis];
        let pos = body.position[axis];
        if pos + body.radius > limit || pos - body.radius < -limit {
            body.velocity[axis] *= -restitution;
            body.position[axis] = clamp_to_wall(pos, body.radius, limit);
            hit = true;
        }
    }
    hit
}

/// Apply [`contain`] to every body, returning the number of wall contacts
pub fn contain_all(bodies: &mut [Body], bounds: DVec3, restitution: f64) -> usize {
    bodies
        .iter_mut()
        .map(|body| contain(body, bounds, restitution))
        .filter(|hit| *hit)
        .count()
}

/// Pull positions back inside the box without touching velocities
///
/// Run after collision handling, whose separation step can push a body that
/// was just contained back through a wall.
pub fn clamp_inside(bodies: &mut [Body], bounds: DVec3) {
    for body in bodies.iter_mut() {
        for axis in 0..3 {
            body.position[axis] = clamp_to_wall(body.position[axis], body.radius, bounds[axis]);
        }
    }
}

fn clamp_to_wall(pos: f64, radius: f64, limit: f64) -> f64 {
    let lo = -limit + radius;
    let hi = limit - radius;
    if lo > hi {
        // Wider than the box on this axis
        0.0
    } else {
        pos.clamp(lo, hi)
    }
}
