//! Random body generation
//!
//! Positions are drawn from twice the box half-extents, so a fresh body can
//! start outside the box; containment pulls it back in on the next tick.

use crate::engine::{Body, BodyId, Color};
use glam::DVec3;
use rand::Rng;
use std::ops::Range;

pub const RANDOM_MASS: Range<f64> = 1.0..10_000.0;
pub const RANDOM_RADIUS: Range<f64> = 1.0..50.0;
pub const MINI_MASS: Range<f64> = 10.0..50.0;
pub const MINI_RADIUS: Range<f64> = 1.0..5.0;
pub const SPAWN_SPEED: f64 = 2.0;
pub const DEFAULT_SPAWN_MASS: f64 = 0.1;
pub const MINI_COUNT: usize = 100;

/// Range of masses and radii a spawned body is drawn from
#[derive(Debug, Clone)]
pub struct SpawnProfile {
    pub mass: Range<f64>,
    pub radius: Range<f64>,
}

impl SpawnProfile {
    pub fn random() -> Self {
        Self {
            mass: RANDOM_MASS,
            radius: RANDOM_RADIUS,
        }
    }

    pub fn mini() -> Self {
        Self {
            mass: MINI_MASS,
            radius: MINI_RADIUS,
        }
    }
}

/// Draw one body from `profile`
///
/// x and z are spread over `±2 * bounds.x`, y over `±2 * bounds.y`, and each
/// velocity component over `±SPAWN_SPEED`.
pub fn random_body(rng: &mut impl Rng, profile: &SpawnProfile, bounds: DVec3) -> Body {
    let mass = rng.gen_range(profile.mass.clone());
    let radius = rng.gen_range(profile.radius.clone());
    let wide = 2.0 * bounds.x;
    let tall = 2.0 * bounds.y;
    let position = DVec3::new(
        rng.gen_range(-wide..wide),
        rng.gen_range(-tall..tall),
        rng.gen_range(-wide..wide),
    );
    let velocity = DVec3::new(
        rng.gen_range(-SPAWN_SPEED..SPAWN_SPEED),
        rng.gen_range(-SPAWN_SPEED..SPAWN_SPEED),
        rng.gen_range(-SPAWN_SPEED..SPAWN_SPEED),
    );

    Body {
        id: BodyId::UNASSIGNED,
        mass,
        radius,
        position,
        velocity,
        acceleration: DVec3::ZERO,
        color: Color::random(rng),
    }
}
