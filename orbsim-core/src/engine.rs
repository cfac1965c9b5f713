use crate::diagnostics::SimError;
use glam::DVec3;
use rand::Rng;

/// Handle to a body inside one simulation
///
/// Handles are never reused within a simulation, so a handle that no longer
/// resolves simply means the body is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl BodyId {
    /// Id carried by bodies that have not been inserted into a simulation yet
    pub const UNASSIGNED: BodyId = BodyId(0);
}

/// Display color of a body; physics never reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }
}

/// An orb in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) id: BodyId,
    pub mass: f64,
    pub radius: f64,
    pub position: DVec3,
    pub velocity: DVec3,
    pub acceleration: DVec3,
    pub color: Color,
}

impl Body {
    /// Create a body at rest. Fails unless `mass` and `radius` are finite and
    /// positive and `position` is finite.
    pub fn new(mass: f64, radius: f64, position: DVec3) -> Result<Self, SimError> {
        check_mass(mass)?;
        check_radius(radius)?;
        check_vector("position", position)?;
        Ok(Self {
            id: BodyId::UNASSIGNED,
            mass,
            radius,
            position,
            velocity: DVec3::ZERO,
            acceleration: DVec3::ZERO,
            color: Color::WHITE,
        })
    }

    pub fn with_velocity(mut self, velocity: DVec3) -> Result<Self, SimError> {
        check_vector("velocity", velocity)?;
        self.velocity = velocity;
        Ok(self)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Accumulate a force for this tick (`a += F / m`)
    pub fn apply_force(&mut self, force: DVec3) {
        self.acceleration += force / self.mass;
    }
}

pub(crate) fn check_mass(mass: f64) -> Result<(), SimError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidMass(mass))
    }
}

pub(crate) fn check_radius(radius: f64) -> Result<(), SimError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidRadius(radius))
    }
}

pub(crate) fn check_vector(field: &'static str, v: DVec3) -> Result<(), SimError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::NonFiniteVector { field })
    }
}

/// Gravitational force exerted on `a` by `b`
///
/// Points from `a` toward `b` with magnitude `G * m_a * m_b / d²`. The distance
/// is clamped to `min_distance`; coincident bodies have no defined direction
/// and produce a zero force.
pub fn gravity_force(a: &Body, b: &Body, g: f64, min_distance: f64) -> DVec3 {
    let r = b.position - a.position;
    let dist = r.length().max(min_distance);
    let strength = g * a.mass * b.mass / (dist * dist);
    r.normalize_or_zero() * strength
}

/// Apply pairwise gravity to every body, adding into `acceleration`
pub fn apply_gravity(bodies: &mut [Body], g: f64, min_distance: f64) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let force = gravity_force(&bodies[i], &bodies[j], g, min_distance);
            bodies[i].apply_force(force);
            bodies[j].apply_force(-force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_mass_and_radius() {
        assert_eq!(
            Body::new(0.0, 1.0, DVec3::ZERO),
            Err(SimError::InvalidMass(0.0))
        );
        assert_eq!(
            Body::new(1.0, -2.0, DVec3::ZERO),
            Err(SimError::InvalidRadius(-2.0))
        );
        assert!(Body::new(f64::NAN, 1.0, DVec3::ZERO).is_err());
        assert!(Body::new(1.0, f64::INFINITY, DVec3::ZERO).is_err());
    }

    #[test]
    fn rejects_non_finite_vectors() {
        let err = Body::new(1.0, 1.0, DVec3::new(f64::NAN, 0.0, 0.0)).unwrap_err();
        assert_eq!(err, SimError::NonFiniteVector { field: "position" });

        let body = Body::new(1.0, 1.0, DVec3::ZERO).unwrap();
        assert!(body.with_velocity(DVec3::splat(f64::INFINITY)).is_err());
    }

    #[test]
    fn gravity_is_equal_and_opposite() {
        let a = Body::new(2.0, 1.0, DVec3::new(0.0, 0.0, 0.0)).unwrap();
        let b = Body::new(3.0, 1.0, DVec3::new(0.0, 4.0, 0.0)).unwrap();
        let f_ab = gravity_force(&a, &b, 1.0, 1e-6);
        let f_ba = gravity_force(&b, &a, 1.0, 1e-6);
        assert!((f_ab + f_ba).length() < 1e-12);
        // 1 * 2 * 3 / 16
        assert!((f_ab.y - 0.375).abs() < 1e-12);
    }
}
