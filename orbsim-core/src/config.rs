use glam::DVec3;

/// Gravitational constant used when nothing else is configured
pub const DEFAULT_G: f64 = 0.4;

/// Radius given to bodies constructed without an explicit one
pub const DEFAULT_RADIUS: f64 = 25.0;

/// Fraction of velocity kept (and inverted) on wall contact
pub const WALL_RESTITUTION: f64 = 0.5;

/// Smallest distance the gravity pass will divide by
pub const MIN_DISTANCE: f64 = 1e-6;

/// Distance of the follow camera's eye from its target, per axis
pub const CAMERA_DISTANCE: f64 = 500.0;

/// Runtime configuration for a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub gravitational_constant: f64,
    /// Half-extents of the containment box, centered at the origin
    pub bounds: DVec3,
    pub restitution: f64,
    pub default_radius: f64,
    pub min_distance: f64,
    pub camera_distance: f64,
    /// Seed for colors and random spawns
    pub seed: u64,
    pub merge_mode: bool,
    pub running: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_G,
            // 800x600 canvas, 500 deep
            bounds: DVec3::new(400.0, 300.0, 500.0),
            restitution: WALL_RESTITUTION,
            default_radius: DEFAULT_RADIUS,
            min_distance: MIN_DISTANCE,
            camera_distance: CAMERA_DISTANCE,
            seed: 42,
            merge_mode: false,
            running: true,
        }
    }
}

impl SimConfig {
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_bounds(mut self, bounds: DVec3) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_merge_mode(mut self, enabled: bool) -> Self {
        self.merge_mode = enabled;
        self
    }

    pub fn with_running(mut self, enabled: bool) -> Self {
        self.running = enabled;
        self
    }
}
