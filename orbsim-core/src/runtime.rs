use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::SimConfig;
use crate::diagnostics::SimError;
use crate::engine::{apply_gravity, check_mass, check_radius, check_vector, Body, BodyId, Color};
use crate::integrator::{clamp_inside, contain_all, integrate};
use crate::spawn::{random_body, SpawnProfile, DEFAULT_SPAWN_MASS};
use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// A mutation requested by an input layer, applied at the next tick boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddBody {
        mass: f64,
        position: DVec3,
        velocity: Option<DVec3>,
        radius: Option<f64>,
    },
    SpawnRandom,
    SpawnDefault,
    SpawnManyMini(usize),
    Clear,
    Reset,
    SetMergeMode(bool),
    SetRunning(bool),
    SetFollowCamera(bool),
    Select(Option<BodyId>),
    SelectPrevious,
    EditSelected(BodyEdit),
}

/// Partial overwrite of the selected body, as produced by the slider panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyEdit {
    pub mass: Option<f64>,
    pub radius: Option<f64>,
    pub position: Option<DVec3>,
    pub velocity: Option<DVec3>,
    pub acceleration: Option<DVec3>,
}

impl BodyEdit {
    fn validate(&self) -> Result<(), SimError> {
        if let Some(mass) = self.mass {
            check_mass(mass)?;
        }
        if let Some(radius) = self.radius {
            check_radius(radius)?;
        }
        if let Some(position) = self.position {
            check_vector("position", position)?;
        }
        if let Some(velocity) = self.velocity {
            check_vector("velocity", velocity)?;
        }
        if let Some(acceleration) = self.acceleration {
            check_vector("acceleration", acceleration)?;
        }
        Ok(())
    }

    fn apply(&self, body: &mut Body) {
        if let Some(mass) = self.mass {
            body.mass = mass;
        }
        if let Some(radius) = self.radius {
            body.radius = radius;
        }
        if let Some(position) = self.position {
            body.position = position;
        }
        if let Some(velocity) = self.velocity {
            body.velocity = velocity;
        }
        if let Some(acceleration) = self.acceleration {
            body.acceleration = acceleration;
        }
    }
}

/// Deep copy of the body collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    bodies: Vec<Body>,
}

impl Snapshot {
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Where the follow camera looks from and at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub eye: DVec3,
    pub target: DVec3,
}

/// What the last tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub commands_applied: usize,
    pub wall_contacts: usize,
    pub collisions: CollisionReport,
}

/// Read-only copy of one body for renderers
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub mass: f64,
    pub radius: f64,
    pub position: DVec3,
    pub velocity: DVec3,
    pub color: Color,
    pub selected: bool,
}

/// The whole simulation: bodies, settings, selection and pending input
#[derive(Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    config: SimConfig,
    selected: Option<BodyId>,
    follow_camera: bool,
    initial: Snapshot,
    pending: VecDeque<Command>,
    next_id: u64,
    ticks: u64,
    last_report: TickReport,
    rng: ChaCha8Rng,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_valid_config(SimConfig::default())
    }
}

impl Simulation {
    /// Build an empty simulation, rejecting a config that would let NaN or
    /// runaway speeds into the bodies
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let g = config.gravitational_constant;
        if !(g.is_finite() && g > 0.0) {
            return Err(SimError::config(format!(
                "gravitational constant must be positive, got {}",
                g
            )));
        }
        if !(config.bounds.is_finite() && config.bounds.min_element() > 0.0) {
            return Err(SimError::config(format!(
                "bounds must be positive half-extents, got {}",
                config.bounds
            )));
        }
        if !(config.min_distance.is_finite() && config.min_distance > 0.0) {
            return Err(SimError::config("minimum distance must be positive"));
        }
        check_radius(config.default_radius)?;
        let restitution = config.restitution;
        if !(restitution.is_finite() && (0.0..=1.0).contains(&restitution)) {
            return Err(SimError::config(format!(
                "restitution must be within [0, 1], got {}",
                restitution
            )));
        }
        if !config.camera_distance.is_finite() {
            return Err(SimError::config(format!(
                "camera distance must be finite, got {}",
                config.camera_distance
            )));
        }
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            bodies: Vec::new(),
            config,
            selected: None,
            follow_camera: false,
            initial: Snapshot::default(),
            pending: VecDeque::new(),
            next_id: 1,
            ticks: 0,
            last_report: TickReport::default(),
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    pub fn merge_mode(&self) -> bool {
        self.config.merge_mode
    }

    pub fn is_running(&self) -> bool {
        self.config.running
    }

    pub fn follow_camera(&self) -> bool {
        self.follow_camera
    }

    // tick ================================================================================

    /// Advance the simulation by one frame
    ///
    /// Queued commands are applied first. While running, gravity is applied
    /// and motion integrated; containment and collision handling run whether
    /// or not the simulation is running.
    pub fn tick(&mut self) {
        let commands_applied = self.drain_commands();

        if self.config.running {
            apply_gravity(
                &mut self.bodies,
                self.config.gravitational_constant,
                self.config.min_distance,
            );
            integrate(&mut self.bodies);
        }

        let wall_contacts = contain_all(&mut self.bodies, self.config.bounds, self.config.restitution);
        let collisions = resolve_collisions(&mut self.bodies, self.config.merge_mode);
        clamp_inside(&mut self.bodies, self.config.bounds);

        for merge in &collisions.merges {
            if self.selected == Some(merge.absorbed) {
                self.selected = Some(merge.survivor);
            }
        }

        self.ticks += 1;
        self.last_report = TickReport {
            commands_applied,
            wall_contacts,
            collisions,
        };
    }

    /// Queue a command for the next tick boundary
    pub fn enqueue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    fn drain_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.pending.pop_front() {
            match self.apply_command(command) {
                Ok(()) => applied += 1,
                Err(e) => warn!("dropped queued command: {}", e),
            }
        }
        applied
    }

    /// Apply one command immediately
    pub fn apply_command(&mut self, command: Command) -> Result<(), SimError> {
        match command {
            Command::AddBody {
                mass,
                position,
                velocity,
                radius,
            } => self.add_body(mass, position, velocity, radius).map(|_| ()),
            Command::SpawnRandom => {
                self.spawn_random();
                Ok(())
            }
            Command::SpawnDefault => {
                self.spawn_default();
                Ok(())
            }
            Command::SpawnManyMini(count) => {
                self.spawn_many_mini(count);
                Ok(())
            }
            Command::Clear => {
                self.clear();
                Ok(())
            }
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::SetMergeMode(enabled) => {
                self.set_merge_mode(enabled);
                Ok(())
            }
            Command::SetRunning(enabled) => {
                self.set_running(enabled);
                Ok(())
            }
            Command::SetFollowCamera(enabled) => {
                self.set_follow_camera(enabled);
                Ok(())
            }
            Command::Select(id) => {
                self.select(id);
                Ok(())
            }
            Command::SelectPrevious => {
                self.select_previous();
                Ok(())
            }
            Command::EditSelected(edit) => self.edit_selected(&edit),
        }
    }

    // body collection ====================================================================

    /// Construct a body and append it; velocity defaults to zero and radius
    /// to the configured default
    pub fn add_body(
        &mut self,
        mass: f64,
        position: DVec3,
        velocity: Option<DVec3>,
        radius: Option<f64>,
    ) -> Result<BodyId, SimError> {
        let radius = radius.unwrap_or(self.config.default_radius);
        let color = Color::random(&mut self.rng);
        let body = Body::new(mass, radius, position)?
            .with_velocity(velocity.unwrap_or(DVec3::ZERO))?
            .with_color(color);
        Ok(self.push_body(body))
    }

    /// Append a caller-built body, giving it a fresh id
    ///
    /// `Body` fields are public, so the body is checked again here: a
    /// non-positive mass or radius, or a non-finite vector, is rejected and
    /// the simulation is left unchanged.
    pub fn insert(&mut self, body: Body) -> Result<BodyId, SimError> {
        check_mass(body.mass)?;
        check_radius(body.radius)?;
        check_vector("position", body.position)?;
        check_vector("velocity", body.velocity)?;
        check_vector("acceleration", body.acceleration)?;
        Ok(self.push_body(body))
    }

    fn push_body(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        debug!(id = id.0, mass = body.mass, radius = body.radius, "body added");
        self.bodies.push(body);
        id
    }

    /// Add a random body and select it
    pub fn spawn_random(&mut self) -> BodyId {
        let body = random_body(&mut self.rng, &SpawnProfile::random(), self.config.bounds);
        let id = self.push_body(body);
        self.selected = Some(id);
        id
    }

    /// Add a tiny body at rest at the origin and select it
    pub fn spawn_default(&mut self) -> BodyId {
        let color = Color::random(&mut self.rng);
        let body = Body {
            id: BodyId::UNASSIGNED,
            mass: DEFAULT_SPAWN_MASS,
            radius: self.config.default_radius,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            acceleration: DVec3::ZERO,
            color,
        };
        let id = self.push_body(body);
        self.selected = Some(id);
        id
    }

    /// Add `count` small bodies and select the last one
    pub fn spawn_many_mini(&mut self, count: usize) -> Vec<BodyId> {
        let profile = SpawnProfile::mini();
        let ids: Vec<BodyId> = (0..count)
            .map(|_| {
                let body = random_body(&mut self.rng, &profile, self.config.bounds);
                self.push_body(body)
            })
            .collect();
        if let Some(last) = ids.last() {
            self.selected = Some(*last);
        }
        debug!(count, "spawned mini bodies");
        ids
    }

    /// Remove every body and drop the selection
    pub fn clear(&mut self) {
        info!(removed = self.bodies.len(), "all bodies removed");
        self.bodies.clear();
        self.selected = None;
    }

    // flags ===============================================================================

    pub fn set_merge_mode(&mut self, enabled: bool) {
        info!(enabled, "merge mode");
        self.config.merge_mode = enabled;
    }

    /// Pause or resume motion
    ///
    /// A paused tick skips both gravity and integration, so bodies hold
    /// their positions instead of drifting. Queued commands, containment and
    /// collision handling still run.
    pub fn set_running(&mut self, enabled: bool) {
        info!(enabled, "simulation running");
        self.config.running = enabled;
    }

    pub fn set_follow_camera(&mut self, enabled: bool) {
        info!(enabled, "camera follow");
        self.follow_camera = enabled;
    }

    /// Eye and target for the follow camera, if it is on and something is selected
    pub fn camera_target(&self) -> Option<CameraTarget> {
        if !self.follow_camera {
            return None;
        }
        let body = self.selected_body()?;
        Some(CameraTarget {
            eye: body.position + DVec3::splat(self.config.camera_distance),
            target: body.position,
        })
    }

    // snapshots ===========================================================================

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bodies: self.bodies.clone(),
        }
    }

    /// Replace the bodies with a deep copy of `snapshot`
    ///
    /// The selection survives only if its body is in the snapshot.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.bodies = snapshot.bodies.clone();
        let max_id = self.bodies.iter().map(|b| b.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        if let Some(id) = self.selected {
            if self.body(id).is_none() {
                self.selected = None;
            }
        }
    }

    /// Remember the current bodies as the state [`Simulation::reset`] returns to
    pub fn set_initial_snapshot(&mut self) {
        self.initial = self.snapshot();
    }

    pub fn initial_snapshot(&self) -> &Snapshot {
        &self.initial
    }

    /// Restore the initial snapshot and drop the selection
    pub fn reset(&mut self) {
        info!(bodies = self.initial.len(), "resetting scene");
        let initial = std::mem::take(&mut self.initial);
        self.restore(&initial);
        self.initial = initial;
        self.selected = None;
    }

    // selection ===========================================================================

    /// Set the selection; a handle that does not resolve clears it
    pub fn select(&mut self, id: Option<BodyId>) {
        self.selected = id.filter(|id| self.body(*id).is_some());
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn selected_body(&self) -> Option<&Body> {
        self.selected.and_then(|id| self.body(id))
    }

    /// Move the selection one body back, wrapping around to the last body
    pub fn select_previous(&mut self) {
        match self.selected {
            Some(id) => {
                let Some(index) = self.bodies.iter().position(|b| b.id == id) else {
                    return;
                };
                let previous = if index == 0 { self.bodies.len() - 1 } else { index - 1 };
                self.selected = Some(self.bodies[previous].id);
            }
            None => self.selected = self.bodies.first().map(|b| b.id),
        }
    }

    /// Overwrite fields of the selected body; does nothing without a selection
    pub fn edit_selected(&mut self, edit: &BodyEdit) -> Result<(), SimError> {
        edit.validate()?;
        let Some(id) = self.selected else {
            return Ok(());
        };
        if let Some(body) = self.bodies.iter_mut().find(|b| b.id == id) {
            edit.apply(body);
        }
        Ok(())
    }

    // aggregates ==========================================================================

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> DVec3 {
        self.bodies.iter().map(|b| b.momentum()).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}

/// Current state of every body, in collection order
pub fn get_body_states(sim: &Simulation) -> Vec<BodyState> {
    let selected = sim.selected();
    sim.bodies()
        .iter()
        .map(|b| BodyState {
            id: b.id,
            mass: b.mass,
            radius: b.radius,
            position: b.position,
            velocity: b.velocity,
            color: b.color,
            selected: Some(b.id) == selected,
        })
        .collect()
}
