//! Starting scenes selectable from the command line

use clap::{Args, ValueEnum};
use glam::DVec3;
use orbsim_core::{SimConfig, SimError, Simulation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Nothing; add orbs from the viewer
    Empty,
    /// Two equal orbs at rest, 100 apart
    Pair,
    /// A cloud of small orbs
    Mini,
    /// A handful of random orbs
    Random,
}

/// Scene and simulation settings shared by every subcommand
#[derive(Debug, Clone, Args)]
pub struct SceneArgs {
    /// Starting scene
    #[arg(long, value_enum, default_value_t = Preset::Pair)]
    pub preset: Preset,

    /// Number of orbs for the mini and random presets
    #[arg(long, default_value_t = 100)]
    pub count: usize,

    /// Gravitational constant
    #[arg(long, default_value_t = orbsim_core::config::DEFAULT_G)]
    pub g: f64,

    /// Box half-extents as x,y,z
    #[arg(long, value_delimiter = ',', default_value = "400,300,500")]
    pub bounds: Vec<f64>,

    /// Seed for colors and random orbs
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Merge deeply overlapping orbs instead of bouncing them
    #[arg(long)]
    pub merge: bool,

    /// Start with gravity and motion paused
    #[arg(long)]
    pub paused: bool,
}

impl SceneArgs {
    pub fn config(&self) -> Result<SimConfig, SimError> {
        let &[x, y, z] = self.bounds.as_slice() else {
            return Err(SimError::config(format!(
                "--bounds takes three values, got {}",
                self.bounds.len()
            )));
        };
        Ok(SimConfig::default()
            .with_gravitational_constant(self.g)
            .with_bounds(DVec3::new(x, y, z))
            .with_seed(self.seed)
            .with_merge_mode(self.merge)
            .with_running(!self.paused))
    }

    /// Build the simulation and remember its bodies as the reset state
    pub fn build(&self) -> Result<Simulation, SimError> {
        let mut sim = Simulation::new(self.config()?)?;
        match self.preset {
            Preset::Empty => {}
            Preset::Pair => {
                sim.add_body(100.0, DVec3::new(-50.0, 0.0, 0.0), None, None)?;
                sim.add_body(100.0, DVec3::new(50.0, 0.0, 0.0), None, None)?;
            }
            Preset::Mini => {
                sim.spawn_many_mini(self.count);
            }
            Preset::Random => {
                for _ in 0..self.count {
                    sim.spawn_random();
                }
            }
        }
        sim.set_initial_snapshot();
        sim.select(None);
        Ok(sim)
    }
}
