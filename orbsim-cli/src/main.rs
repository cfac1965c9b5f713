use clap::{Parser, Subcommand};
use orbsim_core::diagnostics::format_runtime_error;
use orbsim_core::{format_sim_error, get_body_states, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod scene;
mod viewer;

use scene::SceneArgs;

#[derive(Parser)]
#[command(name = "orbsim")]
#[command(about = "OrbSim - an n-body orb sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene headless and print the final state
    Run {
        #[command(flatten)]
        scene: SceneArgs,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u64,
    },
    /// Open an interactive window on a scene
    View {
        #[command(flatten)]
        scene: SceneArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { scene, ticks } => run_headless(&scene, ticks),
        Commands::View { scene } => run_viewer(&scene),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_runtime_error(e.as_ref()));
        std::process::exit(1);
    }
}

fn build(scene: &SceneArgs) -> Result<Simulation, Box<dyn std::error::Error>> {
    scene
        .build()
        .map_err(|e| format_sim_error(&e).into())
}

fn run_headless(scene: &SceneArgs, ticks: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = build(scene)?;
    info!(bodies = sim.len(), ticks, "running headless");

    let mut merges = 0;
    let mut bounces = 0;
    for _ in 0..ticks {
        sim.tick();
        merges += sim.last_report().collisions.merges.len();
        bounces += sim.last_report().collisions.bounces;
    }

    for body in get_body_states(&sim) {
        println!(
            "orb {:>4}  mass={:>10.3}  radius={:>7.3}  pos=({:>8.2}, {:>8.2}, {:>8.2})  vel=({:>7.3}, {:>7.3}, {:>7.3})",
            body.id.0,
            body.mass,
            body.radius,
            body.position.x,
            body.position.y,
            body.position.z,
            body.velocity.x,
            body.velocity.y,
            body.velocity.z,
        );
    }

    let momentum = sim.total_momentum();
    println!("ticks = {}", sim.ticks());
    println!("bodies = {}", sim.len());
    println!("bounces = {}", bounces);
    println!("merges = {}", merges);
    println!("total_mass = {:.6}", sim.total_mass());
    println!(
        "total_momentum = ({:.6}, {:.6}, {:.6})",
        momentum.x, momentum.y, momentum.z
    );
    println!("kinetic_energy = {:.6}", sim.kinetic_energy());

    Ok(())
}

fn run_viewer(scene: &SceneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let sim = build(scene)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "OrbSim",
        options,
        Box::new(move |cc| Ok(Box::new(viewer::ViewerApp::new(sim, cc)))),
    )?;
    Ok(())
}
