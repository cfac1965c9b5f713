//! End-to-end scenarios driven only through the public tick API

use glam::DVec3;
use orbsim_core::tests::test_helpers::{all_contained, approx_eq, approx_eq_vec, twin_pair};
use orbsim_core::{SimConfig, SharedSimulation, Simulation, Command};
use std::thread;

#[test]
fn test_twin_pair_accelerates_toward_each_other() {
    let mut sim = twin_pair(25.0);

    sim.tick();

    // G * m * m / d² / m = 0.4 * 100 / 100²
    let a = &sim.bodies()[0];
    let b = &sim.bodies()[1];
    assert!(approx_eq(a.velocity.x, 0.004, 1e-12));
    assert!(approx_eq(b.velocity.x, -0.004, 1e-12));
    assert!(a.position.x > -50.0);
    assert!(b.position.x < 50.0);
    assert_eq!(a.acceleration, DVec3::ZERO);
}

#[test]
fn test_twin_pair_merges_into_one() {
    let mut sim = twin_pair(110.0);
    sim.set_merge_mode(true);

    for _ in 0..10 {
        sim.tick();
        if sim.len() == 1 {
            break;
        }
    }

    assert_eq!(sim.len(), 1);
    let survivor = &sim.bodies()[0];
    assert_eq!(survivor.mass, 200.0);
    assert_eq!(survivor.radius, 220.0);
    // Symmetric approach, so no net momentum
    assert!(approx_eq_vec(survivor.velocity, DVec3::ZERO, 1e-12));
}

#[test]
fn test_body_outside_bounds_is_pulled_in_on_first_tick() {
    let mut sim = Simulation::default();
    sim.add_body(1.0, DVec3::new(1000.0, -900.0, 10.0), None, None).unwrap();

    sim.tick();

    let body = &sim.bodies()[0];
    assert_eq!(body.position.x, 375.0);
    assert_eq!(body.position.y, -275.0);
    assert_eq!(body.position.z, 10.0);
    assert!(all_contained(&sim));
}

#[test]
fn test_total_momentum_conserved_without_walls() {
    // Box far larger than anything reachable in the run
    let config = SimConfig::default().with_bounds(DVec3::splat(1.0e9));
    let mut sim = Simulation::new(config).unwrap();
    sim.add_body(100.0, DVec3::new(-80.0, 0.0, 0.0), Some(DVec3::new(0.0, 0.5, 0.0)), Some(10.0))
        .unwrap();
    sim.add_body(40.0, DVec3::new(60.0, 10.0, 0.0), Some(DVec3::new(0.0, -1.0, 0.2)), Some(10.0))
        .unwrap();
    sim.add_body(10.0, DVec3::new(0.0, 90.0, -30.0), None, Some(10.0)).unwrap();
    let before = sim.total_momentum();
    let mass = sim.total_mass();

    for _ in 0..300 {
        sim.tick();
    }

    assert!(approx_eq_vec(sim.total_momentum(), before, 1e-6));
    assert_eq!(sim.total_mass(), mass);
}

#[test]
fn test_same_seed_same_run() {
    let run = || {
        let mut sim = Simulation::new(SimConfig::default().with_seed(1234)).unwrap();
        sim.set_merge_mode(true);
        sim.spawn_many_mini(30);
        sim.spawn_random();
        for _ in 0..100 {
            sim.tick();
        }
        sim.snapshot()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_shared_simulation_takes_input_from_other_threads() {
    let shared = SharedSimulation::new(Simulation::default());
    let sender = shared.sender();

    let input = thread::spawn(move || {
        for i in 0..5 {
            sender
                .send(Command::AddBody {
                    mass: 1.0,
                    position: DVec3::new(i as f64 * 60.0 - 120.0, 0.0, 0.0),
                    velocity: None,
                    radius: Some(5.0),
                })
                .unwrap();
        }
    });
    input.join().unwrap();

    assert!(shared.read().is_empty());

    shared.tick();

    assert_eq!(shared.read().len(), 5);
    assert_eq!(shared.into_inner().ticks(), 1);
}
