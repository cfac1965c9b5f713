//! Tests for selection handling, live edits and snapshot/reset

use glam::DVec3;
use orbsim_core::spawn::{DEFAULT_SPAWN_MASS, MINI_MASS, RANDOM_MASS};
use orbsim_core::{get_body_states, BodyEdit, BodyId, SimError, Simulation};

fn three_bodies() -> (Simulation, Vec<BodyId>) {
    let mut sim = Simulation::default();
    let ids = (0..3)
        .map(|i| {
            sim.add_body(1.0, DVec3::new(i as f64 * 100.0 - 100.0, 0.0, 0.0), None, Some(5.0))
                .unwrap()
        })
        .collect();
    (sim, ids)
}

#[test]
fn test_spawns_select_the_new_body() {
    let mut sim = Simulation::default();

    let random = sim.spawn_random();
    assert_eq!(sim.selected(), Some(random));
    assert!(RANDOM_MASS.contains(&sim.body(random).unwrap().mass));

    let default = sim.spawn_default();
    assert_eq!(sim.selected(), Some(default));
    let body = sim.body(default).unwrap();
    assert_eq!(body.mass, DEFAULT_SPAWN_MASS);
    assert_eq!(body.position, DVec3::ZERO);

    let minis = sim.spawn_many_mini(100);
    assert_eq!(minis.len(), 100);
    assert_eq!(sim.selected(), minis.last().copied());
    assert!(minis
        .iter()
        .all(|id| MINI_MASS.contains(&sim.body(*id).unwrap().mass)));
    assert_eq!(sim.len(), 102);
}

#[test]
fn test_select_previous_wraps() {
    let (mut sim, ids) = three_bodies();

    sim.select_previous();
    assert_eq!(sim.selected(), Some(ids[0]));

    sim.select_previous();
    assert_eq!(sim.selected(), Some(ids[2]));

    sim.select_previous();
    assert_eq!(sim.selected(), Some(ids[1]));
}

#[test]
fn test_select_previous_on_empty_is_noop() {
    let mut sim = Simulation::default();
    sim.select_previous();
    assert_eq!(sim.selected(), None);
}

#[test]
fn test_select_unknown_handle_clears() {
    let (mut sim, ids) = three_bodies();
    sim.select(Some(ids[1]));
    sim.select(Some(BodyId(9_999)));
    assert_eq!(sim.selected(), None);
}

#[test]
fn test_edit_selected_overwrites_fields() {
    let (mut sim, ids) = three_bodies();
    sim.select(Some(ids[2]));

    sim.edit_selected(&BodyEdit {
        mass: Some(42.0),
        radius: Some(12.0),
        position: Some(DVec3::new(1.0, 2.0, 3.0)),
        velocity: Some(DVec3::new(-1.0, 0.0, 0.0)),
        acceleration: Some(DVec3::new(0.0, 0.5, 0.0)),
    })
    .unwrap();

    let body = sim.body(ids[2]).unwrap();
    assert_eq!(body.mass, 42.0);
    assert_eq!(body.radius, 12.0);
    assert_eq!(body.position, DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(body.velocity, DVec3::new(-1.0, 0.0, 0.0));
    assert_eq!(body.acceleration, DVec3::new(0.0, 0.5, 0.0));
}

#[test]
fn test_rejected_edit_changes_nothing() {
    let (mut sim, ids) = three_bodies();
    sim.select(Some(ids[0]));
    let before = sim.body(ids[0]).unwrap().clone();

    let err = sim.edit_selected(&BodyEdit {
        mass: Some(0.0),
        position: Some(DVec3::new(7.0, 7.0, 7.0)),
        ..Default::default()
    });

    assert_eq!(err, Err(SimError::InvalidMass(0.0)));
    assert_eq!(sim.body(ids[0]).unwrap(), &before);
}

#[test]
fn test_edit_without_selection_is_noop() {
    let (mut sim, _) = three_bodies();
    let before = sim.snapshot();
    sim.edit_selected(&BodyEdit {
        mass: Some(3.0),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(sim.snapshot(), before);
}

#[test]
fn test_body_states_flag_selection() {
    let (mut sim, ids) = three_bodies();
    sim.select(Some(ids[1]));
    let states = get_body_states(&sim);
    let flags: Vec<bool> = states.iter().map(|s| s.selected).collect();
    assert_eq!(flags, vec![false, true, false]);
}

#[test]
fn test_snapshot_is_independent_of_live_bodies() {
    let mut sim = Simulation::default();
    sim.add_body(100.0, DVec3::new(-50.0, 0.0, 0.0), Some(DVec3::new(0.0, 1.0, 0.0)), None)
        .unwrap();
    sim.add_body(100.0, DVec3::new(50.0, 0.0, 0.0), None, None).unwrap();
    let snapshot = sim.snapshot();
    let copy = snapshot.clone();

    for _ in 0..10 {
        sim.tick();
    }

    assert_eq!(snapshot, copy);
    assert_ne!(snapshot.bodies(), sim.bodies());
}

#[test]
fn test_restore_brings_back_every_field() {
    let mut sim = Simulation::default();
    let id = sim.add_body(7.0, DVec3::new(1.0, 1.0, 1.0), Some(DVec3::new(2.0, 0.0, 0.0)), Some(3.0))
        .unwrap();
    sim.select(Some(id));
    sim.edit_selected(&BodyEdit {
        acceleration: Some(DVec3::new(0.0, 0.0, 0.25)),
        ..Default::default()
    })
    .unwrap();
    let snapshot = sim.snapshot();

    sim.tick();
    sim.clear();
    sim.restore(&snapshot);

    assert_eq!(sim.bodies(), snapshot.bodies());
    let body = sim.body(id).unwrap();
    assert_eq!(body.acceleration, DVec3::new(0.0, 0.0, 0.25));
    assert_eq!(body.velocity, DVec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_reset_returns_to_initial_snapshot() {
    let mut sim = Simulation::default();
    sim.add_body(100.0, DVec3::new(-50.0, 0.0, 0.0), None, None).unwrap();
    sim.add_body(100.0, DVec3::new(50.0, 0.0, 0.0), None, None).unwrap();
    sim.set_initial_snapshot();
    let initial = sim.snapshot();

    sim.spawn_many_mini(10);
    for _ in 0..25 {
        sim.tick();
    }
    sim.reset();

    assert_eq!(sim.bodies(), initial.bodies());
    assert_eq!(sim.selected(), None);

    // A second reset restores the same state again
    sim.tick();
    sim.reset();
    assert_eq!(sim.bodies(), initial.bodies());
}

#[test]
fn test_ids_stay_unique_after_restore() {
    let mut sim = Simulation::default();
    sim.add_body(1.0, DVec3::ZERO, None, None).unwrap();
    let snapshot = sim.snapshot();
    sim.clear();
    sim.restore(&snapshot);

    let fresh = sim.add_body(1.0, DVec3::new(100.0, 0.0, 0.0), None, None).unwrap();

    assert!(snapshot.bodies().iter().all(|b| b.id() != fresh));
}
