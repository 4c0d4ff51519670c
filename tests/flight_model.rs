mod common;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use airdyn::components::ControlInputs;
use airdyn::resources::{PhysicsConfig, TerrainResource};
use common::TestAppBuilder;

#[test]
fn test_plugin_configures_fixed_timestep() {
    use std::time::Duration;

    use bevy::app::App;
    use bevy::time::{Fixed, Time};
    use bevy::MinimalPlugins;

    use airdyn::plugins::FlightPhysicsPlugin;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(FlightPhysicsPlugin { timestep: 0.01 });

    assert_eq!(
        app.world().resource::<Time<Fixed>>().timestep(),
        Duration::from_secs_f64(0.01)
    );
    assert_relative_eq!(app.world().resource::<PhysicsConfig>().timestep, 0.01);
}

#[test]
fn test_gravity_only_fall_through_app() {
    let mut test_app = TestAppBuilder::new()
        .with_initial_position(Vector3::new(0.0, 1000.0, 0.0))
        .build();

    test_app.step();

    let state = test_app.model().state();
    assert!(state.velocity.y < 0.0);
    assert!(state.position.y < 1000.0);
    assert!(!state.on_ground);
}

#[test]
fn test_state_update_published_every_tick() {
    let mut test_app = TestAppBuilder::new()
        .with_initial_position(Vector3::new(0.0, 500.0, 0.0))
        .with_initial_velocity(Vector3::new(0.0, 0.0, 50.0))
        .build();

    for _ in 0..5 {
        test_app.step();
        let updates = test_app.drain_state_updates();
        assert_eq!(updates.len(), 1);
        let update = updates.first().unwrap();
        assert_relative_eq!(
            update.airspeed_kt,
            test_app.model().state().airspeed() * 1.94384,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            update.altitude_ft,
            test_app.model().state().position.y * 3.28084,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_published_aoa_reflects_flight_path() {
    // Descending with level pitch: positive AoA for the stall-warning side.
    let mut test_app = TestAppBuilder::new()
        .with_initial_position(Vector3::new(0.0, 800.0, 0.0))
        .with_initial_velocity(Vector3::new(0.0, -5.0, 50.0))
        .build();

    test_app.step();
    let updates = test_app.drain_state_updates();
    let update = updates.first().unwrap();
    assert!(update.angle_of_attack_deg > 1.0);
    // And it must differ from the published pitch.
    assert!((update.angle_of_attack_deg - update.pitch_deg).abs() > 1.0);
}

#[test]
fn test_fall_ends_clamped_on_terrain() {
    let mut test_app = TestAppBuilder::new()
        .with_terrain(TerrainResource::flat(0.0))
        .with_initial_position(Vector3::new(0.0, 5.0, 0.0))
        .build();

    test_app.run_steps(300);

    let state = test_app.model().state();
    assert!(state.on_ground);
    assert_relative_eq!(state.position.y, 0.0);
    assert!(state.velocity.y >= 0.0);
}

#[test]
fn test_ground_clamp_idempotent() {
    let mut test_app = TestAppBuilder::new()
        .with_terrain(TerrainResource::flat(0.0))
        .with_initial_position(Vector3::new(0.0, 0.0, 0.0))
        .build();

    for _ in 0..120 {
        test_app.step();
        let state = test_app.model().state();
        assert_relative_eq!(state.position.y, 0.0);
        assert!(state.velocity.y >= 0.0);
        assert!(state.on_ground);
    }
}

#[test]
fn test_terrain_elevation_respected() {
    let mut test_app = TestAppBuilder::new()
        .with_terrain(TerrainResource::flat(250.0))
        .with_initial_position(Vector3::new(0.0, 251.0, 0.0))
        .build();

    test_app.run_steps(200);

    let state = test_app.model().state();
    assert!(state.on_ground);
    assert_relative_eq!(state.position.y, 250.0);
}

#[test]
fn test_takeoff_transition_to_airborne() {
    // Fast enough that lift exceeds weight even at zero AoA.
    let mut test_app = TestAppBuilder::new()
        .with_terrain(TerrainResource::flat(0.0))
        .with_initial_position(Vector3::new(0.0, 0.0, 0.0))
        .with_initial_velocity(Vector3::new(0.0, 0.0, 80.0))
        .build();

    test_app.set_controls(ControlInputs {
        throttle: 1.0,
        ..Default::default()
    });
    test_app.run_steps(20);

    let state = test_app.model().state();
    assert!(!state.on_ground);
    assert!(state.position.y > 0.0);
    assert!(state.velocity.y > 0.0);
}

#[test]
fn test_fuel_and_mass_published_consistently() {
    let mut test_app = TestAppBuilder::new()
        .with_initial_position(Vector3::new(0.0, 1500.0, 0.0))
        .with_initial_velocity(Vector3::new(0.0, 0.0, 55.0))
        .build();

    test_app.set_controls(ControlInputs {
        throttle: 1.0,
        ..Default::default()
    });

    let empty_mass = test_app.model().params().empty_mass;
    let mut previous_fuel = f64::MAX;
    for _ in 0..60 {
        test_app.step();
        let updates = test_app.drain_state_updates();
        let update = updates.first().unwrap();
        assert!(update.fuel < previous_fuel);
        assert_relative_eq!(update.mass, empty_mass + update.fuel);
        previous_fuel = update.fuel;
    }
}
