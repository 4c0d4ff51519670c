#![allow(dead_code)]

use bevy::prelude::*;

use airdyn::components::ControlInputs;
use airdyn::plugins::physics::{
    ground_correction_system, ground_force_system, integration_system,
    pre_collision_check_system, publish_state_system, AircraftBundle, CollisionEvent,
    ParkingBrake,
};
use airdyn::resources::{FlightModelConfig, PhysicsConfig, TerrainResource};
use airdyn::systems::{FlightModel, StateUpdate};
use nalgebra::Vector3;

/// Builder for a deterministic physics test app.
///
/// Systems run chained in `Update` rather than `FixedUpdate`, so every
/// `app.update()` advances exactly one physics tick of `PhysicsConfig::
/// timestep` seconds regardless of wall-clock time.
pub struct TestAppBuilder {
    physics_config: PhysicsConfig,
    terrain: TerrainResource,
    initial_position: Vector3<f64>,
    initial_velocity: Vector3<f64>,
    config: FlightModelConfig,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            physics_config: PhysicsConfig::default(),
            terrain: TerrainResource::default(),
            initial_position: Vector3::new(0.0, 1000.0, 0.0),
            initial_velocity: Vector3::zeros(),
            config: cessna_172_config(),
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics_config = config;
        self
    }

    pub fn with_terrain(mut self, terrain: TerrainResource) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_initial_position(mut self, position: Vector3<f64>) -> Self {
        self.initial_position = position;
        self
    }

    pub fn with_initial_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.initial_velocity = velocity;
        self
    }

    pub fn with_config(mut self, config: FlightModelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        app.insert_resource(self.physics_config)
            .insert_resource(self.terrain)
            .init_resource::<ParkingBrake>()
            .add_event::<CollisionEvent>()
            .add_event::<StateUpdate>();

        app.add_systems(
            Update,
            (
                pre_collision_check_system,
                ground_force_system,
                integration_system,
                ground_correction_system,
                publish_state_system,
            )
                .chain(),
        );

        let mut model = FlightModel::from_config(&self.config).expect("valid aircraft config");
        {
            let state = model.state_mut();
            state.position = self.initial_position;
            state.velocity = self.initial_velocity;
        }
        let aircraft = app.world_mut().spawn(AircraftBundle::new(model)).id();

        TestApp { app, aircraft }
    }
}

pub struct TestApp {
    pub app: App,
    pub aircraft: Entity,
}

impl TestApp {
    pub fn step(&mut self) {
        self.app.update();
    }

    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.update();
        }
    }

    pub fn model(&self) -> &FlightModel {
        self.app
            .world()
            .entity(self.aircraft)
            .get::<FlightModel>()
            .expect("aircraft has a flight model")
    }

    pub fn set_controls(&mut self, inputs: ControlInputs) {
        let mut entity = self.app.world_mut().entity_mut(self.aircraft);
        *entity.get_mut::<ControlInputs>().expect("control inputs") = inputs;
    }

    pub fn set_parking_brake(&mut self, engaged: bool) {
        self.app.world_mut().resource_mut::<ParkingBrake>().engaged = engaged;
    }

    pub fn drain_collision_events(&mut self) -> Vec<CollisionEvent> {
        let mut events = self
            .app
            .world_mut()
            .resource_mut::<Events<CollisionEvent>>();
        events.drain().collect()
    }

    pub fn drain_state_updates(&mut self) -> Vec<StateUpdate> {
        let mut events = self.app.world_mut().resource_mut::<Events<StateUpdate>>();
        events.drain().collect()
    }
}

pub fn cessna_172_config() -> FlightModelConfig {
    FlightModelConfig {
        name: Some("cessna_172".to_string()),
        wing_area_sqft: Some(174.0),
        weight_lbs: Some(2400.0),
        max_thrust_lbs: Some(300.0),
        ..Default::default()
    }
}
