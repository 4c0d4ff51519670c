use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::ControlInputs;
use crate::resources::{PhysicsConfig, TerrainResource};
use crate::systems::collision::{check_terrain, CollisionResult, CollisionSeverity};
use crate::systems::ground::{GroundContact, GroundModel};
use crate::systems::publish::StateUpdate;
use crate::systems::FlightModel;

/// Tick stages, chained in `FixedUpdate`.
///
/// The two collision checks are separate stages on purpose: the aircraft
/// moves during integration, so the pre-check answer is stale by the time
/// the correction runs and must never be reused.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum PhysicsSet {
    CollisionCheck,
    GroundForces,
    Integration,
    Correction,
    Publish,
}

/// Parking brake, persistent and independent of the pedal channel. While
/// engaged, ground-force calculation sees full brake regardless of pedal
/// input.
#[derive(Resource, Debug, Default)]
pub struct ParkingBrake {
    pub engaged: bool,
}

/// Ground strike notification, emitted from the post-integration
/// correction whenever the aircraft is in terrain contact.
#[derive(Event, Debug, Clone)]
pub struct CollisionEvent {
    pub severity: CollisionSeverity,
    pub position: Vector3<f64>,
    pub terrain_elevation: f64,
    pub descent_rate_fpm: f64,
}

/// Pre-integration terrain probe result, refreshed every tick.
#[derive(Component, Debug, Default)]
pub struct ContactProbe(pub Option<CollisionResult>);

/// Everything an aircraft entity needs to be simulated.
#[derive(Bundle)]
pub struct AircraftBundle {
    pub model: FlightModel,
    pub inputs: ControlInputs,
    pub probe: ContactProbe,
}

impl AircraftBundle {
    pub fn new(model: FlightModel) -> Self {
        Self {
            model,
            inputs: ControlInputs::default(),
            probe: ContactProbe::default(),
        }
    }
}

pub struct FlightPhysicsPlugin {
    pub timestep: f64,
}

impl Default for FlightPhysicsPlugin {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 120.0, // 120 Hz default physics rate
        }
    }
}

impl Plugin for FlightPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PhysicsConfig {
            timestep: self.timestep,
            ..Default::default()
        })
        .init_resource::<TerrainResource>()
        .init_resource::<ParkingBrake>()
        .add_event::<CollisionEvent>()
        .add_event::<StateUpdate>();

        app.insert_resource(Time::<Fixed>::from_seconds(self.timestep));

        app.configure_sets(
            FixedUpdate,
            (
                PhysicsSet::CollisionCheck,
                PhysicsSet::GroundForces,
                PhysicsSet::Integration,
                PhysicsSet::Correction,
                PhysicsSet::Publish,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                pre_collision_check_system.in_set(PhysicsSet::CollisionCheck),
                ground_force_system.in_set(PhysicsSet::GroundForces),
                integration_system.in_set(PhysicsSet::Integration),
                ground_correction_system.in_set(PhysicsSet::Correction),
                publish_state_system.in_set(PhysicsSet::Publish),
            ),
        );
    }
}

/// Collision check #1, at the pre-integration position. Feeds the
/// ground-force stage through the entity's probe.
pub fn pre_collision_check_system(
    terrain: Res<TerrainResource>,
    mut query: Query<(&FlightModel, &mut ContactProbe)>,
) {
    for (model, mut probe) in query.iter_mut() {
        let state = model.state();
        probe.0 = Some(check_terrain(
            terrain.provider(),
            &state.position,
            &state.velocity,
        ));
    }
}

/// When the pre-check found contact, push wheel forces into the model's
/// accumulator so they are integrated together with the aerodynamic
/// forces this tick.
pub fn ground_force_system(
    parking_brake: Res<ParkingBrake>,
    mut query: Query<(&mut FlightModel, &ControlInputs, &ContactProbe)>,
) {
    for (mut model, inputs, probe) in query.iter_mut() {
        let colliding = matches!(probe.0, Some(result) if result.is_colliding);
        if !colliding {
            continue;
        }

        model.state_mut().on_ground = true;

        let params = model.params();
        let state = model.state();
        let ground_velocity = Vector3::new(state.velocity.x, 0.0, state.velocity.z);
        let contact = GroundContact::from_velocity(&state.velocity, params.wheel_friction);

        let brake_input = if parking_brake.engaged {
            1.0
        } else {
            inputs.brakes
        };

        let ground_model =
            GroundModel::new(state.mass, params.max_brake_force, params.max_steering_angle);
        let forces =
            ground_model.ground_forces(&contact, inputs.yaw, brake_input, &ground_velocity);
        model.apply_force(forces.total, Vector3::zeros());
    }
}

pub fn integration_system(
    config: Res<PhysicsConfig>,
    mut query: Query<(&mut FlightModel, &ControlInputs)>,
) {
    for (mut model, inputs) in query.iter_mut() {
        model.set_environment(config.gravity, config.air_density);
        model.update(config.timestep, inputs);
    }
}

/// Collision check #2, against the post-integration position: clamp to the
/// surface, kill any remaining downward velocity, and report the strike.
pub fn ground_correction_system(
    terrain: Res<TerrainResource>,
    mut query: Query<&mut FlightModel>,
    mut collision_events: EventWriter<CollisionEvent>,
) {
    for mut model in query.iter_mut() {
        let (position, velocity) = {
            let state = model.state();
            (state.position, state.velocity)
        };
        let result = check_terrain(terrain.provider(), &position, &velocity);

        if result.is_colliding {
            let elevation = result
                .terrain_elevation
                .unwrap_or(position.y);
            let state = model.state_mut();
            state.position.y = elevation;
            if state.velocity.y < 0.0 {
                state.velocity.y = 0.0;
            }
            state.on_ground = true;

            if result.severity == CollisionSeverity::Severe {
                warn!(
                    "hard ground strike at {:.0} ft/min",
                    result.descent_rate_fpm
                );
            }
            collision_events.send(CollisionEvent {
                severity: result.severity,
                position: model.state().position,
                terrain_elevation: elevation,
                descent_rate_fpm: result.descent_rate_fpm,
            });
        } else {
            model.state_mut().on_ground = false;
        }
    }
}

pub fn publish_state_system(
    query: Query<&FlightModel>,
    mut state_events: EventWriter<StateUpdate>,
) {
    for model in query.iter() {
        state_events.send(StateUpdate::from_state(model.state(), model.forces()));
    }
}
