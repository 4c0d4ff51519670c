use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{AircraftState, FlightForces};
use crate::utils::constants::{
    METERS_TO_FEET, MPS_TO_FPM, MPS_TO_KNOTS, RAD_TO_DEG_PUBLISH,
};

/// Per-tick state snapshot published to instrument, audio, and telemetry
/// consumers.
///
/// Raw SI state rides along untouched; the derived fields use the exact
/// conversion factors consumers calibrate against, so they are computed
/// here once rather than re-derived downstream.
#[derive(Event, Debug, Clone)]
pub struct StateUpdate {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,
    pub rotation: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,

    pub airspeed_kt: f64,
    pub ground_speed_kt: f64,
    pub altitude_ft: f64,
    pub vertical_speed_fpm: f64,
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub bank_deg: f64,
    /// For stall-warning consumers.
    pub angle_of_attack_deg: f64,

    pub mass: f64,
    pub fuel: f64,
    pub on_ground: bool,
}

impl StateUpdate {
    pub fn from_state(state: &AircraftState, forces: &FlightForces) -> Self {
        Self {
            position: state.position,
            velocity: state.velocity,
            acceleration: state.acceleration,
            rotation: state.rotation,
            angular_velocity: state.angular_velocity,
            airspeed_kt: state.airspeed() * MPS_TO_KNOTS,
            ground_speed_kt: state.ground_speed() * MPS_TO_KNOTS,
            altitude_ft: state.position.y * METERS_TO_FEET,
            vertical_speed_fpm: state.velocity.y * MPS_TO_FPM,
            heading_deg: state.yaw() * RAD_TO_DEG_PUBLISH,
            pitch_deg: state.pitch() * RAD_TO_DEG_PUBLISH,
            bank_deg: state.roll() * RAD_TO_DEG_PUBLISH,
            angle_of_attack_deg: forces.angle_of_attack * RAD_TO_DEG_PUBLISH,
            mass: state.mass,
            fuel: state.fuel,
            on_ground: state.on_ground,
        }
    }
}
