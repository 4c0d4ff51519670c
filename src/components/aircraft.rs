use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Rigid-body state of the aircraft.
///
/// World axes: +Y up, +X east, +Z north. Yaw = 0 faces north (+Z).
/// Rotation is stored as Euler angles `(x = pitch, y = roll, z = yaw)` in
/// radians, each kept within [-pi, pi]; angular velocity uses the same axis
/// assignment.
///
/// Owned exclusively by the flight model; mutated only inside `update()` and
/// `reset()`. Read-only snapshots are published once per tick.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct AircraftState {
    /// Position in world space [m].
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s].
    pub velocity: Vector3<f64>,

    /// Acceleration derived from the latest force sum [m/s^2]. Not carried
    /// across ticks.
    pub acceleration: Vector3<f64>,

    /// Euler angles (pitch, roll, yaw) [rad].
    pub rotation: Vector3<f64>,

    /// Angular velocity (pitch, roll, yaw rates) [rad/s].
    pub angular_velocity: Vector3<f64>,

    /// Total mass, always `empty_mass + fuel` [kg].
    pub mass: f64,

    /// Fuel on board [kg], floored at zero.
    pub fuel: f64,

    /// Whether any gear is in ground contact.
    pub on_ground: bool,
}

impl Default for AircraftState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            rotation: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            mass: 0.0,
            fuel: 0.0,
            on_ground: false,
        }
    }
}

impl AircraftState {
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn pitch(&self) -> f64 {
        self.rotation.x
    }

    pub fn roll(&self) -> f64 {
        self.rotation.y
    }

    pub fn yaw(&self) -> f64 {
        self.rotation.z
    }

    /// Airspeed as the full velocity magnitude [m/s]. Wind is not modelled,
    /// so true airspeed equals inertial speed.
    pub fn airspeed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Horizontal speed over the ground [m/s].
    pub fn ground_speed(&self) -> f64 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }
}

/// Immutable control snapshot supplied once per tick by the input side.
///
/// The flight model never mutates it. Trim inputs carry lower moment
/// authority than the primary controls and are kept separate so consumers
/// can distinguish held deflection from trimmed deflection.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlInputs {
    /// Elevator command [-1, 1], positive = nose up.
    pub pitch: f64,
    /// Aileron command [-1, 1], positive = right roll.
    pub roll: f64,
    /// Rudder command [-1, 1], positive = yaw right.
    pub yaw: f64,
    /// Throttle [0, 1].
    pub throttle: f64,
    /// Flap deflection [0, 1].
    pub flaps: f64,
    /// Wheel brake pedal [0, 1].
    pub brakes: f64,
    /// Gear lever [0, 1] (fixed-gear aircraft ignore it).
    pub gear: f64,
    /// Pitch trim [-1, 1].
    pub pitch_trim: f64,
    /// Rudder trim [-1, 1].
    pub rudder_trim: f64,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            throttle: 0.0,
            flaps: 0.0,
            brakes: 0.0,
            gear: 1.0,
            pitch_trim: 0.0,
            rudder_trim: 0.0,
        }
    }
}

impl ControlInputs {
    /// Return a copy with every channel clamped to its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            pitch: self.pitch.clamp(-1.0, 1.0),
            roll: self.roll.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            throttle: self.throttle.clamp(0.0, 1.0),
            flaps: self.flaps.clamp(0.0, 1.0),
            brakes: self.brakes.clamp(0.0, 1.0),
            gear: self.gear.clamp(0.0, 1.0),
            pitch_trim: self.pitch_trim.clamp(-1.0, 1.0),
            rudder_trim: self.rudder_trim.clamp(-1.0, 1.0),
        }
    }
}
