use nalgebra::Vector3;

use crate::utils::constants::GRAVITY;

/// Speed below which ground forces are suppressed entirely; the direction
/// of motion is undefined and the aircraft is treated as parked [m/s].
const MIN_GROUND_SPEED: f64 = 0.1;

/// Rolling resistance coefficient for paved surfaces.
const ROLLING_RESISTANCE_COEFF: f64 = 0.02;

/// Ground speed above which nosewheel steering authority has fully faded
/// to its residual [m/s].
const STEERING_FADE_SPEED: f64 = 30.0;

/// Residual steering authority at and above the fade speed.
const STEERING_RESIDUAL: f64 = 0.1;

/// Fraction of the friction budget the nosewheel can command laterally.
const STEERING_FORCE_FRACTION: f64 = 0.2;

/// Snapshot of the wheel-ground interface for one tick.
#[derive(Debug, Clone, Copy)]
pub struct GroundContact {
    pub on_ground: bool,
    /// Gear strut compression [0, 1]. The model treats contact as binary:
    /// full compression whenever on the ground.
    pub gear_compression: f64,
    /// Tyre-surface friction coefficient.
    pub ground_friction: f64,
    /// Horizontal speed [m/s].
    pub ground_speed: f64,
    /// Direction of travel [rad], 0 = north (+Z), positive toward east.
    pub heading: f64,
}

impl GroundContact {
    /// Build a contact snapshot from the current velocity and the tyre
    /// friction for the surface underneath.
    pub fn from_velocity(velocity: &Vector3<f64>, ground_friction: f64) -> Self {
        let ground_speed = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();
        Self {
            on_ground: true,
            gear_compression: 1.0,
            ground_friction,
            ground_speed,
            heading: velocity.x.atan2(velocity.z),
        }
    }
}

/// Force breakdown from one ground-force evaluation [N].
#[derive(Debug, Clone, Default)]
pub struct GroundForces {
    pub rolling_resistance: Vector3<f64>,
    pub braking: Vector3<f64>,
    pub steering: Vector3<f64>,
    pub total: Vector3<f64>,
}

/// Wheel forces while on the ground: rolling resistance, brakes, and
/// nosewheel steering.
///
/// Runs before integration each tick; its total force goes through the
/// external-force accumulator so the integrator treats it like any other
/// force.
#[derive(Debug, Clone)]
pub struct GroundModel {
    /// Aircraft mass used for normal-load estimates [kg].
    pub mass: f64,
    /// Brake force at full pedal [N].
    pub max_brake_force: f64,
    /// Nosewheel deflection at full steering input [rad].
    pub max_steering_angle: f64,
}

impl GroundModel {
    pub fn new(mass: f64, max_brake_force: f64, max_steering_angle: f64) -> Self {
        Self {
            mass,
            max_brake_force,
            max_steering_angle,
        }
    }

    /// Compute wheel forces for this tick.
    ///
    /// All forces act in the horizontal plane. Braking is capped by the
    /// available tyre friction so a locked wheel cannot out-brake the
    /// surface. Steering authority fades with speed: at taxi speed the
    /// nosewheel dominates, at rotation speed the rudder does.
    pub fn ground_forces(
        &self,
        contact: &GroundContact,
        steering_input: f64,
        brake_input: f64,
        velocity: &Vector3<f64>,
    ) -> GroundForces {
        let mut forces = GroundForces::default();

        let horizontal = Vector3::new(velocity.x, 0.0, velocity.z);
        let speed = horizontal.norm();
        if speed < MIN_GROUND_SPEED {
            return forces;
        }

        let motion_dir = horizontal / speed;
        let normal_load = self.mass * GRAVITY;
        let friction_limit = contact.ground_friction * normal_load;

        forces.rolling_resistance = -motion_dir * (ROLLING_RESISTANCE_COEFF * normal_load);

        let brake_magnitude =
            (brake_input.clamp(0.0, 1.0) * self.max_brake_force).min(friction_limit);
        forces.braking = -motion_dir * brake_magnitude;

        // Lateral direction: motion rotated 90 degrees in the ground
        // plane. Positive steering pushes the nose right. The side force
        // goes with the sine of the commanded wheel angle, so a smaller
        // steering range yields proportionally less authority.
        let lateral_dir = Vector3::new(motion_dir.z, 0.0, -motion_dir.x);
        let authority = if speed >= STEERING_FADE_SPEED {
            STEERING_RESIDUAL
        } else {
            1.0 - (1.0 - STEERING_RESIDUAL) * (speed / STEERING_FADE_SPEED)
        };
        let wheel_angle = steering_input.clamp(-1.0, 1.0) * self.max_steering_angle;
        let steering_magnitude =
            wheel_angle.sin() * authority * STEERING_FORCE_FRACTION * friction_limit;
        forces.steering = lateral_dir * steering_magnitude;

        forces.total = forces.rolling_resistance + forces.braking + forces.steering;
        forces
    }
}
