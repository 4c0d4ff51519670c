use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{AircraftState, ControlInputs, ExternalForceAccumulator, FlightForces};
use crate::resources::config::{AircraftParams, FlightModelConfig};
use crate::systems::aerodynamics;
use crate::systems::propulsion::{FixedPitchPropeller, Propeller};
use crate::utils::constants::{AIR_DENSITY_SEA_LEVEL, GRAVITY};
use crate::utils::{normalize_angle, ConfigError};

/// Six-degree-of-freedom point-mass flight model with attitude dynamics.
///
/// Forward Euler, single step per `update()`, no sub-stepping: the caller
/// owns the trade-off between dt and stability and is expected to drive
/// this at a fixed real-time cadence. All per-tick state lives here; the
/// model performs no I/O and holds no references outward.
#[derive(Component)]
pub struct FlightModel {
    params: AircraftParams,
    state: AircraftState,
    forces: FlightForces,
    external: ExternalForceAccumulator,

    propeller: Option<Box<dyn Propeller>>,
    /// Shaft power feed [W], pushed in by the engine side each tick.
    engine_power: f64,
    engine_rpm: f64,

    gravity: f64,
    air_density: f64,

    // Trig cache, refreshed only when rotation changed.
    cos_yaw: f64,
    sin_yaw: f64,
    trig_dirty: bool,

    updates: u64,
}

impl FlightModel {
    pub fn new(params: AircraftParams) -> Self {
        let mut state = AircraftState::default();
        state.fuel = params.fuel_capacity;
        state.mass = params.empty_mass + params.fuel_capacity;

        let propeller: Option<Box<dyn Propeller>> = params.engine_power.map(|_| {
            Box::new(FixedPitchPropeller::new(
                params.propeller_diameter,
                params.propeller_pitch_ratio,
            )) as Box<dyn Propeller>
        });

        Self {
            params,
            state,
            forces: FlightForces::default(),
            external: ExternalForceAccumulator::default(),
            propeller,
            engine_power: 0.0,
            engine_rpm: 0.0,
            gravity: GRAVITY,
            air_density: AIR_DENSITY_SEA_LEVEL,
            cos_yaw: 1.0,
            sin_yaw: 0.0,
            trig_dirty: true,
            updates: 0,
        }
    }

    /// Validate a raw configuration and build the model from it. The only
    /// rejecting entry point; `update()` never fails after this succeeds.
    pub fn from_config(config: &FlightModelConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.validate()?))
    }

    pub fn set_environment(&mut self, gravity: f64, air_density: f64) {
        self.gravity = gravity;
        self.air_density = air_density;
    }

    /// Feed the current engine operating point. Zero power or rpm makes
    /// the propeller produce nothing and the model fall back to the
    /// direct throttle-to-thrust mapping.
    pub fn set_engine_state(&mut self, power_watts: f64, rpm: f64) {
        self.engine_power = power_watts;
        self.engine_rpm = rpm;
    }

    /// Queue an external force [N] for the next update. `point` is unused:
    /// single-point force model.
    pub fn apply_force(&mut self, force: Vector3<f64>, point: Vector3<f64>) {
        self.external.apply(force, point);
    }

    /// Replace the state wholesale. Reconfiguration mid-flight goes
    /// through here, never through partial edits of the live state.
    pub fn reset(&mut self, state: AircraftState) {
        self.state = state;
        self.external.clear();
        self.trig_dirty = true;
        self.updates = 0;
        debug!("flight model reset to position {:?}", self.state.position);
    }

    pub fn state(&self) -> &AircraftState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AircraftState {
        self.trig_dirty = true;
        &mut self.state
    }

    pub fn forces(&self) -> &FlightForces {
        &self.forces
    }

    pub fn propeller(&self) -> Option<&dyn Propeller> {
        self.propeller.as_deref()
    }

    /// Install or replace the powerplant model.
    pub fn set_propeller(&mut self, propeller: Box<dyn Propeller>) {
        self.propeller = Some(propeller);
    }

    pub fn params(&self) -> &AircraftParams {
        &self.params
    }

    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f64, inputs: &ControlInputs) -> &AircraftState {
        self.updates += 1;
        let inputs = inputs.clamped();

        if self.trig_dirty {
            self.refresh_trig();
        }

        self.calculate_forces(&inputs);

        self.forces.total += self.external.drain();

        self.state.acceleration = self.forces.total / self.state.mass;
        self.state.velocity += self.state.acceleration * dt;
        self.state.position += self.state.velocity * dt;

        self.update_rotation(dt, &inputs);

        // Fuel burn scales linearly with throttle; mass is re-derived
        // every tick rather than incrementally adjusted.
        let burned = inputs.throttle * self.params.fuel_flow_full_throttle * dt;
        self.state.fuel = (self.state.fuel - burned).max(0.0);
        self.state.mass = self.params.empty_mass + self.state.fuel;

        &self.state
    }

    fn refresh_trig(&mut self) {
        self.cos_yaw = self.state.rotation.z.cos();
        self.sin_yaw = self.state.rotation.z.sin();
        self.trig_dirty = false;
    }

    fn calculate_forces(&mut self, inputs: &ControlInputs) {
        let airspeed = self.state.airspeed();
        let q = 0.5 * self.air_density * airspeed * airspeed;
        let wing_area = self.params.wing_area;

        let aoa = aerodynamics::angle_of_attack(&self.state.velocity, self.state.pitch());
        let cl = aerodynamics::lift_coefficient(&self.params, aoa, inputs.flaps);
        let lift_magnitude = q * wing_area * cl;
        self.forces.lift = aerodynamics::lift_vector(&self.state.velocity, lift_magnitude);

        let cd = aerodynamics::drag_coefficient(&self.params, cl, aoa);
        let drag_magnitude = q * wing_area * cd;
        self.forces.drag = if self.state.velocity.norm_squared() > 0.01 {
            self.state.velocity.normalize() * (-drag_magnitude)
        } else {
            Vector3::zeros()
        };

        self.forces.drag_parasite_n = q * wing_area * self.params.cd_parasite;
        self.forces.drag_induced_n =
            q * wing_area * aerodynamics::induced_drag_coefficient(&self.params, cl);
        self.forces.lift_coefficient = cl;
        self.forces.angle_of_attack = aoa;

        // Thrust acts along the heading, not the velocity: sideslip does
        // not redirect it.
        let thrust_magnitude = match &self.propeller {
            Some(prop) if self.engine_power > 0.0 => prop.thrust(
                self.engine_power,
                self.engine_rpm,
                airspeed,
                self.air_density,
            ),
            _ => inputs.throttle * self.params.max_thrust,
        };
        self.forces.thrust =
            Vector3::new(thrust_magnitude * self.sin_yaw, 0.0, thrust_magnitude * self.cos_yaw);

        self.forces.weight = Vector3::new(0.0, -self.state.mass * self.gravity, 0.0);

        self.forces.sum_components();
    }

    fn update_rotation(&mut self, dt: f64, inputs: &ControlInputs) {
        let p = &self.params;
        let airspeed = self.state.airspeed();
        let q = 0.5 * self.air_density * airspeed * airspeed;
        let qsc = q * p.wing_area * p.chord;
        // Rate damping scales with v, not v^2.
        let damping_scale =
            0.5 * self.air_density * airspeed * p.wing_area * p.chord * p.chord;

        let aoa = aerodynamics::angle_of_attack(&self.state.velocity, self.state.pitch());

        // Pitch: elevator + trim + static stability about the equilibrium
        // AoA + rate damping.
        let elevator_moment = qsc * p.elevator_effectiveness * inputs.pitch;
        let trim_moment = qsc * p.trim_effectiveness * inputs.pitch_trim;
        let stability_moment = qsc * p.pitch_stability * (aoa - p.equilibrium_aoa);
        let pitch_damping_moment =
            damping_scale * p.pitch_damping * self.state.angular_velocity.x;
        let pitch_acceleration =
            (elevator_moment + trim_moment + stability_moment + pitch_damping_moment)
                / p.pitch_inertia;

        // Roll: aileron + rate damping.
        let aileron_moment = qsc * p.aileron_effectiveness * inputs.roll;
        let roll_damping_moment = damping_scale * p.roll_damping * self.state.angular_velocity.y;
        let roll_acceleration = (aileron_moment + roll_damping_moment) / p.roll_inertia;

        // Yaw: rudder (trim folds into the pedal command) + rate damping.
        let rudder_command = (inputs.yaw + inputs.rudder_trim).clamp(-1.0, 1.0);
        let rudder_moment = qsc * p.rudder_effectiveness * rudder_command;
        let yaw_damping_moment = damping_scale * p.yaw_damping * self.state.angular_velocity.z;
        let yaw_acceleration = (rudder_moment + yaw_damping_moment) / p.yaw_inertia;

        self.state.angular_velocity += Vector3::new(
            pitch_acceleration * dt,
            roll_acceleration * dt,
            yaw_acceleration * dt,
        );

        self.state.rotation += self.state.angular_velocity * dt;
        self.state.rotation.x = normalize_angle(self.state.rotation.x);
        self.state.rotation.y = normalize_angle(self.state.rotation.y);
        self.state.rotation.z = normalize_angle(self.state.rotation.z);

        if self.state.on_ground {
            self.apply_ground_attitude_constraints(dt, airspeed);
        }

        self.trig_dirty = true;
    }

    /// Gear-geometry attitude behaviour: spring-damper settling toward the
    /// three-point stance when slow (aerodynamic damping vanishes with
    /// airspeed, so without this the attitude drifts while parked), plus
    /// hard clamps for the nose-gear, tail-strike, and wingtip limits.
    fn apply_ground_attitude_constraints(&mut self, dt: f64, airspeed: f64) {
        let p = &self.params;

        if airspeed < p.settle_speed {
            let pitch_error = self.state.rotation.x - p.ground_pitch_neutral;
            let spring_accel = -p.settle_spring * pitch_error;
            let damping_accel = -p.settle_damping * self.state.angular_velocity.x;
            self.state.angular_velocity.x += (spring_accel + damping_accel) * dt;

            self.state.angular_velocity.y -=
                p.settle_damping * self.state.angular_velocity.y * dt;
        }

        if self.state.rotation.x < p.ground_pitch_min {
            self.state.rotation.x = p.ground_pitch_min;
            if self.state.angular_velocity.x < 0.0 {
                self.state.angular_velocity.x = 0.0;
            }
        } else if self.state.rotation.x > p.ground_pitch_max {
            self.state.rotation.x = p.ground_pitch_max;
            if self.state.angular_velocity.x > 0.0 {
                self.state.angular_velocity.x = 0.0;
            }
        }

        if self.state.rotation.y.abs() > p.ground_roll_limit {
            let clamped = p.ground_roll_limit.copysign(self.state.rotation.y);
            self.state.rotation.y = clamped;
            if self.state.rotation.y * self.state.angular_velocity.y > 0.0 {
                self.state.angular_velocity.y = 0.0;
            }
        }
    }
}
