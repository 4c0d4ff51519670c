use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::constants::{
    DEGREES_TO_RADIANS, HP_TO_WATTS, LBF_TO_N, LBS_TO_KG, SQFT_TO_SQM,
};
use crate::utils::ConfigError;

/// Fixed-step simulation settings shared by every physics system.
///
/// `timestep` is the authoritative dt: systems read it from this resource
/// rather than from wall-clock time, so a run is reproducible tick for tick.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Integration step [s].
    pub timestep: f64,
    /// Gravitational acceleration [m/s^2].
    pub gravity: f64,
    /// Air density [kg/m^3].
    pub air_density: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 120.0,
            gravity: crate::utils::constants::GRAVITY,
            air_density: crate::utils::constants::AIR_DENSITY_SEA_LEVEL,
        }
    }
}

/// Raw aircraft definition as it appears in a YAML file.
///
/// Everything is optional at this stage; `validate()` enforces the required
/// fields, converts imperial inputs to SI, and fills the tuned defaults for
/// whatever the file leaves out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightModelConfig {
    pub name: Option<String>,

    // Required airframe basics (imperial, as printed in a POH).
    pub wing_area_sqft: Option<f64>,
    pub weight_lbs: Option<f64>,
    pub max_thrust_lbs: Option<f64>,

    // Optional powerplant description. When present, a fixed-pitch
    // propeller model replaces the direct throttle-to-thrust mapping.
    pub engine_power_hp: Option<f64>,
    pub propeller_diameter_m: Option<f64>,
    pub propeller_pitch_ratio: Option<f64>,

    pub fuel_capacity_lbs: Option<f64>,
    pub fuel_flow_kg_per_s: Option<f64>,

    // Aerodynamic overrides.
    pub cl_0: Option<f64>,
    pub cl_alpha_per_deg: Option<f64>,
    pub cl_max: Option<f64>,
    pub cl_max_flaps: Option<f64>,
    pub cl_flap_delta: Option<f64>,
    pub stall_angle_deg: Option<f64>,
    pub cd_parasite: Option<f64>,
    pub aspect_ratio: Option<f64>,
    pub oswald_efficiency: Option<f64>,

    // Moment and inertia overrides.
    pub chord_m: Option<f64>,
    pub pitch_inertia: Option<f64>,
    pub roll_inertia: Option<f64>,
    pub yaw_inertia: Option<f64>,
    pub elevator_effectiveness: Option<f64>,
    pub trim_effectiveness: Option<f64>,
    pub aileron_effectiveness: Option<f64>,
    pub rudder_effectiveness: Option<f64>,
    pub pitch_stability: Option<f64>,
    pub equilibrium_aoa_rad: Option<f64>,
    pub pitch_damping: Option<f64>,
    pub roll_damping: Option<f64>,
    pub yaw_damping: Option<f64>,

    // Ground handling overrides.
    pub max_brake_force: Option<f64>,
    pub max_steering_angle_deg: Option<f64>,
    pub wheel_friction: Option<f64>,
}

impl FlightModelConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    /// Convert to validated SI parameters, rejecting missing or
    /// non-physical inputs.
    pub fn validate(&self) -> Result<AircraftParams, ConfigError> {
        let wing_area_sqft = self
            .wing_area_sqft
            .ok_or(ConfigError::MissingParameter("wing_area_sqft"))?;
        let weight_lbs = self
            .weight_lbs
            .ok_or(ConfigError::MissingParameter("weight_lbs"))?;
        let max_thrust_lbs = self
            .max_thrust_lbs
            .ok_or(ConfigError::MissingParameter("max_thrust_lbs"))?;

        if wing_area_sqft <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "wing_area_sqft must be positive, got {}",
                wing_area_sqft
            )));
        }
        if weight_lbs <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "weight_lbs must be positive, got {}",
                weight_lbs
            )));
        }
        if max_thrust_lbs < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_thrust_lbs must be non-negative, got {}",
                max_thrust_lbs
            )));
        }
        if let Some(power) = self.engine_power_hp {
            if power <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "engine_power_hp must be positive, got {}",
                    power
                )));
            }
        }

        let defaults = AircraftParams::cessna_172();

        let stall_angle_deg = self.stall_angle_deg.unwrap_or(defaults.stall_angle_deg);
        if stall_angle_deg <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "stall_angle_deg must be positive, got {}",
                stall_angle_deg
            )));
        }

        Ok(AircraftParams {
            name: self.name.clone().unwrap_or_else(|| "unnamed".to_string()),
            wing_area: wing_area_sqft * SQFT_TO_SQM,
            empty_mass: weight_lbs * LBS_TO_KG,
            max_thrust: max_thrust_lbs * LBF_TO_N,
            engine_power: self.engine_power_hp.map(|hp| hp * HP_TO_WATTS),
            propeller_diameter: self
                .propeller_diameter_m
                .unwrap_or(defaults.propeller_diameter),
            propeller_pitch_ratio: self
                .propeller_pitch_ratio
                .unwrap_or(defaults.propeller_pitch_ratio),
            fuel_capacity: self.fuel_capacity_lbs.unwrap_or(220.0) * LBS_TO_KG,
            fuel_flow_full_throttle: self
                .fuel_flow_kg_per_s
                .unwrap_or(defaults.fuel_flow_full_throttle),
            cl_0: self.cl_0.unwrap_or(defaults.cl_0),
            cl_alpha_per_deg: self.cl_alpha_per_deg.unwrap_or(defaults.cl_alpha_per_deg),
            cl_max: self.cl_max.unwrap_or(defaults.cl_max),
            cl_max_flaps: self.cl_max_flaps.unwrap_or(defaults.cl_max_flaps),
            cl_flap_delta: self.cl_flap_delta.unwrap_or(defaults.cl_flap_delta),
            stall_angle_deg,
            cd_parasite: self.cd_parasite.unwrap_or(defaults.cd_parasite),
            aspect_ratio: self.aspect_ratio.unwrap_or(defaults.aspect_ratio),
            oswald_efficiency: self
                .oswald_efficiency
                .unwrap_or(defaults.oswald_efficiency),
            chord: self.chord_m.unwrap_or(defaults.chord),
            pitch_inertia: self.pitch_inertia.unwrap_or(defaults.pitch_inertia),
            roll_inertia: self.roll_inertia.unwrap_or(defaults.roll_inertia),
            yaw_inertia: self.yaw_inertia.unwrap_or(defaults.yaw_inertia),
            elevator_effectiveness: self
                .elevator_effectiveness
                .unwrap_or(defaults.elevator_effectiveness),
            trim_effectiveness: self
                .trim_effectiveness
                .unwrap_or(defaults.trim_effectiveness),
            aileron_effectiveness: self
                .aileron_effectiveness
                .unwrap_or(defaults.aileron_effectiveness),
            rudder_effectiveness: self
                .rudder_effectiveness
                .unwrap_or(defaults.rudder_effectiveness),
            pitch_stability: self.pitch_stability.unwrap_or(defaults.pitch_stability),
            equilibrium_aoa: self.equilibrium_aoa_rad.unwrap_or(defaults.equilibrium_aoa),
            pitch_damping: self.pitch_damping.unwrap_or(defaults.pitch_damping),
            roll_damping: self.roll_damping.unwrap_or(defaults.roll_damping),
            yaw_damping: self.yaw_damping.unwrap_or(defaults.yaw_damping),
            max_brake_force: self.max_brake_force.unwrap_or(defaults.max_brake_force),
            max_steering_angle: self
                .max_steering_angle_deg
                .map(|deg| deg * DEGREES_TO_RADIANS)
                .unwrap_or(defaults.max_steering_angle),
            wheel_friction: self.wheel_friction.unwrap_or(defaults.wheel_friction),
            ground_pitch_min: defaults.ground_pitch_min,
            ground_pitch_max: defaults.ground_pitch_max,
            ground_pitch_neutral: defaults.ground_pitch_neutral,
            ground_roll_limit: defaults.ground_roll_limit,
            settle_speed: defaults.settle_speed,
            settle_spring: defaults.settle_spring,
            settle_damping: defaults.settle_damping,
        })
    }
}

/// Validated, SI-unit aircraft parameters. Immutable after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftParams {
    pub name: String,

    /// Wing reference area [m^2].
    pub wing_area: f64,
    /// Airframe mass without fuel [kg].
    pub empty_mass: f64,
    /// Static thrust at full throttle [N], used when no powerplant model
    /// is configured.
    pub max_thrust: f64,
    /// Rated engine power [W], enables the propeller model.
    pub engine_power: Option<f64>,
    pub propeller_diameter: f64,
    pub propeller_pitch_ratio: f64,

    /// Usable fuel [kg].
    pub fuel_capacity: f64,
    /// Burn rate at full throttle [kg/s]; scales linearly with throttle.
    pub fuel_flow_full_throttle: f64,

    // Lift curve.
    pub cl_0: f64,
    pub cl_alpha_per_deg: f64,
    pub cl_max: f64,
    pub cl_max_flaps: f64,
    pub cl_flap_delta: f64,
    pub stall_angle_deg: f64,

    // Drag polar.
    pub cd_parasite: f64,
    pub aspect_ratio: f64,
    pub oswald_efficiency: f64,

    // Moments.
    pub chord: f64,
    pub pitch_inertia: f64,
    pub roll_inertia: f64,
    pub yaw_inertia: f64,
    pub elevator_effectiveness: f64,
    pub trim_effectiveness: f64,
    pub aileron_effectiveness: f64,
    pub rudder_effectiveness: f64,
    /// Pitch stiffness coefficient (negative = stable) about
    /// `equilibrium_aoa`.
    pub pitch_stability: f64,
    pub equilibrium_aoa: f64,
    pub pitch_damping: f64,
    pub roll_damping: f64,
    pub yaw_damping: f64,

    // Ground handling.
    pub max_brake_force: f64,
    pub max_steering_angle: f64,
    pub wheel_friction: f64,
    /// Attitude clamps while on the ground [rad].
    pub ground_pitch_min: f64,
    pub ground_pitch_max: f64,
    pub ground_pitch_neutral: f64,
    pub ground_roll_limit: f64,
    /// Below this ground speed [m/s] the attitude is spring-driven toward
    /// the neutral three-point stance.
    pub settle_speed: f64,
    pub settle_spring: f64,
    pub settle_damping: f64,
}

impl AircraftParams {
    /// Tuned defaults approximating a Cessna 172.
    pub fn cessna_172() -> Self {
        Self {
            name: "cessna_172".to_string(),
            wing_area: 174.0 * SQFT_TO_SQM,
            empty_mass: 1600.0 * LBS_TO_KG,
            max_thrust: 400.0 * LBF_TO_N,
            engine_power: None,
            propeller_diameter: 1.905,
            propeller_pitch_ratio: 0.6,
            fuel_capacity: 220.0 * LBS_TO_KG,
            fuel_flow_full_throttle: 0.01,
            cl_0: 0.30,
            cl_alpha_per_deg: 0.105,
            cl_max: 1.6,
            cl_max_flaps: 2.1,
            cl_flap_delta: 0.5,
            stall_angle_deg: 17.0,
            cd_parasite: 0.027,
            aspect_ratio: 7.4,
            oswald_efficiency: 0.7,
            chord: 1.5,
            pitch_inertia: 1500.0,
            roll_inertia: 1000.0,
            yaw_inertia: 2000.0,
            elevator_effectiveness: 0.4,
            trim_effectiveness: 0.15,
            aileron_effectiveness: 0.15,
            rudder_effectiveness: 0.10,
            pitch_stability: -0.35,
            equilibrium_aoa: 0.035,
            pitch_damping: -25.0,
            roll_damping: -8.0,
            yaw_damping: -6.0,
            max_brake_force: 15000.0,
            max_steering_angle: 60.0 * DEGREES_TO_RADIANS,
            wheel_friction: 0.8,
            ground_pitch_min: -5.0 * DEGREES_TO_RADIANS,
            ground_pitch_max: 15.0 * DEGREES_TO_RADIANS,
            ground_pitch_neutral: 2.0 * DEGREES_TO_RADIANS,
            ground_roll_limit: 5.0 * DEGREES_TO_RADIANS,
            settle_speed: 5.0,
            settle_spring: 2.0,
            settle_damping: 3.0,
        }
    }

    /// Stall angle with the flap penalty applied [deg]. Full flaps lower
    /// the stall angle by two degrees.
    pub fn effective_stall_angle_deg(&self, flaps: f64) -> f64 {
        self.stall_angle_deg - 2.0 * flaps.clamp(0.0, 1.0)
    }

    /// Maximum lift coefficient with partial flap credit.
    pub fn effective_cl_max(&self, flaps: f64) -> f64 {
        let flaps = flaps.clamp(0.0, 1.0);
        self.cl_max + (self.cl_max_flaps - self.cl_max) * flaps
    }
}
