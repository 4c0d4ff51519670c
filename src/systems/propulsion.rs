use std::f64::consts::PI;

/// Powerplant thrust model.
///
/// Implementations turn shaft power and airspeed into thrust. The flight
/// model calls this once per tick when a powerplant is configured;
/// otherwise thrust falls back to `throttle * max_thrust`.
pub trait Propeller: Send + Sync {
    /// Thrust [N] for the current operating point.
    fn thrust(&self, power_watts: f64, rpm: f64, airspeed: f64, air_density: f64) -> f64;

    /// Propulsive efficiency [0, 1].
    fn efficiency(&self, airspeed: f64, rpm: f64) -> f64;

    /// Advance ratio J = v / (n * D).
    fn advance_ratio(&self, airspeed: f64, rpm: f64) -> f64;
}

/// Operating-point snapshot for instruments and telemetry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropellerTelemetry {
    pub advance_ratio: f64,
    pub efficiency: f64,
    pub thrust: f64,
}

/// Fixed-pitch propeller.
///
/// The blade angle cannot change in flight, so efficiency depends strongly
/// on the advance ratio: poor when static, peaking at the cruise advance
/// ratio, stalling beyond it. Static thrust comes from momentum theory
/// with an empirical correction (momentum theory alone underestimates
/// static thrust by 30-40%); in forward flight the model blends the
/// corrected momentum estimate with a power-over-velocity estimate that
/// accounts for induced velocity in the slipstream.
#[derive(Debug, Clone)]
pub struct FixedPitchPropeller {
    /// Disc diameter [m].
    pub diameter: f64,
    /// Blade pitch / diameter. Higher pitch trades static thrust for
    /// cruise speed by moving the efficiency peak to a higher advance
    /// ratio.
    pub pitch_ratio: f64,
    pub efficiency_static: f64,
    pub efficiency_cruise: f64,
    /// Advance ratio where efficiency peaks. For a fixed-pitch blade this
    /// tracks the pitch ratio.
    pub cruise_advance_ratio: f64,
    /// Low-speed correction over momentum theory, fading to 1.0 by J = 0.8.
    pub static_thrust_multiplier: f64,
    disc_area: f64,
}

impl FixedPitchPropeller {
    pub fn new(diameter: f64, pitch_ratio: f64) -> Self {
        Self {
            diameter,
            pitch_ratio,
            efficiency_static: 0.50,
            efficiency_cruise: 0.80,
            cruise_advance_ratio: pitch_ratio,
            static_thrust_multiplier: 1.45,
            disc_area: PI * (diameter / 2.0) * (diameter / 2.0),
        }
    }

    pub fn disc_area(&self) -> f64 {
        self.disc_area
    }

    /// Correction over momentum theory: full multiplier below J = 0.05,
    /// linear fade to 1.0 at J = 0.8.
    fn static_thrust_correction(&self, advance_ratio: f64) -> f64 {
        if advance_ratio < 0.05 {
            self.static_thrust_multiplier
        } else if advance_ratio < 0.8 {
            let fade_progress = (advance_ratio - 0.05) / (0.8 - 0.05);
            self.static_thrust_multiplier - (self.static_thrust_multiplier - 1.0) * fade_progress
        } else {
            1.0
        }
    }

    pub fn telemetry(
        &self,
        power_watts: f64,
        rpm: f64,
        airspeed: f64,
        air_density: f64,
    ) -> PropellerTelemetry {
        PropellerTelemetry {
            advance_ratio: self.advance_ratio(airspeed, rpm),
            efficiency: self.efficiency(airspeed, rpm),
            thrust: self.thrust(power_watts, rpm, airspeed, air_density),
        }
    }
}

impl Propeller for FixedPitchPropeller {
    fn thrust(&self, power_watts: f64, rpm: f64, airspeed: f64, air_density: f64) -> f64 {
        if power_watts <= 0.0 || rpm <= 0.0 {
            return 0.0;
        }

        let efficiency = self.efficiency(airspeed, rpm);
        let advance_ratio = self.advance_ratio(airspeed, rpm);
        let correction = self.static_thrust_correction(advance_ratio);

        let thrust_momentum =
            (efficiency * power_watts * air_density * self.disc_area).sqrt() * correction;

        if airspeed < 1.0 {
            return thrust_momentum;
        }

        // Blend toward the power-velocity estimate as J rises: the
        // corrected momentum figure stays dominant through the takeoff
        // roll where it is the more accurate of the two.
        let blend = if advance_ratio < 0.20 {
            0.05
        } else if advance_ratio > 0.7 {
            0.90
        } else {
            0.05 + (advance_ratio - 0.20) * (0.90 - 0.05) / (0.7 - 0.20)
        };

        // Induced velocity from momentum theory, scaled down with J since
        // incoming flow does the propeller's acceleration work for it.
        let v_induced_static = (power_watts / (2.0 * air_density * self.disc_area)).cbrt();
        let v_induced_scale = (1.0 - advance_ratio / self.cruise_advance_ratio * 0.8).max(0.2);
        let v_induced = v_induced_static * v_induced_scale;

        let thrust_dynamic = (efficiency * power_watts) / (airspeed + v_induced);

        let thrust = (1.0 - blend) * thrust_momentum + blend * thrust_dynamic;

        // Fixed-pitch props peak at roughly 1.5x static thrust around
        // J = 0.2-0.3.
        thrust.min(thrust_momentum * 1.5)
    }

    fn efficiency(&self, airspeed: f64, rpm: f64) -> f64 {
        if rpm <= 0.0 {
            return 0.0;
        }

        let advance_ratio = self.advance_ratio(airspeed, rpm);

        let efficiency = if advance_ratio < 0.1 {
            self.efficiency_static
        } else if advance_ratio < self.cruise_advance_ratio {
            let t = advance_ratio / self.cruise_advance_ratio;
            self.efficiency_static + (self.efficiency_cruise - self.efficiency_static) * t
        } else if advance_ratio < self.cruise_advance_ratio * 1.5 {
            self.efficiency_cruise
        } else {
            let excess = advance_ratio - self.cruise_advance_ratio * 1.5;
            self.efficiency_cruise - (excess * 0.3).min(0.5)
        };

        efficiency.clamp(0.0, 1.0)
    }

    fn advance_ratio(&self, airspeed: f64, rpm: f64) -> f64 {
        if rpm <= 0.0 {
            return 0.0;
        }
        let rps = rpm / 60.0;
        airspeed / (rps * self.diameter)
    }
}
