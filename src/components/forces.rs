use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Force breakdown for the current tick, recomputed from scratch every
/// `update()`. Exposed read-only for diagnostics and telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightForces {
    /// Lift, perpendicular to the velocity vector [N].
    pub lift: Vector3<f64>,
    /// Drag, opposing the velocity vector [N].
    pub drag: Vector3<f64>,
    /// Thrust, along the aircraft heading [N].
    pub thrust: Vector3<f64>,
    /// Weight, straight down [N].
    pub weight: Vector3<f64>,
    /// Vector sum of the four components plus drained external forces [N].
    pub total: Vector3<f64>,

    // Diagnostic scalars for telemetry and stall-warning consumers.
    pub drag_parasite_n: f64,
    pub drag_induced_n: f64,
    pub lift_coefficient: f64,
    /// Angle of attack used for this tick's coefficients [rad].
    pub angle_of_attack: f64,
}

impl Default for FlightForces {
    fn default() -> Self {
        Self {
            lift: Vector3::zeros(),
            drag: Vector3::zeros(),
            thrust: Vector3::zeros(),
            weight: Vector3::zeros(),
            total: Vector3::zeros(),
            drag_parasite_n: 0.0,
            drag_induced_n: 0.0,
            lift_coefficient: 0.0,
            angle_of_attack: 0.0,
        }
    }
}

impl FlightForces {
    /// Recompute the total from the four named components.
    pub fn sum_components(&mut self) {
        self.total = self.lift + self.drag + self.thrust + self.weight;
    }
}

/// Pending external force shared by collaborators (ground contact, gusts,
/// collisions) between ticks.
///
/// Forces accumulate until `drain()` is called, which the flight model does
/// exactly once per `update()`. A force applied in tick N is therefore
/// integrated in tick N and never again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalForceAccumulator {
    pending: Vector3<f64>,
}

impl ExternalForceAccumulator {
    /// Add a force [N] to be integrated in the next update. `point` is
    /// accepted for interface compatibility but unused: the model treats the
    /// aircraft as a single point mass for external forces.
    pub fn apply(&mut self, force: Vector3<f64>, _point: Vector3<f64>) {
        self.pending += force;
    }

    /// Take the pending sum and zero the accumulator.
    pub fn drain(&mut self) -> Vector3<f64> {
        std::mem::replace(&mut self.pending, Vector3::zeros())
    }

    pub fn pending(&self) -> Vector3<f64> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = Vector3::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accumulator_drains_once() {
        let mut acc = ExternalForceAccumulator::default();
        acc.apply(Vector3::new(1.0, 2.0, 3.0), Vector3::zeros());
        acc.apply(Vector3::new(-0.5, 0.0, 1.0), Vector3::zeros());

        let drained = acc.drain();
        assert_relative_eq!(drained.x, 0.5);
        assert_relative_eq!(drained.y, 2.0);
        assert_relative_eq!(drained.z, 4.0);

        // Second drain must yield nothing: no double-integration.
        assert_relative_eq!(acc.drain().norm(), 0.0);
    }

    #[test]
    fn test_forces_sum() {
        let mut forces = FlightForces::default();
        forces.lift = Vector3::new(0.0, 100.0, 0.0);
        forces.weight = Vector3::new(0.0, -80.0, 0.0);
        forces.thrust = Vector3::new(0.0, 0.0, 50.0);
        forces.drag = Vector3::new(0.0, 0.0, -10.0);
        forces.sum_components();
        assert_relative_eq!(forces.total.y, 20.0);
        assert_relative_eq!(forces.total.z, 40.0);
    }
}
