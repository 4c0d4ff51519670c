use nalgebra::Vector3;

use crate::resources::AircraftParams;
use crate::utils::constants::RADIANS_TO_DEGREES;

/// Speed below which the flight path angle is meaningless and the angle of
/// attack falls back to the pitch attitude [m/s].
const MIN_HORIZONTAL_SPEED: f64 = 0.1;

/// Angle of attack [rad] from velocity and pitch attitude.
///
/// AoA is the pitch angle minus the flight path angle, not the pitch angle
/// itself: an aircraft descending nose-level carries positive AoA. With no
/// meaningful horizontal motion there is no flight path, so AoA degenerates
/// to pitch.
pub fn angle_of_attack(velocity: &Vector3<f64>, pitch: f64) -> f64 {
    let horizontal_speed = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();
    if horizontal_speed < MIN_HORIZONTAL_SPEED {
        return pitch;
    }
    let flight_path_angle = velocity.y.atan2(horizontal_speed);
    pitch - flight_path_angle
}

/// Lift coefficient with stall behaviour and flap effects.
///
/// Pre-stall the curve is linear in AoA and capped at the flap-adjusted
/// maximum. Past the stall angle the coefficient decays exponentially with
/// the excess, floored at 0.4 so a stalled wing still carries some lift.
/// Below -5 degrees the linear curve continues, floored at -1.0.
pub fn lift_coefficient(params: &AircraftParams, angle_of_attack_rad: f64, flaps: f64) -> f64 {
    let aoa_deg = angle_of_attack_rad * RADIANS_TO_DEGREES;
    let flaps = flaps.clamp(0.0, 1.0);

    let cl_0_effective = params.cl_0 + params.cl_flap_delta * flaps;
    let cl_max_effective = params.effective_cl_max(flaps);
    let stall_aoa_effective = params.effective_stall_angle_deg(flaps);

    let mut cl = if aoa_deg < stall_aoa_effective {
        (cl_0_effective + params.cl_alpha_per_deg * aoa_deg).min(cl_max_effective)
    } else {
        let stall_excess = aoa_deg - stall_aoa_effective;
        (cl_max_effective * (-0.05 * stall_excess).exp()).max(0.4)
    };

    if aoa_deg < -5.0 {
        cl = (cl_0_effective + params.cl_alpha_per_deg * aoa_deg).max(-1.0);
    }

    cl
}

/// Total drag coefficient: parasite + induced + post-stall separation drag.
///
/// The stall term turns on past the clean stall angle in either direction
/// and rises smoothly toward an extra 0.5.
pub fn drag_coefficient(params: &AircraftParams, cl: f64, angle_of_attack_rad: f64) -> f64 {
    let aoa_deg = angle_of_attack_rad * RADIANS_TO_DEGREES;

    let cd_induced =
        (cl * cl) / (std::f64::consts::PI * params.oswald_efficiency * params.aspect_ratio);

    let cd_stall = if aoa_deg.abs() > params.stall_angle_deg {
        let stall_excess = aoa_deg.abs() - params.stall_angle_deg;
        0.5 * (1.0 - (-0.1 * stall_excess).exp())
    } else {
        0.0
    };

    params.cd_parasite + cd_induced + cd_stall
}

/// Induced drag coefficient alone, for telemetry breakdown.
pub fn induced_drag_coefficient(params: &AircraftParams, cl: f64) -> f64 {
    (cl * cl) / (std::f64::consts::PI * params.oswald_efficiency * params.aspect_ratio)
}

/// Lift force vector for a given magnitude.
///
/// Lift is perpendicular to velocity, in the up-direction relative to the
/// flight path: `right = v x world_up`, `lift_dir = right x v`. Keeping it
/// perpendicular prevents lift from feeding back into the velocity
/// component that produced it. Near-vertical flight has no well-defined
/// lift plane, so a small vertical remnant stands in; near-zero speed
/// produces no lift at all.
pub fn lift_vector(velocity: &Vector3<f64>, lift_magnitude: f64) -> Vector3<f64> {
    if velocity.norm_squared() <= 0.01 {
        return Vector3::zeros();
    }

    let velocity_dir = velocity.normalize();
    let world_up = Vector3::new(0.0, 1.0, 0.0);
    let right = velocity_dir.cross(&world_up);

    if right.norm_squared() > 0.001 {
        let lift_dir = right.normalize().cross(&velocity_dir).normalize();
        lift_dir * lift_magnitude
    } else {
        Vector3::new(0.0, lift_magnitude * 0.1, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::utils::constants::DEGREES_TO_RADIANS;

    fn params() -> AircraftParams {
        AircraftParams::cessna_172()
    }

    #[test]
    fn test_aoa_differs_from_pitch_in_descent() {
        // Level pitch, descending flight path: positive AoA.
        let velocity = Vector3::new(0.0, -5.0, 50.0);
        let aoa = angle_of_attack(&velocity, 0.0);
        assert_relative_eq!(aoa, (5.0f64 / 50.0).atan(), epsilon = 1e-12);
        assert!(aoa > 0.0);
    }

    #[test]
    fn test_aoa_equals_pitch_when_hovering() {
        let velocity = Vector3::new(0.0, -2.0, 0.05);
        let pitch = 0.2;
        assert_relative_eq!(angle_of_attack(&velocity, pitch), pitch);
    }

    #[test]
    fn test_aoa_zero_in_level_flight() {
        let velocity = Vector3::new(0.0, 0.0, 60.0);
        assert_relative_eq!(angle_of_attack(&velocity, 0.0), 0.0);
    }

    #[test]
    fn test_cl_linear_region() {
        let p = params();
        let cl = lift_coefficient(&p, 4.0 * DEGREES_TO_RADIANS, 0.0);
        assert_relative_eq!(cl, 0.30 + 0.105 * 4.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cl_capped_at_max() {
        let p = params();
        // 13 degrees is pre-stall but the linear curve would exceed cl_max.
        let cl = lift_coefficient(&p, 13.0 * DEGREES_TO_RADIANS, 0.0);
        assert_relative_eq!(cl, 1.6, epsilon = 1e-10);
    }

    #[test]
    fn test_cl_drops_after_stall() {
        let p = params();
        let before = lift_coefficient(&p, 16.0 * DEGREES_TO_RADIANS, 0.0);
        let after = lift_coefficient(&p, 20.0 * DEGREES_TO_RADIANS, 0.0);
        assert!(after < before);
        // Deep stall floors at 0.4.
        let deep = lift_coefficient(&p, 60.0 * DEGREES_TO_RADIANS, 0.0);
        assert_relative_eq!(deep, 0.4, epsilon = 1e-10);
    }

    #[test]
    fn test_cl_flaps_raise_lift_and_lower_stall() {
        let p = params();
        let clean = lift_coefficient(&p, 4.0 * DEGREES_TO_RADIANS, 0.0);
        let flapped = lift_coefficient(&p, 4.0 * DEGREES_TO_RADIANS, 1.0);
        assert_relative_eq!(flapped - clean, 0.5, epsilon = 1e-10);

        // 16 degrees: pre-stall clean, post-stall with full flaps.
        let clean_16 = lift_coefficient(&p, 16.0 * DEGREES_TO_RADIANS, 0.0);
        let flapped_16 = lift_coefficient(&p, 16.0 * DEGREES_TO_RADIANS, 1.0);
        assert_relative_eq!(clean_16, 1.6, epsilon = 1e-10);
        assert!(flapped_16 < 2.1);
    }

    #[test]
    fn test_cl_negative_aoa_floor() {
        let p = params();
        let cl = lift_coefficient(&p, -20.0 * DEGREES_TO_RADIANS, 0.0);
        assert_relative_eq!(cl, -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cd_components() {
        let p = params();
        let cd_zero_lift = drag_coefficient(&p, 0.0, 0.0);
        assert_relative_eq!(cd_zero_lift, 0.027, epsilon = 1e-10);

        let cl = 1.0;
        let cd = drag_coefficient(&p, cl, 0.0);
        let expected_induced = 1.0 / (std::f64::consts::PI * 0.7 * 7.4);
        assert_relative_eq!(cd, 0.027 + expected_induced, epsilon = 1e-10);
    }

    #[test]
    fn test_cd_stall_drag_onset() {
        let p = params();
        let cl = 0.8;
        let clean = drag_coefficient(&p, cl, 10.0 * DEGREES_TO_RADIANS);
        let stalled = drag_coefficient(&p, cl, 25.0 * DEGREES_TO_RADIANS);
        assert!(stalled > clean);
        // Symmetric in AoA sign.
        let inverted = drag_coefficient(&p, cl, -25.0 * DEGREES_TO_RADIANS);
        assert_relative_eq!(stalled, inverted, epsilon = 1e-12);
    }

    #[test]
    fn test_lift_vector_perpendicular_to_velocity() {
        let velocity = Vector3::new(10.0, 5.0, 40.0);
        let lift = lift_vector(&velocity, 1000.0);
        assert_relative_eq!(lift.dot(&velocity), 0.0, epsilon = 1e-6);
        assert_relative_eq!(lift.norm(), 1000.0, epsilon = 1e-6);
        assert!(lift.y > 0.0);
    }

    #[test]
    fn test_lift_vector_vertical_fallback() {
        let velocity = Vector3::new(0.0, -30.0, 0.0);
        let lift = lift_vector(&velocity, 1000.0);
        assert_relative_eq!(lift.y, 100.0, epsilon = 1e-10);
        assert_relative_eq!(lift.x, 0.0);
    }

    #[test]
    fn test_lift_vector_zero_at_rest() {
        let velocity = Vector3::new(0.0, 0.0, 0.05);
        assert_relative_eq!(lift_vector(&velocity, 1000.0).norm(), 0.0);
    }
}
