use std::f64::consts::PI;

/// Wrap an angle to the [-pi, pi] range.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut angle = angle;
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle_identity() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(1.0), 1.0);
        assert_relative_eq!(normalize_angle(-1.0), -1.0);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert_relative_eq!(normalize_angle(PI + 0.5), -PI + 0.5, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-PI - 0.5), PI - 0.5, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(5.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-7.0 * PI), -PI, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_angle_bounded_for_large_inputs() {
        for i in -100..100 {
            let angle = i as f64 * 1.37;
            let wrapped = normalize_angle(angle);
            assert!((-PI..=PI).contains(&wrapped), "angle {} -> {}", angle, wrapped);
        }
    }
}
