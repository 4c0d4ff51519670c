use nalgebra::Vector3;

use crate::resources::ElevationProvider;
use crate::utils::constants::MPS_TO_FPM;

/// How hard the aircraft met the ground, graded from sink rate at the
/// moment of contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSeverity {
    /// Not in contact.
    None,
    /// Normal touchdown, sink rate up to 2 m/s (~400 ft/min).
    Gentle,
    /// Firm arrival, up to 6 m/s. Inspection territory.
    Hard,
    /// Anything beyond: structural damage.
    Severe,
}

impl CollisionSeverity {
    /// Grade from vertical speed [m/s]; negative = descending.
    pub fn from_sink_rate(vertical_speed: f64) -> Self {
        let sink = -vertical_speed;
        if sink <= 2.0 {
            CollisionSeverity::Gentle
        } else if sink <= 6.0 {
            CollisionSeverity::Hard
        } else {
            CollisionSeverity::Severe
        }
    }
}

/// Outcome of one terrain query.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    pub is_colliding: bool,
    /// Terrain elevation under the aircraft [m], `None` when the provider
    /// could not answer.
    pub terrain_elevation: Option<f64>,
    /// Height above ground [m].
    pub agl: Option<f64>,
    pub severity: CollisionSeverity,
    /// Sink rate at the time of the check [ft/min], for event consumers.
    pub descent_rate_fpm: f64,
}

impl CollisionResult {
    fn clear() -> Self {
        Self {
            is_colliding: false,
            terrain_elevation: None,
            agl: None,
            severity: CollisionSeverity::None,
            descent_rate_fpm: 0.0,
        }
    }
}

/// Stateless terrain collision check.
///
/// Queries the provider at the aircraft's horizontal position and compares
/// altitude against the returned elevation. An unanswered query is treated
/// as not-colliding for this check only; the caller re-queries next tick.
/// Results are never cached across an integration step, since the position
/// the answer applies to has moved.
pub fn check_terrain(
    provider: &dyn ElevationProvider,
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
) -> CollisionResult {
    let Some(elevation) = provider.elevation_at(position.x, position.z) else {
        return CollisionResult::clear();
    };

    let agl = position.y - elevation;
    let is_colliding = agl <= 0.0;
    let severity = if is_colliding {
        CollisionSeverity::from_sink_rate(velocity.y)
    } else {
        CollisionSeverity::None
    };

    CollisionResult {
        is_colliding,
        terrain_elevation: Some(elevation),
        agl: Some(agl),
        severity,
        descent_rate_fpm: (-velocity.y).max(0.0) * MPS_TO_FPM,
    }
}
