pub const GRAVITY: f64 = 9.81; // m/s^2
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m^3

pub const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;
pub const RADIANS_TO_DEGREES: f64 = 180.0 / std::f64::consts::PI;

// Imperial-to-metric factors used when validating aircraft configuration.
pub const SQFT_TO_SQM: f64 = 0.092903;
pub const LBS_TO_KG: f64 = 0.453592;
pub const LBF_TO_N: f64 = 4.44822;
pub const HP_TO_WATTS: f64 = 745.7;

// Publish-boundary unit conversions. Consumers (instruments, audio cues,
// telemetry) expect these exact factors.
pub const MPS_TO_KNOTS: f64 = 1.94384;
pub const METERS_TO_FEET: f64 = 3.28084;
pub const RAD_TO_DEG_PUBLISH: f64 = 57.2958;
pub const MPS_TO_FPM: f64 = 196.85;
