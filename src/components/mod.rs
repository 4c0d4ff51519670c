pub mod aircraft;
pub mod forces;

pub use aircraft::{AircraftState, ControlInputs};
pub use forces::{ExternalForceAccumulator, FlightForces};
