pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{AircraftState, ControlInputs, FlightForces};
pub use plugins::{AircraftBundle, CollisionEvent, FlightPhysicsPlugin, ParkingBrake};
pub use resources::{AircraftParams, FlightModelConfig, PhysicsConfig, TerrainResource};
pub use systems::{FlightModel, StateUpdate};
