pub mod aerodynamics;
pub mod collision;
pub mod flight_model;
pub mod ground;
pub mod propulsion;
pub mod publish;

pub use collision::{check_terrain, CollisionResult, CollisionSeverity};
pub use flight_model::FlightModel;
pub use ground::{GroundContact, GroundForces, GroundModel};
pub use propulsion::{FixedPitchPropeller, Propeller, PropellerTelemetry};
pub use publish::StateUpdate;
