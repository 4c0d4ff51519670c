pub mod physics;

pub use physics::{
    AircraftBundle, CollisionEvent, ContactProbe, FlightPhysicsPlugin, ParkingBrake, PhysicsSet,
};
