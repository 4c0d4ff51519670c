pub mod config;
pub mod terrain;

pub use config::{AircraftParams, FlightModelConfig, PhysicsConfig};
pub use terrain::{ElevationProvider, FlatTerrain, ProceduralTerrain, TerrainResource};
