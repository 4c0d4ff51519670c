use bevy::prelude::*;
use noise::{NoiseFn, OpenSimplex};

/// Source of ground elevation under a world-space point.
///
/// Returning `None` means the provider cannot answer for that location
/// (outside its coverage, data not yet loaded). Collision checks treat an
/// unanswered query as not-colliding rather than inventing an elevation.
pub trait ElevationProvider: Send + Sync {
    /// Terrain elevation [m] under `(x, z)`, or `None` when unknown.
    fn elevation_at(&self, x: f64, z: f64) -> Option<f64>;
}

/// Flat ground at a fixed elevation. The default provider.
#[derive(Debug, Clone, Copy)]
pub struct FlatTerrain {
    pub elevation: f64,
}

impl FlatTerrain {
    pub fn new(elevation: f64) -> Self {
        Self { elevation }
    }
}

impl Default for FlatTerrain {
    fn default() -> Self {
        Self { elevation: 0.0 }
    }
}

impl ElevationProvider for FlatTerrain {
    fn elevation_at(&self, _x: f64, _z: f64) -> Option<f64> {
        Some(self.elevation)
    }
}

/// Rolling procedural terrain built from simplex noise, for test scenery
/// and demos.
pub struct ProceduralTerrain {
    noise: OpenSimplex,
    /// Horizontal feature size [m].
    pub scale: f64,
    /// Peak-to-trough height range [m].
    pub amplitude: f64,
    /// Base elevation added to the noise [m].
    pub base_elevation: f64,
}

impl ProceduralTerrain {
    pub fn new(seed: u32, scale: f64, amplitude: f64, base_elevation: f64) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            scale,
            amplitude,
            base_elevation,
        }
    }
}

impl ElevationProvider for ProceduralTerrain {
    fn elevation_at(&self, x: f64, z: f64) -> Option<f64> {
        let sample = self.noise.get([x / self.scale, z / self.scale]);
        Some(self.base_elevation + sample * self.amplitude)
    }
}

/// The active elevation provider, swappable at runtime.
#[derive(Resource)]
pub struct TerrainResource {
    provider: Box<dyn ElevationProvider>,
}

impl Default for TerrainResource {
    fn default() -> Self {
        Self {
            provider: Box::new(FlatTerrain::default()),
        }
    }
}

impl TerrainResource {
    pub fn new(provider: Box<dyn ElevationProvider>) -> Self {
        Self { provider }
    }

    pub fn flat(elevation: f64) -> Self {
        Self {
            provider: Box::new(FlatTerrain::new(elevation)),
        }
    }

    pub fn elevation_at(&self, x: f64, z: f64) -> Option<f64> {
        self.provider.elevation_at(x, z)
    }

    pub fn provider(&self) -> &dyn ElevationProvider {
        self.provider.as_ref()
    }

    pub fn set_provider(&mut self, provider: Box<dyn ElevationProvider>) {
        self.provider = provider;
    }
}
