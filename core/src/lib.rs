// core holds the noise, normalization and biome-graph classification
pub mod biome;
pub mod compose;
pub mod error;
pub mod fractal2;
pub mod grid;
pub mod island;
pub mod perlin2;
pub mod utils;

pub use biome::{BiomeLookup, BiomeSample};
pub use compose::{TerrainResult, compose};
pub use error::TerrainError;
pub use fractal2::{Fractal2D, NoiseParameters};
pub use grid::{Grid2D, NoiseField};
pub use island::{IslandConfig, IslandGenerator};
pub use perlin2::Perlin2D;
pub use utils::{Extrema, normalize2, normalized2, preview_image};

pub type Result<T, E = TerrainError> = std::result::Result<T, E>;

// noise generator that can be sampled at any 2D point
// Output for a given seed and coordinate is deterministic.
pub trait NoiseGenerator {
    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64;
}
