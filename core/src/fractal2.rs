use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::utils::normalize2;
use crate::{NoiseField, NoiseGenerator, Perlin2D, Result, TerrainError};

// Per-seed offsets are drawn from this range so different seeds sample
// unrelated regions of the same lattice
const OFFSET_RANGE: f64 = 100_000.0;

// Settings of one fractal noise field.
// Immutable once handed to `Fractal2D::new`; changing a parameter means
// building a new generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    pub seed: u64,
    // Number of layers summed per sample. Zero yields an all-zero field.
    pub octaves: u32,
    // Growth of the coordinate divisor per octave, > 1.
    pub lacunarity: f64,
    // Amplitude decay per octave, in (0, 1).
    pub persistence: f64,
    // Base coordinate divisor, > 0.
    pub scale: f64,
    // Whether `generate_field` rescales its output to [0, 1].
    pub normalize_to_unit_range: bool,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 10,
            lacunarity: 2.0,
            persistence: 0.5,
            scale: 75.0,
            normalize_to_unit_range: true,
        }
    }
}

impl NoiseParameters {
    // Moisture defaults: slow lacunarity, fast amplitude decay
    pub fn moisture() -> Self {
        Self {
            lacunarity: 1.2,
            persistence: 0.3,
            ..Self::default()
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.lacunarity.is_finite() && self.lacunarity > 1.0) {
            return Err(invalid(
                "lacunarity",
                format!("must be > 1, got {}", self.lacunarity),
            ));
        }
        if !(self.persistence > 0.0 && self.persistence < 1.0) {
            return Err(invalid(
                "persistence",
                format!("must be in (0, 1), got {}", self.persistence),
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid("scale", format!("must be > 0, got {}", self.scale)));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> TerrainError {
    TerrainError::InvalidParameter { name, reason }
}

// Layered (fractal) gradient noise over a 2D grid
pub struct Fractal2D {
    params: NoiseParameters,
    noise: Perlin2D,
    offset: (f64, f64), // per-seed shift applied to every octave
}

impl Fractal2D {
    // Validate `params` and seed the noise stream.
    // The permutation table and the offset pair are both drawn here, once,
    // from a ChaCha8 stream seeded with `params.seed`.
    pub fn new(params: NoiseParameters) -> Result<Self> {
        params.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let noise = Perlin2D::from_rng(&mut rng);
        let offset = (
            rng.random_range(-OFFSET_RANGE..OFFSET_RANGE),
            rng.random_range(-OFFSET_RANGE..OFFSET_RANGE),
        );
        log::debug!(
            "fractal noise seed {} offset ({:.3}, {:.3})",
            params.seed,
            offset.0,
            offset.1
        );

        Ok(Self {
            params,
            noise,
            offset,
        })
    }

    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    // Sample a `width` x `height` field at integer cell coordinates.
    // With `self_normalize` the field is rescaled to [0, 1] before it is
    // returned; otherwise the raw octave sums are kept and the caller
    // normalizes. Zero-sized grids are rejected before any sampling.
    pub fn generate(
        &self,
        self_normalize: bool,
        width: usize,
        height: usize,
    ) -> Result<NoiseField> {
        let mut field =
            NoiseField::from_fn(width, height, |x, y| self.get2(x as f64, y as f64) as f32)?;
        if self_normalize {
            normalize2(&mut field);
        }
        Ok(field)
    }

    // `generate` using the parameters' own normalization flag
    pub fn generate_field(&self, width: usize, height: usize) -> Result<NoiseField> {
        self.generate(self.params.normalize_to_unit_range, width, height)
    }
}

impl NoiseGenerator for Fractal2D {
    // Octave i samples at coordinates divided by scale * lacunarity^i,
    // weighted by persistence^i
    fn get2(&self, x: f64, y: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = self.params.scale;
        let mut total = 0.0;

        for _ in 0..self.params.octaves {
            let sx = x / frequency + self.offset.0;
            let sy = y / frequency + self.offset.1;
            total += self.noise.get2(sx, sy) * amplitude;

            amplitude *= self.params.persistence;
            frequency *= self.params.lacunarity;
        }

        total
    }
}
