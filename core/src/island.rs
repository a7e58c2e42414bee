use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{BiomeLookup, Fractal2D, NoiseParameters, Result, TerrainError, TerrainResult, compose};

// Moisture seed derived from a single island seed
const MOISTURE_SEED_OFFSET: u64 = 42;

// Everything one island pass needs besides the biome graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    pub width: usize,
    pub height: usize,
    pub elevation: NoiseParameters,
    pub moisture: NoiseParameters,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            elevation: NoiseParameters::default(),
            moisture: NoiseParameters::moisture(),
        }
    }
}

impl IslandConfig {
    // Default island whose moisture seed is derived from `seed`
    pub fn from_seed(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            elevation: self.elevation.with_seed(seed),
            moisture: self.moisture.with_seed(seed.wrapping_add(MOISTURE_SEED_OFFSET)),
            ..self
        }
    }

    // Fresh, independent seeds for both fields
    pub fn with_random_seeds(self) -> Self {
        Self {
            elevation: self.elevation.with_seed(rand::random()),
            moisture: self.moisture.with_seed(rand::random()),
            ..self
        }
    }

    pub fn with_size(self, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    // Check every precondition of a pass without generating anything
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.elevation.validate()?;
        self.moisture.validate()
    }
}

// Entry point the host calls whenever it wants a new island.
// Holds only immutable configuration and a shared, read-only biome graph.
// Every `regenerate` call owns its own fields, extrema and output grids.
#[derive(Debug, Clone)]
pub struct IslandGenerator {
    config: IslandConfig,
    lookup: Option<Arc<BiomeLookup>>,
}

impl IslandGenerator {
    pub fn new(config: IslandConfig) -> Self {
        Self {
            config,
            lookup: None,
        }
    }

    pub fn with_lookup(mut self, lookup: impl Into<Arc<BiomeLookup>>) -> Self {
        self.lookup = Some(lookup.into());
        self
    }

    pub fn config(&self) -> &IslandConfig {
        &self.config
    }

    pub fn lookup(&self) -> Option<&Arc<BiomeLookup>> {
        self.lookup.as_ref()
    }

    // Run one full pass: elevation field, moisture field, composition.
    // All preconditions (lookup attached, positive size, valid noise
    // parameters) are checked before any noise is sampled.
    pub fn regenerate(&self) -> Result<TerrainResult> {
        let lookup = self.lookup.as_deref().ok_or(TerrainError::MissingLookup)?;
        self.config.validate()?;
        let IslandConfig {
            width,
            height,
            elevation,
            moisture,
        } = &self.config;

        let elevation_noise = Fractal2D::new(elevation.clone())?;
        let moisture_noise = Fractal2D::new(moisture.clone())?;

        let elevation_field = elevation_noise.generate_field(*width, *height)?;
        let moisture_field = moisture_noise.generate_field(*width, *height)?;

        let result = compose(&elevation_field, &moisture_field, lookup)?;
        log::info!(
            "generated {}x{} island (elevation seed {}, moisture seed {})",
            width,
            height,
            elevation.seed,
            moisture.seed
        );
        Ok(result)
    }
}
