// storage holds the on-disk side: biome graph images in, terrain PNGs out

pub mod error;

use std::path::{Path, PathBuf};

use image::ImageFormat;
use island_core::{BiomeLookup, NoiseField, TerrainResult, preview_image};

pub use error::StorageError;

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

pub struct IslandStorage {
    root: PathBuf,
}

impl IslandStorage {
    // Open (and create if needed) the directory all names resolve against
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.display().to_string(),
            source,
        })?;
        log::debug!("island storage at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    // Decode an authored biome graph.
    // Any format the `image` crate reads is accepted; samples are
    // converted to RGBA8 and the bottom row becomes elevation 0.
    pub fn load_lookup(&self, name: &str) -> Result<BiomeLookup> {
        let path = self.path_of(name);
        let img = image::open(&path)?.to_rgba8();
        let lookup = BiomeLookup::from_rgba_image(&img)?;
        log::debug!(
            "loaded {}x{} biome graph from {}",
            lookup.width(),
            lookup.height(),
            path.display()
        );
        Ok(lookup)
    }

    // Write the color grid as a lossless PNG, returns the file path
    pub fn save_color_png(&self, name: &str, result: &TerrainResult) -> Result<PathBuf> {
        let path = self.path_of(name);
        result
            .color_image()
            .save_with_format(&path, ImageFormat::Png)?;
        log::info!("saved terrain colors to {}", path.display());
        Ok(path)
    }

    // Grayscale PNG of a single noise field
    pub fn save_preview_png(&self, name: &str, field: &NoiseField) -> Result<PathBuf> {
        let path = self.path_of(name);
        preview_image(field).save_with_format(&path, ImageFormat::Png)?;
        log::info!("saved noise preview to {}", path.display());
        Ok(path)
    }

    // Write a biome graph back out, top row = highest elevation
    pub fn save_lookup_png(&self, name: &str, lookup: &BiomeLookup) -> Result<PathBuf> {
        let path = self.path_of(name);
        let (w, h) = (lookup.width(), lookup.height());
        let img = image::RgbaImage::from_fn(w as u32, h as u32, |x, y| {
            lookup.entry(x as usize, h - 1 - y as usize)
        });
        img.save_with_format(&path, ImageFormat::Png)?;
        Ok(path)
    }
}
