use island_core::TerrainError;

// Failures of the on-disk collaborators.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    // Could not create the output directory.
    #[error("failed to prepare {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Decoding or encoding an image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    // The decoded image is not a usable biome graph.
    #[error("invalid biome graph: {0}")]
    Terrain(#[from] TerrainError),
}
