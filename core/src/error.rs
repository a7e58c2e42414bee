// Everything that can abort a generation pass.
// All variants are precondition violations: they are reported before any
// output grid is allocated, so a caller never sees a partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    // Elevation and moisture fields do not cover the same grid.
    #[error(
        "noise field sizes don't match: elevation is {}x{}, moisture is {}x{}",
        .elevation.0, .elevation.1, .moisture.0, .moisture.1
    )]
    DimensionMismatch {
        elevation: (usize, usize),
        moisture: (usize, usize),
    },

    #[error("biome lookup must not be empty, got {width}x{height}")]
    EmptyLookup { width: usize, height: usize },

    #[error("biome lookup expects {expected} samples, got {actual}")]
    LookupSizeMismatch { expected: usize, actual: usize },

    // Regeneration was requested before a biome lookup was attached.
    #[error("no biome lookup attached to the generator")]
    MissingLookup,

    #[error("invalid noise parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
