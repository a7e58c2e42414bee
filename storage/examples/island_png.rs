use island_core::{BiomeLookup, Fractal2D, IslandConfig, IslandGenerator};
use island_storage::{IslandStorage, StorageError};

fn main() -> Result<(), StorageError> {
    env_logger::init();

    let storage = IslandStorage::init("island_out")?;

    // Authored graph if present, generated one otherwise
    let lookup = match storage.load_lookup("biome_graph.png") {
        Ok(lookup) => lookup,
        Err(err) => {
            log::warn!("falling back to the generated biome graph: {err}");
            let lookup = BiomeLookup::default_island(64, 64)?;
            storage.save_lookup_png("biome_graph.png", &lookup)?;
            lookup
        }
    };

    let config = IslandConfig::default().with_random_seeds();
    let island = IslandGenerator::new(config.clone()).with_lookup(lookup);
    let terrain = island.regenerate()?;
    storage.save_color_png("island.png", &terrain)?;

    let elevation =
        Fractal2D::new(config.elevation.clone())?.generate_field(config.width, config.height)?;
    storage.save_preview_png("elevation.png", &elevation)?;

    println!(
        "Saved {}x{} island (seed {}) to {:?}",
        config.width,
        config.height,
        config.elevation.seed,
        storage.root()
    );
    Ok(())
}
