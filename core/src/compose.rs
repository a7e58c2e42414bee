use image::{Rgba, RgbaImage};

use crate::{BiomeLookup, Extrema, Grid2D, NoiseField, Result, TerrainError};

// Output of one generation pass, handed over to the caller.
// `colors` is indexed `(x, y)` like the noise fields. `heights` is stored
// with its axes swapped, the way a height-field consumer expects rows:
// `heights.get(y, x)` is the height of the cell whose color is
// `colors.get(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainResult {
    pub colors: Grid2D<Rgba<u8>>,
    pub heights: Grid2D<f32>,
}

impl TerrainResult {
    // Size of the color grid, (x extent, y extent)
    pub fn dims(&self) -> (usize, usize) {
        self.colors.dims()
    }

    pub fn height_at(&self, x: usize, y: usize) -> f32 {
        *self.heights.get(y, x)
    }

    // Height samples as `out[y][x]`, ready for a sampled height surface.
    pub fn height_rows(&self) -> Vec<Vec<f32>> {
        self.heights.to_nested()
    }

    // Color grid as an image, y = 0 on the bottom row.
    pub fn color_image(&self) -> RgbaImage {
        let (w, h) = self.dims();
        let mut img = RgbaImage::new(w as u32, h as u32);
        for (x, y, &color) in self.colors.cells() {
            img.put_pixel(x as u32, (h - 1 - y) as u32, color);
        }
        img
    }
}

// Classify every cell of a pair of noise fields through the biome graph.
// The elevation field is normalized against its own extrema, scanned
// fresh for this call. Moisture is used as-is; the lookup clamps it.
// Fields of different sizes abort the composition before anything is
// allocated.
pub fn compose(
    elevation: &NoiseField,
    moisture: &NoiseField,
    lookup: &BiomeLookup,
) -> Result<TerrainResult> {
    if elevation.dims() != moisture.dims() {
        log::warn!(
            "rejecting composition: elevation {:?} vs moisture {:?}",
            elevation.dims(),
            moisture.dims()
        );
        return Err(TerrainError::DimensionMismatch {
            elevation: elevation.dims(),
            moisture: moisture.dims(),
        });
    }

    let (width, height) = elevation.dims();
    let extrema = Extrema::scan(elevation);
    log::debug!(
        "composing {}x{} terrain, elevation range [{}, {}], lookup {}x{}",
        width,
        height,
        extrema.min,
        extrema.max,
        lookup.width(),
        lookup.height()
    );

    let mut heights = Grid2D::filled(height, width, 0.0f32)?;
    let colors = Grid2D::from_fn(width, height, |x, y| {
        let e = extrema.remap(*elevation.get(x, y));
        let sample = lookup.classify(*moisture.get(x, y), e);
        heights.set(y, x, sample.height);
        sample.color
    })?;

    Ok(TerrainResult { colors, heights })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripes() -> BiomeLookup {
        // red channel = elevation row, green = moisture column
        BiomeLookup::from_fn(3, 5, |x, y| Rgba([y as u8 * 50, x as u8 * 100, 0, 255])).unwrap()
    }

    #[test]
    fn compose_rejects_mismatched_fields() {
        let e = NoiseField::filled(4, 4, 0.0).unwrap();
        let m = NoiseField::filled(5, 5, 0.0).unwrap();
        assert_eq!(
            compose(&e, &m, &stripes()),
            Err(TerrainError::DimensionMismatch {
                elevation: (4, 4),
                moisture: (5, 5)
            })
        );
    }

    #[test]
    fn compose_normalizes_elevation() {
        // raw elevation spans [10, 30]; normalized 0, 0.5, 1
        let e = NoiseField::from_nested(vec![vec![10.0], vec![20.0], vec![30.0]]).unwrap();
        let m = NoiseField::filled(3, 1, 0.0).unwrap();
        let out = compose(&e, &m, &stripes()).unwrap();
        let reds: Vec<u8> = (0..3).map(|x| out.colors.get(x, 0).0[0]).collect();
        assert_eq!(reds, vec![0, 100, 200]);
    }

    #[test]
    fn heights_are_transposed() {
        let e = NoiseField::from_fn(4, 2, |x, y| (x + 4 * y) as f32).unwrap();
        let m = NoiseField::from_fn(4, 2, |x, _| x as f32 / 3.0).unwrap();
        let out = compose(&e, &m, &stripes()).unwrap();
        assert_eq!(out.colors.dims(), (4, 2));
        assert_eq!(out.heights.dims(), (2, 4));
        for (x, y, color) in out.colors.cells() {
            assert_eq!(*out.heights.get(y, x), color.0[0] as f32 / 255.0);
            assert_eq!(out.height_at(x, y), *out.heights.get(y, x));
        }
        let rows = out.height_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].len(), 4);
    }

    #[test]
    fn flat_elevation_uses_middle_row() {
        let e = NoiseField::filled(2, 2, 3.0).unwrap();
        let m = NoiseField::filled(2, 2, 1.0).unwrap();
        let out = compose(&e, &m, &stripes()).unwrap();
        assert!(out.colors.as_slice().iter().all(|c| *c == Rgba([100, 200, 0, 255])));
    }

    #[test]
    fn color_image_flips_y() {
        let e = NoiseField::from_nested(vec![vec![0.0, 1.0]]).unwrap();
        let m = NoiseField::filled(1, 2, 0.0).unwrap();
        let out = compose(&e, &m, &stripes()).unwrap();
        let img = out.color_image();
        assert_eq!(img.dimensions(), (1, 2));
        assert_eq!(img.get_pixel(0, 1).0[0], 0);
        assert_eq!(img.get_pixel(0, 0).0[0], 200);
    }
}
