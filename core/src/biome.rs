// Biome graph: a 2D color table indexed by (moisture, elevation).
// The horizontal axis is a moisture ramp and the vertical axis an
// elevation ramp. The red channel of a resolved entry is the terrain
// height for that cell, so a single authored image decides both the look
// and the relief of the island.

use image::{Rgba, RgbaImage};
use palette::{Gradient, LinSrgb};

use crate::{Grid2D, Result, TerrainError};

// Elevation below which the default graph is water
const SEA_LEVEL: f32 = 0.32;

// Color and height resolved for one (moisture, elevation) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeSample {
    pub color: Rgba<u8>,
    // Red channel of `color` scaled to [0, 1].
    pub height: f32,
}

impl BiomeSample {
    fn from_color(color: Rgba<u8>) -> Self {
        Self {
            color,
            height: color.0[0] as f32 / 255.0,
        }
    }
}

// Read-only lookup table. Cell `(moisture_index, elevation_index)`;
// elevation index 0 is the lowest row.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeLookup {
    table: Grid2D<Rgba<u8>>,
}

impl BiomeLookup {
    // Wrap `samples` laid out row by row, lowest elevation row first.
    pub fn new(width: usize, height: usize, samples: Vec<Rgba<u8>>) -> Result<Self> {
        check_not_empty(width, height)?;
        let expected = width * height;
        if samples.len() != expected {
            return Err(TerrainError::LookupSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        let table = Grid2D::from_fn(width, height, |x, y| samples[y * width + x])?;
        Ok(Self { table })
    }

    // `rows[elevation][moisture]`, lowest elevation first.
    pub fn from_rows(rows: Vec<Vec<Rgba<u8>>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_not_empty(width, height)?;
        // from_nested reads its outer index as x, so swap afterwards
        let table = Grid2D::from_nested(rows)?.transposed();
        Ok(Self { table })
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl FnMut(usize, usize) -> Rgba<u8>,
    ) -> Result<Self> {
        check_not_empty(width, height)?;
        Ok(Self {
            table: Grid2D::from_fn(width, height, f)?,
        })
    }

    // Read an authored biome-graph image.
    // Image row 0 is the top of the picture, which is the highest
    // elevation; the bottom row is elevation 0.
    pub fn from_rgba_image(img: &RgbaImage) -> Result<Self> {
        let (w, h) = (img.width() as usize, img.height() as usize);
        Self::from_fn(w, h, |x, y| *img.get_pixel(x as u32, (h - 1 - y) as u32))
    }

    // Generated island graph for when no authored image is at hand.
    // Elevation walks deep water, shallows, beach, grass, rock and snow.
    // Moisture only tints green and blue on land, so the red channel and
    // therefore the height depends on elevation alone.
    pub fn default_island(width: usize, height: usize) -> Result<Self> {
        check_not_empty(width, height)?;
        let gradient = Gradient::with_domain(vec![
            (0.00, LinSrgb::new(0.00, 0.05, 0.35)), // deep water
            (SEA_LEVEL - 0.02, LinSrgb::new(0.10, 0.35, 0.65)), // shallows
            (SEA_LEVEL + 0.03, LinSrgb::new(0.40, 0.38, 0.25)), // beach
            (0.50, LinSrgb::new(0.45, 0.60, 0.20)), // grass
            (0.75, LinSrgb::new(0.60, 0.55, 0.50)), // rock
            (1.00, LinSrgb::new(1.0, 1.0, 1.0)), // snow
        ]);

        Self::from_fn(width, height, |x, y| {
            let moisture = axis_position(x, width);
            let elevation = axis_position(y, height);
            let base: LinSrgb = gradient.get(elevation);
            let (green, blue) = if elevation < SEA_LEVEL {
                (base.green, base.blue)
            } else {
                // dry land browns out, wet land greens up
                (
                    base.green * (0.7 + 0.3 * moisture),
                    base.blue * (0.85 + 0.15 * moisture),
                )
            };
            let rgb = LinSrgb::new(base.red, green.clamp(0.0, 1.0), blue.clamp(0.0, 1.0))
                .into_format::<u8>();
            Rgba([rgb.red, rgb.green, rgb.blue, 255])
        })
    }

    pub fn width(&self) -> usize {
        self.table.width()
    }

    pub fn height(&self) -> usize {
        self.table.height()
    }

    // Raw table entry
    pub fn entry(&self, moisture_index: usize, elevation_index: usize) -> Rgba<u8> {
        *self.table.get(moisture_index, elevation_index)
    }

    // Resolve a (moisture, elevation) pair.
    // Both inputs are expected in [0, 1]; anything outside (or NaN) is
    // clamped to the table edge, so the index is always valid.
    pub fn classify(&self, moisture: f32, elevation: f32) -> BiomeSample {
        let ix = table_index(moisture, self.width());
        let iy = table_index(elevation, self.height());
        BiomeSample::from_color(self.entry(ix, iy))
    }
}

// round(v * (len - 1)) clamped to 0..len
#[inline]
fn table_index(v: f32, len: usize) -> usize {
    let last = len - 1;
    let scaled = (v * last as f32).round();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(last)
    }
}

// Center of cell `i` along an axis of `len` cells, as a fraction in [0, 1]
fn axis_position(i: usize, len: usize) -> f32 {
    if len == 1 {
        0.0
    } else {
        i as f32 / (len - 1) as f32
    }
}

fn check_not_empty(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TerrainError::EmptyLookup { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn quad() -> BiomeLookup {
        BiomeLookup::from_rows(vec![vec![RED, GREEN], vec![BLUE, WHITE]]).unwrap()
    }

    #[test]
    fn classify_corners() {
        let lookup = quad();
        assert_eq!(lookup.classify(0.0, 0.0).color, RED);
        assert_eq!(lookup.classify(1.0, 0.0).color, GREEN);
        assert_eq!(lookup.classify(0.0, 1.0).color, BLUE);
        assert_eq!(lookup.classify(1.0, 1.0).color, WHITE);
    }

    #[test]
    fn height_is_red_channel() {
        let lookup = quad();
        assert_eq!(lookup.classify(0.0, 0.0).height, 1.0);
        assert_eq!(lookup.classify(1.0, 0.0).height, 0.0);
        let gray = BiomeLookup::new(1, 1, vec![Rgba([51, 0, 0, 255])]).unwrap();
        assert!((gray.classify(0.3, 0.3).height - 0.2).abs() < 1e-6);
    }

    #[test]
    fn classify_clamps_out_of_range() {
        let lookup = BiomeLookup::from_fn(5, 3, |x, y| Rgba([x as u8, y as u8, 0, 255])).unwrap();
        assert_eq!(lookup.classify(-0.2, 1.3).color, Rgba([0, 2, 0, 255]));
        assert_eq!(lookup.classify(7.0, -4.0).color, Rgba([4, 0, 0, 255]));
        assert_eq!(lookup.classify(f32::NAN, 0.5).color, Rgba([0, 1, 0, 255]));
        // round to nearest
        assert_eq!(lookup.classify(0.6, 0.0).color, Rgba([2, 0, 0, 255]));
        assert_eq!(lookup.classify(0.65, 0.0).color, Rgba([3, 0, 0, 255]));
    }

    #[test]
    fn empty_lookup_is_rejected() {
        assert_eq!(
            BiomeLookup::new(0, 3, Vec::new()),
            Err(TerrainError::EmptyLookup { width: 0, height: 3 })
        );
        assert!(BiomeLookup::from_rows(Vec::new()).is_err());
        assert!(BiomeLookup::from_rgba_image(&RgbaImage::new(0, 0)).is_err());
        assert!(BiomeLookup::default_island(4, 0).is_err());
    }

    #[test]
    fn sample_count_must_match() {
        assert_eq!(
            BiomeLookup::new(2, 2, vec![RED; 3]),
            Err(TerrainError::LookupSizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn image_bottom_row_is_low_elevation() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, BLUE); // top-left
        img.put_pixel(1, 0, WHITE);
        img.put_pixel(0, 1, RED); // bottom-left
        img.put_pixel(1, 1, GREEN);
        assert_eq!(BiomeLookup::from_rgba_image(&img).unwrap(), quad());
    }

    #[test]
    fn default_island_height_follows_elevation() {
        let lookup = BiomeLookup::default_island(16, 64).unwrap();
        for x in 0..16 {
            let column: Vec<u8> = (0..64).map(|y| lookup.entry(x, y).0[0]).collect();
            assert!(column.windows(2).all(|w| w[0] <= w[1]), "{column:?}");
        }
        // moisture never moves the height
        for y in 0..64 {
            assert_eq!(lookup.entry(0, y).0[0], lookup.entry(15, y).0[0]);
        }
        assert_eq!(lookup.classify(0.5, 1.0).height, 1.0);
        assert_eq!(lookup.classify(0.5, 0.0).height, 0.0);
    }
}
