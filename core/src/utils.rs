use image::{Rgba, RgbaImage};

use crate::NoiseField;

// Output for a field whose samples are all equal
pub const FLAT_MIDPOINT: f32 = 0.5;

// Observed range of one field.
// Always computed fresh from the field being normalized; never cached
// between passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub min: f32,
    pub max: f32,
}

impl Extrema {
    pub fn scan(field: &NoiseField) -> Self {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &val in field.as_slice() {
            min = min.min(val);
            max = max.max(val);
        }
        Self { min, max }
    }

    // Map `v` into [0, 1] relative to this range
    // Computed in f64: f32 extremes far apart would overflow the range
    #[inline]
    pub fn remap(&self, v: f32) -> f32 {
        let (min, max) = (self.min as f64, self.max as f64);
        let range = max - min;
        if range <= 0.0 {
            return FLAT_MIDPOINT;
        }
        (((v as f64 - min) / range) as f32).clamp(0.0, 1.0)
    }
}

// Rescale a field to [0, 1] in place
pub fn normalize2(field: &mut NoiseField) {
    let extrema = Extrema::scan(field);
    for val in field.values_mut() {
        *val = extrema.remap(*val);
    }
}

// Rescaled copy, source untouched
pub fn normalized2(field: &NoiseField) -> NoiseField {
    let mut out = field.clone();
    normalize2(&mut out);
    out
}

// Grayscale preview of a field, normalized on the fly.
// Cell `(x, y)` lands on pixel `(x, height - 1 - y)` so that y grows
// upwards like the rest of the terrain images.
pub fn preview_image(field: &NoiseField) -> RgbaImage {
    let extrema = Extrema::scan(field);
    let (w, h) = field.dims();
    let mut img = RgbaImage::new(w as u32, h as u32);
    for (x, y, &v) in field.cells() {
        let gray = (extrema.remap(v) * 255.0).round() as u8;
        img.put_pixel(x as u32, (h - 1 - y) as u32, Rgba([gray, gray, gray, 255]));
    }
    img
}
