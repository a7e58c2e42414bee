use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::NoiseGenerator;

// Single-octave 2D Perlin (gradient) noise
// The fractal layering lives in `Fractal2D`; this is only the primitive.
pub struct Perlin2D {
    perm: [u8; 512], // permutation table (256 duplicated)
}

impl Perlin2D {
    // Build the permutation table from the caller's seeded stream
    pub fn from_rng(rng: &mut ChaCha8Rng) -> Self {
        let mut p: Vec<u8> = (0..=255).collect();
        p.shuffle(rng);

        // Duplicated so corner hashes never need a modulo
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }
        Self { perm }
    }

    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self::from_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    // Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
    // First and second derivatives are zero at t=0 and t=1
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Pick one of 8 gradient directions from the low bits of the hash
    // and return its dot product with the offset (x, y)
    #[inline]
    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 0x7;
        let (u, v) = if h < 4 { (x, y) } else { (y, x) };
        let u = if h & 1 == 0 { u } else { -u };
        let v = if h & 2 == 0 { v } else { -v };
        // axis-aligned gradients for h >= 4 keep the output bounded by 1
        if h < 4 { (u + v) * 0.5 } else { u }
    }

    #[inline]
    fn hash(&self, xi: usize, yi: usize) -> u8 {
        self.perm[self.perm[xi] as usize + yi]
    }
}

impl NoiseGenerator for Perlin2D {
    // Raw noise at (x, y), in [−1, 1] and exactly 0 on integer lattice points
    fn get2(&self, x: f64, y: f64) -> f64 {
        let (xf0, yf0) = (x.floor(), y.floor());
        // Which lattice square, wrapped to the table size
        let xi = (xf0 as i64 & 255) as usize;
        let yi = (yf0 as i64 & 255) as usize;
        // Where inside the square
        let xf = x - xf0;
        let yf = y - yf0;

        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let aa = self.hash(xi, yi);
        let ab = self.hash(xi, yi + 1);
        let ba = self.hash(xi + 1, yi);
        let bb = self.hash(xi + 1, yi + 1);

        let x1 = Self::lerp(Self::grad(aa, xf, yf), Self::grad(ba, xf - 1.0, yf), u);
        let x2 = Self::lerp(
            Self::grad(ab, xf, yf - 1.0),
            Self::grad(bb, xf - 1.0, yf - 1.0),
            u,
        );
        Self::lerp(x1, x2, v)
    }
}

#[cfg(test)]
mod tests {
    use crate::NoiseGenerator;

    use super::Perlin2D;

    #[test]
    fn perlin2_determinism() {
        let p1 = Perlin2D::new(1234);
        let p2 = Perlin2D::new(1234);
        // Same seed ⇒ same output
        let a = p1.get2(10.5, -3.7);
        let b = p2.get2(10.5, -3.7);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn perlin2_range() {
        let p = Perlin2D::new(0);
        for i in 0..2000 {
            let (x, y) = (i as f64 * 0.137 - 50.0, i as f64 * 0.291 + 7.0);
            let v = p.get2(x, y);
            assert!(v.is_finite());
            assert!((-1.0..=1.0).contains(&v), "value {v} at ({x}, {y})");
        }
    }

    #[test]
    fn perlin2_zero_on_lattice() {
        let p = Perlin2D::new(99);
        assert_eq!(p.get2(3.0, -8.0), 0.0);
    }

    #[test]
    fn perlin2_is_continuous() {
        let p = Perlin2D::new(5);
        let a = p.get2(1.25, 2.5);
        let b = p.get2(1.2501, 2.5);
        assert!((a - b).abs() < 1e-3);
    }

    #[test]
    fn perlin2_seed_changes_pattern() {
        let a = Perlin2D::new(1);
        let b = Perlin2D::new(2);
        let differs = (0..64).any(|i| {
            let x = i as f64 * 0.37 + 0.5;
            a.get2(x, x * 0.5 + 0.25) != b.get2(x, x * 0.5 + 0.25)
        });
        assert!(differs);
    }
}
