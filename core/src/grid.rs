use crate::{Result, TerrainError};

// Dense 2D grid addressed as `(x, y)` with `x < width` and `y < height`.
// Samples are stored row by row (`y * width + x`). The dimensions are
// fixed at creation and both are at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

// 2D noise map: one f32 sample per cell
pub type NoiseField = Grid2D<f32>;

impl<T: Clone> Grid2D<T> {
    // Grid of `width` x `height` copies of `value`
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; width * height],
        })
    }

    // Build a grid from nested columns, `values[x][y]`.
    // Every column must have the same, non-zero length.
    pub fn from_nested(values: Vec<Vec<T>>) -> Result<Self> {
        let width = values.len();
        let height = values.first().map_or(0, Vec::len);
        check_dims(width, height)?;
        if let Some(bad) = values.iter().find(|col| col.len() != height) {
            return Err(TerrainError::InvalidDimensions {
                width,
                height: bad.len(),
            });
        }

        Self::from_fn(width, height, |x, y| values[x][y].clone())
    }

    // Same samples with the axes swapped: `t.get(y, x) == self.get(x, y)`.
    pub fn transposed(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for x in 0..self.width {
            for y in 0..self.height {
                data.push(self.data[y * self.width + x].clone());
            }
        }
        Self {
            width: self.height,
            height: self.width,
            data,
        }
    }
}

impl<T> Grid2D<T> {
    // Fill every cell from its coordinates
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self> {
        check_dims(width, height)?;
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let i = self.index(x, y);
        self.data[i] = value;
    }

    // Row-major samples (y outer, x inner)
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    // Iterate `(x, y, sample)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % width, i / width, v))
    }

    // Inverse of `from_nested`: `out[x][y]`
    pub fn to_nested(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        (0..self.width)
            .map(|x| (0..self.height).map(|y| self.get(x, y).clone()).collect())
            .collect()
    }
}

fn check_dims(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    Ok(())
}
