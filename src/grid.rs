//! Dense toroidal grid of single-byte cells

use rand::prelude::*;

/// Row-major matrix of `u8` values that wraps at both edges.
///
/// A live grid holds only 0 or 1 between generations. The same type carries
/// the transient neighborhood sums (0-9) while a generation is being computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a zero-filled grid
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Wrap an existing row-major buffer
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        assert_eq!(cells.len(), rows * cols, "cell count does not match dimensions");
        Self { rows, cols, cells }
    }

    /// Fill a grid with independent Bernoulli draws in row-major order.
    ///
    /// `fraction` must lie in `[0, 1]`. The same seed always yields the same grid.
    pub fn random(rows: usize, cols: usize, fraction: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..rows * cols)
            .map(|_| u8::from(rng.gen_bool(fraction)))
            .collect();
        Self::from_cells(rows, cols, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat row-major view of the cells
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    #[inline]
    fn index(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.cells[self.index(r, c)]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: u8) {
        let i = self.index(r, c);
        self.cells[i] = value;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().map(|&c| c as usize).sum()
    }

    /// Add `source` shifted by `shift` rows: row `r` gains source row `(r + shift) mod rows`.
    pub fn add_row_shift(&mut self, source: &Grid, shift: isize) {
        debug_assert_eq!((self.rows, self.cols), (source.rows, source.cols));
        let shift = wrap_shift(shift, self.rows);
        // Whole rows are contiguous, so a row shift is a rotation of the flat buffer.
        add_rotated(&mut self.cells, &source.cells, shift * self.cols);
    }

    /// Add `source` shifted by `shift` columns: column `c` gains source column
    /// `(c + shift) mod cols`.
    pub fn add_col_shift(&mut self, source: &Grid, shift: isize) {
        debug_assert_eq!((self.rows, self.cols), (source.rows, source.cols));
        let shift = wrap_shift(shift, self.cols);
        for (dst, src) in self
            .cells
            .chunks_exact_mut(self.cols)
            .zip(source.cells.chunks_exact(self.cols))
        {
            add_rotated(dst, src, shift);
        }
    }
}

/// Normalize a signed shift into `[0, dim)`.
#[inline]
pub fn wrap_shift(shift: isize, dim: usize) -> usize {
    shift.rem_euclid(dim as isize) as usize
}

/// `dst[i] += src[(i + offset) mod len]` as two disjoint range adds.
fn add_rotated(dst: &mut [u8], src: &[u8], offset: usize) {
    let (unwrapped, wrapped) = dst.split_at_mut(dst.len() - offset);
    add_assign(unwrapped, &src[offset..]);
    add_assign(wrapped, &src[..offset]);
}

#[inline]
fn add_assign(dst: &mut [u8], src: &[u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = d.wrapping_add(s);
    }
}
