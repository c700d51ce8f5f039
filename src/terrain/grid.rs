//! Square, fixed-size grid storage shared by every generation stage.

use rayon::prelude::*;

use crate::error::{check_size, GenerationError};

/// A dense `size × size` grid stored in row-major order.
///
/// Cells are addressed as `(x, y)` where `x` is the column and `y` the row.
/// The size is fixed at construction; there is no way to resize a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Wraps an existing row-major buffer of `size * size` cells.
    pub fn from_vec(size: usize, cells: Vec<T>) -> Result<Self, GenerationError> {
        let expected = check_size(size)?;
        if cells.len() != expected {
            return Err(GenerationError::invalid(format!(
                "grid of size {} needs {} cells, got {}",
                size,
                expected,
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell in parallel.
    pub fn from_fn<F>(size: usize, f: F) -> Result<Self, GenerationError>
    where
        T: Send,
        F: Fn(usize, usize) -> T + Sync,
    {
        let len = check_size(size)?;
        let cells = (0..len)
            .into_par_iter()
            .map(|i| f(i % size, i / size))
            .collect();
        Ok(Self { size, cells })
    }

    /// Width and height of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size * size`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(x < self.size && y < self.size);
        &self.cells[y * self.size + x]
    }

    /// Overwrites the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(x < self.size && y < self.size);
        self.cells[y * self.size + x] = value;
    }

    /// Row-major view of every cell.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterates over rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Returns an iterator over all (x, y) cell coordinates in storage order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    /// Maps every cell into a new grid of the same size, in parallel.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        Grid {
            size: self.size,
            cells: self.cells.par_iter().map(|v| f(v)).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }
}

impl Grid<f32> {
    /// Returns `(min, max)` over every cell, computed as a parallel reduction.
    pub fn range(&self) -> (f32, f32) {
        self.cells
            .par_iter()
            .fold(
                || (f32::MAX, f32::MIN),
                |(lo, hi), &v| (lo.min(v), hi.max(v)),
            )
            .reduce(
                || (f32::MAX, f32::MIN),
                |(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)),
            )
    }

    /// Fails with `NumericAnomaly` on the first NaN or infinite cell in storage order.
    pub fn ensure_finite(&self) -> Result<(), GenerationError> {
        match self.cells.par_iter().position_first(|v| !v.is_finite()) {
            Some(i) => Err(GenerationError::NumericAnomaly {
                x: i % self.size,
                y: i / self.size,
            }),
            None => Ok(()),
        }
    }
}
