//! Min-max normalization of elevation grids onto [0, 1].

use rayon::prelude::*;
use tracing::debug;

use crate::error::GenerationError;
use super::grid::Grid;

/// Rescales every cell to `(v - min) / (max - min)` using the grid-wide extrema.
///
/// After normalization the minimum cell is exactly 0.0 and the maximum exactly
/// 1.0. Fails with `NumericAnomaly` if any cell is not finite and with
/// `DegenerateInput` if all cells are equal.
pub fn normalize_grid(mut grid: Grid<f32>) -> Result<Grid<f32>, GenerationError> {
    grid.ensure_finite()?;

    let (min, max) = grid.range();
    if min == max {
        return Err(GenerationError::DegenerateInput { value: min });
    }

    // f64 keeps `max - min` finite even for extreme f32 inputs.
    let min = min as f64;
    let range = max as f64 - min;
    grid.as_mut_slice().par_iter_mut().for_each(|v| {
        *v = ((*v as f64 - min) / range) as f32;
    });

    debug!(min, range, "grid normalized");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(size: usize) -> Grid<f32> {
        Grid::from_fn(size, |x, y| (x as f32 - y as f32) * 0.37 - 5.0).unwrap()
    }

    #[test]
    fn test_output_in_unit_range() {
        let grid = normalize_grid(ramp(9)).unwrap();
        assert_eq!(grid.size(), 9);
        assert!(grid.as_slice().iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(grid.range(), (0.0, 1.0));
    }

    #[test]
    fn test_extrema_hit_exactly() {
        let grid = normalize_grid(ramp(5)).unwrap();
        assert_eq!(*grid.get(0, 4), 0.0);
        assert_eq!(*grid.get(4, 0), 1.0);
        // x == y lies halfway
        assert!((grid.get(2, 2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_constant_grid_is_degenerate() {
        let grid = Grid::from_vec(4, vec![0.75f32; 16]).unwrap();
        assert_eq!(
            normalize_grid(grid),
            Err(GenerationError::DegenerateInput { value: 0.75 })
        );
    }

    #[test]
    fn test_single_cell_is_degenerate() {
        let grid = Grid::from_vec(1, vec![3.0f32]).unwrap();
        assert!(matches!(
            normalize_grid(grid),
            Err(GenerationError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let mut grid = ramp(4);
        grid.set(1, 2, f32::NAN);
        assert_eq!(
            normalize_grid(grid),
            Err(GenerationError::NumericAnomaly { x: 1, y: 2 })
        );
    }

    #[test]
    fn test_extreme_values_stay_finite() {
        let mut grid = Grid::from_vec(2, vec![0.0f32; 4]).unwrap();
        grid.set(0, 0, f32::MIN);
        grid.set(1, 1, f32::MAX);
        let grid = normalize_grid(grid).unwrap();
        assert_eq!(*grid.get(0, 0), 0.0);
        assert_eq!(*grid.get(1, 1), 1.0);
        assert!((grid.get(1, 0) - 0.5).abs() < 1e-6);
    }
}
