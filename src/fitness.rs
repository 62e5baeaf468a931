//! # Fitness
//!
//! Fitness measures how close a rendered grid is to the reference grid. The per-pixel
//! error is the sum of absolute channel differences, so the worst possible pixel costs
//! `3 * 255 = 765`. The total error is mapped onto `0..=MAX_FITNESS`, where
//! `MAX_FITNESS` is a pixel-perfect match:
//!
//! ```text
//! fitness = round(MAX_FITNESS * (max_diff - total_diff) / max_diff)
//! max_diff = width * height * 765
//! ```
//!
//! Sums are accumulated in `u64`; `width * height * 765` overflows 32 bits for
//! canvases larger than roughly 2.8 megapixels.

use crate::error::{GeneticError, Result};
use crate::pixel_grid::PixelGrid;

/// Score of a rendering identical to the reference.
pub const MAX_FITNESS: i32 = 10_000;

/// Largest possible difference for a single pixel.
pub const MAX_PIXEL_DIFF: u64 = 3 * 255;

/// Sum of absolute per-channel differences over all pixels.
///
/// # Errors
///
/// Returns `GeneticError::DimensionMismatch` if the grids differ in size.
pub fn total_difference(rendered: &PixelGrid, reference: &PixelGrid) -> Result<u64> {
    if rendered.dimensions() != reference.dimensions() {
        return Err(GeneticError::DimensionMismatch {
            expected: reference.dimensions(),
            actual: rendered.dimensions(),
        });
    }

    Ok(rendered
        .pixels()
        .iter()
        .zip(reference.pixels())
        .map(|(a, b)| {
            a.iter()
                .zip(b)
                .map(|(&x, &y)| x.abs_diff(y) as u64)
                .sum::<u64>()
        })
        .sum())
}

/// Scores `rendered` against `reference`.
///
/// # Errors
///
/// - `GeneticError::DimensionMismatch` if the grids differ in size.
/// - `GeneticError::Configuration` for a zero-area canvas, where the score is undefined.
pub fn score_fitness(rendered: &PixelGrid, reference: &PixelGrid) -> Result<i32> {
    let max_diff = reference.area() * MAX_PIXEL_DIFF;
    if max_diff == 0 {
        return Err(GeneticError::Configuration(format!(
            "Cannot score a {}x{} canvas",
            reference.width(),
            reference.height()
        )));
    }

    let total_diff = total_difference(rendered, reference)?;
    let ratio = (max_diff - total_diff) as f64 / max_diff as f64;

    Ok((MAX_FITNESS as f64 * ratio).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_grids_score_max() {
        let grid = PixelGrid::from_fn(17, 5, |x, y| [x as u8, y as u8, 99]);
        assert_eq!(total_difference(&grid, &grid).unwrap(), 0);
        assert_eq!(score_fitness(&grid, &grid.clone()).unwrap(), MAX_FITNESS);
    }

    #[test]
    fn test_opposite_grids_score_zero() {
        let black = PixelGrid::new(3, 3);
        let white = PixelGrid::filled(3, 3, [255, 255, 255]);
        assert_eq!(total_difference(&black, &white).unwrap(), 9 * MAX_PIXEL_DIFF);
        assert_eq!(score_fitness(&black, &white).unwrap(), 0);
    }

    #[test]
    fn test_black_against_red() {
        let black = PixelGrid::new(2, 2);
        let red = PixelGrid::filled(2, 2, [255, 0, 0]);
        // round(10000 * 510 / 765)
        assert_eq!(score_fitness(&black, &red).unwrap(), 6667);
    }

    #[test]
    fn test_difference_is_symmetric_per_channel() {
        let a = PixelGrid::filled(1, 1, [10, 200, 30]);
        let b = PixelGrid::filled(1, 1, [20, 100, 30]);
        assert_eq!(total_difference(&a, &b).unwrap(), 110);
        assert_eq!(total_difference(&b, &a).unwrap(), 110);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = PixelGrid::new(2, 2);
        let b = PixelGrid::new(2, 3);
        match score_fitness(&a, &b) {
            Err(GeneticError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, (2, 3));
                assert_eq!(actual, (2, 2));
            }
            other => panic!("Expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_area_rejected() {
        let empty = PixelGrid::new(0, 0);
        assert!(matches!(
            score_fitness(&empty, &empty),
            Err(GeneticError::Configuration(_))
        ));
    }
}
