//! # Rasterization
//!
//! Turns a sequence of genes into a `PixelGrid`. Painting starts from an all-black
//! canvas and applies genes in order, so later genes overpaint earlier ones.
//!
//! Each gene covers the inclusive rectangle `[x, x + w] x [y, y + h]` clipped to the
//! canvas. Every covered channel is combined with the gene's channel according to a
//! `BlendRule`:
//!
//! - `Averaged`: `min(255, (old + new) / 2)` with integer division. The gene's blend
//!   weight is ignored.
//! - `WeightedAlpha`: `(old * (255 - a) + new * a + 127) / 255`, i.e. "over"
//!   compositing by the gene's blend weight, rounded to nearest.
//!
//! Fitness values depend heavily on the rule, so a run uses exactly one of them.

use std::fmt;
use std::str::FromStr;

use crate::error::GeneticError;
use crate::gene::Gene;
use crate::pixel_grid::{PixelGrid, Rgb8};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendRule {
    /// Unweighted per-channel average of the old and new value.
    #[default]
    Averaged,
    /// Alpha compositing using the gene's blend weight.
    WeightedAlpha,
}

impl BlendRule {
    #[inline]
    fn mix(self, old: u8, new: u8, alpha: u8) -> u8 {
        match self {
            BlendRule::Averaged => ((old as u16 + new as u16) / 2).min(255) as u8,
            BlendRule::WeightedAlpha => {
                let a = alpha as u32;
                ((old as u32 * (255 - a) + new as u32 * a + 127) / 255) as u8
            }
        }
    }

    #[inline]
    fn apply(self, pixel: &mut Rgb8, color: Rgb8, alpha: u8) {
        for (channel, value) in pixel.iter_mut().zip(color) {
            *channel = self.mix(*channel, value, alpha);
        }
    }
}

impl FromStr for BlendRule {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "averaged" | "average" => Ok(BlendRule::Averaged),
            "weighted-alpha" | "alpha" => Ok(BlendRule::WeightedAlpha),
            other => Err(GeneticError::Configuration(format!(
                "Unknown blend rule '{}', expected 'averaged' or 'weighted-alpha'",
                other
            ))),
        }
    }
}

impl fmt::Display for BlendRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlendRule::Averaged => write!(f, "averaged"),
            BlendRule::WeightedAlpha => write!(f, "weighted-alpha"),
        }
    }
}

/// Paints a single gene onto `grid`, touching only the in-bounds part of its rectangle.
pub fn paint(grid: &mut PixelGrid, gene: &Gene, blend: BlendRule) {
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    // i64 so x + w cannot overflow for hand-built genes.
    let x1 = (gene.x() as i64).max(0);
    let y1 = (gene.y() as i64).max(0);
    let x2 = (gene.x() as i64 + gene.width() as i64).min(width as i64 - 1);
    let y2 = (gene.y() as i64 + gene.height() as i64).min(height as i64 - 1);

    if x1 > x2 || y1 > y2 {
        return;
    }

    let color = gene.color();
    let alpha = gene.alpha();
    for y in y1..=y2 {
        let row = grid.row_mut(y as u32);
        for pixel in &mut row[x1 as usize..=x2 as usize] {
            blend.apply(pixel, color, alpha);
        }
    }
}

/// Renders `genes` in order onto a fresh black canvas of the given size.
pub fn render(genes: &[Gene], width: u32, height: u32, blend: BlendRule) -> PixelGrid {
    let mut grid = PixelGrid::new(width, height);
    for gene in genes {
        paint(&mut grid, gene, blend);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averaged_ignores_alpha() {
        assert_eq!(BlendRule::Averaged.mix(0, 255, 0), 127);
        assert_eq!(BlendRule::Averaged.mix(0, 255, 255), 127);
        assert_eq!(BlendRule::Averaged.mix(255, 255, 10), 255);
        assert_eq!(BlendRule::Averaged.mix(100, 51, 128), 75);
    }

    #[test]
    fn test_weighted_alpha() {
        assert_eq!(BlendRule::WeightedAlpha.mix(0, 200, 255), 200);
        assert_eq!(BlendRule::WeightedAlpha.mix(90, 200, 0), 90);
        // (0 * 127 + 255 * 128 + 127) / 255 = 128
        assert_eq!(BlendRule::WeightedAlpha.mix(0, 255, 128), 128);
    }

    #[test]
    fn test_rectangle_is_inclusive() {
        let gene = Gene::new(1, 1, 1, 0, [200, 100, 50], 255);
        let grid = render(&[gene], 4, 3, BlendRule::Averaged);
        assert_eq!(grid.get(1, 1), Some([100, 50, 25]));
        assert_eq!(grid.get(2, 1), Some([100, 50, 25]));
        assert_eq!(grid.get(3, 1), Some([0, 0, 0]));
        assert_eq!(grid.get(1, 2), Some([0, 0, 0]));
        assert_eq!(grid.get(1, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_fully_off_canvas_gene_changes_nothing() {
        let genes = [
            Gene::new(-50, 10, 5, 5, [255, 255, 255], 255),
            Gene::new(10, -50, 5, 5, [255, 255, 255], 255),
            Gene::new(150, 10, 5, 5, [255, 255, 255], 255),
        ];
        let grid = render(&genes, 100, 100, BlendRule::Averaged);
        assert_eq!(grid, PixelGrid::new(100, 100));
    }

    #[test]
    fn test_straddling_gene_is_clipped() {
        let gene = Gene::new(-2, 8, 3, 4, [254, 254, 254], 255);
        let grid = render(&[gene], 10, 10, BlendRule::Averaged);

        for y in 0..10 {
            for x in 0..10 {
                let inside = x <= 1 && y >= 8;
                let expected = if inside { [127, 127, 127] } else { [0, 0, 0] };
                assert_eq!(grid.get(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_later_genes_paint_over_earlier() {
        let first = Gene::new(0, 0, 0, 0, [200, 0, 0], 255);
        let second = Gene::new(0, 0, 0, 0, [0, 200, 0], 255);

        let a = render(&[first, second], 1, 1, BlendRule::Averaged);
        let b = render(&[second, first], 1, 1, BlendRule::Averaged);

        assert_eq!(a.get(0, 0), Some([50, 100, 0]));
        assert_eq!(b.get(0, 0), Some([100, 50, 0]));
    }

    #[test]
    fn test_blend_rule_from_str() {
        assert_eq!("averaged".parse::<BlendRule>().unwrap(), BlendRule::Averaged);
        assert_eq!(
            "Weighted-Alpha".parse::<BlendRule>().unwrap(),
            BlendRule::WeightedAlpha
        );
        assert!("multiply".parse::<BlendRule>().is_err());
        assert_eq!(BlendRule::WeightedAlpha.to_string(), "weighted-alpha");
    }
}
