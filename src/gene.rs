//! # Gene
//!
//! A `Gene` is a single drawable primitive: an axis-aligned rectangle plus a fill
//! color and a blend weight. Genes are never edited in place; mutation always
//! replaces a gene with a freshly generated one.

use crate::rng::RandomNumberGenerator;

/// How far outside the top/left canvas edge a random rectangle may be anchored.
pub const OFF_CANVAS_MARGIN: i32 = 20;

/// Random rectangle width and height are drawn from `0..MAX_EXTENT`.
pub const MAX_EXTENT: i32 = 15;

/// Lowest blend weight produced by `Gene::random`.
pub const MIN_RANDOM_ALPHA: u8 = 128;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gene {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: [u8; 3],
    alpha: u8,
}

impl Gene {
    /// Creates a gene covering `[x, x + w] x [y, y + h]`.
    ///
    /// The rectangle may lie partially or entirely outside the canvas;
    /// it is clipped when rendered.
    pub fn new(x: i32, y: i32, w: i32, h: i32, color: [u8; 3], alpha: u8) -> Self {
        Self {
            x,
            y,
            w,
            h,
            color,
            alpha,
        }
    }

    /// Generates a random gene for a canvas of the given size.
    ///
    /// Color channels are uniform over the full 8-bit range. The blend weight is
    /// drawn from the upper half of the range so strokes stay visible. The origin
    /// may fall up to `OFF_CANVAS_MARGIN` pixels before the left and top edges and the
    /// extent is small (`0..MAX_EXTENT`), so genes near the border cover the
    /// canvas only partially.
    pub fn random(canvas_width: u32, canvas_height: u32, rng: &mut RandomNumberGenerator) -> Self {
        let color = [
            rng.gen_range(0..=u8::MAX),
            rng.gen_range(0..=u8::MAX),
            rng.gen_range(0..=u8::MAX),
        ];
        let alpha = rng.gen_range(MIN_RANDOM_ALPHA..=u8::MAX);

        let x = rng.gen_range(-OFF_CANVAS_MARGIN..saturating_extent(canvas_width));
        let y = rng.gen_range(-OFF_CANVAS_MARGIN..saturating_extent(canvas_height));
        let w = rng.gen_range(0..MAX_EXTENT);
        let h = rng.gen_range(0..MAX_EXTENT);

        Self::new(x, y, w, h, color, alpha)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.w
    }

    pub fn height(&self) -> i32 {
        self.h
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }
}

/// Canvas sizes beyond `i32::MAX` clamp to it; positions past that are never drawn.
fn saturating_extent(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or(i32::MAX)
}
