//! # PixelGrid
//!
//! A `PixelGrid` is a row-major 2D array of RGB samples. Both the reference image and
//! every rendered individual are represented this way. There is no alpha channel: blend
//! weights are consumed while rasterizing and never stored.

use image::{Rgb, RgbImage};

/// One RGB sample.
pub type Rgb8 = [u8; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl PixelGrid {
    /// Creates an all-black grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Creates a grid where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Creates a grid by evaluating `f(x, y)` for every coordinate.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgb8,
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels in the grid.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns the sample at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// All samples in row-major order.
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// One row of samples. Callers must pass `y < height`.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [Rgb8] {
        let start = y as usize * self.width as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    /// Converts the grid into an `image` buffer for encoding.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(self.pixels[self.index(x, y)]))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl From<&RgbImage> for PixelGrid {
    fn from(image: &RgbImage) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| image.get_pixel(x, y).0)
    }
}
