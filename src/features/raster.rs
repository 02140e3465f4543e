use crate::Error;
use crate::FOREGROUND_THRESHOLD;
use crate::Result;

/// Binary image of a single shape sample.
///
/// Pixels are stored row-major; `true` marks foreground (the shape).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Raster {
    pub fn new(width: usize, height: usize, pixels: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Raster(format!("has empty extent {}x{}", width, height)));
        }
        if pixels.len() != width * height {
            return Err(Error::Raster(format!(
                "has {} pixels, expected {}x{}",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
    /// Inverse-threshold a grayscale buffer: dark pixels become foreground.
    pub fn from_gray(width: usize, height: usize, gray: &[u8]) -> Result<Self> {
        Self::new(
            width,
            height,
            gray.iter().map(|&g| g <= FOREGROUND_THRESHOLD).collect(),
        )
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn at(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }
    /// Foreground pixel count.
    pub fn area(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
    /// Foreground coordinates as `(x, y)` in row-major order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| (i % self.width, i / self.width))
    }
}
