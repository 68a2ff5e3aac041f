//! Sample images as color-index grids with a first-seen palette

use crate::io::error::{ModelError, Result, invalid_parameter};
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// An RGBA color
pub type Color = [u8; 4];

/// A sample image converted to palette indices
///
/// The palette lists every distinct color in the order it is first met in a
/// row-major scan, so identical pixels always produce identical catalogs.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Palette indices, indexed by `[y, x]`
    indices: Array2<usize>,
    palette: Vec<Color>,
}

impl Sample {
    /// Build a sample from a row-major RGBA byte buffer
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if the buffer length does not
    /// equal `width * height * 4`
    pub fn from_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Self> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(invalid_parameter(
                "pixels",
                &pixels.len(),
                &format!("expected {expected} bytes for a {width}x{height} RGBA sample"),
            ));
        }

        let mut palette: Vec<Color> = Vec::new();
        let mut lookup: HashMap<Color, usize> = HashMap::new();
        let mut indices = Array2::zeros((height, width));

        for (i, chunk) in pixels.chunks_exact(4).enumerate() {
            let color = [
                chunk.first().copied().unwrap_or(0),
                chunk.get(1).copied().unwrap_or(0),
                chunk.get(2).copied().unwrap_or(0),
                chunk.get(3).copied().unwrap_or(0),
            ];
            let index = *lookup.entry(color).or_insert_with(|| {
                palette.push(color);
                palette.len() - 1
            });
            if let Some(cell) = indices.get_mut((i / width, i % width)) {
                *cell = index;
            }
        }

        Ok(Self { indices, palette })
    }

    /// Load and convert a PNG sample
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| ModelError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);

        Self::from_rgba(rgba.as_raw(), width, height)
    }

    /// Sample width in pixels
    pub fn width(&self) -> usize {
        self.indices.ncols()
    }

    /// Sample height in pixels
    pub fn height(&self) -> usize {
        self.indices.nrows()
    }

    /// Palette index at a pixel
    pub fn color_index(&self, x: usize, y: usize) -> Option<usize> {
        self.indices.get((y, x)).copied()
    }

    /// RGBA color at a pixel
    pub fn color(&self, x: usize, y: usize) -> Option<Color> {
        self.color_index(x, y)
            .and_then(|index| self.palette.get(index))
            .copied()
    }

    /// Distinct colors in first-seen row-major order
    pub fn unique_colors(&self) -> &[Color] {
        &self.palette
    }

    /// Palette index at a position taken modulo the sample size
    pub fn wrapped_index(&self, x: usize, y: usize) -> Option<usize> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return None;
        }
        self.color_index(x % width, y % height)
    }

    /// Flatten back to a row-major RGBA buffer
    pub fn to_rgba(&self) -> Vec<u8> {
        self.indices
            .iter()
            .flat_map(|&index| self.palette.get(index).copied().unwrap_or([0, 0, 0, 0]))
            .collect()
    }
}
