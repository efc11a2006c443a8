//! # Pixel Grids and Image Files
//!
//! [`PixelGrid`] is the `height × width × 3` block of 8-bit samples the
//! embedder works on. Reading and writing image files sits behind the
//! [`ImageStore`] trait; [`FileImageStore`] is the `image`-crate backed
//! implementation used by the binary.

use image::RgbImage;
use log::warn;
use std::path::Path;

use crate::error::{Result, StegoError};

/// Samples per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// Row-major RGB samples: row, then column, then channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Creates a grid with every sample set to `fill`. Returns `None` if
    /// the sample count overflows `usize`.
    pub fn new(height: usize, width: usize, fill: u8) -> Option<Self> {
        let count = sample_count(height, width)?;
        Some(Self {
            height,
            width,
            samples: vec![fill; count],
        })
    }

    /// Wraps raw samples. Returns `None` if the length is not `height * width * 3`.
    pub fn from_samples(height: usize, width: usize, samples: Vec<u8>) -> Option<Self> {
        (sample_count(height, width)? == samples.len()).then_some(Self {
            height,
            width,
            samples,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        CHANNELS
    }

    /// Total number of scalar samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.height || col >= self.width || channel >= CHANNELS {
            return None;
        }
        self.samples
            .get((row * self.width + col) * CHANNELS + channel)
            .copied()
    }

    /// Samples in raster order.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;
        RgbImage::from_raw(width, height, self.samples.clone())
    }
}

fn sample_count(height: usize, width: usize) -> Option<usize> {
    height.checked_mul(width)?.checked_mul(CHANNELS)
}

impl TryFrom<RgbImage> for PixelGrid {
    type Error = StegoError;

    fn try_from(image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let too_large = || {
            StegoError::Format(format!("image of {width}x{height} pixels is too large"))
        };
        let height = usize::try_from(height).map_err(|_| too_large())?;
        let width = usize::try_from(width).map_err(|_| too_large())?;
        Self::from_samples(height, width, image.into_raw()).ok_or_else(too_large)
    }
}

/// Image file collaborator: path in, pixels out, and back.
pub trait ImageStore {
    /// # Errors
    /// - [`StegoError::ImageIo`] if the file is missing, unreadable, or in an unsupported format
    fn read(&self, path: &Path) -> Result<PixelGrid>;

    /// # Errors
    /// - [`StegoError::ImageIo`] if the file cannot be written
    fn write(&self, path: &Path, grid: &PixelGrid) -> Result<()>;
}

/// Reads any format the `image` crate understands (converted to 8-bit RGB)
/// and writes the format implied by the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageStore;

impl ImageStore for FileImageStore {
    fn read(&self, path: &Path) -> Result<PixelGrid> {
        let image = image::open(path).map_err(|source| StegoError::ImageIo {
            path: path.to_path_buf(),
            source,
        })?;
        PixelGrid::try_from(image.to_rgb8())
    }

    fn write(&self, path: &Path, grid: &PixelGrid) -> Result<()> {
        if is_lossy(path) {
            warn!(
                "⚠️  {} uses a lossy format; recompression will destroy the hidden bits",
                path.display()
            );
        }

        let image = grid.to_rgb_image().ok_or_else(|| StegoError::ImageIo {
            path: path.to_path_buf(),
            source: image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            )),
        })?;

        image.save(path).map_err(|source| StegoError::ImageIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_lossy(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}
