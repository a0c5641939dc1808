// ABOUTME: Image content limits enforced before upload
// ABOUTME: Reads image headers only when a dimension-based limit is requested

use crate::error::{ClipdropError, Measure};
use crate::Result;
use image::ImageReader;
use std::io::Cursor;

const PIXELS_PER_MEGAPIXEL: f64 = 1_000_000.0;
const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

/// Optional ceilings for an input image. Unset fields are not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageLimits {
    pub max_megapixels: Option<f64>,
    pub max_megabytes: Option<f64>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl ImageLimits {
    pub const fn new() -> Self {
        Self {
            max_megapixels: None,
            max_megabytes: None,
            max_width: None,
            max_height: None,
        }
    }

    pub const fn max_megapixels(mut self, megapixels: f64) -> Self {
        self.max_megapixels = Some(megapixels);
        self
    }

    pub const fn max_megabytes(mut self, megabytes: f64) -> Self {
        self.max_megabytes = Some(megabytes);
        self
    }

    pub const fn max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub const fn max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.needs_dimensions() && self.max_megabytes.is_none()
    }

    fn needs_dimensions(&self) -> bool {
        self.max_megapixels.is_some() || self.max_width.is_some() || self.max_height.is_some()
    }
}

/// Checks `bytes` against every limit that is set.
///
/// Nothing is decoded when `limits` is empty or only carries a size limit.
pub fn validate_image(bytes: &[u8], limits: &ImageLimits) -> Result<()> {
    if limits.is_empty() {
        return Ok(());
    }

    if limits.needs_dimensions() {
        let (width, height) = image_dimensions(bytes)?;
        log::debug!("Decoded image header: {width}x{height}");
        check_dimensions(width, height, limits)?;
    }

    check_size(bytes.len(), limits)
}

/// Reads width and height from the image header without decoding pixels.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ClipdropError::DecodeFailed(e.to_string()))?;

    if reader.format().is_none() {
        return Err(ClipdropError::DecodeFailed(
            "unrecognized image format".to_string(),
        ));
    }

    reader
        .into_dimensions()
        .map_err(|e| ClipdropError::DecodeFailed(e.to_string()))
}

pub fn check_dimensions(width: u32, height: u32, limits: &ImageLimits) -> Result<()> {
    if let Some(limit) = limits.max_megapixels {
        let megapixels = f64::from(width) * f64::from(height) / PIXELS_PER_MEGAPIXEL;
        if megapixels > limit {
            return Err(ClipdropError::ResolutionExceeded {
                measure: Measure::Megapixels,
                limit,
                actual: megapixels,
            });
        }
    }

    if let Some(limit) = limits.max_width {
        if width > limit {
            return Err(ClipdropError::ResolutionExceeded {
                measure: Measure::Width,
                limit: f64::from(limit),
                actual: f64::from(width),
            });
        }
    }

    if let Some(limit) = limits.max_height {
        if height > limit {
            return Err(ClipdropError::ResolutionExceeded {
                measure: Measure::Height,
                limit: f64::from(limit),
                actual: f64::from(height),
            });
        }
    }

    Ok(())
}

pub fn check_size(byte_len: usize, limits: &ImageLimits) -> Result<()> {
    let Some(limit) = limits.max_megabytes else {
        return Ok(());
    };

    let megabytes = byte_len as f64 / BYTES_PER_MEGABYTE;
    if megabytes > limit {
        return Err(ClipdropError::SizeExceeded {
            limit,
            actual: megabytes,
        });
    }

    Ok(())
}
