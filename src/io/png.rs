//! PNG decode and encode helpers.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, RgbaImage};
use thiserror::Error;

/// Errors that can occur while reading or writing image files.
#[derive(Error, Debug)]
pub enum PngError {
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for PNG encoding.
#[derive(Debug, Clone)]
pub struct PngSaveOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngSaveOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Decodes an image file into an RGBA buffer.
///
/// Non-RGBA sources (grayscale, RGB, palette) are promoted to RGBA with
/// fully opaque alpha.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, PngError> {
    let img = image::open(path).map_err(|source| PngError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Encodes an RGBA buffer to a PNG file.
pub fn save_rgba(image: &RgbaImage, path: &Path, options: &PngSaveOptions) -> Result<(), PngError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|source| PngError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}
