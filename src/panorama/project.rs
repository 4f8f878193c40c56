//! Cubemap-to-equirectangular projection.
//!
//! For every output pixel the projector computes a view direction from
//! spherical angles, selects the pierced cube face by axis dominance and
//! nearest-neighbor samples the source texel. Output rows are rendered
//! in parallel; each worker owns a disjoint row range, so the result is
//! identical regardless of scheduling.

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::atomic::{AtomicU32, Ordering};

use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cubemap::{Composite, CompositeError, CubeSource};
use crate::geometry::{dir_to_face_pixel, spherical_to_dir};

/// Errors that can occur during projection.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("invalid panorama dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
    #[error(transparent)]
    Layout(#[from] CompositeError),
}

/// Options for panorama projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectOptions {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels. `None` derives `width / 2` for the full
    /// sphere, or `width / 4` in hemisphere mode.
    pub height: Option<u32>,
    /// Restrict output to the upper hemisphere (sky only).
    pub hemisphere: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            width: 4096,
            height: None,
            hemisphere: false,
        }
    }
}

impl ProjectOptions {
    /// Resolves the effective output dimensions.
    pub fn resolve_dims(&self) -> Result<(u32, u32), ProjectError> {
        let height = self.height.unwrap_or(if self.hemisphere {
            self.width / 4
        } else {
            self.width / 2
        });
        if self.width == 0 || height == 0 {
            return Err(ProjectError::InvalidDimensions(self.width, height));
        }
        Ok((self.width, height))
    }
}

/// Output rows rendered per progress tick.
const ROW_BATCH: usize = 64;

/// Projects a cube source into an equirectangular panorama.
pub fn project<S: CubeSource>(source: &S, options: &ProjectOptions) -> Result<RgbaImage, ProjectError> {
    project_with_progress(source, options, |_, _| {})
}

/// Projects with a progress callback.
///
/// The callback receives `(rows_done, rows_total)` at row-batch
/// granularity. It runs on worker threads, carries no pixel state and
/// has no effect on the computed output.
pub fn project_with_progress<S, F>(
    source: &S,
    options: &ProjectOptions,
    progress: F,
) -> Result<RgbaImage, ProjectError>
where
    S: CubeSource,
    F: Fn(u32, u32) + Sync,
{
    let (width, height) = options.resolve_dims()?;
    let hemisphere = options.hemisphere;
    let row_bytes = width as usize * 4;

    let mut pano = RgbaImage::new(width, height);
    let rows_done = AtomicU32::new(0);

    let raw: &mut [u8] = &mut pano;
    raw.par_chunks_mut(row_bytes * ROW_BATCH)
        .enumerate()
        .for_each(|(batch, rows)| {
            let y0 = (batch * ROW_BATCH) as u32;
            for (i, row) in rows.chunks_exact_mut(row_bytes).enumerate() {
                render_row(source, row, y0 + i as u32, width, height, hemisphere);
            }

            let batch_rows = (rows.len() / row_bytes) as u32;
            let done = rows_done.fetch_add(batch_rows, Ordering::Relaxed) + batch_rows;
            progress(done, height);
        });

    Ok(pano)
}

/// Projects a cross-layout composite supplied as a plain RGBA image,
/// validating its 4x3 geometry first.
pub fn project_cross_image(
    image: RgbaImage,
    options: &ProjectOptions,
) -> Result<RgbaImage, ProjectError> {
    let composite = Composite::from_image(image)?;
    project(&composite, options)
}

/// Renders one output row. The latitude is constant across the row; the
/// longitude advances per pixel.
fn render_row<S: CubeSource>(
    source: &S,
    row: &mut [u8],
    y: u32,
    width: u32,
    height: u32,
    hemisphere: bool,
) {
    let face_size = source.face_size();

    let phi = if hemisphere {
        // y = 0 is the zenith, y = height approaches the horizon; the
        // lower half of the sphere is never sampled.
        FRAC_PI_2 * (1.0 - y as f32 / height as f32)
    } else {
        // y = 0 maps to the top pole, y = height - 1 approaches the
        // bottom pole.
        FRAC_PI_2 - (y as f32 / height as f32) * PI
    };

    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let theta = (x as f32 / width as f32) * 2.0 * PI;
        let dir = spherical_to_dir(theta, phi);
        let (face, fx, fy) = dir_to_face_pixel(dir, face_size);
        px.copy_from_slice(&source.texel(face, fx, fy).0);
    }
}
