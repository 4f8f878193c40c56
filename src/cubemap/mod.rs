//! Cubemap data structures.
//!
//! A validated set of six face images, the 4x3 cross-layout composite
//! assembled from them, and the sampling trait both expose to the
//! panorama projector.

mod composite;
mod face_set;

pub use composite::{compose, tile_origin, Composite, CompositeError, CROSS_LAYOUT};
pub use face_set::{FaceSet, FaceSetError};

use image::Rgba;

use crate::geometry::Face;

/// Read-only nearest-neighbor access to cubemap texels.
///
/// Implemented by both [`Composite`] (texels behind cross-layout
/// offsets) and [`FaceSet`] (texels fetched from the face buffers
/// directly), so the projector can consume either. Sources are shared
/// read-only across worker threads.
pub trait CubeSource: Sync {
    /// Side length of each face in pixels.
    fn face_size(&self) -> u32;

    /// Fetches the texel at `(x, y)` on `face`.
    ///
    /// Coordinates must be in `[0, face_size)`.
    fn texel(&self, face: Face, x: u32, y: u32) -> Rgba<u8>;
}

impl CubeSource for Composite {
    fn face_size(&self) -> u32 {
        self.face_size()
    }

    fn texel(&self, face: Face, x: u32, y: u32) -> Rgba<u8> {
        let (ox, oy) = tile_origin(face, self.face_size());
        *self.image().get_pixel(ox + x, oy + y)
    }
}

impl CubeSource for FaceSet {
    fn face_size(&self) -> u32 {
        self.face_size()
    }

    fn texel(&self, face: Face, x: u32, y: u32) -> Rgba<u8> {
        *self.face(face).get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_composite_and_face_set_sample_identically() {
        let entries = Face::all().map(|f| {
            (
                f,
                RgbaImage::from_pixel(4, 4, Rgba([f.index() as u8 * 30, 7, 9, 255])),
            )
        });
        let faces = FaceSet::from_entries(entries).unwrap();
        let composite = compose(&faces);

        for face in Face::all() {
            for y in 0..4 {
                for x in 0..4 {
                    assert_eq!(faces.texel(face, x, y), composite.texel(face, x, y));
                }
            }
        }
    }
}
