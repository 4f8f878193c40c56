//! Cross-layout compositing of six faces into one canvas.

use image::RgbaImage;
use thiserror::Error;

use super::face_set::FaceSet;
use crate::geometry::Face;

/// Tile placement of each face in the 4x3 cross layout, indexed by
/// `Face::index()` as (column, row):
///
/// ```text
/// [  ][ U][  ][  ]
/// [ L][ F][ R][ B]
/// [  ][ D][  ][  ]
/// ```
pub const CROSS_LAYOUT: [(u32, u32); 6] = [
    (2, 1), // right
    (0, 1), // left
    (1, 0), // up
    (1, 2), // down
    (1, 1), // front
    (3, 1), // back
];

/// Pixel offset of a face's tile for the given face size.
pub const fn tile_origin(face: Face, face_size: u32) -> (u32, u32) {
    let (col, row) = CROSS_LAYOUT[face.index()];
    (col * face_size, row * face_size)
}

/// Errors raised while interpreting an image as a cross-layout composite.
#[derive(Error, Debug)]
pub enum CompositeError {
    #[error("invalid composite layout: {width}x{height} is not a 4x3 grid of square tiles")]
    InvalidLayout { width: u32, height: u32 },
}

/// A cubemap laid out as a single 4x3 cross image.
///
/// The six unused grid cells are fully transparent. Read-only once
/// built.
#[derive(Debug, Clone)]
pub struct Composite {
    image: RgbaImage,
    face_size: u32,
}

impl Composite {
    /// Wraps an existing cross-layout image, validating its geometry.
    ///
    /// The width must be a positive multiple of 4 and the height exactly
    /// three tiles, otherwise the face size is ill-defined.
    pub fn from_image(image: RgbaImage) -> Result<Composite, CompositeError> {
        let (width, height) = image.dimensions();
        let face_size = width / 4;
        if face_size == 0 || width % 4 != 0 || height != face_size * 3 {
            return Err(CompositeError::InvalidLayout { width, height });
        }
        Ok(Composite { image, face_size })
    }

    /// Side length of each face tile in pixels.
    pub fn face_size(&self) -> u32 {
        self.face_size
    }

    /// Returns the underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the composite, returning the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Assembles the six faces into a cross-layout composite.
///
/// Allocates a transparent `4s x 3s` canvas and blits each face
/// verbatim at its `CROSS_LAYOUT` offset. The face set is already
/// validated, so this cannot fail.
pub fn compose(faces: &FaceSet) -> Composite {
    let s = faces.face_size();
    // Zero-initialized RGBA is transparent black.
    let mut canvas = RgbaImage::new(s * 4, s * 3);

    for face in Face::all() {
        let (ox, oy) = tile_origin(face, s);
        blit(faces.face(face), &mut canvas, ox, oy);
    }

    Composite {
        image: canvas,
        face_size: s,
    }
}

/// Copies `src` into `dst` at `(ox, oy)`, row by row.
fn blit(src: &RgbaImage, dst: &mut RgbaImage, ox: u32, oy: u32) {
    let src_row = (src.width() * 4) as usize;
    let dst_stride = (dst.width() * 4) as usize;
    let rows = src.height() as usize;
    let src_raw = src.as_raw();
    let dst_raw: &mut [u8] = dst;

    for y in 0..rows {
        let s = y * src_row;
        let d = (oy as usize + y) * dst_stride + ox as usize * 4;
        dst_raw[d..d + src_row].copy_from_slice(&src_raw[s..s + src_row]);
    }
}
