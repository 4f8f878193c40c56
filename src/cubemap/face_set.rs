//! Validated six-face cubemap input.

use image::RgbaImage;
use thiserror::Error;

use crate::geometry::Face;

/// Errors raised while assembling a face set.
#[derive(Error, Debug)]
pub enum FaceSetError {
    #[error("missing cubemap face: {0:?}")]
    MissingFace(Face),
    #[error("face {face:?} is not square ({width}x{height})")]
    NonSquareFace { face: Face, width: u32, height: u32 },
    #[error("face {0:?} is empty (0x0)")]
    EmptyFace(Face),
    #[error("face size mismatch: {face:?} is {size}x{size}, expected {expected}x{expected}")]
    SizeMismatch { face: Face, size: u32, expected: u32 },
}

/// The six face images of a cubemap, validated to share one positive
/// square size.
#[derive(Debug, Clone)]
pub struct FaceSet {
    faces: [RgbaImage; 6],
    face_size: u32,
}

impl FaceSet {
    /// Builds a face set from `(Face, image)` entries.
    ///
    /// All six faces must be present (later entries replace earlier ones
    /// for the same face) and every image must be square with the same
    /// side length. Validation completes before any further pixel work;
    /// a failed build produces no partial state.
    pub fn from_entries<I>(entries: I) -> Result<FaceSet, FaceSetError>
    where
        I: IntoIterator<Item = (Face, RgbaImage)>,
    {
        let mut slots: [Option<RgbaImage>; 6] = Default::default();
        for (face, image) in entries {
            slots[face.index()] = Some(image);
        }

        let mut face_size = None;
        for face in Face::all() {
            let image = slots[face.index()]
                .as_ref()
                .ok_or(FaceSetError::MissingFace(face))?;
            let (width, height) = image.dimensions();

            if width != height {
                return Err(FaceSetError::NonSquareFace { face, width, height });
            }
            if width == 0 {
                return Err(FaceSetError::EmptyFace(face));
            }
            match face_size {
                None => face_size = Some(width),
                Some(expected) if width != expected => {
                    return Err(FaceSetError::SizeMismatch {
                        face,
                        size: width,
                        expected,
                    });
                }
                Some(_) => {}
            }
        }

        // All six slots are proven occupied above.
        let faces = slots.map(|slot| slot.unwrap());
        Ok(FaceSet {
            faces,
            face_size: face_size.unwrap(),
        })
    }

    /// Side length of each face in pixels.
    pub fn face_size(&self) -> u32 {
        self.face_size
    }

    /// Returns the image for a specific face.
    pub fn face(&self, face: Face) -> &RgbaImage {
        &self.faces[face.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(size: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(size, size, image::Rgba(rgba))
    }

    fn full_set(size: u32) -> Vec<(Face, RgbaImage)> {
        Face::all()
            .iter()
            .map(|&f| (f, solid(size, [f.index() as u8, 0, 0, 255])))
            .collect()
    }

    #[test]
    fn test_valid_set() {
        let set = FaceSet::from_entries(full_set(16)).unwrap();
        assert_eq!(set.face_size(), 16);
        assert_eq!(set.face(Face::Back).get_pixel(0, 0).0[0], 5);
    }

    #[test]
    fn test_missing_face() {
        let entries = full_set(16)
            .into_iter()
            .filter(|(f, _)| *f != Face::Down);
        let err = FaceSet::from_entries(entries).unwrap_err();
        assert!(matches!(err, FaceSetError::MissingFace(Face::Down)));
    }

    #[test]
    fn test_non_square_face() {
        let mut entries = full_set(16);
        entries[Face::Left.index()].1 = RgbaImage::new(16, 8);
        let err = FaceSet::from_entries(entries).unwrap_err();
        assert!(matches!(
            err,
            FaceSetError::NonSquareFace {
                face: Face::Left,
                width: 16,
                height: 8
            }
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let mut entries = full_set(16);
        entries[Face::Front.index()].1 = solid(32, [0, 0, 0, 255]);
        let err = FaceSet::from_entries(entries).unwrap_err();
        assert!(matches!(
            err,
            FaceSetError::SizeMismatch {
                face: Face::Front,
                size: 32,
                expected: 16
            }
        ));
    }

    #[test]
    fn test_empty_face() {
        let entries = Face::all().map(|f| (f, RgbaImage::new(0, 0)));
        let err = FaceSet::from_entries(entries).unwrap_err();
        assert!(matches!(err, FaceSetError::EmptyFace(Face::Right)));
    }
}
