//! Image file I/O: face discovery, PNG decode/encode.

mod discover;
mod png;

pub use discover::{discover_faces, DiscoverError, FacePaths};
pub use png::{load_rgba, save_rgba, PngError, PngSaveOptions};

use thiserror::Error;

use crate::cubemap::{FaceSet, FaceSetError};
use crate::geometry::Face;

/// Errors that can occur while loading a face set from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Png(#[from] PngError),
    #[error(transparent)]
    Faces(#[from] FaceSetError),
}

/// Loads the six discovered face files into a validated [`FaceSet`].
pub fn load_face_set(paths: &FacePaths) -> Result<FaceSet, LoadError> {
    let mut entries = Vec::with_capacity(6);
    for face in Face::all() {
        entries.push((face, load_rgba(paths.path(face))?));
    }
    Ok(FaceSet::from_entries(entries)?)
}
