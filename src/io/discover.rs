//! Face file discovery.
//!
//! Locates the six face images in a directory by their shared filename
//! prefix and the standard per-face suffixes (`_right.png`,
//! `_left.png`, ...). The prefix is auto-detected; ambiguous or
//! incomplete sets are errors, never silent skips.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::Face;

/// Errors that can occur during face discovery.
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("no files ending in a face suffix (_right.png, _left.png, ...) found in {}", .0.display())]
    NoFacesFound(PathBuf),
    #[error("missing cubemap face: {}", .0.display())]
    MissingFace(PathBuf),
    #[error("ambiguous face prefixes in directory: {0:?} and {1:?}")]
    AmbiguousPrefix(String, String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Paths of the six face files for one detected prefix.
#[derive(Debug, Clone)]
pub struct FacePaths {
    /// Shared filename prefix (without suffix or extension).
    pub prefix: String,
    paths: [PathBuf; 6],
}

impl FacePaths {
    /// Returns the file path for a specific face.
    pub fn path(&self, face: Face) -> &Path {
        &self.paths[face.index()]
    }
}

/// Scans `dir` for a complete set of face files.
///
/// The prefix is taken from the PNG files matching any face suffix; all
/// six `<prefix><suffix>.png` files must then exist.
pub fn discover_faces(dir: &Path) -> Result<FacePaths, DiscoverError> {
    if !dir.is_dir() {
        return Err(DiscoverError::NotADirectory(dir.to_path_buf()));
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".png"))
        .collect();
    // Directory iteration order is platform-dependent.
    names.sort();

    let mut prefix: Option<String> = None;
    for name in &names {
        for face in Face::all() {
            let suffix = format!("{}.png", face.suffix());
            if let Some(stripped) = name.strip_suffix(&suffix) {
                match &prefix {
                    None => prefix = Some(stripped.to_string()),
                    Some(p) if p != stripped => {
                        return Err(DiscoverError::AmbiguousPrefix(
                            p.clone(),
                            stripped.to_string(),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }
    }

    let prefix = prefix.ok_or_else(|| DiscoverError::NoFacesFound(dir.to_path_buf()))?;

    let paths = Face::all().map(|face| dir.join(format!("{}{}.png", prefix, face.suffix())));
    for path in &paths {
        if !path.exists() {
            return Err(DiscoverError::MissingFace(path.clone()));
        }
    }

    Ok(FacePaths { prefix, paths })
}
