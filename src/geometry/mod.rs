//! Cube-face geometry module.
//!
//! Face identification and the spherical-to-cube-face mapping used by
//! the panorama projector.

mod face;
mod projection;

pub use face::Face;
pub use projection::{dir_to_face_pixel, face_for_dir, face_uv, spherical_to_dir, uv_to_pixel};
