//! Cubemap stitching and equirectangular panorama conversion.
//!
//! This crate stitches six square face images (right, left, up, down,
//! front, back) into a single cross-layout cubemap and resamples the
//! cube faces along spherical coordinates into an equirectangular
//! panorama, using nearest-neighbor sampling.

pub mod cubemap;
pub mod geometry;
pub mod io;
pub mod panorama;
pub mod pipeline;

pub use cubemap::{compose, Composite, CubeSource, FaceSet};
pub use geometry::Face;
pub use panorama::{project, project_with_progress, ProjectOptions};
pub use pipeline::{ConversionJob, Pipeline, ProjectStage, StitchStage};
