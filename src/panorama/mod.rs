//! Equirectangular panorama generation from a cubemap source.

mod project;

pub use project::{
    project, project_cross_image, project_with_progress, ProjectError, ProjectOptions,
};
