//! Pipeline module for orchestrating the conversion stages.
//!
//! Provides a trait-based architecture for the stitch and projection
//! steps so they can be composed, reordered behind dependency checks,
//! and reported on through callbacks.

mod stage;

pub use stage::{
    ConversionJob, ConversionStage, Pipeline, PipelineError, ProjectStage, StageId, StitchStage,
};
