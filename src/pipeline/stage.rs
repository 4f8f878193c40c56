//! Conversion stage trait and pipeline orchestration.

use std::path::PathBuf;

use thiserror::Error;

use crate::cubemap::{compose, Composite};
use crate::io::{discover_faces, load_face_set, save_rgba, PngSaveOptions};
use crate::panorama::{project, project_with_progress, ProjectOptions};

/// Unique identifier for conversion stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Discover, load, validate and composite the six faces.
    Stitch,
    /// Resample the composite into an equirectangular panorama.
    Project,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Stitch => "stitch",
            StageId::Project => "project",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// Mutable state threaded through the conversion stages.
#[derive(Debug)]
pub struct ConversionJob {
    /// Directory containing the six face images.
    pub input_dir: PathBuf,
    /// Directory receiving the composite and panorama files.
    pub output_dir: PathBuf,
    /// Face filename prefix detected by the stitch stage.
    pub prefix: Option<String>,
    /// Cross-layout composite assembled by the stitch stage.
    pub composite: Option<Composite>,
    /// Files written so far, in write order.
    pub written: Vec<PathBuf>,
}

impl ConversionJob {
    /// Creates a job reading faces from `input_dir` and writing results
    /// to `output_dir`.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            prefix: None,
            composite: None,
            written: Vec::new(),
        }
    }
}

/// Trait for implementing conversion stages.
///
/// Each stage transforms the job state in some way, building upon
/// previous stages. The trait-based design keeps the two conversion
/// steps composable and individually testable.
pub trait ConversionStage {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage, modifying the job in place.
    fn execute(&self, job: &mut ConversionJob) -> Result<(), PipelineError>;
}

/// Orchestrates conversion stages into a complete run.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn ConversionStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: ConversionStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given job.
    pub fn run(&self, job: &mut ConversionJob) -> Result<(), PipelineError> {
        self.run_with_callbacks(job, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `job` - The conversion state
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        job: &mut ConversionJob,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            stage.execute(job)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Face discovery, loading, validation and compositing.
///
/// Writes `cubemap.png` into the job's output directory and records the
/// composite on the job for downstream stages.
pub struct StitchStage {
    pub save: PngSaveOptions,
}

impl StitchStage {
    pub fn new(save: PngSaveOptions) -> Self {
        Self { save }
    }
}

impl ConversionStage for StitchStage {
    fn id(&self) -> StageId {
        StageId::Stitch
    }

    fn name(&self) -> &str {
        "Cubemap Stitch"
    }

    fn execute(&self, job: &mut ConversionJob) -> Result<(), PipelineError> {
        let fail = |e: String| PipelineError::StageFailed("Cubemap Stitch".to_string(), e);

        let paths = discover_faces(&job.input_dir).map_err(|e| fail(e.to_string()))?;
        let faces = load_face_set(&paths).map_err(|e| fail(e.to_string()))?;
        let composite = compose(&faces);

        std::fs::create_dir_all(&job.output_dir).map_err(|e| fail(e.to_string()))?;
        let path = job.output_dir.join("cubemap.png");
        save_rgba(composite.image(), &path, &self.save).map_err(|e| fail(e.to_string()))?;

        job.prefix = Some(paths.prefix);
        job.composite = Some(composite);
        job.written.push(path);
        Ok(())
    }
}

/// Equirectangular projection of the stitched composite.
///
/// Writes `pano.png` (or `pano_hemisphere.png` in hemisphere mode) into
/// the job's output directory.
pub struct ProjectStage {
    pub options: ProjectOptions,
    pub save: PngSaveOptions,
    progress: Option<Box<dyn Fn(u32, u32) + Send + Sync>>,
}

impl ProjectStage {
    pub fn new(options: ProjectOptions, save: PngSaveOptions) -> Self {
        Self {
            options,
            save,
            progress: None,
        }
    }

    /// Registers a progress callback, forwarded to the projector at
    /// row-batch granularity as `(rows_done, rows_total)`.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u32, u32) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Output filename for the current options.
    pub fn filename(&self) -> &'static str {
        if self.options.hemisphere {
            "pano_hemisphere.png"
        } else {
            "pano.png"
        }
    }
}

impl ConversionStage for ProjectStage {
    fn id(&self) -> StageId {
        StageId::Project
    }

    fn name(&self) -> &str {
        "Panorama Projection"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Stitch]
    }

    fn execute(&self, job: &mut ConversionJob) -> Result<(), PipelineError> {
        let fail = |e: String| PipelineError::StageFailed("Panorama Projection".to_string(), e);

        let composite = job
            .composite
            .as_ref()
            .ok_or_else(|| fail("no composite available".to_string()))?;

        let pano = match &self.progress {
            Some(callback) => {
                project_with_progress(composite, &self.options, |done, total| {
                    callback(done, total)
                })
            }
            None => project(composite, &self.options),
        }
        .map_err(|e| fail(e.to_string()))?;

        std::fs::create_dir_all(&job.output_dir).map_err(|e| fail(e.to_string()))?;
        let path = job.output_dir.join(self.filename());
        save_rgba(&pano, &path, &self.save).map_err(|e| fail(e.to_string()))?;

        job.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_faces(dir: &std::path::Path, size: u32) {
        for face in Face::all() {
            let img = RgbaImage::from_pixel(size, size, Rgba([face.index() as u8 * 20, 5, 9, 255]));
            let path = dir.join(format!("test{}.png", face.suffix()));
            save_rgba(&img, &path, &PngSaveOptions::default()).unwrap();
        }
    }

    #[test]
    fn test_full_pipeline_writes_both_outputs() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        write_faces(input.path(), 8);

        let mut pipeline = Pipeline::new();
        pipeline.add_stage(StitchStage::new(PngSaveOptions::default()));
        pipeline.add_stage(ProjectStage::new(
            ProjectOptions {
                width: 64,
                ..Default::default()
            },
            PngSaveOptions::default(),
        ));
        assert_eq!(pipeline.stage_count(), 2);

        let mut job = ConversionJob::new(input.path().to_path_buf(), output.path().to_path_buf());
        pipeline.run(&mut job).unwrap();

        assert_eq!(job.prefix.as_deref(), Some("test"));
        assert_eq!(job.written.len(), 2);
        assert!(output.path().join("cubemap.png").exists());
        assert!(output.path().join("pano.png").exists());

        let composite = crate::io::load_rgba(&output.path().join("cubemap.png")).unwrap();
        assert_eq!(composite.dimensions(), (32, 24));
        let pano = crate::io::load_rgba(&output.path().join("pano.png")).unwrap();
        assert_eq!(pano.dimensions(), (64, 32));
    }

    #[test]
    fn test_hemisphere_output_name() {
        let stage = ProjectStage::new(
            ProjectOptions {
                width: 64,
                height: None,
                hemisphere: true,
            },
            PngSaveOptions::default(),
        );
        assert_eq!(stage.filename(), "pano_hemisphere.png");
    }

    #[test]
    fn test_project_requires_stitch() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        let mut pipeline = Pipeline::new();
        pipeline.add_stage(ProjectStage::new(
            ProjectOptions::default(),
            PngSaveOptions::default(),
        ));

        let mut job = ConversionJob::new(input.path().to_path_buf(), output.path().to_path_buf());
        let err = pipeline.run(&mut job).unwrap_err();
        assert!(matches!(err, PipelineError::MissingDependency(_, _)));
    }

    #[test]
    fn test_stitch_failure_reports_stage() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        // No face files at all.

        let mut pipeline = Pipeline::new();
        pipeline.add_stage(StitchStage::new(PngSaveOptions::default()));

        let mut job = ConversionJob::new(input.path().to_path_buf(), output.path().to_path_buf());
        let err = pipeline.run(&mut job).unwrap_err();
        match err {
            PipelineError::StageFailed(stage, message) => {
                assert_eq!(stage, "Cubemap Stitch");
                assert!(message.contains("face suffix"));
            }
            other => panic!("expected StageFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_pipeline_callbacks_fire_in_order() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        write_faces(input.path(), 4);

        let mut pipeline = Pipeline::new();
        pipeline.add_stage(StitchStage::new(PngSaveOptions::default()));

        let mut job = ConversionJob::new(input.path().to_path_buf(), output.path().to_path_buf());
        let mut starts = Vec::new();
        let mut completions = Vec::new();

        pipeline
            .run_with_callbacks(
                &mut job,
                |name, i, total| starts.push(format!("{} {}/{}", name, i + 1, total)),
                |name, i, total| completions.push(format!("{} {}/{}", name, i + 1, total)),
            )
            .unwrap();

        assert_eq!(starts, vec!["Cubemap Stitch 1/1"]);
        assert_eq!(completions, vec!["Cubemap Stitch 1/1"]);
    }
}
