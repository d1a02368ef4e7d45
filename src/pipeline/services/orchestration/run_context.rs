use super::step_timings::StepTimings;
use crate::error::AppError;
use crate::pipeline::services::export::AuthoringOutcome;
use crate::pipeline::types::{Color, ColorHistogram, OutputPaths, PlacementRecord};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Context object that flows through the processing pipeline
/// Contains all the state produced while processing a single image
pub struct RunContext {
    pub source: PathBuf,
    pub paths: OutputPaths,
    pub occurrences: Option<Vec<Color>>,
    pub histogram: Option<ColorHistogram>,
    pub records: Option<Vec<PlacementRecord>>,
    /// Records as reloaded from the placement dump; what the renderers consume.
    pub handoff: Option<Vec<PlacementRecord>>,
    pub artifacts: Vec<PathBuf>,
    pub authoring: Option<AuthoringOutcome>,
    pub authoring_error: Option<String>,
    pub timings: StepTimings,
    pub processing_start: Instant,
}

impl RunContext {
    pub fn new(source: impl Into<PathBuf>, output_dir: Option<&Path>) -> Self {
        let source = source.into();
        let paths = OutputPaths::for_input(&source, output_dir);
        Self {
            source,
            paths,
            occurrences: None,
            histogram: None,
            records: None,
            handoff: None,
            artifacts: Vec::new(),
            authoring: None,
            authoring_error: None,
            timings: StepTimings::new(),
            processing_start: Instant::now(),
        }
    }

    pub fn occurrences(&self) -> Result<&[Color], AppError> {
        self.occurrences
            .as_deref()
            .ok_or_else(|| missing("color occurrences"))
    }

    pub fn histogram(&self) -> Result<&ColorHistogram, AppError> {
        self.histogram.as_ref().ok_or_else(|| missing("color histogram"))
    }

    pub fn records(&self) -> Result<&[PlacementRecord], AppError> {
        self.records.as_deref().ok_or_else(|| missing("placement records"))
    }

    pub fn handoff(&self) -> Result<&[PlacementRecord], AppError> {
        self.handoff
            .as_deref()
            .ok_or_else(|| missing("reloaded placement records"))
    }

    pub fn add_artifact(&mut self, path: impl Into<PathBuf>) {
        self.artifacts.push(path.into());
    }
}

fn missing(what: &str) -> AppError {
    AppError::Pipeline(format!("{what} not available; a previous step did not run"))
}
