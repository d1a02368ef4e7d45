use crate::{
    config::Settings,
    error::AppError,
    pipeline::{PipelineFactory, ProcessingPipeline, RunContext},
    pipeline::services::export::AuthoringBackend,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs one image through the configured pipeline.
pub struct Coordinator {
    settings: Settings,
    pipeline: ProcessingPipeline,
}

impl Coordinator {
    fn new(settings: Settings, pipeline: ProcessingPipeline) -> Self {
        Self { settings, pipeline }
    }

    pub async fn run(&mut self, image: &Path) -> Result<RunContext, AppError> {
        let output_dir = self.settings.output.output_dir.as_deref();
        if let Some(dir) = output_dir {
            std::fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;
        }

        let context = RunContext::new(image, output_dir);
        let context = self.pipeline.process(context).await?;

        info!(
            "Processed {} in {}ms, {} artifacts written",
            image.display(),
            context.processing_start.elapsed().as_millis(),
            context.artifacts.len()
        );
        for (step, duration) in context.timings.iter() {
            tracing::debug!("  {}: {}us", step, duration.as_micros());
        }
        Ok(context)
    }
}

pub struct CoordinatorBuilder {
    settings: Settings,
    pipeline: Option<ProcessingPipeline>,
}

impl CoordinatorBuilder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            pipeline: None,
        }
    }

    // Sets the output directory, this will override the configuration.
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.settings.output.output_dir = Some(output_dir.into());
        self
    }

    // Selects the authoring backend, this will override the configuration.
    pub fn authoring_backend(mut self, backend: AuthoringBackend) -> Self {
        self.settings.authoring.backend = backend;
        self
    }

    // Adjusts the checkpoint interval, this will override the configuration.
    pub fn checkpoint_interval(mut self, checkpoint_interval: usize) -> Self {
        self.settings.authoring.checkpoint_interval = checkpoint_interval;
        self
    }

    // Replaces the pipeline the factory would build from the settings.
    pub fn pipeline(mut self, pipeline: ProcessingPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn build(self) -> Result<Coordinator, AppError> {
        let pipeline = match self.pipeline {
            Some(pipeline) => pipeline,
            None => PipelineFactory::create_pipeline(&self.settings)?,
        };
        Ok(Coordinator::new(self.settings, pipeline))
    }
}
