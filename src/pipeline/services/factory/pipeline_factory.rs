use crate::config::Settings;
use crate::error::AppError;
use crate::pipeline::services::{
    color::LabConverter,
    export::{AuthoringBackend, SceneSetup, WebSceneExporter},
    image::{BarcodeWriter, ColorExtractor},
    orchestration::{ProcessingPipeline, StepInstrumentation},
    projection::ItemProjector,
    steps::{
        BarcodeStep, ColorExtractionStep, JournalStep, ProjectionStep, SceneAuthoringStep,
        WebSceneStep,
    },
};

/// Factory for creating configured pipeline instances
pub struct PipelineFactory;

impl PipelineFactory {
    /// Create the full extraction → projection → journal → export pipeline
    pub fn create_pipeline(settings: &Settings) -> Result<ProcessingPipeline, AppError> {
        settings.validate().map_err(AppError::InvalidConfig)?;

        let projection = &settings.projection;
        let converter = LabConverter::new(projection.lab_space, projection.reference_white);

        let mut pipeline = ProcessingPipeline::new()
            .add_step(Box::new(
                ColorExtractionStep::new(ColorExtractor::from_settings(&settings.extraction))
                    .instrumented("extract_colors"),
            ))
            .add_step(Box::new(
                ProjectionStep::new(ItemProjector::from_settings(projection))
                    .instrumented("project_items"),
            ))
            .add_step(Box::new(
                JournalStep::new(converter).instrumented("journal_colors"),
            ));

        if settings.output.barcode {
            pipeline = pipeline.add_step(Box::new(
                BarcodeStep::new(BarcodeWriter::new(settings.output.barcode_max_height))
                    .instrumented("write_barcode"),
            ));
        }

        if settings.web.enabled {
            let exporter = WebSceneExporter::from_template_path(settings.web.template_path.as_deref())?;
            pipeline = pipeline.add_step(Box::new(
                WebSceneStep::new(exporter).instrumented("export_web_scene"),
            ));
        }

        if settings.authoring.backend != AuthoringBackend::Disabled {
            pipeline = pipeline.add_step(Box::new(
                SceneAuthoringStep::new(settings.authoring.clone(), SceneSetup::default())
                    .instrumented("author_scene"),
            ));
        }

        Ok(pipeline)
    }
}
