use crate::config::AuthoringSettings;
use crate::error::AppError;
use crate::pipeline::services::export::{
    AuthoringBackend, AuthoringOutcome, BlenderLauncher, ProjectDocumentAuthor, SceneSetup,
    author_scene,
};
use crate::pipeline::services::orchestration::{ProcessingStep, RunContext};
use async_trait::async_trait;
use tracing::{error, info};

/// Processing step that hands the records to the configured 3D-authoring backend.
///
/// External tool failures are reported and recorded on the context; artifacts that were
/// already written stay in place and the run continues.
pub struct SceneAuthoringStep {
    settings: AuthoringSettings,
    setup: SceneSetup,
}

impl SceneAuthoringStep {
    pub fn new(settings: AuthoringSettings, setup: SceneSetup) -> Self {
        Self { settings, setup }
    }

    async fn author(&self, context: &RunContext) -> Result<Option<AuthoringOutcome>, AppError> {
        let records = context.handoff()?;
        let paths = &context.paths;
        match self.settings.backend {
            AuthoringBackend::Disabled => Ok(None),
            AuthoringBackend::Native => {
                let mut author =
                    ProjectDocumentAuthor::new(paths.stem(), self.setup.clone(), &self.settings);
                author_scene(
                    &mut author,
                    records,
                    &self.settings,
                    &paths.native_project(),
                    &paths.native_render(),
                )
                .map(Some)
            }
            AuthoringBackend::Blender => BlenderLauncher::new(&self.settings, self.setup.clone())
                .run(records, paths)
                .await
                .map(Some),
        }
    }
}

#[async_trait]
impl ProcessingStep for SceneAuthoringStep {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
        match self.author(context).await {
            Ok(Some(outcome)) => {
                info!(
                    "Scene authored: {} objects, {} checkpoints",
                    outcome.objects, outcome.checkpoints
                );
                context.add_artifact(outcome.project.clone());
                context.add_artifact(outcome.render.clone());
                context.authoring = Some(outcome);
                Ok(())
            }
            Ok(None) => {
                info!("Scene authoring disabled");
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                error!("Scene authoring failed, keeping the artifacts already written: {}", e);
                context.authoring_error = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &'static str {
        "SceneAuthoringStep"
    }
}
