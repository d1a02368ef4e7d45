use crate::error::AppError;
use crate::pipeline::services::export::WebSceneExporter;
use crate::pipeline::services::orchestration::{ProcessingStep, RunContext};
use async_trait::async_trait;

/// Processing step that renders the reloaded records into an HTML scene
pub struct WebSceneStep {
    exporter: WebSceneExporter,
}

impl WebSceneStep {
    pub fn new(exporter: WebSceneExporter) -> Self {
        Self { exporter }
    }
}

#[async_trait]
impl ProcessingStep for WebSceneStep {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
        let path = context.paths.web_page();
        self.exporter
            .export(&context.paths.stem(), context.handoff()?, &path)?;
        context.add_artifact(path);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "WebSceneStep"
    }
}
