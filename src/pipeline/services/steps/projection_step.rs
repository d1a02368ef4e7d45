use crate::error::AppError;
use crate::pipeline::services::orchestration::{ProcessingStep, RunContext};
use crate::pipeline::services::projection::ItemProjector;
use async_trait::async_trait;
use tracing::info;

/// Processing step that counts colors and builds the placement records
pub struct ProjectionStep {
    projector: ItemProjector,
}

impl ProjectionStep {
    pub fn new(projector: ItemProjector) -> Self {
        Self { projector }
    }
}

#[async_trait]
impl ProcessingStep for ProjectionStep {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
        info!("setting radius of individual points...");
        let (histogram, records) = self.projector.project(context.occurrences()?);
        info!(
            "{} placement records from {} occurrences",
            records.len(),
            histogram.total()
        );

        context.histogram = Some(histogram);
        context.records = Some(records);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ProjectionStep"
    }
}
