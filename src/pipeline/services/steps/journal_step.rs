use crate::error::AppError;
use crate::pipeline::services::color::LabConverter;
use crate::pipeline::services::journal::{ColorJournal, load_placements};
use crate::pipeline::services::orchestration::{ProcessingStep, RunContext};
use async_trait::async_trait;

/// Processing step that persists the color logs and dumps, then reloads the placement
/// dump as the hand-off for the renderers
pub struct JournalStep {
    converter: LabConverter,
}

impl JournalStep {
    pub fn new(converter: LabConverter) -> Self {
        Self { converter }
    }
}

#[async_trait]
impl ProcessingStep for JournalStep {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
        let written = ColorJournal::new(&context.paths, self.converter).write_all(
            context.occurrences()?,
            context.histogram()?,
            context.records()?,
        )?;
        context.artifacts.extend(written);

        context.handoff = Some(load_placements(&context.paths.placements_dump())?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "JournalStep"
    }
}
