use crate::error::AppError;
use crate::pipeline::services::image::ColorExtractor;
use crate::pipeline::services::orchestration::{ProcessingStep, RunContext};
use async_trait::async_trait;

/// Processing step that reads the source image and enumerates its colors
pub struct ColorExtractionStep {
    extractor: ColorExtractor,
}

impl ColorExtractionStep {
    pub fn new(extractor: ColorExtractor) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl ProcessingStep for ColorExtractionStep {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
        let occurrences = self.extractor.extract(&context.source)?;
        context.occurrences = Some(occurrences);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ColorExtractionStep"
    }
}
