use crate::error::AppError;
use crate::pipeline::services::image::BarcodeWriter;
use crate::pipeline::services::orchestration::{ProcessingStep, RunContext};
use async_trait::async_trait;

/// Processing step that saves the occurrence sequence as a barcode image
pub struct BarcodeStep {
    writer: BarcodeWriter,
}

impl BarcodeStep {
    pub fn new(writer: BarcodeWriter) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl ProcessingStep for BarcodeStep {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
        let path = context.paths.barcode();
        if self.writer.write(context.occurrences()?, &path)? {
            context.add_artifact(path);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "BarcodeStep"
    }
}
