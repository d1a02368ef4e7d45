use super::run_context::RunContext;
use crate::error::AppError;
use async_trait::async_trait;

/// Chain of Responsibility pattern for processing pipeline
#[async_trait]
pub trait ProcessingStep: Send + Sync {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError>;
    fn name(&self) -> &'static str;
}

/// A pipeline that processes an image through a chain of steps.
/// Each step completes before the next one starts.
#[derive(Default)]
pub struct ProcessingPipeline {
    steps: Vec<Box<dyn ProcessingStep>>,
}

impl ProcessingPipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add_step(mut self, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub async fn process(&mut self, mut context: RunContext) -> Result<RunContext, AppError> {
        for step in &mut self.steps {
            tracing::debug!("Processing step: {}", step.name());
            step.process(&mut context).await?;
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Append(&'static str);

    #[async_trait]
    impl ProcessingStep for Append {
        async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
            context.add_artifact(self.0);
            Ok(())
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    struct Fail;

    #[async_trait]
    impl ProcessingStep for Fail {
        async fn process(&mut self, _context: &mut RunContext) -> Result<(), AppError> {
            Err(AppError::Pipeline("boom".to_string()))
        }

        fn name(&self) -> &'static str {
            "fail"
        }
    }

    #[tokio::test]
    async fn steps_run_in_order() {
        let mut pipeline = ProcessingPipeline::new()
            .add_step(Box::new(Append("first")))
            .add_step(Box::new(Append("second")));
        let context = pipeline.process(RunContext::new("x.png", None)).await.unwrap();
        assert_eq!(
            context.artifacts,
            vec![PathBuf::from("first"), PathBuf::from("second")]
        );
    }

    #[tokio::test]
    async fn failure_stops_the_chain() {
        let mut pipeline = ProcessingPipeline::new()
            .add_step(Box::new(Fail))
            .add_step(Box::new(Append("never")));
        assert!(pipeline.process(RunContext::new("x.png", None)).await.is_err());
    }
}
