use super::processing_step::ProcessingStep;
use super::run_context::RunContext;
use crate::error::AppError;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Wraps a step so that its wall-clock time lands in [`RunContext::timings`]
/// and the artifacts it produced are reported once it finishes.
pub struct InstrumentedStep<S> {
    inner: S,
    label: String,
}

impl<S> InstrumentedStep<S> {
    pub fn new(step: S, label: impl Into<String>) -> Self {
        Self {
            inner: step,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[async_trait]
impl<S> ProcessingStep for InstrumentedStep<S>
where
    S: ProcessingStep,
{
    #[instrument(skip(self, context), fields(step = %self.label))]
    async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
        let artifacts_before = context.artifacts.len();
        let start = Instant::now();

        let result = self.inner.process(context).await;

        let elapsed = start.elapsed();
        context.timings.record(self.label.clone(), elapsed);

        match &result {
            Ok(()) => {
                for artifact in &context.artifacts[artifacts_before..] {
                    debug!("{} wrote {}", self.label, artifact.display());
                }
                debug!("{} finished in {}us", self.label, elapsed.as_micros());
            }
            Err(e) => error!("{} failed after {}us: {}", self.label, elapsed.as_micros(), e),
        }

        result
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// `step.instrumented("label")` instead of `InstrumentedStep::new(step, "label")`.
pub trait StepInstrumentation: Sized {
    fn instrumented(self, label: impl Into<String>) -> InstrumentedStep<Self>;
}

impl<S> StepInstrumentation for S
where
    S: ProcessingStep,
{
    fn instrumented(self, label: impl Into<String>) -> InstrumentedStep<Self> {
        InstrumentedStep::new(self, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Touch;

    #[async_trait]
    impl ProcessingStep for Touch {
        async fn process(&mut self, context: &mut RunContext) -> Result<(), AppError> {
            context.add_artifact("touched");
            Ok(())
        }

        fn name(&self) -> &'static str {
            "Touch"
        }
    }

    #[tokio::test]
    async fn records_timing_under_its_label() {
        let mut step = Touch.instrumented("touch");
        let mut context = RunContext::new("image.png", None);
        step.process(&mut context).await.unwrap();

        assert_eq!(step.name(), "Touch");
        assert_eq!(step.label(), "touch");
        assert!(context.timings.get("touch").is_some());
        assert_eq!(context.artifacts.len(), 1);
    }
}
