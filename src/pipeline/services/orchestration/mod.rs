pub mod instrumented_step;
pub mod processing_step;
pub mod run_context;
pub mod step_timings;

pub use instrumented_step::{InstrumentedStep, StepInstrumentation};
pub use processing_step::{ProcessingPipeline, ProcessingStep};
pub use run_context::RunContext;
pub use step_timings::StepTimings;
