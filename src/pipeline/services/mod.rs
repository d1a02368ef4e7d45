pub mod color;
pub mod export;
pub mod image;
pub mod journal;
pub mod projection;

pub mod factory;
pub mod orchestration;
pub mod steps;

pub use factory::PipelineFactory;
pub use orchestration::{ProcessingPipeline, RunContext};
