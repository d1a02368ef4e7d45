pub mod services;
pub mod types;

pub use services::{PipelineFactory, ProcessingPipeline, RunContext};
pub use types::{Color, ColorHistogram, LabPoint, OutputPaths, PlacementRecord};
