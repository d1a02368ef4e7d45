pub mod pipeline_factory;

pub use pipeline_factory::PipelineFactory;
