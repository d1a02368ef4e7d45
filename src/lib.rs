pub mod config;
pub mod coordinator;
pub mod error;
pub mod pipeline;

pub use config::Settings;
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::AppError;
pub use pipeline::{Color, LabPoint, PlacementRecord};
