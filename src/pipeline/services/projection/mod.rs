pub mod item_projector;

pub use item_projector::ItemProjector;
