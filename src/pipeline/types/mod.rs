mod color;
mod color_histogram;
mod output_paths;
mod placement_record;

pub use color::{Color, LabPoint, format_decimal};
pub use color_histogram::ColorHistogram;
pub use output_paths::OutputPaths;
pub use placement_record::PlacementRecord;
