pub mod barcode_writer;
pub mod color_extractor;

pub use barcode_writer::BarcodeWriter;
pub use color_extractor::{ColorExtractor, EnumerationMode};
