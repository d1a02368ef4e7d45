pub mod lab_converter;

pub use lab_converter::{D65_WHITE, LabConverter, LabSpace, to_lab_intermediate};
