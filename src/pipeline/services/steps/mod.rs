pub mod barcode_step;
pub mod color_extraction_step;
pub mod journal_step;
pub mod projection_step;
pub mod scene_authoring_step;
pub mod web_scene_step;

pub use barcode_step::BarcodeStep;
pub use color_extraction_step::ColorExtractionStep;
pub use journal_step::JournalStep;
pub use projection_step::ProjectionStep;
pub use scene_authoring_step::SceneAuthoringStep;
pub use web_scene_step::WebSceneStep;
