pub mod authoring;
pub mod blender;
pub mod project_document;
pub mod still_renderer;
pub mod web_scene;

pub use authoring::{
    AuthoringBackend, AuthoringOutcome, SceneAuthor, SceneObject, SceneSetup, author_scene,
};
pub use blender::BlenderLauncher;
pub use project_document::{ProjectDocument, ProjectDocumentAuthor};
pub use still_renderer::StillRenderer;
pub use web_scene::WebSceneExporter;
