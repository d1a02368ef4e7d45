use super::authoring::{SceneAuthor, SceneObject, SceneSetup};
use super::still_renderer::StillRenderer;
use crate::config::AuthoringSettings;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const PROJECT_FORMAT: &str = "colorcloud-scene";
pub const PROJECT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
}

/// Project file written by the native authoring backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub format: String,
    pub version: u32,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub setup: SceneSetup,
    pub render: RenderSettings,
    pub objects: Vec<SceneObject>,
}

impl ProjectDocument {
    pub fn new(name: impl Into<String>, setup: SceneSetup, render: RenderSettings) -> Self {
        Self {
            format: PROJECT_FORMAT.to_string(),
            version: PROJECT_VERSION,
            name: name.into(),
            saved_at: Utc::now(),
            setup,
            render,
            objects: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| AppError::io(path, e))?;
        let document: ProjectDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| AppError::serialization(path, e))?;
        if document.format != PROJECT_FORMAT || document.version != PROJECT_VERSION {
            return Err(AppError::Pipeline(format!(
                "{} is not a {} v{} project",
                path.display(),
                PROJECT_FORMAT,
                PROJECT_VERSION
            )));
        }
        Ok(document)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let file = File::create(path).map_err(|e| AppError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| AppError::serialization(path, e))?;
        writer.flush().map_err(|e| AppError::io(path, e))
    }
}

/// In-process author backed by a [`ProjectDocument`] and the [`StillRenderer`].
pub struct ProjectDocumentAuthor {
    document: ProjectDocument,
}

impl ProjectDocumentAuthor {
    pub fn new(name: impl Into<String>, setup: SceneSetup, settings: &AuthoringSettings) -> Self {
        let (width, height) = settings.render_size();
        Self {
            document: ProjectDocument::new(name, setup, RenderSettings { width, height }),
        }
    }

    pub fn document(&self) -> &ProjectDocument {
        &self.document
    }
}

impl SceneAuthor for ProjectDocumentAuthor {
    fn add_object(&mut self, object: SceneObject) -> Result<(), AppError> {
        self.document.objects.push(object);
        Ok(())
    }

    fn save_project(&mut self, path: &Path) -> Result<(), AppError> {
        self.document.saved_at = Utc::now();
        self.document.save(path)
    }

    fn render_still(&mut self, path: &Path) -> Result<(), AppError> {
        let RenderSettings { width, height } = self.document.render;
        StillRenderer::new(width, height)
            .render(&self.document.setup, &self.document.objects)
            .save(path)
            .map_err(|source| AppError::Image {
                path: path.to_path_buf(),
                source,
            })
    }

    fn object_count(&self) -> usize {
        self.document.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::services::export::authoring::author_scene;
    use crate::pipeline::types::{Color, PlacementRecord};
    use std::path::PathBuf;
    use uuid::Uuid;

    /// Fails once the given number of objects has been placed.
    struct CrashingAuthor {
        inner: ProjectDocumentAuthor,
        crash_at: usize,
    }

    impl SceneAuthor for CrashingAuthor {
        fn add_object(&mut self, object: SceneObject) -> Result<(), AppError> {
            if self.inner.object_count() == self.crash_at {
                return Err(AppError::ExternalToolFailure("simulated crash".to_string()));
            }
            self.inner.add_object(object)
        }

        fn save_project(&mut self, path: &Path) -> Result<(), AppError> {
            self.inner.save_project(path)
        }

        fn render_still(&mut self, path: &Path) -> Result<(), AppError> {
            self.inner.render_still(path)
        }

        fn object_count(&self) -> usize {
            self.inner.object_count()
        }
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("colorcloud-project-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn records(count: usize) -> Vec<PlacementRecord> {
        (0..count)
            .map(|i| {
                let c = Color::new((i % 256) as u8, (i / 256 % 256) as u8, 7);
                PlacementRecord::new(c, [i as f64 * 0.001, 1.0, 2.0], 0.1)
            })
            .collect()
    }

    fn small_settings() -> AuthoringSettings {
        AuthoringSettings {
            resolution_x: 64,
            resolution_y: 48,
            ..AuthoringSettings::default()
        }
    }

    #[test]
    fn interrupted_run_leaves_a_loadable_checkpoint() {
        let dir = scratch_dir();
        let project = dir.join("scene.scene.json");
        let render = dir.join("scene_render.png");
        let settings = small_settings();
        let mut author = CrashingAuthor {
            inner: ProjectDocumentAuthor::new("scene", SceneSetup::default(), &settings),
            crash_at: 1500,
        };

        let result = author_scene(&mut author, &records(2500), &settings, &project, &render);
        assert!(result.is_err());
        assert!(!render.exists());

        let checkpoint = ProjectDocument::load(&project).unwrap();
        assert_eq!(checkpoint.objects.len(), 1001);
        assert_eq!(checkpoint.objects[1000].name, "item-1000");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn completed_run_writes_project_and_render() {
        let dir = scratch_dir();
        let project = dir.join("scene.scene.json");
        let render = dir.join("scene_render.png");
        let settings = small_settings();
        let mut author = ProjectDocumentAuthor::new("scene", SceneSetup::default(), &settings);

        let outcome = author_scene(&mut author, &records(12), &settings, &project, &render).unwrap();
        assert_eq!(outcome.objects, 12);

        let document = ProjectDocument::load(&project).unwrap();
        assert_eq!(document.objects, author.document().objects);
        let still = image::open(&render).unwrap();
        assert_eq!((still.width(), still.height()), (64, 48));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn foreign_json_is_rejected() {
        let dir = scratch_dir();
        let path = dir.join("other.json");
        let mut document = ProjectDocument::new(
            "x",
            SceneSetup::default(),
            RenderSettings {
                width: 1,
                height: 1,
            },
        );
        document.format = "something-else".to_string();
        document.save(&path).unwrap();
        assert!(ProjectDocument::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
