use crate::config::AuthoringSettings;
use crate::error::AppError;
use crate::pipeline::types::PlacementRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the 3D project and still image are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthoringBackend {
    /// External Blender process fed through a hand-off file.
    #[default]
    Blender,
    /// In-process project document and software render.
    Native,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub location: [f64; 3],
    pub target: [f64; 3],
    /// Lens focal length over sensor width, as in a 50mm lens on a 36mm sensor.
    pub focal_length: f64,
    pub sensor_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub environment_energy: f64,
    pub background: [u8; 3],
}

/// Fixed camera and lighting shared by every authoring backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSetup {
    pub camera: CameraRig,
    pub lighting: Lighting,
}

impl Default for SceneSetup {
    fn default() -> Self {
        Self {
            // Isometric-style view onto the LAB cube.
            camera: CameraRig {
                location: [8.0, 0.0, 8.0],
                target: [0.0, 0.0, 0.0],
                focal_length: 50.0,
                sensor_width: 36.0,
            },
            lighting: Lighting {
                environment_energy: 0.003,
                background: [12, 12, 12],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Linear 0..=1 channels.
    pub diffuse_color: [f64; 3],
    pub use_transparency: bool,
    pub alpha: f64,
}

/// One primitive of the authored scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub location: [f64; 3],
    pub dimensions: [f64; 3],
    pub material: Material,
}

impl SceneObject {
    pub fn from_record(index: usize, record: &PlacementRecord, settings: &AuthoringSettings) -> Self {
        let name = format!("item-{index}");
        Self {
            location: record.position.map(|v| v * settings.position_scale),
            dimensions: [record.radius; 3],
            material: Material {
                name: format!("Material.{name}"),
                diffuse_color: record.color.normalized(),
                use_transparency: settings.transparency,
                alpha: settings.alpha,
            },
            name,
        }
    }
}

/// The scripting surface of a 3D-authoring tool.
pub trait SceneAuthor {
    fn add_object(&mut self, object: SceneObject) -> Result<(), AppError>;
    fn save_project(&mut self, path: &Path) -> Result<(), AppError>;
    fn render_still(&mut self, path: &Path) -> Result<(), AppError>;
    fn object_count(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthoringOutcome {
    pub project: PathBuf,
    pub render: PathBuf,
    pub objects: usize,
    pub checkpoints: usize,
}

/// Places one object per record, saving the project after every object whose index is a
/// multiple of the checkpoint interval, then saves and renders the finished scene.
pub fn author_scene<A>(
    author: &mut A,
    records: &[PlacementRecord],
    settings: &AuthoringSettings,
    project: &Path,
    render: &Path,
) -> Result<AuthoringOutcome, AppError>
where
    A: SceneAuthor + ?Sized,
{
    let interval = settings.checkpoint_interval.max(1);
    let mut checkpoints = 0;

    for (index, record) in records.iter().enumerate() {
        author.add_object(SceneObject::from_record(index, record, settings))?;

        if index % interval == 0 {
            author.save_project(project)?;
            checkpoints += 1;
            debug!(
                "Checkpoint {} saved at object {}/{}",
                checkpoints,
                index + 1,
                records.len()
            );
        }
    }

    author.save_project(project)?;
    info!("Project saved to {}", project.display());
    author.render_still(render)?;
    info!("Still image rendered to {}", render.display());

    Ok(AuthoringOutcome {
        project: project.to_path_buf(),
        render: render.to_path_buf(),
        objects: author.object_count(),
        checkpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Color;

    #[derive(Default)]
    struct RecordingAuthor {
        objects: Vec<SceneObject>,
        saves: Vec<usize>,
        rendered: bool,
    }

    impl SceneAuthor for RecordingAuthor {
        fn add_object(&mut self, object: SceneObject) -> Result<(), AppError> {
            self.objects.push(object);
            Ok(())
        }

        fn save_project(&mut self, _path: &Path) -> Result<(), AppError> {
            self.saves.push(self.objects.len());
            Ok(())
        }

        fn render_still(&mut self, _path: &Path) -> Result<(), AppError> {
            self.rendered = true;
            Ok(())
        }

        fn object_count(&self) -> usize {
            self.objects.len()
        }
    }

    fn records(count: usize) -> Vec<PlacementRecord> {
        (0..count)
            .map(|i| PlacementRecord::new(Color::new((i % 256) as u8, 0, 0), [10.0, 5.0, 2.5], 0.4))
            .collect()
    }

    #[test]
    fn objects_follow_the_record_contract() {
        let mut settings = AuthoringSettings::default();
        settings.transparency = true;
        let object = SceneObject::from_record(3, &records(1)[0], &settings);

        assert_eq!(object.name, "item-3");
        assert_eq!(object.material.name, "Material.item-3");
        assert_eq!(object.dimensions, [0.4, 0.4, 0.4]);
        assert_eq!(object.location, [1.0, 0.5, 0.25]);
        assert_eq!(object.material.diffuse_color, [0.0, 0.0, 0.0]);
        assert!(object.material.use_transparency);
        assert_eq!(object.material.alpha, 0.5);
    }

    #[test]
    fn checkpoints_every_interval_then_saves_and_renders() {
        let mut author = RecordingAuthor::default();
        let settings = AuthoringSettings::default();
        let outcome = author_scene(
            &mut author,
            &records(2500),
            &settings,
            Path::new("p"),
            Path::new("r"),
        )
        .unwrap();

        // after objects 0, 1000 and 2000, plus the final save
        assert_eq!(author.saves, vec![1, 1001, 2001, 2500]);
        assert_eq!(outcome.checkpoints, 3);
        assert_eq!(outcome.objects, 2500);
        assert!(author.rendered);
    }
}
