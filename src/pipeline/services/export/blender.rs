use super::authoring::{AuthoringOutcome, SceneSetup};
use crate::config::AuthoringSettings;
use crate::error::AppError;
use crate::pipeline::services::journal::write_dump;
use crate::pipeline::types::{OutputPaths, PlacementRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

const IMPORT_SCRIPT: &str = include_str!("../../../../assets/blender_scene_import.py");

/// Settings the driver script reads from the hand-off file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffSettings {
    pub position_scale: f64,
    pub checkpoint_interval: usize,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub transparency: bool,
    pub alpha: f64,
}

impl From<&AuthoringSettings> for HandoffSettings {
    fn from(settings: &AuthoringSettings) -> Self {
        Self {
            position_scale: settings.position_scale,
            checkpoint_interval: settings.checkpoint_interval,
            resolution_x: settings.resolution_x,
            resolution_y: settings.resolution_y,
            resolution_percentage: settings.resolution_percentage,
            transparency: settings.transparency,
            alpha: settings.alpha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffOutputs {
    pub project: PathBuf,
    pub render: PathBuf,
}

/// File-based message to the external tool: what to build and where to write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneHandoff {
    pub settings: HandoffSettings,
    pub setup: SceneSetup,
    pub outputs: HandoffOutputs,
    pub records: Vec<PlacementRecord>,
}

/// Runs Blender headless on the bundled import script.
pub struct BlenderLauncher {
    executable: PathBuf,
    settings: AuthoringSettings,
    setup: SceneSetup,
}

impl BlenderLauncher {
    pub fn new(settings: &AuthoringSettings, setup: SceneSetup) -> Self {
        Self {
            executable: settings.executable.clone(),
            settings: settings.clone(),
            setup,
        }
    }

    /// Writes the hand-off file and the driver script next to the other artifacts.
    pub fn prepare(
        &self,
        records: &[PlacementRecord],
        paths: &OutputPaths,
    ) -> Result<SceneHandoff, AppError> {
        let handoff = SceneHandoff {
            settings: HandoffSettings::from(&self.settings),
            setup: self.setup.clone(),
            outputs: HandoffOutputs {
                project: absolute(&paths.blender_project())?,
                render: absolute(&paths.blender_render())?,
            },
            records: records.to_vec(),
        };

        write_dump(&paths.scene_input(), &handoff)?;
        let script = paths.blender_script();
        std::fs::write(&script, IMPORT_SCRIPT).map_err(|e| AppError::io(&script, e))?;
        debug!(
            "Hand-off written to {} ({} records)",
            paths.scene_input().display(),
            records.len()
        );
        Ok(handoff)
    }

    pub async fn run(
        &self,
        records: &[PlacementRecord],
        paths: &OutputPaths,
    ) -> Result<AuthoringOutcome, AppError> {
        let handoff = self.prepare(records, paths)?;

        info!(
            "Running {} on {} records...",
            self.executable.display(),
            records.len()
        );
        let status = Command::new(&self.executable)
            .arg("--background")
            .arg("--factory-startup")
            .arg("--python-exit-code")
            .arg("1")
            .arg("--python")
            .arg(paths.blender_script())
            .arg("--")
            .arg(paths.scene_input())
            .status()
            .await
            .map_err(|e| {
                AppError::ExternalToolFailure(format!(
                    "failed to start {}: {}",
                    self.executable.display(),
                    e
                ))
            })?;

        if !status.success() {
            return Err(AppError::ExternalToolFailure(format!(
                "{} exited with {}",
                self.executable.display(),
                status
            )));
        }

        for output in [&handoff.outputs.project, &handoff.outputs.render] {
            if !output.exists() {
                return Err(AppError::ExternalToolFailure(format!(
                    "{} finished without writing {}",
                    self.executable.display(),
                    output.display()
                )));
            }
        }

        let interval = self.settings.checkpoint_interval.max(1);
        Ok(AuthoringOutcome {
            project: handoff.outputs.project,
            render: handoff.outputs.render,
            objects: records.len(),
            checkpoints: records.len().div_ceil(interval),
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf, AppError> {
    std::path::absolute(path).map_err(|e| AppError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::services::journal::read_dump;
    use crate::pipeline::types::Color;
    use uuid::Uuid;

    fn scratch_paths() -> (PathBuf, OutputPaths) {
        let dir = std::env::temp_dir().join(format!("colorcloud-blender-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let paths = OutputPaths::new(dir.join("photo.png"));
        (dir, paths)
    }

    fn records() -> Vec<PlacementRecord> {
        vec![PlacementRecord::new(Color::new(1, 2, 3), [1.0, 2.0, 3.0], 0.1)]
    }

    #[test]
    fn prepare_writes_handoff_and_script() {
        let (dir, paths) = scratch_paths();
        let launcher = BlenderLauncher::new(&AuthoringSettings::default(), SceneSetup::default());

        let handoff = launcher.prepare(&records(), &paths).unwrap();
        let reloaded: SceneHandoff = read_dump(&paths.scene_input()).unwrap();
        assert_eq!(reloaded, handoff);
        assert_eq!(reloaded.settings.checkpoint_interval, 1000);
        assert!(reloaded.outputs.project.is_absolute());
        assert!(reloaded.outputs.project.ends_with("photo.png.blend"));

        let script = std::fs::read_to_string(paths.blender_script()).unwrap();
        assert!(script.contains("save_as_mainfile"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn missing_executable_is_an_external_tool_failure() {
        let (dir, paths) = scratch_paths();
        let settings = AuthoringSettings {
            executable: dir.join("no-such-blender"),
            ..AuthoringSettings::default()
        };
        let launcher = BlenderLauncher::new(&settings, SceneSetup::default());

        let result = launcher.run(&records(), &paths).await;
        assert!(matches!(result, Err(AppError::ExternalToolFailure(_))));
        assert!(paths.scene_input().exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[cfg(unix)]
    fn launcher_for(executable: &str) -> BlenderLauncher {
        let settings = AuthoringSettings {
            executable: PathBuf::from(executable),
            ..AuthoringSettings::default()
        };
        BlenderLauncher::new(&settings, SceneSetup::default())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_an_external_tool_failure() {
        let (dir, paths) = scratch_paths();

        let result = launcher_for("/bin/false").run(&records(), &paths).await;
        match result {
            Err(AppError::ExternalToolFailure(message)) => assert!(message.contains("exited with")),
            other => panic!("unexpected result: {other:?}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn clean_exit_without_outputs_is_an_external_tool_failure() {
        let (dir, paths) = scratch_paths();

        let result = launcher_for("/bin/true").run(&records(), &paths).await;
        match result {
            Err(AppError::ExternalToolFailure(message)) => {
                assert!(message.contains("finished without writing"));
                assert!(message.contains("photo.png.blend"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!paths.blender_project().exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
