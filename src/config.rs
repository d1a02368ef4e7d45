use crate::error::AppError;
use crate::pipeline::services::color::LabSpace;
use crate::pipeline::services::export::AuthoringBackend;
use crate::pipeline::services::image::EnumerationMode;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override settings,
/// e.g. `COLORCLOUD__AUTHORING__BACKEND=native`.
pub const ENV_PREFIX: &str = "COLORCLOUD";

/// Run configuration, injected into the pipeline at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extraction: ExtractionSettings,
    pub projection: ProjectionSettings,
    pub output: OutputSettings,
    pub web: WebSettings,
    pub authoring: AuthoringSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Ceiling on distinct decoded colors; larger images fail with `TooManyColors`.
    pub max_colors: usize,
    pub enumeration: EnumerationMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Radius contributed by each occurrence of a color.
    pub radius_weight: f64,
    /// Factor applied to every LAB coordinate to obtain a position.
    pub position_scale: f64,
    pub lab_space: LabSpace,
    /// Reference white (X, Y, Z), D65 with the 2° observer.
    pub reference_white: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving all artifacts. Defaults to the directory of the input image.
    pub output_dir: Option<PathBuf>,
    pub barcode: bool,
    /// Caps the barcode height; the image is square when unset. The pixel budget
    /// (`MAX_BARCODE_PIXELS`) applies either way.
    pub barcode_max_height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSettings {
    pub enabled: bool,
    /// Replaces the bundled A-Frame template.
    pub template_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoringSettings {
    pub backend: AuthoringBackend,
    /// Path to the external 3D-authoring executable.
    pub executable: PathBuf,
    /// Factor applied to record positions when placing objects.
    pub position_scale: f64,
    /// The project file is saved after every object whose index is a multiple of this.
    pub checkpoint_interval: usize,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub transparency: bool,
    pub alpha: f64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            max_colors: 999_999,
            enumeration: EnumerationMode::ColorTable,
        }
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            radius_weight: 0.1,
            position_scale: 10.0,
            lab_space: LabSpace::Intermediate,
            reference_white: [95.047, 100.0, 108.883],
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: None,
            barcode: true,
            barcode_max_height: None,
        }
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            template_path: None,
        }
    }
}

impl Default for AuthoringSettings {
    fn default() -> Self {
        Self {
            backend: AuthoringBackend::Blender,
            executable: PathBuf::from("blender"),
            position_scale: 0.1,
            checkpoint_interval: 1000,
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
            transparency: false,
            alpha: 0.5,
        }
    }
}

impl AuthoringSettings {
    /// Output resolution after applying the percentage.
    pub fn render_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as u64 * self.resolution_percentage as u64) / 100).max(1) as u32;
        (scale(self.resolution_x), scale(self.resolution_y))
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Layers the defaults, an optional configuration file and `COLORCLOUD__*`
    /// environment variables, then validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        Self::load_layered(path, environment())
    }

    fn load_layered(path: Option<&Path>, env: Environment) -> Result<Self, AppError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;

        settings.validate().map_err(AppError::InvalidConfig)?;
        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.extraction.max_colors == 0 {
            return Err("Max colors must be greater than 0".to_string());
        }

        if !(self.projection.radius_weight.is_finite() && self.projection.radius_weight > 0.0) {
            return Err("Radius weight must be a positive number".to_string());
        }

        if !self.projection.position_scale.is_finite() {
            return Err("Position scale must be finite".to_string());
        }

        if self.projection.reference_white.iter().any(|w| *w <= 0.0) {
            return Err("Reference white components must be positive".to_string());
        }

        if self.output.barcode_max_height == Some(0) {
            return Err("Barcode height must be greater than 0".to_string());
        }

        if self.authoring.checkpoint_interval == 0 {
            return Err("Checkpoint interval must be greater than 0".to_string());
        }

        if self.authoring.resolution_percentage == 0 || self.authoring.resolution_percentage > 100 {
            return Err("Resolution percentage must be between 1 and 100".to_string());
        }

        if self.authoring.resolution_x == 0 || self.authoring.resolution_y == 0 {
            return Err("Render resolution must be greater than 0".to_string());
        }

        if !(0.0..=1.0).contains(&self.authoring.alpha) {
            return Err("Alpha must be between 0.0 and 1.0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn defaults_match_reference_constants() {
        let settings = Settings::default();
        assert_eq!(settings.extraction.max_colors, 999_999);
        assert_eq!(settings.projection.radius_weight, 0.1);
        assert_eq!(settings.projection.position_scale, 10.0);
        assert_eq!(settings.authoring.checkpoint_interval, 1000);
        assert_eq!(settings.authoring.resolution_percentage, 100);
        assert!(!settings.authoring.transparency);
        assert_eq!(settings.authoring.alpha, 0.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("colorcloud-config-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("colorcloud.toml");
        std::fs::write(
            &path,
            "[projection]\nradius_weight = 0.5\n\n[authoring]\nbackend = \"native\"\ncheckpoint_interval = 250\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.projection.radius_weight, 0.5);
        assert_eq!(settings.projection.position_scale, 10.0);
        assert_eq!(settings.authoring.backend, AuthoringBackend::Native);
        assert_eq!(settings.authoring.checkpoint_interval, 250);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn environment_overrides_file_and_defaults() {
        let dir = std::env::temp_dir().join(format!("colorcloud-config-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("colorcloud.toml");
        std::fs::write(&path, "[authoring]\ncheckpoint_interval = 250\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert(
            "COLORCLOUD__AUTHORING__CHECKPOINT_INTERVAL".to_string(),
            "40".to_string(),
        );
        vars.insert(
            "COLORCLOUD__PROJECTION__LAB_SPACE".to_string(),
            "cie_lab".to_string(),
        );
        vars.insert("UNRELATED__AUTHORING__ALPHA".to_string(), "0.9".to_string());

        let settings = Settings::load_layered(Some(&path), environment().source(Some(vars))).unwrap();
        assert_eq!(settings.authoring.checkpoint_interval, 40);
        assert_eq!(settings.projection.lab_space, LabSpace::CieLab);
        assert_eq!(settings.authoring.alpha, 0.5);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn invalid_environment_value_is_rejected() {
        let mut vars = config::Map::new();
        vars.insert(
            "COLORCLOUD__AUTHORING__CHECKPOINT_INTERVAL".to_string(),
            "0".to_string(),
        );
        let result = Settings::load_layered(None, environment().source(Some(vars)));
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn zero_checkpoint_interval_is_rejected() {
        let mut settings = Settings::default();
        settings.authoring.checkpoint_interval = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn render_size_applies_percentage() {
        let mut settings = AuthoringSettings::default();
        settings.resolution_percentage = 50;
        assert_eq!(settings.render_size(), (960, 540));
    }
}
