use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Every artifact of a run is named by appending a suffix to one prefix: the input path,
/// or the input's file name inside the configured output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    prefix: PathBuf,
}

impl OutputPaths {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Self {
        match (output_dir, input.file_name()) {
            (Some(dir), Some(name)) => Self::new(dir.join(name)),
            _ => Self::new(input),
        }
    }

    /// Base name used for scene objects and project metadata.
    pub fn stem(&self) -> String {
        self.prefix
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut path: OsString = self.prefix.as_os_str().to_owned();
        path.push(suffix);
        PathBuf::from(path)
    }

    pub fn colors_log(&self) -> PathBuf {
        self.with_suffix("_colors.log")
    }

    pub fn colors_dump(&self) -> PathBuf {
        self.with_suffix("_colors.dump")
    }

    pub fn unique_colors_log(&self) -> PathBuf {
        self.with_suffix("_colors_unique.log")
    }

    pub fn unique_colors_dump(&self) -> PathBuf {
        self.with_suffix("_colors_unique.dump")
    }

    pub fn lab_colors_log(&self) -> PathBuf {
        self.with_suffix("_colors_LAB.log")
    }

    pub fn lab_colors_dump(&self) -> PathBuf {
        self.with_suffix("_colors_LAB.dump")
    }

    pub fn unique_lab_colors_log(&self) -> PathBuf {
        self.with_suffix("_colors_unique_LAB.log")
    }

    pub fn unique_lab_colors_dump(&self) -> PathBuf {
        self.with_suffix("_colors_unique_LAB.dump")
    }

    /// Hand-off artifact consumed by both renderers.
    pub fn placements_dump(&self) -> PathBuf {
        self.with_suffix(".dump")
    }

    pub fn barcode(&self) -> PathBuf {
        self.with_suffix("_colors.png")
    }

    pub fn web_page(&self) -> PathBuf {
        self.with_suffix(".html")
    }

    pub fn scene_input(&self) -> PathBuf {
        self.with_suffix("_scene_input.json")
    }

    pub fn blender_script(&self) -> PathBuf {
        self.with_suffix("_scene_import.py")
    }

    pub fn blender_project(&self) -> PathBuf {
        self.with_suffix(".blend")
    }

    pub fn blender_render(&self) -> PathBuf {
        self.with_suffix("_blender.png")
    }

    pub fn native_project(&self) -> PathBuf {
        self.with_suffix(".scene.json")
    }

    pub fn native_render(&self) -> PathBuf {
        self.with_suffix("_render.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_are_appended_to_the_full_input_name() {
        let paths = OutputPaths::for_input(Path::new("shots/sunset.jpg"), None);
        assert_eq!(paths.colors_log(), PathBuf::from("shots/sunset.jpg_colors.log"));
        assert_eq!(paths.placements_dump(), PathBuf::from("shots/sunset.jpg.dump"));
        assert_eq!(paths.blender_render(), PathBuf::from("shots/sunset.jpg_blender.png"));
        assert_eq!(paths.stem(), "sunset.jpg");
    }

    #[test]
    fn output_dir_replaces_the_input_directory() {
        let paths = OutputPaths::for_input(Path::new("shots/sunset.jpg"), Some(Path::new("out")));
        assert_eq!(paths.web_page(), PathBuf::from("out/sunset.jpg.html"));
    }
}
