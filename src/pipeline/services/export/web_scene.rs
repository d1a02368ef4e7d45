use crate::error::AppError;
use crate::pipeline::types::PlacementRecord;
use minijinja::{Environment, context};
use std::path::Path;
use tracing::info;

const BUNDLED_TEMPLATE: &str = include_str!("../../../../assets/aframe_scene.html.j2");

/// Renders placement records into a standalone A-Frame page.
///
/// The template receives `items` (each with `color`, `position` and `radius`) and `title`.
pub struct WebSceneExporter {
    source: String,
}

impl Default for WebSceneExporter {
    fn default() -> Self {
        Self {
            source: BUNDLED_TEMPLATE.to_string(),
        }
    }
}

impl WebSceneExporter {
    pub fn with_template(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Uses the template at `path`, or the bundled one when `None`.
    pub fn from_template_path(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => std::fs::read_to_string(path)
                .map(Self::with_template)
                .map_err(|e| AppError::io(path, e)),
            None => Ok(Self::default()),
        }
    }

    pub fn render(&self, title: &str, records: &[PlacementRecord]) -> Result<String, AppError> {
        let env = Environment::new();
        let template = env.template_from_str(&self.source)?;
        Ok(template.render(context! { title => title, items => records })?)
    }

    pub fn export(
        &self,
        title: &str,
        records: &[PlacementRecord],
        out_path: &Path,
    ) -> Result<(), AppError> {
        info!("Creating aframe scene...");
        let html = self.render(title, records)?;
        std::fs::write(out_path, html).map_err(|e| AppError::io(out_path, e))?;
        info!("aframe scene created at {}", out_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Color;

    fn records() -> Vec<PlacementRecord> {
        vec![
            PlacementRecord::new(Color::new(255, 0, 0), [4.25, 2.5, 0.25], 0.1),
            PlacementRecord::new(Color::new(0, 255, 0), [3.5, 7.25, 1.0], 0.3),
        ]
    }

    #[test]
    fn bundled_template_emits_one_sphere_per_record() {
        let html = WebSceneExporter::default().render("a.png", &records()).unwrap();
        assert_eq!(html.matches("<a-sphere").count(), 2);
        assert!(html.contains(r#"position="4.25 2.5 0.25""#));
        assert!(html.contains(r#"color="rgb(0, 255, 0)""#));
        assert!(html.contains(r#"radius="0.3""#));
        assert!(html.contains("<title>a.png</title>"));
    }

    #[test]
    fn custom_template_sees_record_fields() {
        let exporter = WebSceneExporter::with_template(
            "{% for i in items %}{{ i.color[0] }}:{{ i.radius }};{% endfor %}",
        );
        assert_eq!(exporter.render("", &records()).unwrap(), "255:0.1;0:0.3;");
    }

    #[test]
    fn broken_template_is_a_template_error() {
        let exporter = WebSceneExporter::with_template("{% for i in items %}");
        assert!(matches!(exporter.render("", &records()), Err(AppError::Template(_))));
    }
}
