use crate::error::AppError;
use crate::pipeline::services::color::LabConverter;
use crate::pipeline::types::{Color, ColorHistogram, LabPoint, OutputPaths, PlacementRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the per-run color logs and dumps.
///
/// Text logs hold one comma-separated tuple per line and are meant for people; dumps are
/// JSON and lossless. Existing files are overwritten.
pub struct ColorJournal<'a> {
    paths: &'a OutputPaths,
    converter: LabConverter,
}

impl<'a> ColorJournal<'a> {
    pub fn new(paths: &'a OutputPaths, converter: LabConverter) -> Self {
        Self { paths, converter }
    }

    /// Writes all four log/dump pairs and the placement dump, returning every path written.
    pub fn write_all(
        &self,
        occurrences: &[Color],
        histogram: &ColorHistogram,
        records: &[PlacementRecord],
    ) -> Result<Vec<PathBuf>, AppError> {
        let mut written = Vec::with_capacity(9);

        info!("logging colors...");
        written.extend(self.write_pair(
            occurrences,
            self.paths.colors_log(),
            self.paths.colors_dump(),
        )?);

        info!("logging unique colors...");
        let unique: Vec<Color> = histogram.distinct_colors().collect();
        written.extend(self.write_pair(
            &unique,
            self.paths.unique_colors_log(),
            self.paths.unique_colors_dump(),
        )?);

        info!("logging LAB colors...");
        let lab = self.convert_all(occurrences);
        written.extend(self.write_pair(
            &lab,
            self.paths.lab_colors_log(),
            self.paths.lab_colors_dump(),
        )?);

        info!("logging unique LAB colors...");
        let unique_lab = self.convert_all(&unique);
        written.extend(self.write_pair(
            &unique_lab,
            self.paths.unique_lab_colors_log(),
            self.paths.unique_lab_colors_dump(),
        )?);

        let placements = self.paths.placements_dump();
        write_dump(&placements, records)?;
        info!("{} placement records saved to {}", records.len(), placements.display());
        written.push(placements);

        Ok(written)
    }

    fn convert_all(&self, colors: &[Color]) -> Vec<LabPoint> {
        colors.iter().map(|c| self.converter.convert(*c)).collect()
    }

    fn write_pair<T>(
        &self,
        items: &[T],
        log: PathBuf,
        dump: PathBuf,
    ) -> Result<[PathBuf; 2], AppError>
    where
        T: Display + Serialize,
    {
        write_log(&log, items)?;
        write_dump(&dump, items)?;
        Ok([log, dump])
    }
}

pub fn write_log<T: Display>(path: &Path, items: &[T]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for item in items {
        writeln!(writer, "{item}").map_err(|e| AppError::io(path, e))?;
    }
    writer.flush().map_err(|e| AppError::io(path, e))
}

pub fn write_dump<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|e| AppError::serialization(path, e))?;
    writer.flush().map_err(|e| AppError::io(path, e))
}

pub fn read_dump<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path).map_err(|e| AppError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| AppError::serialization(path, e))
}

/// Reloads the placement dump handed to the renderers.
pub fn load_placements(path: &Path) -> Result<Vec<PlacementRecord>, AppError> {
    read_dump(path)
}
