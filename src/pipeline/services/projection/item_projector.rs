use crate::config::ProjectionSettings;
use crate::pipeline::services::color::LabConverter;
use crate::pipeline::types::{Color, ColorHistogram, PlacementRecord};
use tracing::debug;

/// Turns an occurrence sequence into one placement record per distinct color.
#[derive(Debug, Clone)]
pub struct ItemProjector {
    converter: LabConverter,
    radius_weight: f64,
    position_scale: f64,
}

impl Default for ItemProjector {
    fn default() -> Self {
        Self::from_settings(&ProjectionSettings::default())
    }
}

impl ItemProjector {
    pub fn new(converter: LabConverter, radius_weight: f64, position_scale: f64) -> Self {
        Self {
            converter,
            radius_weight,
            position_scale,
        }
    }

    pub fn from_settings(settings: &ProjectionSettings) -> Self {
        Self::new(
            LabConverter::new(settings.lab_space, settings.reference_white),
            settings.radius_weight,
            settings.position_scale,
        )
    }

    pub fn converter(&self) -> &LabConverter {
        &self.converter
    }

    pub fn radius_weight(&self) -> f64 {
        self.radius_weight
    }

    /// Records keep the first-seen order of the histogram; they are not sorted by frequency.
    pub fn project(&self, occurrences: &[Color]) -> (ColorHistogram, Vec<PlacementRecord>) {
        let histogram = ColorHistogram::from_occurrences(occurrences);
        let records = self.project_histogram(&histogram);
        (histogram, records)
    }

    pub fn project_histogram(&self, histogram: &ColorHistogram) -> Vec<PlacementRecord> {
        debug!(
            "Projecting {} distinct colors ({} occurrences)",
            histogram.len(),
            histogram.total()
        );
        histogram
            .iter()
            .map(|(color, count)| {
                let position = self.converter.convert(color).scaled(self.position_scale);
                PlacementRecord::new(color, position, count as f64 * self.radius_weight)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::services::color::to_lab_intermediate;

    #[test]
    fn one_record_per_distinct_color_in_first_seen_order() {
        let red = Color::new(255, 0, 0);
        let green = Color::new(0, 255, 0);
        let (histogram, records) = ItemProjector::default().project(&[green, red, green]);

        assert_eq!(records.len(), histogram.len());
        assert_eq!(records[0].color, green);
        assert_eq!(records[1].color, red);
        assert!((records[0].radius - 0.2).abs() < 1e-12);
        assert!((records[1].radius - 0.1).abs() < 1e-12);
    }

    #[test]
    fn radii_sum_back_to_the_occurrence_count() {
        let occurrences: Vec<Color> = (0..40u8).map(|i| Color::new(i % 7, 0, i % 3)).collect();
        let projector = ItemProjector::default();
        let (_, records) = projector.project(&occurrences);
        let total: f64 = records
            .iter()
            .map(|r| r.radius / projector.radius_weight())
            .sum();
        assert!((total - occurrences.len() as f64).abs() < 1e-9);
    }

    #[test]
    fn two_pixel_example() {
        let red = Color::new(255, 0, 0);
        let green = Color::new(0, 255, 0);
        let (histogram, records) = ItemProjector::default().project(&[red, green]);

        assert_eq!(histogram.count(&red), 1);
        assert_eq!(histogram.count(&green), 1);
        assert_eq!(records.len(), 2);
        for (record, color) in records.iter().zip([red, green]) {
            assert_eq!(record.radius, 0.1);
            assert_eq!(record.position, to_lab_intermediate(color).scaled(10.0));
        }
    }

    #[test]
    fn single_color_gets_one_weight() {
        let (_, records) = ItemProjector::default().project(&[Color::new(9, 9, 9)]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].radius, 0.1);
    }
}
