//! Mock report generation.
//!
//! The "analysis" here is honest about being fake: scores come from the
//! caller's RNG and masks are random filled circles stamped on a blank
//! canvas. The one real contract is the report shape — result count, catalog
//! order, tier mapping, and the overall score — which the frontend depends
//! on and which the tests pin down.
//!
//! The real-inference path exists only to fail loudly: invoking it returns
//! [`AnalysisError::NotImplemented`] instead of silently serving mock data.

use std::ops::RangeInclusive;

use image::{Rgb, RgbImage};
use rand::Rng;

use crate::codec;
use crate::error::{AnalysisError, Result};
use crate::model::{AnalysisResult, AnalysisScore, SeverityLevel, SkinReport};

/// A catalog entry: a named skin condition and its overlay color.
#[derive(Debug, Clone)]
pub struct Condition {
    /// Display name, e.g. "Sebum".
    pub name: String,

    /// Overlay color as an RGB triple.
    pub color: [u8; 3],
}

impl Condition {
    pub fn new(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }

    /// The overlay color as lowercase `#rrggbb` hex, the form the wire
    /// carries.
    pub fn hex_color(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Tuning knobs for the mock generator.
///
/// The catalog and all numeric ranges are data, not logic: tests and
/// alternate deployments swap them without touching the generator.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Conditions to report on, in output order.
    pub conditions: Vec<Condition>,

    /// Inclusive range scores are drawn from.
    pub score_range: RangeInclusive<u32>,

    /// Scores below this are `Low`; at or above, `Moderate`.
    pub moderate_cutoff: u32,

    /// Scores at or above this are `High`.
    pub high_cutoff: u32,

    /// Number of random circles stamped on each mask.
    pub blobs_per_mask: u32,

    /// Inclusive range of circle radii, in pixels.
    pub radius_range: RangeInclusive<u32>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            conditions: vec![
                Condition::new("Sebum", [0, 0, 255]),
                Condition::new("Pore", [0, 255, 0]),
                Condition::new("Wrinkle", [255, 0, 0]),
                Condition::new("Acne", [255, 255, 0]),
                Condition::new("Blackhead", [255, 0, 255]),
                Condition::new("Flek", [128, 0, 128]),
            ],
            score_range: 30..=95,
            moderate_cutoff: 50,
            high_cutoff: 80,
            blobs_per_mask: 5,
            radius_range: 10..=50,
        }
    }
}

/// The analysis entry point behind both HTTP routes.
///
/// Holds its configuration by value; no global state. Stateless per call
/// and safe to share across concurrent requests — the only mutable thing
/// it touches is the RNG each caller supplies.
#[derive(Debug, Clone)]
pub struct SkinAnalyzer {
    config: AnalyzerConfig,
    mock_mode: bool,
}

impl SkinAnalyzer {
    pub fn new(config: AnalyzerConfig, mock_mode: bool) -> Self {
        Self { config, mock_mode }
    }

    /// Analyze uploaded image bytes and produce a report.
    ///
    /// Decodes the upload first (invalid bytes fail with
    /// [`AnalysisError::InvalidImage`] before any generation happens), then
    /// dispatches on mock mode. A failure anywhere aborts the whole report;
    /// there are no partial results.
    pub fn analyze(&self, file_bytes: &[u8], rng: &mut impl Rng) -> Result<SkinReport> {
        let raster = codec::decode_image(file_bytes)?;

        if self.mock_mode {
            self.analyze_mock(&raster, rng)
        } else {
            self.analyze_real(&raster)
        }
    }

    /// Generate a report of random scores and random blob masks.
    ///
    /// One result per catalog condition, in catalog order. The overall
    /// score is the integer-truncated mean of the individual values,
    /// summed in the same order so a seeded RNG reproduces the report
    /// exactly.
    fn analyze_mock(&self, raster: &RgbImage, rng: &mut impl Rng) -> Result<SkinReport> {
        let mut results = Vec::with_capacity(self.config.conditions.len());
        let mut total_score: u32 = 0;

        for condition in &self.config.conditions {
            let value = rng.gen_range(self.config.score_range.clone());
            let level = SeverityLevel::from_value(
                value,
                self.config.moderate_cutoff,
                self.config.high_cutoff,
            );

            let mask_b64 = self.generate_mock_mask(raster, condition.color, rng)?;

            results.push(AnalysisResult {
                condition: condition.name.clone(),
                score: AnalysisScore { value, level },
                mask_base64: Some(mask_b64),
                overlay_color: Some(condition.hex_color()),
            });
            total_score += value;
        }

        let overall_score = match results.len() {
            0 => 0,
            n => total_score / n as u32,
        };

        Ok(SkinReport {
            overall_score,
            results,
            is_mock: true,
        })
    }

    /// Real ML inference path. Not wired in yet; fails so that a
    /// misconfigured deployment is distinguishable from a service bug.
    fn analyze_real(&self, _raster: &RgbImage) -> Result<SkinReport> {
        Err(AnalysisError::NotImplemented)
    }

    /// Draw random filled circles on a blank canvas of the input's
    /// dimensions and return it as base64 PNG.
    fn generate_mock_mask(
        &self,
        raster: &RgbImage,
        color: [u8; 3],
        rng: &mut impl Rng,
    ) -> Result<String> {
        let (width, height) = raster.dimensions();
        let mut mask = RgbImage::new(width, height);

        for _ in 0..self.config.blobs_per_mask {
            let center_x = rng.gen_range(0..width);
            let center_y = rng.gen_range(0..height);
            let radius = rng.gen_range(self.config.radius_range.clone());
            stamp_circle(&mut mask, center_x, center_y, radius, Rgb(color));
        }

        let png = codec::encode_png(&mask)?;
        Ok(codec::to_base64(&png))
    }
}

/// Fill a circle on the mask, clipping anything outside the canvas.
fn stamp_circle(mask: &mut RgbImage, center_x: u32, center_y: u32, radius: u32, color: Rgb<u8>) {
    let (width, height) = mask.dimensions();
    let (cx, cy, r) = (center_x as i64, center_y as i64, radius as i64);

    let x_min = (cx - r).max(0);
    let x_max = (cx + r).min(width as i64 - 1);
    let y_min = (cy - r).max(0);
    let y_max = (cy + r).min(height as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                mask.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_image_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(64, 48, Rgb([200, 180, 160]));
        codec::encode_png(&img).unwrap()
    }

    fn mock_analyzer() -> SkinAnalyzer {
        SkinAnalyzer::new(AnalyzerConfig::default(), true)
    }

    #[test]
    fn test_report_covers_catalog_in_order() {
        let analyzer = mock_analyzer();
        let mut rng = StdRng::seed_from_u64(42);

        let report = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap();

        let names: Vec<&str> = report.results.iter().map(|r| r.condition.as_str()).collect();
        assert_eq!(
            names,
            ["Sebum", "Pore", "Wrinkle", "Acne", "Blackhead", "Flek"]
        );
        assert!(report.is_mock);
    }

    #[test]
    fn test_scores_within_configured_range() {
        let analyzer = mock_analyzer();
        let mut rng = StdRng::seed_from_u64(7);

        let report = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap();

        for result in &report.results {
            assert!((30..=95).contains(&result.score.value));
            assert_eq!(
                result.score.level,
                SeverityLevel::from_value(result.score.value, 50, 80)
            );
        }
    }

    #[test]
    fn test_overall_score_is_floored_mean() {
        let analyzer = mock_analyzer();
        let mut rng = StdRng::seed_from_u64(1234);

        let report = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap();

        let values: Vec<u32> = report.results.iter().map(|r| r.score.value).collect();
        let sum: u32 = values.iter().sum();
        assert_eq!(report.overall_score, sum / values.len() as u32);

        let min = *values.iter().min().unwrap();
        let max = *values.iter().max().unwrap();
        assert!(min <= report.overall_score && report.overall_score <= max);
    }

    #[test]
    fn test_same_seed_same_report() {
        let analyzer = mock_analyzer();
        let bytes = sample_image_bytes();

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let report_a = analyzer.analyze(&bytes, &mut rng_a).unwrap();
        let report_b = analyzer.analyze(&bytes, &mut rng_b).unwrap();

        assert_eq!(report_a.overall_score, report_b.overall_score);
        for (a, b) in report_a.results.iter().zip(&report_b.results) {
            assert_eq!(a.score.value, b.score.value);
            assert_eq!(a.mask_base64, b.mask_base64);
        }
    }

    #[test]
    fn test_masks_match_input_dimensions() {
        let analyzer = mock_analyzer();
        let mut rng = StdRng::seed_from_u64(5);

        let report = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap();

        for result in &report.results {
            let png = STANDARD.decode(result.mask_base64.as_ref().unwrap()).unwrap();
            let mask = codec::decode_image(&png).unwrap();
            assert_eq!(mask.dimensions(), (64, 48));
        }
    }

    #[test]
    fn test_mask_pixels_are_blank_or_condition_color() {
        let config = AnalyzerConfig::default();
        let catalog: Vec<[u8; 3]> = config.conditions.iter().map(|c| c.color).collect();
        let analyzer = SkinAnalyzer::new(config, true);
        let mut rng = StdRng::seed_from_u64(11);

        let report = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap();

        for (result, color) in report.results.iter().zip(catalog) {
            let png = STANDARD.decode(result.mask_base64.as_ref().unwrap()).unwrap();
            let mask = codec::decode_image(&png).unwrap();

            for pixel in mask.pixels() {
                assert!(
                    pixel.0 == [0, 0, 0] || pixel.0 == color,
                    "stray pixel {:?} in {} mask",
                    pixel.0,
                    result.condition
                );
            }
        }
    }

    #[test]
    fn test_overlay_color_is_hex() {
        let analyzer = mock_analyzer();
        let mut rng = StdRng::seed_from_u64(3);

        let report = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap();

        assert_eq!(report.results[0].overlay_color.as_deref(), Some("#0000ff"));
        assert_eq!(report.results[5].overlay_color.as_deref(), Some("#800080"));
    }

    #[test]
    fn test_empty_catalog() {
        let config = AnalyzerConfig {
            conditions: vec![],
            ..AnalyzerConfig::default()
        };
        let analyzer = SkinAnalyzer::new(config, true);
        let mut rng = StdRng::seed_from_u64(0);

        let report = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap();

        assert!(report.results.is_empty());
        assert_eq!(report.overall_score, 0);
    }

    #[test]
    fn test_real_mode_not_implemented() {
        let analyzer = SkinAnalyzer::new(AnalyzerConfig::default(), false);
        let mut rng = StdRng::seed_from_u64(0);

        let err = analyzer.analyze(&sample_image_bytes(), &mut rng).unwrap_err();

        assert!(matches!(err, AnalysisError::NotImplemented));
    }

    #[test]
    fn test_invalid_bytes_rejected_before_generation() {
        let analyzer = mock_analyzer();
        let mut rng = StdRng::seed_from_u64(0);

        let err = analyzer.analyze(b"not an image", &mut rng).unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidImage(_)));
    }

    #[test]
    fn test_stamp_circle_clips_at_edges() {
        let mut mask = RgbImage::new(20, 20);

        // Center in a corner: most of the circle falls outside
        stamp_circle(&mut mask, 0, 0, 5, Rgb([255, 0, 0]));

        assert_eq!(mask.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(mask.get_pixel(0, 5).0, [255, 0, 0]);
        assert_eq!(mask.get_pixel(4, 4).0, [0, 0, 0]);
        assert_eq!(mask.get_pixel(19, 19).0, [0, 0, 0]);
    }

    #[test]
    fn test_hex_color_formatting() {
        assert_eq!(Condition::new("x", [255, 255, 0]).hex_color(), "#ffff00");
        assert_eq!(Condition::new("x", [0, 0, 0]).hex_color(), "#000000");
        assert_eq!(Condition::new("x", [128, 0, 128]).hex_color(), "#800080");
    }
}
