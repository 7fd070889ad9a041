use crate::common::Frame;
use crate::error::AnalyzerError;
use crate::pipeline::types::EmotionReading;
use async_trait::async_trait;
use image::RgbImage;
use indexmap::IndexMap;

use super::EmotionAnalyzer;

const EMOTIONS: [&str; 5] = ["happy", "neutral", "sad", "angry", "surprise"];

/// Model-free analyzer used by the demo binary: maps global luminance and
/// contrast statistics onto the emotion categories. Real models implement
/// `EmotionAnalyzer` instead.
pub struct LumaMoodAnalyzer;

impl LumaMoodAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn rgb_to_luma(r: u8, g: u8, b: u8) -> f32 {
        // Rec. 709 luminance
        0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32
    }

    fn luma_stats(image: &RgbImage) -> (f32, f32) {
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        let mut samples = 0u64;

        for y in (0..image.height()).step_by(4) {
            for x in (0..image.width()).step_by(4) {
                let px = image.get_pixel(x, y);
                let luma = Self::rgb_to_luma(px[0], px[1], px[2]) as f64;
                sum += luma;
                sum_sq += luma * luma;
                samples += 1;
            }
        }

        let mean = sum / samples as f64;
        let variance = (sum_sq / samples as f64 - mean * mean).max(0.0);
        (mean as f32, variance.sqrt() as f32)
    }

    fn score(mean: f32, contrast: f32) -> IndexMap<String, f32> {
        // Bright frames lean happy, dark frames lean sad, high contrast
        // leans surprise. Raw weights are normalized to percentages.
        let brightness = (mean / 255.0).clamp(0.0, 1.0);
        let spread = (contrast / 80.0).clamp(0.0, 1.0);

        let weights = [
            brightness * (1.0 - spread),          // happy
            1.0 - (brightness - 0.5).abs() * 2.0, // neutral
            (1.0 - brightness) * (1.0 - spread),  // sad
            (1.0 - brightness) * spread,          // angry
            brightness * spread,                  // surprise
        ];
        let total: f32 = weights.iter().map(|w| w.max(0.001)).sum();

        EMOTIONS
            .iter()
            .zip(weights)
            .map(|(name, weight)| (name.to_string(), weight.max(0.001) / total * 100.0))
            .collect()
    }
}

#[async_trait]
impl EmotionAnalyzer for LumaMoodAnalyzer {
    async fn analyze(&self, frame: &Frame) -> Result<EmotionReading, AnalyzerError> {
        let image = frame.image().to_rgb8();
        if image.width() == 0 || image.height() == 0 {
            return Err(AnalyzerError::MalformedInput("empty image".to_string()));
        }

        let (mean, contrast) = Self::luma_stats(&image);
        let scores = Self::score(mean, contrast);
        let dominant = scores
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, _)| name.clone())
            .ok_or_else(|| AnalyzerError::Inference("no scores produced".to_string()))?;

        Ok(EmotionReading::new(dominant, scores))
    }
}
