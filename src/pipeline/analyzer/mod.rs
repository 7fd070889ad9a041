pub mod luma_mood;

pub use luma_mood::LumaMoodAnalyzer;

use crate::common::Frame;
use crate::error::AnalyzerError;
use crate::pipeline::types::EmotionReading;
use async_trait::async_trait;

/// Boundary to the emotion model. Implementations may be arbitrarily slow or
/// failure-prone; the worker absorbs both.
#[async_trait]
pub trait EmotionAnalyzer: Send + Sync {
    async fn analyze(&self, frame: &Frame) -> Result<EmotionReading, AnalyzerError>;
}
