pub mod analysis_result;

pub use analysis_result::{AnalysisResult, EmotionReading};
