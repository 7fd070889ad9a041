pub mod analyzer;
pub mod sampler;
pub mod state;
pub mod types;
pub mod worker;

pub use analyzer::EmotionAnalyzer;
pub use sampler::FrameSampler;
pub use state::{PipelineState, StateController};
pub use types::{AnalysisResult, EmotionReading};
pub use worker::InferenceWorker;
