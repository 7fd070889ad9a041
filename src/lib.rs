pub mod capture;
pub mod common;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod pipeline;
pub mod present;

pub use capture::{CaptureDevice, SyntheticCamera};
pub use common::Frame;
pub use config::Configuration;
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::{AnalyzerError, AppError, CaptureError};
pub use pipeline::{
    AnalysisResult, EmotionAnalyzer, EmotionReading, FrameSampler, InferenceWorker, PipelineState,
    StateController,
};
pub use present::{LogPresenter, Presenter, Tick};
