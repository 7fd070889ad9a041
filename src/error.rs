use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Capture Error: {0}")]
    Capture(#[from] CaptureError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
    #[error("Presentation Error: {0}")]
    Present(String),
}

// Capture device failures end the main loop; they are never retried here.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to read frame from device: {0}")]
    Read(String),
    #[error("Capture device unavailable: {0}")]
    Unavailable(String),
}

// Raised by the model behind the worker boundary; absorbed there, never
// propagated to the main loop.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Malformed input frame: {0}")]
    MalformedInput(String),
}
