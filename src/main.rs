use moodcam::pipeline::analyzer::LumaMoodAnalyzer;
use moodcam::{Configuration, Coordinator, LogPresenter, SyntheticCamera};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), moodcam::AppError> {
    init_logging();
    let configuration = Configuration::load()?;

    // Synthetic 10-second capture at ~30fps; swap in a real device and model
    // behind the same traits.
    let camera = SyntheticCamera::new(
        configuration.resize_width,
        configuration.resize_height,
        300,
        Duration::from_millis(33),
    );

    Coordinator::builder(configuration)
        .device(Box::new(camera))
        .analyzer(Arc::new(LumaMoodAnalyzer::new()))
        .presenter(Box::new(LogPresenter::new()))
        .build()?
        .run()
        .await
}
