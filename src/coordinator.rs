use crate::{
    capture::CaptureDevice,
    common::Frame,
    config::Configuration,
    error::AppError,
    pipeline::{
        analyzer::EmotionAnalyzer, sampler::FrameSampler, state::StateController,
        worker::InferenceWorker,
    },
    present::{Presenter, Tick},
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Wires the capture loop to the inference worker and runs both to
/// completion. The capture side never blocks on the worker: frames go out
/// through a bounded slot with drop-on-busy semantics and results come back
/// through a channel that is only ever polled.
pub struct Coordinator {
    configuration: Configuration,
    device: Box<dyn CaptureDevice>,
    analyzer: Arc<dyn EmotionAnalyzer>,
    presenter: Box<dyn Presenter>,
}

impl Coordinator {
    pub async fn run(mut self) -> Result<(), AppError> {
        let (frame_tx, frame_rx) =
            mpsc::channel::<Frame>(self.configuration.frame_channel_capacity);
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        let worker = InferenceWorker::new(self.analyzer.clone(), self.configuration.worker_wait());
        let worker_task = worker.spawn(frame_rx, result_tx, cancel_token.child_token());

        let mut sampler = FrameSampler::new(self.configuration.sample_stride);
        let mut controller =
            StateController::new(self.configuration.staleness_timeout(), Instant::now());

        let outcome = loop {
            let frame = match self.device.next_frame().await {
                Ok(Some(frame)) => frame.resized(
                    self.configuration.resize_width,
                    self.configuration.resize_height,
                ),
                Ok(None) => {
                    info!("Capture device closed its stream");
                    break Ok(());
                }
                Err(e) => break Err(AppError::Capture(e)),
            };

            sampler.offer(&frame, &frame_tx);
            controller.observe(&mut result_rx, Instant::now());

            match self.presenter.present(&frame, controller.state()).await {
                Ok(Tick::Continue) => {}
                Ok(Tick::Quit) => {
                    info!("Quit requested by viewer");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        // No graceful drain: an in-flight inference is abandoned at shutdown.
        cancel_token.cancel();
        worker_task.abort();
        outcome
    }

    pub fn builder(configuration: Configuration) -> CoordinatorBuilder {
        CoordinatorBuilder::new(configuration)
    }
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    device: Option<Box<dyn CaptureDevice>>,
    analyzer: Option<Arc<dyn EmotionAnalyzer>>,
    presenter: Option<Box<dyn Presenter>>,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            device: None,
            analyzer: None,
            presenter: None,
        }
    }

    // Overrides the sampling stride from the configuration.
    pub fn sample_stride(mut self, sample_stride: u64) -> Self {
        self.configuration.sample_stride = sample_stride;
        self
    }

    // Overrides the staleness timeout from the configuration.
    pub fn staleness_timeout_secs(mut self, staleness_timeout_secs: u64) -> Self {
        self.configuration.staleness_timeout_secs = staleness_timeout_secs;
        self
    }

    // Overrides the worker's frame-wait window from the configuration.
    pub fn worker_wait_secs(mut self, worker_wait_secs: u64) -> Self {
        self.configuration.worker_wait_secs = worker_wait_secs;
        self
    }

    pub fn device(mut self, device: Box<dyn CaptureDevice>) -> Self {
        self.device = Some(device);
        self
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn EmotionAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn build(self) -> Result<Coordinator, AppError> {
        Ok(Coordinator {
            device: self
                .device
                .ok_or(AppError::Pipeline("Capture device not set".to_string()))?,
            analyzer: self
                .analyzer
                .ok_or(AppError::Pipeline("Analyzer not set".to_string()))?,
            presenter: self
                .presenter
                .ok_or(AppError::Pipeline("Presenter not set".to_string()))?,
            configuration: self.configuration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::SyntheticCamera;
    use crate::error::{AnalyzerError, CaptureError};
    use crate::pipeline::state::{DETECTING_LABEL, PipelineState, STALE_LABEL};
    use crate::pipeline::types::EmotionReading;
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use std::sync::Mutex;
    use std::time::Duration;

    struct HappyAnalyzer {
        calls: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl EmotionAnalyzer for HappyAnalyzer {
        async fn analyze(&self, _frame: &Frame) -> Result<EmotionReading, AnalyzerError> {
            *self.calls.lock().unwrap() += 1;
            let mut scores = IndexMap::new();
            scores.insert("happy".to_string(), 91.2);
            scores.insert("neutral".to_string(), 8.8);
            Ok(EmotionReading::new("happy", scores))
        }
    }

    struct PanickingAnalyzer;

    #[async_trait]
    impl EmotionAnalyzer for PanickingAnalyzer {
        async fn analyze(&self, _frame: &Frame) -> Result<EmotionReading, AnalyzerError> {
            panic!("model blew up");
        }
    }

    #[derive(Clone)]
    struct RecordingPresenter {
        labels: Arc<Mutex<Vec<String>>>,
        quit_after: Option<usize>,
    }

    impl RecordingPresenter {
        fn new(quit_after: Option<usize>) -> Self {
            Self {
                labels: Arc::new(Mutex::new(Vec::new())),
                quit_after,
            }
        }
    }

    #[async_trait]
    impl Presenter for RecordingPresenter {
        async fn present(
            &mut self,
            _frame: &Frame,
            state: &PipelineState,
        ) -> Result<Tick, AppError> {
            let seen = {
                let mut labels = self.labels.lock().unwrap();
                labels.push(state.label.clone());
                labels.len()
            };
            if Some(seen) == self.quit_after {
                return Ok(Tick::Quit);
            }
            // Give the worker task room to run between frames.
            tokio::time::sleep(Duration::from_millis(2)).await;
            Ok(Tick::Continue)
        }
    }

    struct BrokenCamera;

    #[async_trait]
    impl CaptureDevice for BrokenCamera {
        async fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
            Err(CaptureError::Read("device disappeared".to_string()))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn pipeline_recognizes_emotion_before_stream_ends() {
        let calls = Arc::new(Mutex::new(0));
        let presenter = RecordingPresenter::new(None);
        let coordinator = Coordinator::builder(Configuration::default())
            .sample_stride(5)
            .device(Box::new(SyntheticCamera::new(64, 48, 40, Duration::ZERO)))
            .analyzer(Arc::new(HappyAnalyzer {
                calls: calls.clone(),
            }))
            .presenter(Box::new(presenter.clone()))
            .build()
            .expect("Failed to build coordinator");

        coordinator.run().await.unwrap();

        let labels = presenter.labels.lock().unwrap();
        assert_eq!(labels.len(), 40);
        assert!(*calls.lock().unwrap() >= 1);
        assert!(labels.contains(&"happy".to_string()));
        assert!(labels
            .iter()
            .all(|label| label == "happy" || label == DETECTING_LABEL));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn quit_signal_ends_the_loop_early() {
        let presenter = RecordingPresenter::new(Some(3));
        let coordinator = Coordinator::builder(Configuration::default())
            .device(Box::new(SyntheticCamera::new(64, 48, 1000, Duration::ZERO)))
            .analyzer(Arc::new(HappyAnalyzer {
                calls: Arc::new(Mutex::new(0)),
            }))
            .presenter(Box::new(presenter.clone()))
            .build()
            .expect("Failed to build coordinator");

        coordinator.run().await.unwrap();
        assert_eq!(presenter.labels.lock().unwrap().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn capture_failure_is_fatal_and_surfaces() {
        let coordinator = Coordinator::builder(Configuration::default())
            .device(Box::new(BrokenCamera))
            .analyzer(Arc::new(HappyAnalyzer {
                calls: Arc::new(Mutex::new(0)),
            }))
            .presenter(Box::new(RecordingPresenter::new(None)))
            .build()
            .expect("Failed to build coordinator");

        assert!(matches!(
            coordinator.run().await,
            Err(AppError::Capture(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn panicking_model_never_crashes_the_loop() {
        let presenter = RecordingPresenter::new(None);
        let coordinator = Coordinator::builder(Configuration::default())
            .sample_stride(5)
            .device(Box::new(SyntheticCamera::new(64, 48, 40, Duration::ZERO)))
            .analyzer(Arc::new(PanickingAnalyzer))
            .presenter(Box::new(presenter.clone()))
            .build()
            .expect("Failed to build coordinator");

        coordinator.run().await.unwrap();

        let labels = presenter.labels.lock().unwrap();
        assert_eq!(labels.len(), 40);
        assert!(labels.iter().all(|label| label == DETECTING_LABEL));
    }

    #[tokio::test]
    async fn staleness_fallback_reaches_the_presenter() {
        // Timeout of zero makes any silence stale, without real waiting.
        let presenter = RecordingPresenter::new(None);
        let coordinator = Coordinator::builder(Configuration::default())
            .staleness_timeout_secs(0)
            .sample_stride(1000)
            .device(Box::new(SyntheticCamera::new(64, 48, 5, Duration::ZERO)))
            .analyzer(Arc::new(HappyAnalyzer {
                calls: Arc::new(Mutex::new(0)),
            }))
            .presenter(Box::new(presenter.clone()))
            .build()
            .expect("Failed to build coordinator");

        coordinator.run().await.unwrap();

        let labels = presenter.labels.lock().unwrap();
        assert!(labels.iter().any(|label| label == STALE_LABEL));
    }

    #[tokio::test]
    async fn build_fails_without_a_device() {
        let result = Coordinator::builder(Configuration::default())
            .analyzer(Arc::new(HappyAnalyzer {
                calls: Arc::new(Mutex::new(0)),
            }))
            .presenter(Box::new(RecordingPresenter::new(None)))
            .build();
        assert!(result.is_err());
    }
}
