use crate::common::Frame;
use crate::pipeline::analyzer::EmotionAnalyzer;
use crate::pipeline::types::AnalysisResult;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Long-lived task sitting between the frame slot and the result channel.
/// Inference failures and panics are converted to `AnalysisResult::Failed`
/// here; nothing the model does can terminate the worker or reach the
/// capture loop.
pub struct InferenceWorker {
    analyzer: Arc<dyn EmotionAnalyzer>,
    wait: Duration,
}

impl InferenceWorker {
    pub fn new(analyzer: Arc<dyn EmotionAnalyzer>, wait: Duration) -> Self {
        Self { analyzer, wait }
    }

    pub fn spawn(
        self,
        frame_rx: mpsc::Receiver<Frame>,
        result_tx: mpsc::UnboundedSender<AnalysisResult>,
        cancel_token: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(frame_rx, result_tx, cancel_token))
    }

    async fn run(
        self,
        mut frame_rx: mpsc::Receiver<Frame>,
        result_tx: mpsc::UnboundedSender<AnalysisResult>,
        cancel_token: CancellationToken,
    ) {
        info!("Inference worker started");
        loop {
            let received = tokio::select! {
                _ = cancel_token.cancelled() => break,
                received = timeout(self.wait, frame_rx.recv()) => received,
            };
            let frame = match received {
                // The wait only exists so cancellation is re-checked
                // periodically; an empty slot is not an error.
                Err(_) => continue,
                Ok(None) => break,
                Ok(Some(frame)) => frame,
            };
            // Exactly one result per consumed frame.
            if result_tx.send(self.analyze_guarded(&frame).await).is_err() {
                break;
            }
        }
        info!("Inference worker stopped");
    }

    async fn analyze_guarded(&self, frame: &Frame) -> AnalysisResult {
        let analysis = AssertUnwindSafe(self.analyzer.analyze(frame)).catch_unwind();
        match analysis.await {
            Ok(Ok(reading)) => AnalysisResult::Reading(reading),
            Ok(Err(e)) => {
                error!("Inference failed on frame {}: {}", frame.id(), e);
                AnalysisResult::Failed
            }
            Err(_) => {
                error!("Inference panicked on frame {}", frame.id());
                AnalysisResult::Failed
            }
        }
    }
}
