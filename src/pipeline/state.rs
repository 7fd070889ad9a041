use crate::pipeline::types::AnalysisResult;
use indexmap::IndexMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub const DETECTING_LABEL: &str = "Detecting...";
pub const STALE_LABEL: &str = "No response";

/// What the viewer sees: the current label, the score breakdown in display
/// order, and when the last real result landed. Owned exclusively by the
/// `StateController`; presentation only borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    pub label: String,
    pub scores: IndexMap<String, f32>,
    pub last_update: Instant,
}

impl PipelineState {
    fn initial(started_at: Instant) -> Self {
        Self {
            label: DETECTING_LABEL.to_string(),
            scores: IndexMap::new(),
            last_update: started_at,
        }
    }
}

/// Applies results and the staleness fallback. All clock inputs are explicit
/// arguments so the policy can be exercised with synthetic timestamps.
pub struct StateController {
    state: PipelineState,
    staleness_timeout: Duration,
}

impl StateController {
    pub fn new(staleness_timeout: Duration, started_at: Instant) -> Self {
        Self {
            state: PipelineState::initial(started_at),
            staleness_timeout,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// One main-loop iteration: drain at most one pending result, then apply
    /// the staleness fallback. Never waits on the worker.
    pub fn observe(
        &mut self,
        result_rx: &mut mpsc::UnboundedReceiver<AnalysisResult>,
        now: Instant,
    ) {
        if let Ok(result) = result_rx.try_recv() {
            self.apply(result, now);
        }
        self.tick(now);
    }

    pub fn apply(&mut self, result: AnalysisResult, now: Instant) {
        match result {
            AnalysisResult::Reading(reading) => {
                self.state.label = reading.dominant;
                self.state.scores = reading.scores;
                self.state.last_update = now;
            }
            // A failed analysis is "no answer yet", not an error state. The
            // staleness clock keeps running from the last real result.
            AnalysisResult::Failed => {
                self.state.label = DETECTING_LABEL.to_string();
                self.state.scores.clear();
            }
        }
    }

    /// Level-triggered: re-applied every iteration while the worker is
    /// silent, superseded by the next successful reading.
    pub fn tick(&mut self, now: Instant) {
        if now.saturating_duration_since(self.state.last_update) > self.staleness_timeout {
            self.state.label = STALE_LABEL.to_string();
            self.state.scores.clear();
        }
    }
}
