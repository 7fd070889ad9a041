pub mod overlay;

pub use overlay::overlay_lines;

use crate::common::Frame;
use crate::error::AppError;
use crate::pipeline::state::PipelineState;
use async_trait::async_trait;
use tracing::{debug, info};

/// Whether the viewer asked to quit during this render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Quit,
}

/// Boundary to the display surface. Called once per captured frame whether or
/// not the state changed; rendering must not mutate the state it is handed.
#[async_trait]
pub trait Presenter: Send {
    async fn present(&mut self, frame: &Frame, state: &PipelineState) -> Result<Tick, AppError>;
}

/// Display surface for headless runs: logs the overlay instead of drawing it.
/// Only label changes are worth an info line; per-frame detail stays at debug.
pub struct LogPresenter {
    last_label: Option<String>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self { last_label: None }
    }
}

impl Default for LogPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Presenter for LogPresenter {
    async fn present(&mut self, frame: &Frame, state: &PipelineState) -> Result<Tick, AppError> {
        if self.last_label.as_deref() != Some(state.label.as_str()) {
            info!("{}", overlay_lines(state).join(" | "));
            self.last_label = Some(state.label.clone());
        }
        debug!("Presented frame {} with label {}", frame.id(), state.label);
        Ok(Tick::Continue)
    }
}
