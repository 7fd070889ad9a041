use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Frames are resized to this width before sampling and display.
    pub resize_width: u32,
    pub resize_height: u32,
    /// One frame in every `sample_stride` captured frames is offered to the
    /// inference worker.
    pub sample_stride: u64,
    pub frame_channel_capacity: usize,
    /// How long the worker waits for a frame before re-checking cancellation.
    pub worker_wait_secs: u64,
    /// Silence longer than this downgrades the display to "No response".
    pub staleness_timeout_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            resize_width: 600,
            resize_height: 400,
            sample_stride: 15,
            frame_channel_capacity: 2,
            worker_wait_secs: 5,
            staleness_timeout_secs: 10,
        }
    }
}

impl Configuration {
    /// Loads overrides from an optional `moodcam.toml` and `MOODCAM_*`
    /// environment variables on top of the defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("moodcam").required(false))
            .add_source(config::Environment::with_prefix("MOODCAM"))
            .build()?
            .try_deserialize()
    }

    pub fn worker_wait(&self) -> Duration {
        Duration::from_secs(self.worker_wait_secs)
    }

    pub fn staleness_timeout(&self) -> Duration {
        Duration::from_secs(self.staleness_timeout_secs)
    }
}
