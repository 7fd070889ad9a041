use crate::common::Frame;
use crate::error::CaptureError;
use async_trait::async_trait;
use chrono::Utc;
use image::{DynamicImage, ImageBuffer, Rgb};
use rand::Rng;
use std::time::Duration;

use super::CaptureDevice;

/// Stand-in camera producing a drifting gradient with a little sensor noise.
/// Ends its stream after a fixed number of frames, which is how the demo
/// binary terminates.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    frames_remaining: u64,
    frame_interval: Duration,
    tick: u64,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32, frame_count: u64, frame_interval: Duration) -> Self {
        Self {
            width,
            height,
            frames_remaining: frame_count,
            frame_interval,
            tick: 0,
        }
    }

    fn render(&mut self) -> DynamicImage {
        let mut rng = rand::rng();
        let phase = (self.tick % 256) as u32;
        let buffer = ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let base = ((x + y + phase) % 256) as u8;
            let noise: u8 = rng.random_range(0..8);
            Rgb([base.saturating_add(noise), base, base.saturating_sub(noise)])
        });
        DynamicImage::ImageRgb8(buffer)
    }
}

#[async_trait]
impl CaptureDevice for SyntheticCamera {
    async fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
        if self.frames_remaining == 0 {
            return Ok(None);
        }
        self.frames_remaining -= 1;
        self.tick += 1;
        if !self.frame_interval.is_zero() {
            tokio::time::sleep(self.frame_interval).await;
        }
        Ok(Some(Frame::new(self.render(), Utc::now())))
    }
}
