use chrono::{DateTime, Utc};
use image::DynamicImage;
use image::imageops::FilterType;
use std::sync::Arc;
use uuid::Uuid;

/// One captured image. The pixel buffer is immutable once constructed, so
/// clones share it; handing a clone to the worker leaves the producer free to
/// move on to the next capture.
#[derive(Clone)]
pub struct Frame {
    image: Arc<DynamicImage>,
    captured_at: DateTime<Utc>,
    frame_id: Uuid,
}

impl Frame {
    pub fn new(image: DynamicImage, captured_at: DateTime<Utc>) -> Self {
        Self {
            image: Arc::new(image),
            captured_at,
            frame_id: Uuid::new_v4(),
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn id(&self) -> Uuid {
        self.frame_id
    }

    /// Returns a new frame scaled to the display resolution. Keeps the
    /// original timestamp and id since it is the same capture.
    pub fn resized(&self, width: u32, height: u32) -> Frame {
        if self.image.width() == width && self.image.height() == height {
            return self.clone();
        }
        Frame {
            image: Arc::new(self.image.resize_exact(width, height, FilterType::Triangle)),
            captured_at: self.captured_at,
            frame_id: self.frame_id,
        }
    }
}
