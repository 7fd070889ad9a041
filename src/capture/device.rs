use crate::common::Frame;
use crate::error::CaptureError;
use async_trait::async_trait;

/// Boundary to the physical capture device. One physical read per call.
///
/// `Ok(None)` means the device closed its stream and the pipeline should shut
/// down. An `Err` is a device fault and is fatal to the main loop.
#[async_trait]
pub trait CaptureDevice: Send {
    async fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError>;
}
