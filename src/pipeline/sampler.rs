use crate::common::Frame;
use tokio::sync::mpsc;
use tracing::debug;

/// Decides, once per captured frame, whether to hand the frame to the
/// inference worker. Submission is non-blocking: if the frame is not due per
/// the stride, or the worker still has an undelivered frame, the frame is
/// dropped and the capture loop carries on at full rate.
pub struct FrameSampler {
    counter: u64,
    stride: u64,
}

impl FrameSampler {
    pub fn new(stride: u64) -> Self {
        Self {
            counter: 0,
            stride: stride.max(1),
        }
    }

    pub fn frames_seen(&self) -> u64 {
        self.counter
    }

    /// Returns true if the frame was handed to the worker.
    ///
    /// The channel holds up to two frames, but a new frame is only offered
    /// while the channel is completely empty, so at most one frame is in
    /// flight to the worker at a time.
    pub fn offer(&mut self, frame: &Frame, frame_tx: &mpsc::Sender<Frame>) -> bool {
        self.counter += 1;
        if self.counter % self.stride != 0 {
            return false;
        }
        if frame_tx.capacity() < frame_tx.max_capacity() {
            debug!("Worker busy, dropping frame {}", frame.id());
            return false;
        }
        match frame_tx.try_send(frame.clone()) {
            Ok(()) => true,
            Err(e) => {
                debug!("Frame slot rejected frame {}: {}", frame.id(), e);
                false
            }
        }
    }
}
