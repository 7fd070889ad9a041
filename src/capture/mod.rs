pub mod device;
pub mod synthetic;

pub use device::CaptureDevice;
pub use synthetic::SyntheticCamera;
