//! Depth-camera stream configuration.
//!
//! Build a list of [`StreamRequest`]s on a [`StreamConfigurator`], open it
//! against a [`CaptureDevice`] and read the negotiated [`StreamIntrinsics`]
//! from the resulting [`Session`]. Backends: a simulated D400-class camera,
//! and Intel RealSense hardware behind the `realsense` feature.

pub mod config;
pub mod configurator;
pub mod device;
pub mod error;
pub mod fov;
pub mod frame;
pub mod intrinsics;
mod lease;
pub mod modality;
pub mod pixelformat;
pub mod report;
pub mod request;
pub mod session;
pub mod simulated;

#[cfg(feature = "realsense")]
pub mod realsense;

pub use config::{CaptureConfig, StreamEntry};
pub use configurator::{ConfigState, StreamConfigurator};
pub use device::{CaptureDevice, DeviceInfo, DeviceSelector, Negotiated, create_device};
pub use error::{ConfigError, DeviceError};
pub use fov::{FovConvention, pinhole_fov, principal_point_fov};
pub use frame::{FrameInfo, FrameSet};
pub use intrinsics::{Distortion, DistortionModel, StreamIntrinsics};
pub use modality::Modality;
pub use pixelformat::PixelFormat;
pub use request::{StreamRequest, parse_resolution};
pub use session::Session;
pub use simulated::{SimulatedDevice, SimulatedStats};

#[cfg(feature = "realsense")]
pub use realsense::RealsenseDevice;
