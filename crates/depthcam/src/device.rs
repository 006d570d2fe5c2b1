use {
    crate::*,
    serde::{Deserialize, Serialize},
    std::{path::Path, time::Duration},
};

/// Identity of a physical capture device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub name: String,
    pub serial: String,
    pub firmware: Option<String>,
    pub usb_type: Option<String>,
}

/// What the device agreed to stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiated {
    pub streams: Vec<StreamIntrinsics>,
    /// Meters per depth unit, present when a depth stream is running.
    pub depth_scale: Option<f32>,
}

/// Capability interface over the vendor camera SDK.
///
/// Calls are blocking. `start` must run on the same thread as
/// `wait_for_frames` for backends with thread affinity (librealsense2).
pub trait CaptureDevice: Send {
    /// Identify the device; fails with `DeviceUnavailable` when no hardware matches.
    fn info(&self) -> Result<DeviceInfo, DeviceError>;

    /// Negotiate and start all requested streams, recording to `record_to` if given.
    fn start(
        &mut self,
        requests: &[StreamRequest],
        record_to: Option<&Path>,
    ) -> Result<Negotiated, DeviceError>;

    /// Block until the next composite frame arrives.
    fn wait_for_frames(&mut self, timeout: Duration) -> Result<FrameSet, DeviceError>;

    /// Stop streaming and release the hardware. Safe to call when not started.
    fn stop(&mut self);
}

/// Which backend to open.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum DeviceSelector {
    #[default]
    Simulated,
    Realsense {
        #[serde(default)]
        serial: Option<String>,
    },
}

impl DeviceSelector {
    /// Real hardware when built with RealSense support, the simulator otherwise.
    pub fn detect() -> Self {
        if cfg!(feature = "realsense") {
            DeviceSelector::Realsense { serial: None }
        } else {
            DeviceSelector::Simulated
        }
    }
}

pub fn create_device(selector: &DeviceSelector) -> Result<Box<dyn CaptureDevice>, DeviceError> {
    match selector {
        DeviceSelector::Simulated => Ok(Box::new(SimulatedDevice::new())),
        #[cfg(feature = "realsense")]
        DeviceSelector::Realsense { serial } => {
            Ok(Box::new(realsense::RealsenseDevice::new(serial.clone())?))
        }
        #[cfg(not(feature = "realsense"))]
        DeviceSelector::Realsense { .. } => Err(DeviceError::DeviceUnavailable(
            "built without the realsense feature".to_string(),
        )),
    }
}
