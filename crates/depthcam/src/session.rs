use {
    crate::{
        configurator::{ConfigState, SharedLink},
        lease::DeviceLease,
        *,
    },
    std::{
        path::{Path, PathBuf},
        time::Duration,
    },
};

/// An open capture session. Owns the device until closed or dropped.
pub struct Session {
    device: Option<Box<dyn CaptureDevice>>,
    lease: Option<DeviceLease>,
    info: DeviceInfo,
    requested: Vec<Modality>,
    streams: Vec<StreamIntrinsics>,
    depth_scale: Option<f32>,
    recording: Option<PathBuf>,
    link: SharedLink,
}

impl Session {
    pub(crate) fn new(
        device: Box<dyn CaptureDevice>,
        lease: DeviceLease,
        info: DeviceInfo,
        requested: Vec<Modality>,
        negotiated: Negotiated,
        recording: Option<PathBuf>,
        link: SharedLink,
    ) -> Self {
        Self {
            device: Some(device),
            lease: Some(lease),
            info,
            requested,
            streams: negotiated.streams,
            depth_scale: negotiated.depth_scale,
            recording,
            link,
        }
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Negotiated intrinsics of every requested stream, in request order.
    /// Empty once the session is closed.
    pub fn streams(&self) -> &[StreamIntrinsics] {
        &self.streams
    }

    pub fn intrinsics(&self, modality: Modality) -> Result<&StreamIntrinsics, ConfigError> {
        if !self.requested.contains(&modality) {
            return Err(ConfigError::ModalityNotRequested(modality));
        }
        if !self.is_open() {
            return Err(ConfigError::SessionClosed(modality));
        }
        self.streams
            .iter()
            .find(|s| s.modality == modality)
            .ok_or(ConfigError::ModalityNotRequested(modality))
    }

    /// Meters per depth unit, when a depth stream is running.
    pub fn depth_scale(&self) -> Option<f32> {
        self.depth_scale
    }

    pub fn recording_path(&self) -> Option<&Path> {
        self.recording.as_deref()
    }

    /// Pull the next frame set; recording backends append it to the target file.
    pub fn wait_for_frames(&mut self, timeout: Duration) -> Result<FrameSet, DeviceError> {
        let device = self.device.as_mut().ok_or(DeviceError::NotStreaming)?;
        device.wait_for_frames(timeout)
    }

    /// Stop streaming and release the device. Calling it again does nothing.
    pub fn close(&mut self) {
        let Some(mut device) = self.device.take() else {
            return;
        };
        device.stop();
        self.lease.take();
        self.streams.clear();
        self.depth_scale = None;

        let mut link = self.link.lock().unwrap_or_else(|e| e.into_inner());
        link.state = ConfigState::Closed;
        link.streams.clear();
        log::info!("closed session on {} ({})", self.info.name, self.info.serial);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
