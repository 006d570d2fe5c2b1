use {
    crate::{lease::DeviceLease, *},
    std::{
        fs::OpenOptions,
        path::{Path, PathBuf},
        sync::{Arc, Mutex},
    },
};

/// Lifecycle of a configuration. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    Unopened,
    Open,
    Closed,
}

// state shared between a configurator and the session it handed out
#[derive(Debug)]
pub(crate) struct SessionLink {
    pub(crate) state: ConfigState,
    pub(crate) streams: Vec<StreamIntrinsics>,
}

pub(crate) type SharedLink = Arc<Mutex<SessionLink>>;

/// Collects stream requests and opens them against a capture device.
pub struct StreamConfigurator {
    device: Option<Box<dyn CaptureDevice>>,
    requests: Vec<StreamRequest>,
    record_to: Option<PathBuf>,
    link: SharedLink,
}

impl StreamConfigurator {
    pub fn new(device: Box<dyn CaptureDevice>) -> Self {
        Self {
            device: Some(device),
            requests: Vec::new(),
            record_to: None,
            link: Arc::new(Mutex::new(SessionLink {
                state: ConfigState::Unopened,
                streams: Vec::new(),
            })),
        }
    }

    /// Build a configurator from the streams listed in `config`.
    ///
    /// The config's recording target is not applied; call [`Self::record_to`].
    pub fn from_config(
        config: &CaptureConfig,
        device: Box<dyn CaptureDevice>,
    ) -> Result<Self, ConfigError> {
        let mut configurator = Self::new(device);
        for request in config.requests() {
            configurator.add_stream(request)?;
        }
        Ok(configurator)
    }

    /// Register a stream. At most one stream per modality.
    pub fn add_stream(&mut self, request: StreamRequest) -> Result<(), ConfigError> {
        if self.is_requested(request.modality) {
            return Err(ConfigError::DuplicateModality(request.modality));
        }
        request.validate()?;
        log::debug!(
            "requesting {} {}x{} {} @ {} fps",
            request.modality,
            request.size.x,
            request.size.y,
            request.format,
            request.frame_rate
        );
        self.requests.push(request);
        Ok(())
    }

    pub fn with_stream(mut self, request: StreamRequest) -> Result<Self, ConfigError> {
        self.add_stream(request)?;
        Ok(self)
    }

    pub fn requests(&self) -> &[StreamRequest] {
        &self.requests
    }

    pub fn is_requested(&self, modality: Modality) -> bool {
        self.requests.iter().any(|r| r.modality == modality)
    }

    pub fn state(&self) -> ConfigState {
        self.link.lock().unwrap_or_else(|e| e.into_inner()).state
    }

    /// Ask the device to record the session to `path` in its native container.
    ///
    /// Only allowed before [`Self::open`].
    pub fn record_to(&mut self, path: impl AsRef<Path>) -> Result<(), DeviceError> {
        if self.state() != ConfigState::Unopened {
            return Err(DeviceError::AlreadyOpen);
        }
        let path = path.as_ref();
        probe_writable(path)?;
        log::info!("recording to {}", path.display());
        self.record_to = Some(path.to_path_buf());
        Ok(())
    }

    pub fn recording_path(&self) -> Option<&Path> {
        self.record_to.as_deref()
    }

    /// Negotiate all requested streams and start the session.
    ///
    /// On failure the configurator stays `Unopened` and may be opened again.
    pub fn open(&mut self) -> Result<Session, DeviceError> {
        if self.state() != ConfigState::Unopened {
            return Err(DeviceError::AlreadyOpen);
        }
        let mut device = self.device.take().ok_or(DeviceError::AlreadyOpen)?;

        let (info, lease, negotiated) =
            match start_device(device.as_mut(), &self.requests, self.record_to.as_deref()) {
                Ok(started) => started,
                Err(error) => {
                    log::warn!("failed to open session: {}", error);
                    self.device = Some(device);
                    return Err(error);
                }
            };

        {
            let mut link = self.link.lock().unwrap_or_else(|e| e.into_inner());
            link.state = ConfigState::Open;
            link.streams = negotiated.streams.clone();
        }
        log::info!(
            "opened {} ({}) with {} stream(s)",
            info.name,
            info.serial,
            negotiated.streams.len()
        );

        Ok(Session::new(
            device,
            lease,
            info,
            self.requests.iter().map(|r| r.modality).collect(),
            negotiated,
            self.record_to.clone(),
            Arc::clone(&self.link),
        ))
    }

    /// Negotiated intrinsics, available while the handed-out session is open.
    pub fn intrinsics(&self, modality: Modality) -> Result<StreamIntrinsics, ConfigError> {
        if !self.is_requested(modality) {
            return Err(ConfigError::ModalityNotRequested(modality));
        }
        let link = self.link.lock().unwrap_or_else(|e| e.into_inner());
        match link.state {
            ConfigState::Unopened => Err(ConfigError::NotOpen(modality)),
            ConfigState::Closed => Err(ConfigError::SessionClosed(modality)),
            ConfigState::Open => link
                .streams
                .iter()
                .find(|s| s.modality == modality)
                .copied()
                .ok_or(ConfigError::ModalityNotRequested(modality)),
        }
    }
}

fn start_device(
    device: &mut dyn CaptureDevice,
    requests: &[StreamRequest],
    record_to: Option<&Path>,
) -> Result<(DeviceInfo, DeviceLease, Negotiated), DeviceError> {
    if requests.is_empty() {
        return Err(DeviceError::UnsupportedConfiguration(
            "no streams requested".to_string(),
        ));
    }
    let info = device.info()?;
    let lease = DeviceLease::acquire(&info.serial)?;

    // the device may have partially started, so release it on every error path
    let negotiated = match device.start(requests, record_to) {
        Ok(negotiated) => negotiated,
        Err(error) => {
            device.stop();
            return Err(error);
        }
    };
    match check_negotiated(requests, negotiated) {
        Ok(negotiated) => Ok((info, lease, negotiated)),
        Err(error) => {
            device.stop();
            Err(error)
        }
    }
}

// keep only requested streams, in request order, and insist on exact resolutions
fn check_negotiated(
    requests: &[StreamRequest],
    negotiated: Negotiated,
) -> Result<Negotiated, DeviceError> {
    let mut streams = Vec::with_capacity(requests.len());
    for request in requests {
        let stream = negotiated
            .streams
            .iter()
            .find(|s| s.modality == request.modality)
            .ok_or_else(|| {
                DeviceError::UnsupportedConfiguration(format!(
                    "device did not start the requested {} stream",
                    request.modality
                ))
            })?;
        if stream.resolution != request.size {
            return Err(DeviceError::UnsupportedConfiguration(format!(
                "{} stream negotiated {}x{} instead of {}x{}",
                request.modality,
                stream.resolution.x,
                stream.resolution.y,
                request.size.x,
                request.size.y
            )));
        }
        streams.push(*stream);
    }
    Ok(Negotiated {
        streams,
        depth_scale: negotiated.depth_scale,
    })
}

// create-and-remove probe, so a missing directory or read-only target fails up front
fn probe_writable(path: &Path) -> Result<(), DeviceError> {
    if path.is_dir() {
        return Err(DeviceError::Io(format!(
            "{} is a directory",
            path.display()
        )));
    }
    let existed = path.exists();
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| DeviceError::Io(format!("cannot write {}: {}", path.display(), e)))?;
    if !existed {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
