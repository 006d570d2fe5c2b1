use {crate::Modality, std::fmt};

/// Errors raised while building a stream configuration or querying its results.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidParameters(String),
    DuplicateModality(Modality),
    ModalityNotRequested(Modality),
    NotOpen(Modality),
    SessionClosed(Modality),
    Parse(String),
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameters(msg) => write!(f, "invalid parameters: {msg}"),
            ConfigError::DuplicateModality(modality) => {
                write!(f, "a {modality} stream is already requested")
            }
            ConfigError::ModalityNotRequested(modality) => {
                write!(f, "no {modality} stream was requested")
            }
            ConfigError::NotOpen(modality) => {
                write!(f, "{modality} intrinsics are only available once the session is open")
            }
            ConfigError::SessionClosed(modality) => {
                write!(f, "{modality} intrinsics were discarded when the session closed")
            }
            ConfigError::Parse(msg) => write!(f, "parse error: {msg}"),
            ConfigError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Errors raised by the capture device while opening or running a session.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceError {
    DeviceUnavailable(String),
    DeviceBusy(String),
    UnsupportedConfiguration(String),
    AlreadyOpen,
    Io(String),
    NotStreaming,
    Backend(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::DeviceUnavailable(msg) => write!(f, "device unavailable: {msg}"),
            DeviceError::DeviceBusy(serial) => write!(f, "device {serial} is busy"),
            DeviceError::UnsupportedConfiguration(msg) => {
                write!(f, "unsupported configuration: {msg}")
            }
            DeviceError::AlreadyOpen => write!(f, "configuration was already opened"),
            DeviceError::Io(msg) => write!(f, "io error: {msg}"),
            DeviceError::NotStreaming => write!(f, "session is not streaming"),
            DeviceError::Backend(msg) => write!(f, "device error: {msg}"),
        }
    }
}

impl std::error::Error for DeviceError {}

impl From<std::io::Error> for DeviceError {
    fn from(err: std::io::Error) -> Self {
        DeviceError::Io(err.to_string())
    }
}
