use {
    crate::*,
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

const DEFAULT_FRAME_RATE: u32 = 30;

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

/// A stream as written in a configuration file.
///
/// ```json
/// { "modality": "depth", "width": 640, "height": 480, "format": "z16", "frame_rate": 30 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub modality: Modality,
    pub width: u32,
    pub height: u32,
    /// Defaults to the modality's usual format (bgr8, z16, y8).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<PixelFormat>,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

impl StreamEntry {
    pub fn to_request(&self) -> StreamRequest {
        let format = self.format.unwrap_or(match self.modality {
            Modality::Color => PixelFormat::Bgr8,
            Modality::Depth => PixelFormat::Z16,
            Modality::Infrared => PixelFormat::Y8,
        });
        StreamRequest::new(self.modality, self.width, self.height, format, self.frame_rate)
    }
}

impl From<StreamRequest> for StreamEntry {
    fn from(request: StreamRequest) -> Self {
        Self {
            modality: request.modality,
            width: request.size.x,
            height: request.size.y,
            format: Some(request.format),
            frame_rate: request.frame_rate,
        }
    }
}

/// Everything needed to open a capture session, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default)]
    pub device: DeviceSelector,
    #[serde(default)]
    pub streams: Vec<StreamEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_to: Option<PathBuf>,
}

impl CaptureConfig {
    /// Streams used by the intrinsics tool: color 848x480 bgr8 and depth 640x360, 30 fps.
    pub fn intrinsics_preset() -> Self {
        Self::default()
            .with_stream(StreamRequest::color(848, 480, PixelFormat::Bgr8, 30))
            .with_stream(StreamRequest::depth(640, 360, 30))
    }

    /// Streams used by the recorder: depth and color 640x480, 30 fps.
    pub fn recording_preset() -> Self {
        Self::default()
            .with_stream(StreamRequest::depth(640, 480, 30))
            .with_stream(StreamRequest::color(640, 480, PixelFormat::Bgr8, 30))
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("cannot read {}: {}", path.display(), e)))?;
        log::debug!("loaded capture config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_device(mut self, device: DeviceSelector) -> Self {
        self.device = device;
        self
    }

    /// Add a stream, replacing any existing entry for the same modality.
    pub fn with_stream(mut self, request: StreamRequest) -> Self {
        self.streams.retain(|entry| entry.modality != request.modality);
        self.streams.push(request.into());
        self
    }

    pub fn with_record_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.record_to = Some(path.into());
        self
    }

    pub fn requests(&self) -> Vec<StreamRequest> {
        self.streams.iter().map(StreamEntry::to_request).collect()
    }

    pub fn stream(&self, modality: Modality) -> Option<&StreamEntry> {
        self.streams.iter().find(|entry| entry.modality == modality)
    }
}
