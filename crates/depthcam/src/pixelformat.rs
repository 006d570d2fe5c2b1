use {
    crate::{ConfigError, Modality},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// Pixel layout of a stream, as understood by the capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Packed 24-bit color, blue first (OpenCV order).
    Bgr8,
    Rgb8,
    Yuyv,
    /// 16-bit linear depth units; multiply by the depth scale for meters.
    Z16,
    Y8,
}

impl PixelFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelFormat::Bgr8 => "bgr8",
            PixelFormat::Rgb8 => "rgb8",
            PixelFormat::Yuyv => "yuyv",
            PixelFormat::Z16 => "z16",
            PixelFormat::Y8 => "y8",
        }
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::Bgr8 | PixelFormat::Rgb8 => 3,
            PixelFormat::Yuyv | PixelFormat::Z16 => 2,
            PixelFormat::Y8 => 1,
        }
    }

    /// The modality whose sensor natively produces this format.
    pub fn native_modality(&self) -> Modality {
        match self {
            PixelFormat::Bgr8 | PixelFormat::Rgb8 | PixelFormat::Yuyv => Modality::Color,
            PixelFormat::Z16 => Modality::Depth,
            PixelFormat::Y8 => Modality::Infrared,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bgr8" => Ok(PixelFormat::Bgr8),
            "rgb8" => Ok(PixelFormat::Rgb8),
            "yuyv" => Ok(PixelFormat::Yuyv),
            "z16" => Ok(PixelFormat::Z16),
            "y8" => Ok(PixelFormat::Y8),
            other => Err(ConfigError::Parse(format!("unknown pixel format '{other}'"))),
        }
    }
}
