use {
    crate::ConfigError,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// A sensing channel of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Color,
    Depth,
    /// The first (left) infrared imager.
    Infrared,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Color, Modality::Depth, Modality::Infrared];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Color => "color",
            Modality::Depth => "depth",
            Modality::Infrared => "infrared",
        }
    }

    /// Heading used by the intrinsics report.
    pub fn title(&self) -> &'static str {
        match self {
            Modality::Color => "Color (RGB) Camera",
            Modality::Depth => "Depth Camera",
            Modality::Infrared => "Infrared Camera",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" | "rgb" => Ok(Modality::Color),
            "depth" => Ok(Modality::Depth),
            "infrared" | "ir" => Ok(Modality::Infrared),
            other => Err(ConfigError::Parse(format!("unknown modality '{other}'"))),
        }
    }
}
