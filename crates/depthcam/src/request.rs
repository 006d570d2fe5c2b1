use {
    crate::{ConfigError, Modality, PixelFormat},
    base::Vec2,
};

/// One desired sensor stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamRequest {
    pub modality: Modality,
    pub size: Vec2<u32>,
    pub format: PixelFormat,
    pub frame_rate: u32,
}

impl StreamRequest {
    pub fn new(
        modality: Modality,
        width: u32,
        height: u32,
        format: PixelFormat,
        frame_rate: u32,
    ) -> Self {
        Self {
            modality,
            size: Vec2::new(width, height),
            format,
            frame_rate,
        }
    }

    pub fn color(width: u32, height: u32, format: PixelFormat, frame_rate: u32) -> Self {
        Self::new(Modality::Color, width, height, format, frame_rate)
    }

    pub fn depth(width: u32, height: u32, frame_rate: u32) -> Self {
        Self::new(Modality::Depth, width, height, PixelFormat::Z16, frame_rate)
    }

    pub fn infrared(width: u32, height: u32, frame_rate: u32) -> Self {
        Self::new(Modality::Infrared, width, height, PixelFormat::Y8, frame_rate)
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// Check that the dimensions and frame rate are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(ConfigError::InvalidParameters(format!(
                "{} stream size must be positive, got {}x{}",
                self.modality, self.size.x, self.size.y
            )));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::InvalidParameters(format!(
                "{} stream frame rate must be positive",
                self.modality
            )));
        }
        Ok(())
    }

    /// Bytes per second the stream occupies on the link.
    pub fn bandwidth(&self) -> u64 {
        self.size.area() * self.format.bytes_per_pixel() as u64 * self.frame_rate as u64
    }
}

/// Parse a `WIDTHxHEIGHT` resolution string such as `848x480`.
pub fn parse_resolution(s: &str) -> Result<Vec2<u32>, ConfigError> {
    let (width, height) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| ConfigError::Parse(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::Parse(format!("bad resolution '{s}': {e}")))
    };
    Ok(Vec2::new(parse(width)?, parse(height)?))
}
