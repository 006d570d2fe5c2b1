use {
    crate::*,
    std::{fmt, str::FromStr},
};

pub const COLORMAP_SIZE: usize = 256;

/// Channel order of emitted triples. OpenCV images are BGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Bgr,
    Rgb,
}

impl ChannelOrder {
    pub fn arrange(&self, rgb: [u8; 3]) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => rgb,
            ChannelOrder::Bgr => [rgb[2], rgb[1], rgb[0]],
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOrder::Bgr => f.write_str("bgr"),
            ChannelOrder::Rgb => f.write_str("rgb"),
        }
    }
}

impl FromStr for ChannelOrder {
    type Err = ColormapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bgr" => Ok(ChannelOrder::Bgr),
            "rgb" => Ok(ChannelOrder::Rgb),
            other => Err(ColormapError::UnknownOrder(other.to_string())),
        }
    }
}

/// 256 quantized palette samples, stored as RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    rgb: [[u8; 3]; COLORMAP_SIZE],
}

impl Colormap {
    /// Sample `palette` uniformly at `i / 255` in index space and truncate each
    /// channel to `0..=255`.
    pub fn from_palette(palette: &Palette) -> Self {
        let span = (COLORMAP_SIZE - 1) as f64;
        let step = 1.0 / span;
        let mut rgb = [[0u8; 3]; COLORMAP_SIZE];
        for (i, entry) in rgb.iter_mut().enumerate() {
            // 255 * (1 / 255) falls short of 1.0
            let x = if i == COLORMAP_SIZE - 1 {
                1.0
            } else {
                i as f64 * step
            };
            *entry = palette
                .sample_scaled(span * x, span)
                .map(|v| (255.0 * v) as u8);
        }
        log::debug!("sampled {} palette into {} entries", palette.name, COLORMAP_SIZE);
        Self { rgb }
    }

    pub fn jet() -> Self {
        Self::from_palette(&JET)
    }

    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.rgb[index as usize]
    }

    pub fn get(&self, index: u8, order: ChannelOrder) -> [u8; 3] {
        order.arrange(self.rgb(index))
    }

    /// All entries in the requested channel order.
    pub fn entries(&self, order: ChannelOrder) -> [[u8; 3]; COLORMAP_SIZE] {
        self.rgb.map(|rgb| order.arrange(rgb))
    }
}
