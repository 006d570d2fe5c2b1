//! Depth to false-color lookup.
//!
//! Distances inside `near..far` map linearly onto the colormap, `near` to the
//! last entry and `far` to the first, so close objects render red under jet.

use {crate::*, base::Vec2};

/// Raw readings at or below this value are sensor dropouts.
pub const INVALID_RAW_DEPTH: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    /// Meters mapped to index 255.
    pub near: f32,
    /// Meters mapped to index 0.
    pub far: f32,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            near: 0.3,
            far: 3.0,
        }
    }
}

impl DepthRange {
    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// Colormap index for a distance in meters, clamped to `0..=255`.
    pub fn index_for(&self, meters: f32) -> u8 {
        let slope = -255.0 / (self.far - self.near);
        let intercept = 255.0 - slope * self.near;
        // truncates toward zero; NaN lands on 0
        let index = (slope * meters + intercept) as i32;
        index.clamp(0, 255) as u8
    }

    /// Color for a raw depth reading, black for invalid readings.
    pub fn colorize(
        &self,
        colormap: &Colormap,
        raw: u16,
        depth_scale: f32,
        order: ChannelOrder,
    ) -> [u8; 3] {
        if raw <= INVALID_RAW_DEPTH {
            return [0, 0, 0];
        }
        colormap.get(self.index_for(depth_scale * raw as f32), order)
    }

    /// Colorize a whole Z16 image into packed 3-byte pixels.
    pub fn colorize_image(
        &self,
        colormap: &Colormap,
        size: Vec2<u32>,
        data: &[u16],
        depth_scale: f32,
        order: ChannelOrder,
    ) -> Result<Vec<u8>, ColormapError> {
        let expected = size.x as usize * size.y as usize;
        if data.len() != expected {
            return Err(ColormapError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let mut buf = Vec::with_capacity(expected * 3);
        for &raw in data {
            buf.extend_from_slice(&self.colorize(colormap, raw, depth_scale, order));
        }
        Ok(buf)
    }
}
