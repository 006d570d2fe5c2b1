use {
    crate::{FovConvention, Modality, PixelFormat, fov},
    base::Vec2,
    serde::{Deserialize, Serialize},
};

/// Lens distortion model tag as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistortionModel {
    #[default]
    None,
    BrownConrady,
    ModifiedBrownConrady,
    InverseBrownConrady,
    KannalaBrandt4,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distortion {
    pub model: DistortionModel,
    pub coeffs: [f32; 5],
}

/// Negotiated geometry of one open stream. Immutable for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamIntrinsics {
    pub modality: Modality,
    pub format: PixelFormat,
    pub frame_rate: u32,
    pub resolution: Vec2<u32>,
    pub principal_point: Vec2<f32>,
    pub focal_length: Vec2<f32>,
    pub distortion: Distortion,
}

impl StreamIntrinsics {
    pub fn width(&self) -> u32 {
        self.resolution.x
    }

    pub fn height(&self) -> u32 {
        self.resolution.y
    }

    /// (horizontal, vertical) field of view in degrees.
    pub fn field_of_view(&self, convention: FovConvention) -> Vec2<f64> {
        match convention {
            FovConvention::Pinhole => fov::pinhole_fov(self.resolution, self.focal_length),
            FovConvention::PrincipalPoint => fov::principal_point_fov(
                self.resolution,
                self.principal_point,
                self.focal_length,
            ),
        }
    }
}
