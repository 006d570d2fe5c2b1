//! Field-of-view math for pinhole intrinsics.
//!
//! Two conventions coexist. [`pinhole_fov`] assumes the optical axis passes
//! through the image center. [`principal_point_fov`] measures each half-angle
//! from the actual principal point, which is what the vendor SDK's own FOV
//! helper reports. They agree when the principal point sits at the exact pixel
//! center (`dimension / 2 - 0.5`).

use {
    crate::ConfigError,
    base::Vec2,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FovConvention {
    /// `2 * atan((dimension / 2) / focal)`
    Pinhole,
    /// `atan2(pp + 0.5, focal) + atan2(dimension - (pp + 0.5), focal)`
    PrincipalPoint,
}

impl fmt::Display for FovConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FovConvention::Pinhole => f.write_str("pinhole"),
            FovConvention::PrincipalPoint => f.write_str("principal-point"),
        }
    }
}

impl FromStr for FovConvention {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pinhole" => Ok(FovConvention::Pinhole),
            "principal-point" | "sdk" => Ok(FovConvention::PrincipalPoint),
            other => Err(ConfigError::Parse(format!("unknown fov convention '{other}'"))),
        }
    }
}

/// Horizontal and vertical field of view in degrees, centered optical axis.
pub fn pinhole_fov(size: Vec2<u32>, focal_length: Vec2<f32>) -> Vec2<f64> {
    size.zip_with(focal_length, |dimension, focal| {
        (2.0 * ((dimension as f64 / 2.0) / focal as f64).atan()).to_degrees()
    })
}

/// Horizontal and vertical field of view in degrees, measured from the
/// principal point to both image edges.
pub fn principal_point_fov(
    size: Vec2<u32>,
    principal_point: Vec2<f32>,
    focal_length: Vec2<f32>,
) -> Vec2<f64> {
    let axis = |dimension: u32, pp: f32, focal: f32| {
        let near = pp as f64 + 0.5;
        let far = dimension as f64 - near;
        (near.atan2(focal as f64) + far.atan2(focal as f64)).to_degrees()
    };
    Vec2::new(
        axis(size.x, principal_point.x, focal_length.x),
        axis(size.y, principal_point.y, focal_length.y),
    )
}
