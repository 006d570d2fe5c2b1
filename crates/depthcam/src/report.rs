//! Console rendering of negotiated intrinsics.

use {
    crate::*,
    std::fmt::{self, Write},
};

/// Write one stream block:
///
/// ```text
/// Depth Camera
/// ------------
/// Resolution:  640 x 360
/// Principal Point:  319.000, 179.750
/// Focal Length: 337.210, 337.210
/// HFoV: 87.000, VFoV 56.186
/// ```
///
/// With more than one convention each FoV line is suffixed with its name.
pub fn write_intrinsics(
    out: &mut impl Write,
    intrinsics: &StreamIntrinsics,
    conventions: &[FovConvention],
) -> fmt::Result {
    let title = intrinsics.modality.title();
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.len()))?;
    writeln!(
        out,
        "Resolution:  {} x {}",
        intrinsics.resolution.x, intrinsics.resolution.y
    )?;
    writeln!(
        out,
        "Principal Point:  {:.3}, {:.3}",
        intrinsics.principal_point.x, intrinsics.principal_point.y
    )?;
    writeln!(
        out,
        "Focal Length: {:.3}, {:.3}",
        intrinsics.focal_length.x, intrinsics.focal_length.y
    )?;
    for convention in conventions {
        let fov = intrinsics.field_of_view(*convention);
        if conventions.len() > 1 {
            writeln!(out, "HFoV: {:.3}, VFoV {:.3} ({})", fov.x, fov.y, convention)?;
        } else {
            writeln!(out, "HFoV: {:.3}, VFoV {:.3}", fov.x, fov.y)?;
        }
    }
    Ok(())
}

pub fn format_intrinsics(intrinsics: &StreamIntrinsics, conventions: &[FovConvention]) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_intrinsics(&mut out, intrinsics, conventions);
    out
}

/// Device header followed by every stream block, separated by blank lines.
pub fn write_session(
    out: &mut impl Write,
    session: &Session,
    conventions: &[FovConvention],
) -> fmt::Result {
    let info = session.device_info();
    writeln!(out, "Device: {} (serial {})", info.name, info.serial)?;
    if let Some(firmware) = &info.firmware {
        writeln!(out, "Firmware: {}", firmware)?;
    }
    if let Some(scale) = session.depth_scale() {
        writeln!(out, "Depth scale: {:.6}", scale)?;
    }
    for intrinsics in session.streams() {
        writeln!(out)?;
        write_intrinsics(out, intrinsics, conventions)?;
    }
    Ok(())
}

pub fn format_session(session: &Session, conventions: &[FovConvention]) -> String {
    let mut out = String::new();
    let _ = write_session(&mut out, session, conventions);
    out
}
