use crate::geometry::heading_basis;
use crate::model::{RadarLayout, RawPoint};

/// Projects a normalized local point into map space using the radar layout.
///
/// Returns `None` (inactive) when the arithmetic degenerates; the caller
/// drops such points silently.
pub fn project(layout: &RadarLayout, point: &RawPoint, target_height_m: f64) -> Option<(f64, f64)> {
    let mut x_mm = point.x_mm;
    let mut y_mm = point.y_mm;

    // Slant-to-ground correction for wall-mounted 3D radars looking ahead.
    if layout.enable_3d && !layout.ceiling_mount && y_mm > 0.0 {
        let height_diff = (layout.mount_height - target_height_m).abs();
        let x_m = x_mm / 1000.0;
        let y_m = y_mm / 1000.0;
        let slant = (x_m * x_m + y_m * y_m).sqrt();

        if slant > height_diff {
            let ground = (slant * slant - height_diff * height_diff).sqrt();
            let k = ground / slant;
            x_mm *= k;
            y_mm *= k;
        } else {
            // Target at or below sensor height: no usable ground projection.
            x_mm = 0.0;
            y_mm = 0.0;
        }
    }

    let mut x_m = x_mm / 1000.0;
    let y_m = y_mm / 1000.0;
    if layout.mirror_x {
        x_m = -x_m;
    }

    let basis = heading_basis(layout.rotation);
    let left = layout.origin_x + x_m * layout.scale_x * basis.right.0
        + y_m * layout.scale_y * basis.forward.0;
    let top = layout.origin_y + x_m * layout.scale_x * basis.right.1
        + y_m * layout.scale_y * basis.forward.1;

    if !left.is_finite() || !top.is_finite() {
        return None;
    }
    Some((left, top))
}
