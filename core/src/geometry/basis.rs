/// Unit basis vectors embedding a radar's local frame into map space.
#[derive(Debug, Clone, Copy)]
pub struct HeadingBasis {
    /// Direction of the radar's forward ("y") axis.
    pub forward: (f64, f64),
    /// Direction of the radar's right ("x") axis, 90 degrees from forward.
    pub right: (f64, f64),
}

/// Computes the map-space basis for a layout rotation in degrees.
///
/// The forward axis points `rotation - 90` degrees from the map's reference
/// frame; this exact construction is the layout-compatibility contract.
pub fn heading_basis(rotation_deg: f64) -> HeadingBasis {
    let base_rad = (rotation_deg - 90.0).to_radians();
    HeadingBasis {
        forward: (base_rad.cos(), base_rad.sin()),
        right: (
            (base_rad + std::f64::consts::FRAC_PI_2).cos(),
            (base_rad + std::f64::consts::FRAC_PI_2).sin(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotation_zero_points_forward_up() {
        let basis = heading_basis(0.0);
        assert_relative_eq!(basis.forward.0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(basis.forward.1, -1.0, epsilon = 1e-12);
        assert_relative_eq!(basis.right.0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(basis.right.1, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotation_ninety_points_forward_right() {
        let basis = heading_basis(90.0);
        assert_relative_eq!(basis.forward.0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(basis.forward.1, 0.0, epsilon = 1e-12);
        assert_relative_eq!(basis.right.0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(basis.right.1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn axes_stay_orthogonal() {
        for rotation in [13.0, 45.0, 137.5, 270.0] {
            let basis = heading_basis(rotation);
            let dot = basis.forward.0 * basis.right.0 + basis.forward.1 * basis.right.1;
            assert_relative_eq!(dot, 0.0, epsilon = 1e-12);
        }
    }
}
