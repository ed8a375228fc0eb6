/// Rotation axes and their matrices
use nalgebra::Matrix3;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseAxisError;

/// Object-local axis a rotation turns about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            _ => Err(ParseAxisError(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Rotation matrix about `axis` by `theta` radians.
///
/// About X: `y' = y cos - z sin`, `z' = z cos + y sin`.
/// About Y: `x' = x cos - z sin`, `z' = z cos + x sin`.
#[rustfmt::skip]
pub fn rotation_matrix(axis: Axis, theta: f64) -> Matrix3<f64> {
    let (sin, cos) = theta.sin_cos();
    match axis {
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, cos, -sin,
            0.0, sin, cos,
        ),
        Axis::Y => Matrix3::new(
            cos, 0.0, -sin,
            0.0, 1.0, 0.0,
            sin, 0.0, cos,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_identity_rotation() {
        for axis in [Axis::X, Axis::Y] {
            let matrix = rotation_matrix(axis, 0.0);
            assert!((matrix - Matrix3::identity()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_matrices_are_orthonormal() {
        for axis in [Axis::X, Axis::Y] {
            let m = rotation_matrix(axis, 0.83);
            assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-12);
            assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_quarter_turns() {
        let half_pi = std::f64::consts::FRAC_PI_2;
        let y_about_x = rotation_matrix(Axis::X, half_pi) * Vector3::y();
        assert_relative_eq!(y_about_x, Vector3::z(), epsilon = 1e-12);
        let x_about_y = rotation_matrix(Axis::Y, half_pi) * Vector3::x();
        assert_relative_eq!(x_about_y, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_parse_axis() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!(" Y ".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!("z".parse::<Axis>(), Err(ParseAxisError("z".to_string())));
        assert_eq!(Axis::Y.to_string(), "y");
    }
}
