/// Projection of object-space vertices onto the drawing plane
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::geometry::Vertex;

/// Smallest eye-to-point depth, in projection units, that still divides safely
const MIN_DEPTH: f64 = 1e-6;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Maps vertices to 2D points before output scaling.
///
/// The eye sits on the -Z side of the object at `viewer_distance`, looking
/// towards +Z: a vertex at scaled depth `z` is `viewer_distance + z` away,
/// so smaller z is nearer. Screen y grows downwards, as on a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub mode: ProjectionMode,
    pub geometry_scale: f64,
    pub field_of_view: f64,
    pub viewer_distance: f64,
}

impl Projector {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            mode: config.projection,
            geometry_scale: config.geometry_scale,
            field_of_view: config.field_of_view,
            viewer_distance: config.viewer_distance,
        }
    }

    /// Project a vertex to the plane.
    ///
    /// Returns `None` when the point is at or behind the eye, or when the
    /// divide would produce a non-finite coordinate.
    pub fn project(&self, vertex: &Vertex) -> Option<Point2<f64>> {
        let scaled = vertex.coords * self.geometry_scale;
        let depth = match self.mode {
            ProjectionMode::Perspective => self.viewer_distance + scaled.z,
            ProjectionMode::Orthographic => self.viewer_distance,
        };
        if !(depth > MIN_DEPTH) {
            return None;
        }

        let factor = self.field_of_view / depth;
        let point = Point2::new(scaled.x * factor, scaled.y * factor);
        (point.x.is_finite() && point.y.is_finite()).then_some(point)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use std::f64::consts::PI;

    #[test]
    fn test_origin_axis_projects_to_center() {
        let projector = Projector::default();
        let point = projector.project(&Point3::new(0.0, 0.0, 0.612)).unwrap();
        assert_eq!(point, Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_perspective_factor() {
        let projector = Projector::default();
        let point = projector.project(&Point3::new(0.707, -0.5, 0.2)).unwrap();
        let factor = PI / (1000.0 + 20.0);
        assert_relative_eq!(point.x, 70.7 * factor, epsilon = 1e-12);
        assert_relative_eq!(point.y, -50.0 * factor, epsilon = 1e-12);
    }

    #[test]
    fn test_nearer_points_appear_larger() {
        let projector = Projector::default();
        let near = projector.project(&Point3::new(1.0, 0.0, -0.5)).unwrap();
        let far = projector.project(&Point3::new(1.0, 0.0, 0.5)).unwrap();
        assert!(near.x > far.x);
    }

    #[test]
    fn test_orthographic_ignores_depth() {
        let projector = Projector {
            mode: ProjectionMode::Orthographic,
            ..Projector::default()
        };
        let near = projector.project(&Point3::new(1.0, 1.0, -0.5)).unwrap();
        let far = projector.project(&Point3::new(1.0, 1.0, 0.5)).unwrap();
        assert_eq!(near, far);

        let perspective = Projector::default().project(&Point3::new(1.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(near, perspective, epsilon = 1e-12);
    }

    #[test]
    fn test_point_at_eye_is_rejected() {
        let projector = Projector::default();
        assert!(projector.project(&Point3::new(0.3, 0.3, -10.0)).is_none());
        assert!(projector.project(&Point3::new(0.3, 0.3, -25.0)).is_none());
    }

    #[test]
    fn test_non_finite_vertex_is_rejected() {
        let projector = Projector::default();
        assert!(projector.project(&Point3::new(f64::INFINITY, 0.0, 0.0)).is_none());
        assert!(projector.project(&Point3::new(0.0, 0.0, f64::NAN)).is_none());
    }
}
