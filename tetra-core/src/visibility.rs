/// Back-face culling and painter's ordering
use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Face, Tetrahedron};
use crate::projection::Projector;

/// How the renderer decides which faces to paint and in what order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Cull on the 3D normal and paint far-to-near by average depth.
    DepthSorted,
    /// Cull on the 2D winding of the projected triangle and paint in table
    /// order. Cheaper, but only exact for convex solids.
    ScreenWinding,
}

/// One face scheduled for painting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintItem {
    /// Position of the face in the solid's face table
    pub index: usize,
    pub face: Face,
    pub color: Color,
    /// Average z of the face's vertices
    pub depth: f64,
}

/// Faces to paint for the current vertex positions, in paint order
pub fn paint_order(
    solid: &Tetrahedron,
    projector: &Projector,
    mode: VisibilityMode,
) -> Vec<PaintItem> {
    match mode {
        VisibilityMode::DepthSorted => depth_sorted(solid),
        VisibilityMode::ScreenWinding => screen_winding(solid, projector),
    }
}

/// Front faces (`normal.z > 0`) sorted by descending average z.
///
/// Smaller z is nearer the eye, so the nearest face comes last. The sort is
/// stable and total, so equal depths keep table order.
pub fn depth_sorted(solid: &Tetrahedron) -> Vec<PaintItem> {
    let mut items: Vec<PaintItem> = solid
        .faces()
        .iter()
        .enumerate()
        .filter(|(_, face)| solid.face_normal(face).z > 0.0)
        .map(|(index, face)| paint_item(solid, index, face))
        .collect();
    items.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    items
}

/// Faces whose projected triangle has positive 2D winding, in table order.
///
/// A face with an unprojectable vertex is left out.
pub fn screen_winding(solid: &Tetrahedron, projector: &Projector) -> Vec<PaintItem> {
    solid
        .faces()
        .iter()
        .enumerate()
        .filter(|(_, face)| {
            let [a, b, c] = solid.face_vertices(face);
            match (projector.project(&a), projector.project(&b), projector.project(&c)) {
                (Some(a), Some(b), Some(c)) => (b - a).perp(&(c - a)) > 0.0,
                _ => false,
            }
        })
        .map(|(index, face)| paint_item(solid, index, face))
        .collect()
}

fn paint_item(solid: &Tetrahedron, index: usize, face: &Face) -> PaintItem {
    PaintItem {
        index,
        face: *face,
        color: solid.color_of(index),
        depth: solid.average_depth(face),
    }
}
