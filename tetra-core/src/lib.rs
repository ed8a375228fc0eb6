/// Tetra Core Library - a drag-rotated tetrahedron and its painter
///
/// This library holds the whole rendering pipeline: in-place vertex rotation,
/// back-face culling with painter's ordering, perspective or orthographic
/// projection, and painting through a host-supplied drawing surface.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod renderer;
pub mod surface;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use config::RenderConfig;
pub use error::{ConfigError, GeometryError, ParseAxisError};
pub use geometry::{Color, Face, Tetrahedron, Vertex};
pub use input::{DragDelta, DragTracker};
pub use projection::{ProjectionMode, Projector};
pub use renderer::SolidRenderer;
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
pub use transform::Axis;
pub use visibility::{PaintItem, VisibilityMode};
