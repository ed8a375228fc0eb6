/// The solid renderer: rotation, visibility, projection and painting
use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::geometry::{Color, Face, Tetrahedron};
use crate::input::DragDelta;
use crate::projection::Projector;
use crate::surface::DrawingSurface;
use crate::transform::Axis;
use crate::visibility::{paint_order, PaintItem};

/// Owns the tetrahedron and the surface it is painted on.
///
/// Rotation and painting take `&mut self`: the host drives them from a
/// single input thread, one event at a time.
pub struct SolidRenderer<S: DrawingSurface> {
    surface: S,
    solid: Tetrahedron,
    projector: Projector,
    config: RenderConfig,
}

impl<S: DrawingSurface> SolidRenderer<S> {
    /// Renderer for the canonical tetrahedron
    pub fn new(surface: S, config: RenderConfig) -> Result<Self, ConfigError> {
        Self::with_solid(surface, Tetrahedron::canonical(), config)
    }

    pub fn with_solid(
        surface: S,
        solid: Tetrahedron,
        config: RenderConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            surface,
            solid,
            projector: Projector::new(&config),
            config,
        })
    }

    /// Change the output scale, e.g. after the host surface was resized
    pub fn set_output_scale(&mut self, size: f64) -> Result<(), ConfigError> {
        let config = self.config.clone().with_size(size);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn solid(&self) -> &Tetrahedron {
        &self.solid
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn rotate(&mut self, axis: Axis, theta: f64) {
        self.solid.rotate(axis, theta);
    }

    /// Rotate by a pointer drag (Y first, then X) and repaint
    pub fn apply_drag(&mut self, delta: DragDelta) {
        self.rotate(Axis::Y, delta.yaw);
        self.rotate(Axis::X, delta.pitch);
        self.render();
    }

    /// Faces the next [`render`](Self::render) would paint, in order
    pub fn paint_plan(&self) -> Vec<PaintItem> {
        paint_order(&self.solid, &self.projector, self.config.visibility)
    }

    /// Repaint the whole surface
    pub fn render(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();
        self.surface.clear_rect(0.0, 0.0, width, height);
        self.surface.save();
        self.surface.translate(width / 2.0, height / 2.0);

        let plan = self.paint_plan();
        log::debug!(
            "painting faces {:?}",
            plan.iter().map(|item| item.index).collect::<Vec<_>>()
        );
        for item in &plan {
            self.draw_face(&item.face, item.color);
        }

        self.surface.restore();
    }

    /// Fill and outline one face.
    ///
    /// Skipped for this frame if any vertex cannot be projected.
    pub fn draw_face(&mut self, face: &Face, color: Color) {
        let size = self.config.size;
        let mut points = [(0.0, 0.0); 3];
        for (point, vertex) in points.iter_mut().zip(self.solid.face_vertices(face)) {
            match self.projector.project(&vertex) {
                Some(projected) => *point = (projected.x * size, projected.y * size),
                None => {
                    log::warn!(
                        "skipping face {:?}: vertex {} cannot be projected",
                        face.indices,
                        vertex
                    );
                    return;
                }
            }
        }

        let [(x0, y0), (x1, y1), (x2, y2)] = points;
        self.surface.begin_path();
        self.surface.move_to(x0, y0);
        self.surface.line_to(x1, y1);
        self.surface.line_to(x2, y2);
        self.surface.close_path();
        self.surface.set_fill_color(color);
        self.surface.fill();
        self.surface.stroke();
    }
}
