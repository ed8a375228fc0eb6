/// Geometry primitives for the tetrahedron
use nalgebra::{Point3, Vector3};

use crate::error::GeometryError;
use crate::transform::{rotation_matrix, Axis};

/// A vertex position in object-local space
pub type Vertex = Point3<f64>;

/// Number of vertices and faces in the solid. Never changes.
pub const VERTEX_COUNT: usize = 4;
pub const FACE_COUNT: usize = 4;

/// An opaque fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    name: &'static str,
}

impl Color {
    pub const RED: Color = Color::named("red", 255, 0, 0);
    pub const GREEN: Color = Color::named("green", 0, 128, 0);
    pub const BLUE: Color = Color::named("blue", 0, 0, 255);
    pub const YELLOW: Color = Color::named("yellow", 255, 255, 0);

    const fn named(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, name }
    }

    /// CSS colour keyword, usable as a canvas fill style
    pub fn css_name(&self) -> &'static str {
        self.name
    }
}

/// A triangle given as three indices into the vertex table, in winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// The solid: four vertices, four faces and their colours, co-indexed.
///
/// The tables are fixed-size arrays, so the vertex and face counts cannot
/// drift and every face index of [`Tetrahedron::canonical`] stays in range.
/// Rotation state lives in the vertex coordinates themselves.
#[derive(Debug, Clone)]
pub struct Tetrahedron {
    vertices: [Vertex; VERTEX_COUNT],
    faces: [Face; FACE_COUNT],
    colors: [Color; FACE_COUNT],
}

impl Tetrahedron {
    /// Build a solid from explicit tables.
    ///
    /// Every face index must be below [`VERTEX_COUNT`]. The tables are
    /// checked once here and never change afterwards.
    pub fn new(
        vertices: [Vertex; VERTEX_COUNT],
        faces: [Face; FACE_COUNT],
        colors: [Color; FACE_COUNT],
    ) -> Result<Self, GeometryError> {
        for (face, indices) in faces.iter().map(|face| face.indices).enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= VERTEX_COUNT) {
                return Err(GeometryError {
                    face,
                    index,
                    vertex_count: VERTEX_COUNT,
                });
            }
        }
        Ok(Self { vertices, faces, colors })
    }

    /// Regular tetrahedron with its base in the z = 0 plane and apex on +Z.
    ///
    /// Faces are wound so that `u × v` points into the solid. The eye sits on
    /// the -Z side (see [`crate::projection::Projector`]), which makes
    /// `normal.z > 0` hold exactly for faces turned towards it.
    pub fn canonical() -> Self {
        Self {
            vertices: [
                Point3::new(0.0, 0.0, 0.612),
                Point3::new(0.707, 0.0, 0.0),
                Point3::new(-0.354, 0.612, 0.0),
                Point3::new(-0.354, -0.612, 0.0),
            ],
            faces: [
                Face::new(0, 2, 1),
                Face::new(0, 3, 2),
                Face::new(0, 1, 3),
                Face::new(1, 2, 3),
            ],
            colors: [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW],
        }
    }

    pub fn vertices(&self) -> &[Vertex; VERTEX_COUNT] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face; FACE_COUNT] {
        &self.faces
    }

    /// Colour of face `index`, assigned positionally
    pub fn color_of(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// The three vertex positions of a face, in winding order
    pub fn face_vertices(&self, face: &Face) -> [Vertex; 3] {
        face.indices.map(|i| self.vertices[i])
    }

    /// Unnormalized face normal, `(v1 - v0) × (v2 - v0)`
    pub fn face_normal(&self, face: &Face) -> Vector3<f64> {
        let [v0, v1, v2] = self.face_vertices(face);
        let u = v1 - v0;
        let v = v2 - v0;
        u.cross(&v)
    }

    /// Mean z of the face's vertices, used as the painter's depth key
    pub fn average_depth(&self, face: &Face) -> f64 {
        let [v0, v1, v2] = self.face_vertices(face);
        (v0.z + v1.z + v2.z) / 3.0
    }

    /// Rotate every vertex about `axis` through the origin by `theta` radians.
    ///
    /// Each call transforms the current positions, so successive calls
    /// compose. A zero angle leaves the vertices untouched.
    pub fn rotate(&mut self, axis: Axis, theta: f64) {
        if theta == 0.0 {
            return;
        }
        let rotation = rotation_matrix(axis, theta);
        for vertex in &mut self.vertices {
            *vertex = Point3::from(rotation * vertex.coords);
        }
    }
}

impl Default for Tetrahedron {
    fn default() -> Self {
        Self::canonical()
    }
}
