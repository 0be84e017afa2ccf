//! Geometry primitives for the mesh viewer.
use crate::vec3::Vec3;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Default material color for loaded triangles.
    pub const MID_GRAY: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Equal-component gray from an 8-bit intensity.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }
}

/// A triangle face with model-space vertices and an outward normal.
///
/// The normal is always recomputed from vertex winding; whatever normal a
/// mesh file stores alongside the vertices is not trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
    pub color: Rgb,
}

impl Triangle {
    /// Builds a triangle from three model-space vertices, deriving the
    /// normal from their winding order.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal: face_normal(&v0, &v1, &v2),
            color: Rgb::MID_GRAY,
        }
    }

    /// Arithmetic mean of the three vertices, in model space.
    pub fn centroid(&self) -> Vec3 {
        self.vertices[0]
            .add(&self.vertices[1])
            .add(&self.vertices[2])
            .scale(1.0 / 3.0)
    }
}

/// Normalized cross product of the edges `(v1 - v0)` and `(v2 - v0)`.
/// A degenerate triangle yields the zero vector.
pub fn face_normal(v0: &Vec3, v1: &Vec3, v2: &Vec3) -> Vec3 {
    let edge1 = v1.subtract(v0);
    let edge2 = v2.subtract(v0);
    let mut normal = edge1.cross(&edge2);
    normal.normalize();
    normal
}

/// A 3D mesh composed of triangles.
///
/// An empty mesh is a fully valid, blank-rendering state.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Create a simple cube mesh with consistent outward winding, used as
    /// the demo model when no file is given.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        // Front face
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, half),
            Vec3::new(half, -half, half),
            Vec3::new(half, half, half),
        ));
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, half),
            Vec3::new(half, half, half),
            Vec3::new(-half, half, half),
        ));

        // Back face
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, -half),
            Vec3::new(-half, half, -half),
            Vec3::new(half, half, -half),
        ));
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, -half),
            Vec3::new(half, half, -half),
            Vec3::new(half, -half, -half),
        ));

        // Top face
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, half, -half),
            Vec3::new(-half, half, half),
            Vec3::new(half, half, half),
        ));
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, half, -half),
            Vec3::new(half, half, half),
            Vec3::new(half, half, -half),
        ));

        // Bottom face
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, -half),
            Vec3::new(half, -half, -half),
            Vec3::new(half, -half, half),
        ));
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, -half),
            Vec3::new(half, -half, half),
            Vec3::new(-half, -half, half),
        ));

        // Right face
        mesh.add_triangle(Triangle::new(
            Vec3::new(half, -half, -half),
            Vec3::new(half, half, -half),
            Vec3::new(half, half, half),
        ));
        mesh.add_triangle(Triangle::new(
            Vec3::new(half, -half, -half),
            Vec3::new(half, half, half),
            Vec3::new(half, -half, half),
        ));

        // Left face
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, -half),
            Vec3::new(-half, -half, half),
            Vec3::new(-half, half, half),
        ));
        mesh.add_triangle(Triangle::new(
            Vec3::new(-half, -half, -half),
            Vec3::new(-half, half, half),
            Vec3::new(-half, half, -half),
        ));

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
