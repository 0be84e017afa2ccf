//! STLView Core Library - mesh loading and the software render pipeline
//!
//! This library provides the host-independent core of the viewer: binary
//! STL parsing with normal reconstruction, the orthographic view
//! transform, and the per-frame pipeline (depth sort, back-face cull,
//! shade) that turns a mesh into an ordered list of screen-space
//! triangles for an external rasterizer to draw.

pub mod geometry;
pub mod pipeline;
pub mod stl;
pub mod vec3;
pub mod view;
pub mod viewer;

// Re-export commonly used types
pub use geometry::{Mesh, Rgb, Triangle};
pub use pipeline::{render_frame, RenderMode, ShadedTriangle};
pub use stl::MeshLoadError;
pub use vec3::Vec3;
pub use view::ViewState;
pub use viewer::Viewer;
