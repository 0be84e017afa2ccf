//! Per-frame render pipeline: depth sort, back-face cull, project, shade.
//!
//! Convention used throughout: the camera direction constant is +Z and a
//! triangle is visible when its rotated normal opposes it (dot < 0), so
//! front faces have rotated normals with negative Z. Depth ordering draws
//! triangles with larger rotated centroid Z last.
use crate::geometry::{Mesh, Rgb, Triangle};
use crate::vec3::Vec3;
use crate::view::ViewState;

/// Direction light rays travel: from above and to one side. Normalized
/// once per frame before shading.
const LIGHT_DIRECTION: Vec3 = Vec3 {
    x: -0.5,
    y: -1.0,
    z: -0.5,
};

/// The fixed view axis used by the back-face test.
const CAMERA_DIRECTION: Vec3 = Vec3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};

/// Minimum lighting intensity, so faces turned away from the light stay
/// visible instead of going fully black.
const AMBIENT_FLOOR: f32 = 0.2;

const WIREFRAME_COLOR: Rgb = Rgb::WHITE;
const MATERIAL_OUTLINE: Rgb = Rgb::new(169, 169, 169);

/// Shading mode applied to every triangle in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Wireframe,
    Material,
    Lighting,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Wireframe
    }
}

/// A screen-space triangle ready for the host rasterizer, with its colors
/// already resolved for the frame's render mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadedTriangle {
    pub points: [(i32, i32); 3],
    /// Fill color, if the mode fills the face.
    pub fill: Option<Rgb>,
    /// Outline color, if the mode strokes the edges.
    pub outline: Option<Rgb>,
}

/// Produces the frame's draw list: triangles depth-sorted back to front,
/// back faces removed, vertices projected, colors resolved for `mode`.
///
/// The host must draw the triangles in exactly the order given; overlap
/// correctness relies on it (painter's algorithm). Centroid-based depth
/// ordering is approximate and can mis-order intersecting or very large
/// overlapping triangles.
pub fn render_frame(
    mesh: &Mesh,
    view: &ViewState,
    mode: RenderMode,
    viewport: (u32, u32),
) -> Vec<ShadedTriangle> {
    let light = light_direction();

    // Larger rotated Z is drawn last. The sort is stable, so a static
    // view renders the same order every frame.
    let mut order: Vec<(usize, f32)> = mesh
        .triangles
        .iter()
        .enumerate()
        .map(|(index, triangle)| (index, view.rotate_point(&triangle.centroid()).z))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut frame = Vec::with_capacity(order.len());
    for (index, _depth) in order {
        let triangle = &mesh.triangles[index];
        if !facing_camera(triangle, view) {
            continue;
        }

        let points = [
            view.project(&triangle.vertices[0], viewport),
            view.project(&triangle.vertices[1], viewport),
            view.project(&triangle.vertices[2], viewport),
        ];
        frame.push(shade(triangle, view, mode, &light, points));
    }
    frame
}

/// A triangle faces the camera when its rotated normal opposes the view
/// axis. Zero normals from degenerate triangles dot to 0 and are culled.
fn facing_camera(triangle: &Triangle, view: &ViewState) -> bool {
    let rotated = view.rotate_point(&triangle.normal);
    rotated.dot(&CAMERA_DIRECTION) < 0.0
}

/// Lambertian intensity of a face under the fixed light, clamped to
/// `[AMBIENT_FLOOR, 1.0]`.
fn lighting_intensity(normal: &Vec3, view: &ViewState, light: &Vec3) -> f32 {
    let mut rotated = view.rotate_point(normal);
    // Rotation preserves unit length analytically; re-normalize anyway to
    // absorb drift and the zero-normal case.
    rotated.normalize();
    rotated.dot(light).clamp(AMBIENT_FLOOR, 1.0)
}

fn shade(
    triangle: &Triangle,
    view: &ViewState,
    mode: RenderMode,
    light: &Vec3,
    points: [(i32, i32); 3],
) -> ShadedTriangle {
    match mode {
        RenderMode::Wireframe => ShadedTriangle {
            points,
            fill: None,
            outline: Some(WIREFRAME_COLOR),
        },
        RenderMode::Material => ShadedTriangle {
            points,
            fill: Some(triangle.color),
            outline: Some(MATERIAL_OUTLINE),
        },
        RenderMode::Lighting => {
            let intensity = lighting_intensity(&triangle.normal, view, light);
            ShadedTriangle {
                points,
                fill: Some(Rgb::gray((intensity * 255.0) as u8)),
                outline: None,
            }
        }
    }
}

/// The fixed light direction as a unit vector.
fn light_direction() -> Vec3 {
    let mut light = LIGHT_DIRECTION;
    light.normalize();
    light
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A triangle in the z = `depth` plane wound so its normal is
    /// (0, 0, -1), facing the camera at the default view.
    fn visible_triangle_at(depth: f32) -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, depth),
            Vec3::new(0.0, 1.0, depth),
            Vec3::new(1.0, 0.0, depth),
        )
    }

    #[test]
    fn test_front_facing_triangle_retained() {
        let mut mesh = Mesh::new();
        let mut triangle = visible_triangle_at(0.0);
        // Rotated normal exactly opposite the camera direction.
        triangle.normal = Vec3::new(0.0, 0.0, -1.0);
        mesh.add_triangle(triangle);

        let frame = render_frame(&mesh, &ViewState::new(), RenderMode::Wireframe, (800, 600));
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_back_facing_triangle_culled() {
        let mut mesh = Mesh::new();
        let mut triangle = visible_triangle_at(0.0);
        // Rotated normal exactly equal to the camera direction.
        triangle.normal = Vec3::new(0.0, 0.0, 1.0);
        mesh.add_triangle(triangle);

        let frame = render_frame(&mesh, &ViewState::new(), RenderMode::Wireframe, (800, 600));
        assert!(frame.is_empty());
    }

    #[test]
    fn test_farther_triangle_emitted_first() {
        let mut near = visible_triangle_at(5.0);
        near.color = Rgb::new(1, 0, 0);
        let mut far = visible_triangle_at(-3.0);
        far.color = Rgb::new(0, 2, 0);

        let mut mesh = Mesh::new();
        mesh.add_triangle(near);
        mesh.add_triangle(far);

        let frame = render_frame(&mesh, &ViewState::new(), RenderMode::Material, (800, 600));
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0].fill, Some(Rgb::new(0, 2, 0)));
        assert_eq!(frame[1].fill, Some(Rgb::new(1, 0, 0)));
    }

    #[test]
    fn test_depth_order_is_deterministic() {
        let mut mesh = Mesh::new();
        for depth in [3.0, -1.0, 2.0, -4.0, 0.0] {
            mesh.add_triangle(visible_triangle_at(depth));
        }

        let mut view = ViewState::new();
        view.rotation_x = 0.4;
        view.rotation_y = -1.1;

        let first = render_frame(&mesh, &view, RenderMode::Lighting, (800, 600));
        let second = render_frame(&mesh, &view, RenderMode::Lighting, (800, 600));
        assert_eq!(first, second);
    }

    #[test]
    fn test_wireframe_has_outline_only() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(visible_triangle_at(0.0));

        let frame = render_frame(&mesh, &ViewState::new(), RenderMode::Wireframe, (800, 600));
        assert_eq!(frame[0].fill, None);
        assert_eq!(frame[0].outline, Some(Rgb::WHITE));
    }

    #[test]
    fn test_material_fills_with_triangle_color() {
        let mut triangle = visible_triangle_at(0.0);
        triangle.color = Rgb::new(10, 20, 30);
        let mut mesh = Mesh::new();
        mesh.add_triangle(triangle);

        let frame = render_frame(&mesh, &ViewState::new(), RenderMode::Material, (800, 600));
        assert_eq!(frame[0].fill, Some(Rgb::new(10, 20, 30)));
        assert_eq!(frame[0].outline, Some(Rgb::new(169, 169, 169)));
    }

    #[test]
    fn test_lighting_clamps_to_ambient_floor() {
        // Unit normal mostly opposed to the light but still front-facing:
        // raw Lambertian term is -1/3, clamped up to 0.2.
        let mut triangle = visible_triangle_at(0.0);
        triangle.normal = Vec3::new(-0.408_248, 0.816_497, -0.408_248);
        let mut mesh = Mesh::new();
        mesh.add_triangle(triangle);

        let frame = render_frame(&mesh, &ViewState::new(), RenderMode::Lighting, (800, 600));
        assert_eq!(frame[0].fill, Some(Rgb::gray(51)));
        assert_eq!(frame[0].outline, None);
    }

    #[test]
    fn test_lighting_saturates_at_full_intensity() {
        // Normal aligned with the light and front-facing: intensity 1.0.
        let mut light = Vec3::new(-0.5, -1.0, -0.5);
        light.normalize();
        let mut triangle = visible_triangle_at(0.0);
        triangle.normal = light;
        let mut mesh = Mesh::new();
        mesh.add_triangle(triangle);

        let frame = render_frame(&mesh, &ViewState::new(), RenderMode::Lighting, (800, 600));
        let fill = frame[0].fill.unwrap();
        assert!(fill.r >= 254, "expected near-white, got {:?}", fill);
        assert_eq!(fill.r, fill.g);
        assert_eq!(fill.g, fill.b);
    }

    #[test]
    fn test_empty_mesh_renders_blank_frame() {
        let frame = render_frame(
            &Mesh::new(),
            &ViewState::new(),
            RenderMode::Lighting,
            (800, 600),
        );
        assert!(frame.is_empty());
    }
}
