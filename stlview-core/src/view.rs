//! Interactive view state: rotation, zoom, and pointer tracking.
use crate::vec3::Vec3;

/// Radians of rotation per pixel of pointer drag.
pub const ROTATE_SENSITIVITY: f32 = 0.01;
/// Scale change per unit of wheel delta.
pub const ZOOM_SENSITIVITY: f32 = 0.1;
/// Smallest allowed scale, in screen units per model unit. Keeps the view
/// from collapsing to an invisible model.
pub const MIN_SCALE: f32 = 10.0;
/// Scale at session start.
pub const DEFAULT_SCALE: f32 = 100.0;

/// Rotation and zoom of the current view, plus the pointer anchor used to
/// turn drag events into incremental rotation deltas.
///
/// Angles accumulate without bound and wrap through trigonometric
/// periodicity. State is never persisted; a new session starts at
/// (0, 0, 100).
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub scale: f32,
    last_pointer: Option<(i32, i32)>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: DEFAULT_SCALE,
            last_pointer: None,
        }
    }

    /// Rotates a model-space point or direction into view space, without
    /// scale or screen offset.
    ///
    /// Rotation order is fixed: around the local X axis first, then around
    /// the Y axis. The returned y is the value after the X-axis step only,
    /// since Y-axis rotation operates on the (x, z) plane and leaves y
    /// untouched.
    pub fn rotate_point(&self, p: &Vec3) -> Vec3 {
        let (sin_x, cos_x) = self.rotation_x.sin_cos();
        let (sin_y, cos_y) = self.rotation_y.sin_cos();

        let y = p.y * cos_x - p.z * sin_x;
        let z = p.y * sin_x + p.z * cos_x;

        let x2 = p.x * cos_y + z * sin_y;
        let z2 = -p.x * sin_y + z * cos_y;

        Vec3::new(x2, y, z2)
    }

    /// Projects a model-space point to integer screen coordinates:
    /// orthographic, scaled, and centered on the viewport.
    pub fn project(&self, p: &Vec3, viewport: (u32, u32)) -> (i32, i32) {
        let rotated = self.rotate_point(p);
        let screen_x = rotated.x * self.scale + viewport.0 as f32 / 2.0;
        let screen_y = rotated.y * self.scale + viewport.1 as f32 / 2.0;
        (screen_x as i32, screen_y as i32)
    }

    /// Anchors an incoming drag gesture at the given pointer position.
    pub fn pointer_pressed(&mut self, x: i32, y: i32) {
        self.last_pointer = Some((x, y));
    }

    /// Accumulates rotation from the pointer delta since the last recorded
    /// position, then re-records the position. Deltas rather than absolute
    /// coordinates, so rotation carries across successive drag gestures.
    /// Does nothing if no anchor has been set.
    pub fn pointer_dragged(&mut self, x: i32, y: i32) {
        let Some((last_x, last_y)) = self.last_pointer else {
            return;
        };
        self.rotation_y -= (x - last_x) as f32 * ROTATE_SENSITIVITY;
        self.rotation_x += (y - last_y) as f32 * ROTATE_SENSITIVITY;
        self.last_pointer = Some((x, y));
    }

    /// Applies a wheel delta to the zoom scale, clamped to `MIN_SCALE`.
    pub fn zoom(&mut self, delta: f32) {
        self.scale = (self.scale + delta * ZOOM_SENSITIVITY).max(MIN_SCALE);
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
