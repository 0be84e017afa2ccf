//! Interactive viewer session.
//!
//! Owns the loaded mesh, the view state, and the current render mode, and
//! exposes the input-reaction entry points the host wires its events to.
//! All mutation funnels through these methods; there is no ambient global
//! state, and a single thread drives both input and rendering.
use crate::geometry::Mesh;
use crate::pipeline::{render_frame, RenderMode, ShadedTriangle};
use crate::view::ViewState;

pub struct Viewer {
    mesh: Mesh,
    view: ViewState,
    mode: RenderMode,
}

impl Viewer {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            view: ViewState::new(),
            mode: RenderMode::default(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Pointer press: anchors a drag gesture.
    pub fn pointer_pressed(&mut self, x: i32, y: i32) {
        self.view.pointer_pressed(x, y);
    }

    /// Pointer drag with the primary button held: rotates by the delta
    /// since the last pointer position.
    pub fn pointer_dragged(&mut self, x: i32, y: i32) {
        self.view.pointer_dragged(x, y);
    }

    /// Wheel gesture: zooms, clamped to the minimum scale.
    pub fn wheel(&mut self, delta: f32) {
        self.view.zoom(delta);
    }

    /// Selects the shading mode for subsequent frames.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Renders one frame for the given viewport size, returning triangles
    /// in draw order.
    pub fn render_frame(&self, viewport: (u32, u32)) -> Vec<ShadedTriangle> {
        render_frame(&self.mesh, &self.view, self.mode, viewport)
    }
}
