use crate::app::AppContext;
use crate::renderer::Renderer;

/// Visible window area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. An empty viewport (a page not laid out yet) reports
    /// a square aspect so the projection stays finite.
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Bring the camera projection and the output surface in line with a new
/// viewport. Runs once per resize notification, without debouncing.
///
/// Returns `false` when the viewport has a zero dimension (minimised window);
/// nothing is changed in that case.
pub fn handle_resize<R: Renderer>(ctx: &mut AppContext<R>, viewport: Viewport) -> bool {
    if viewport.is_empty() {
        log::debug!("Ignoring resize to empty viewport {}x{}", viewport.width, viewport.height);
        return false;
    }

    ctx.camera.aspect = viewport.aspect();
    ctx.camera.update_projection_matrix();
    ctx.renderer.set_size(viewport.width, viewport.height);
    true
}
