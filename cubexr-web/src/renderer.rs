use crate::error::RenderError;
use crate::scene::{PerspectiveCamera, Scene};

/// Something that can turn a scene into pixels on an output surface.
///
/// The browser build uses the wgpu renderer in `web::gpu`. Tests substitute
/// in-memory implementations.
pub trait Renderer {
    /// Draw one frame of `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    /// Resize the output surface in pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current output surface size in pixels.
    fn size(&self) -> (u32, u32);
}
