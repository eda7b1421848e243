use cubexr_shared::geometry;

use crate::config::DemoConfig;
use crate::error::RenderError;
use crate::render_loop;
use crate::renderer::Renderer;
use crate::scene::{Material, ObjectId, PerspectiveCamera, RenderableObject, Scene};
use crate::viewport::Viewport;

/// Application state shared by the render loop, the viewport manager, and the
/// host bridge. Built once at startup and never torn down.
pub struct AppContext<R: Renderer> {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub renderer: R,
    cube: ObjectId,
    rotation_step: f32,
    frames: u64,
}

impl<R: Renderer> AppContext<R> {
    /// Build the camera, size the renderer to the viewport, and put the cube in
    /// front of the camera.
    pub fn bootstrap(config: &DemoConfig, viewport: Viewport, mut renderer: R) -> Self {
        let mut camera = PerspectiveCamera::new(config.fov_degrees, viewport.aspect(), config.near, config.far);
        camera.position.z = config.camera_z;

        renderer.set_size(viewport.width, viewport.height);

        let mut scene = Scene::new();
        scene.clear_color = config.clear_color;
        let cube = scene.add(RenderableObject::new(geometry::unit_cube(), Material::Normal));

        log::info!(
            "Scene ready: {} object(s), viewport {}x{}, camera at z={}",
            scene.len(),
            viewport.width,
            viewport.height,
            config.camera_z,
        );

        AppContext {
            scene,
            camera,
            renderer,
            cube,
            rotation_step: config.rotation_step,
            frames: 0,
        }
    }

    /// Run one frame: spin the cube, then draw. Called once per display refresh.
    pub fn frame(&mut self) -> Result<(), RenderError> {
        render_loop::spin(&mut self.scene[self.cube], self.rotation_step);
        self.renderer.render(&self.scene, &self.camera)?;
        self.frames += 1;
        Ok(())
    }

    pub fn cube(&self) -> &RenderableObject {
        &self.scene[self.cube]
    }

    /// Zero the cube's rotation on all axes.
    pub fn reset_cube(&mut self) {
        self.scene[self.cube].reset_rotation();
    }

    pub fn rotation_step(&self) -> f32 {
        self.rotation_step
    }

    /// Frames drawn successfully since startup.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[derive(Default)]
    struct CountingRenderer {
        size: (u32, u32),
        frames: usize,
        last_rotation: Option<Vec3>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), RenderError> {
            self.frames += 1;
            self.last_rotation = scene.objects().next().map(|o| o.rotation());
            Ok(())
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn size(&self) -> (u32, u32) {
            self.size
        }
    }

    struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn render(&mut self, _: &Scene, _: &PerspectiveCamera) -> Result<(), RenderError> {
            Err(RenderError::DeviceLost("gone".into()))
        }

        fn set_size(&mut self, _: u32, _: u32) {}

        fn size(&self) -> (u32, u32) {
            (0, 0)
        }
    }

    #[test]
    fn test_bootstrap_matches_config() {
        let ctx = AppContext::bootstrap(&DemoConfig::default(), Viewport::new(1280, 720), CountingRenderer::default());
        assert_eq!(ctx.camera.fov_degrees, 75.0);
        assert_eq!(ctx.camera.near, 0.1);
        assert_eq!(ctx.camera.far, 1000.0);
        assert_eq!(ctx.camera.aspect, 1280.0 / 720.0);
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(ctx.renderer.size(), (1280, 720));
        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.cube().material, Material::Normal);
        assert_eq!(ctx.cube().geometry.index_count(), 36);
        assert_eq!(ctx.cube().rotation(), Vec3::ZERO);
        assert_eq!(ctx.frames(), 0);
    }

    #[test]
    fn test_bootstrap_before_layout_keeps_projection_finite() {
        let mut ctx = AppContext::bootstrap(&DemoConfig::default(), Viewport::new(0, 0), CountingRenderer::default());
        assert_eq!(ctx.camera.aspect, 1.0);
        assert!(ctx.camera.projection().is_finite());
        assert_eq!(ctx.renderer.size(), (0, 0));

        crate::viewport::handle_resize(&mut ctx, Viewport::new(390, 844));
        assert_eq!(ctx.camera.aspect, 390.0 / 844.0);
        assert!(ctx.camera.projection().is_finite());
    }

    #[test]
    fn test_frame_rotates_before_drawing() {
        let mut ctx = AppContext::bootstrap(&DemoConfig::default(), Viewport::new(800, 600), CountingRenderer::default());
        ctx.frame().unwrap();
        assert_eq!(ctx.renderer.frames, 1);
        assert_eq!(ctx.renderer.last_rotation, Some(Vec3::new(0.01, 0.01, 0.0)));
        assert_eq!(ctx.frames(), 1);
    }

    #[test]
    fn test_render_error_propagates() {
        let mut ctx = AppContext::bootstrap(&DemoConfig::default(), Viewport::new(800, 600), BrokenRenderer);
        assert!(matches!(ctx.frame(), Err(RenderError::DeviceLost(_))));
        assert_eq!(ctx.frames(), 0);
    }

    #[test]
    fn test_reset_cube_zeroes_rotation() {
        let mut ctx = AppContext::bootstrap(&DemoConfig::default(), Viewport::new(800, 600), CountingRenderer::default());
        for _ in 0..37 {
            ctx.frame().unwrap();
        }
        assert_ne!(ctx.cube().rotation(), Vec3::ZERO);
        ctx.reset_cube();
        assert_eq!(ctx.cube().rotation(), Vec3::ZERO);
    }
}
