use cubexr_shared::geometry::MeshGeometry;
use cubexr_shared::math;
use glam::{Mat4, Quat, Vec3};
use std::ops::{Index, IndexMut};

/// Surface appearance of a renderable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Colour by view-space normal direction.
    Normal,
}

/// Runtime transform state (mutable, driven by the render loop).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z. Each kept in `[0, 2π)`.
    pub rotation: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

/// Geometry and material combined into one transformable entity.
#[derive(Debug, Clone)]
pub struct RenderableObject {
    pub geometry: MeshGeometry,
    pub material: Material,
    pub transform: TransformState,
}

impl RenderableObject {
    pub fn new(geometry: MeshGeometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            transform: TransformState::default(),
        }
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    /// Add `delta` to the rotation, wrapping each axis into `[0, 2π)`.
    pub fn rotate_by(&mut self, delta: Vec3) {
        let r = self.transform.rotation + delta;
        self.transform.rotation = Vec3::new(math::wrap_angle(r.x), math::wrap_angle(r.y), math::wrap_angle(r.z));
    }

    pub fn reset_rotation(&mut self) {
        self.transform.rotation = Vec3::ZERO;
    }

    pub fn model_matrix(&self) -> Mat4 {
        math::model_matrix(self.transform.position, self.transform.rotation)
    }
}

/// Handle to an object owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Renderable objects plus ambient settings. Objects are only ever added.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<RenderableObject>,
    pub clear_color: [f64; 4],
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn add(&mut self, object: RenderableObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&RenderableObject> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut RenderableObject> {
        self.objects.get_mut(id.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = &RenderableObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// Objects are never removed, so an id handed out by `add` always resolves.
impl Index<ObjectId> for Scene {
    type Output = RenderableObject;

    fn index(&self, id: ObjectId) -> &RenderableObject {
        &self.objects[id.0]
    }
}

impl IndexMut<ObjectId> for Scene {
    fn index_mut(&mut self, id: ObjectId) -> &mut RenderableObject {
        &mut self.objects[id.0]
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Perspective camera. The projection matrix is cached and only recomputed by
/// [`PerspectiveCamera::update_projection_matrix`].
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub orientation: Quat,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            projection: math::perspective(fov_degrees, aspect, near, far),
        }
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = math::perspective(self.fov_degrees, self.aspect, self.near, self.far);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubexr_shared::geometry::unit_cube;
    use std::f32::consts::TAU;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_scene_add_and_lookup() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        let id = scene.add(RenderableObject::new(unit_cube(), Material::Normal));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.object(id).map(|o| o.material), Some(Material::Normal));
        assert_eq!(scene.objects().count(), 1);
    }

    #[test]
    fn test_rotate_by_wraps() {
        let mut cube = RenderableObject::new(unit_cube(), Material::Normal);
        cube.rotate_by(Vec3::new(TAU + 0.25, 0.5, 0.0));
        let r = cube.rotation();
        assert!((r.x - 0.25).abs() < EPSILON, "x = {}", r.x);
        assert!((r.y - 0.5).abs() < EPSILON);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn test_reset_rotation() {
        let mut cube = RenderableObject::new(unit_cube(), Material::Normal);
        cube.rotate_by(Vec3::splat(1.0));
        cube.reset_rotation();
        assert_eq!(cube.rotation(), Vec3::ZERO);
    }

    #[test]
    fn test_camera_projection_is_cached_until_update() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let before = camera.projection();
        camera.aspect = 2.0;
        assert_eq!(camera.projection(), before);
        camera.update_projection_matrix();
        assert_ne!(camera.projection(), before);
        assert_eq!(camera.projection(), math::perspective(75.0, 2.0, 0.1, 1000.0));
    }

    #[test]
    fn test_view_matrix_moves_world_opposite_camera() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position.z = 3.0;
        let origin = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), EPSILON), "got {origin}");
    }
}
