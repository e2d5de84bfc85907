use glam::{Mat4, Vec3};

use crate::bounds::BoundingVolume;

/// Floor for the bounds size used in framing. A zero-size volume would put
/// the distance at zero and collapse the camera onto its target.
pub const MIN_BOUNDS_SIZE: f32 = 1e-4;

/// Viewing direction used when the camera sits exactly on the bounds center
/// and no direction can be derived from its position.
const FALLBACK_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Perspective camera. Position, look-at target and clip planes are written
/// by [`PerspectiveCamera::frame`]; aspect is written by the render loop on
/// resize; everything in between belongs to the orbit controls.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            fov_y_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Reposition the camera so a plane of height `desired_coverage`,
    /// centered on the bounding volume and perpendicular to the view
    /// direction, exactly fills the vertical field of view.
    ///
    /// The current viewing direction from the bounds center is preserved;
    /// only the distance along it changes. Near and far are re-derived from
    /// the bounds size so the framed content cannot clip. Idempotent for
    /// identical inputs and an unmoved camera.
    pub fn frame(&mut self, desired_coverage: f32, bounds: &BoundingVolume) {
        let size = bounds.size.max(MIN_BOUNDS_SIZE);
        let coverage = desired_coverage.max(MIN_BOUNDS_SIZE);

        let half_coverage = coverage * 0.5;
        let half_fov_y = (self.fov_y_degrees * 0.5).to_radians();
        let distance = half_coverage / half_fov_y.tan();

        let direction = (self.position - bounds.center)
            .try_normalize()
            .unwrap_or(FALLBACK_DIRECTION);

        self.position = bounds.center + direction * distance;
        self.near = size / 100.0;
        self.far = size * 100.0;
        self.look_at(bounds.center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(center: Vec3, size: f32) -> BoundingVolume {
        BoundingVolume { center, size }
    }

    #[test]
    fn test_frame_distance_matches_fov_derivation() {
        let mut camera = PerspectiveCamera::new(40.0, 2.0, 0.1, 50.0);
        camera.position = Vec3::new(0.0, 10.0, 20.0);

        let b = bounds(Vec3::ZERO, 10.0);
        camera.frame(12.0, &b);

        let expected = 6.0 / 20.0f32.to_radians().tan();
        let actual = (camera.position - b.center).length();
        assert!((actual - expected).abs() < 1e-3, "distance {actual} vs {expected}");
    }

    #[test]
    fn test_frame_sets_clip_planes_around_size() {
        let mut camera = PerspectiveCamera::new(40.0, 2.0, 0.1, 50.0);
        camera.position = Vec3::new(0.0, 10.0, 20.0);
        camera.frame(12.0, &bounds(Vec3::ZERO, 10.0));

        assert!((camera.near - 0.1).abs() < 1e-6);
        assert!((camera.far - 1000.0).abs() < 1e-3);
        assert!(camera.near > 0.0 && camera.near < camera.far);
    }

    #[test]
    fn test_frame_preserves_direction() {
        let mut camera = PerspectiveCamera::new(45.0, 1.5, 0.1, 50.0);
        camera.position = Vec3::new(3.0, 4.0, 0.0);

        let b = bounds(Vec3::ZERO, 2.0);
        let before = (camera.position - b.center).normalize();
        camera.frame(2.4, &b);
        let after = (camera.position - b.center).normalize();

        assert!((after - before).length() < 1e-5);
        assert_eq!(camera.target, b.center);
    }

    #[test]
    fn test_frame_is_idempotent() {
        let mut camera = PerspectiveCamera::new(40.0, 1.0, 0.1, 50.0);
        camera.position = Vec3::new(5.0, 5.0, 5.0);

        let b = bounds(Vec3::new(1.0, 2.0, 3.0), 4.0);
        camera.frame(4.8, &b);
        let first = camera.position;
        camera.frame(4.8, &b);

        assert!((camera.position - first).length() < 1e-5);
    }

    #[test]
    fn test_frame_zero_size_bounds_guarded() {
        let mut camera = PerspectiveCamera::new(40.0, 1.0, 0.1, 50.0);
        camera.position = Vec3::new(0.0, 0.0, 10.0);

        camera.frame(0.0, &bounds(Vec3::ZERO, 0.0));

        assert!(camera.near > 0.0);
        assert!(camera.near < camera.far);
        // Camera must not collapse onto the target
        assert!((camera.position - camera.target).length() > 0.0);
    }

    #[test]
    fn test_frame_camera_on_center_uses_fallback_direction() {
        let mut camera = PerspectiveCamera::new(40.0, 1.0, 0.1, 50.0);
        camera.position = Vec3::new(1.0, 2.0, 3.0);

        let b = bounds(Vec3::new(1.0, 2.0, 3.0), 5.0);
        camera.frame(6.0, &b);

        let offset = camera.position - b.center;
        assert!(offset.length() > 1.0);
        assert!(offset.normalize().dot(FALLBACK_DIRECTION) > 0.99);
    }

    #[test]
    fn test_projection_uses_current_aspect() {
        let mut camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 100.0);
        let square = camera.projection_matrix();
        camera.set_aspect(2.0);
        let wide = camera.projection_matrix();
        // Horizontal scale halves when the aspect doubles
        assert!((wide.x_axis.x - square.x_axis.x / 2.0).abs() < 1e-6);
    }
}
