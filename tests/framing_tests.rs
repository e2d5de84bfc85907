use glam::Vec3;
use model_viewer::primitives::cuboid;
use model_viewer::scene::{Material, Node, Scene};
use model_viewer::{compute_bounds, BoundingVolume, PerspectiveCamera};

#[cfg(test)]
mod framing_tests {
    use super::*;

    #[test]
    fn test_frame_distance_from_coverage_and_fov() {
        let mut camera = PerspectiveCamera::new(40.0, 2.0, 0.1, 50.0);
        camera.position = Vec3::new(0.0, 10.0, 20.0);

        let bounds = BoundingVolume {
            center: Vec3::ZERO,
            size: 10.0,
        };
        camera.frame(12.0, &bounds);

        // distance = (coverage / 2) / tan(fov / 2)
        let expected = 6.0 / 20.0f32.to_radians().tan();
        let distance = (camera.position - bounds.center).length();
        assert!((distance - expected).abs() < 1e-3);
        assert!((camera.near - 0.1).abs() < 1e-6);
        assert!((camera.far - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_scene_subtree_end_to_end() {
        let mut scene = Scene::new();
        let model = scene.attach(
            scene.root(),
            Node::mesh(cuboid(Vec3::splat(10.0), Material::color([1.0; 3])))
                .translated(Vec3::new(0.0, 5.0, 0.0)),
        );

        let mut camera = PerspectiveCamera::new(40.0, 2.0, 0.1, 50.0);
        camera.position = Vec3::new(0.0, 10.0, 20.0);
        let start = camera.position;

        let bounds = compute_bounds(&scene, model);
        let size = 10.0f32 * 3.0f32.sqrt();
        assert!((bounds.size - size).abs() < 1e-3);
        assert!((bounds.center - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-5);

        camera.frame(bounds.size * 1.2, &bounds);

        let expected_distance = (size * 1.2 * 0.5) / 20.0f32.to_radians().tan();
        let distance = (camera.position - bounds.center).length();
        assert!((distance - expected_distance).abs() < 1e-2);

        // Viewing direction from the content is preserved
        let before = (start - bounds.center).normalize();
        let after = (camera.position - bounds.center).normalize();
        assert!((after - before).length() < 1e-4);

        assert!((camera.near - size / 100.0).abs() < 1e-4);
        assert!((camera.far - size * 100.0).abs() < 1e-1);
        assert_eq!(camera.target, bounds.center);
    }

    #[test]
    fn test_reframing_larger_content_moves_camera_back() {
        let mut camera = PerspectiveCamera::new(40.0, 2.0, 0.1, 50.0);
        camera.position = Vec3::new(0.0, 10.0, 20.0);

        let small = BoundingVolume {
            center: Vec3::ZERO,
            size: 2.0,
        };
        camera.frame(small.size * 1.2, &small);
        let near_distance = (camera.position - small.center).length();

        let large = BoundingVolume {
            center: Vec3::ZERO,
            size: 50.0,
        };
        camera.frame(large.size * 1.2, &large);
        let far_distance = (camera.position - large.center).length();

        assert!(far_distance > near_distance * 10.0);
        assert!(camera.far > camera.near);
    }

    #[test]
    fn test_frame_keeps_content_inside_clip_planes() {
        let mut camera = PerspectiveCamera::new(40.0, 2.0, 0.1, 50.0);
        camera.position = Vec3::new(0.0, 10.0, 20.0);

        let bounds = BoundingVolume {
            center: Vec3::new(0.0, 5.0, 0.0),
            size: 17.0,
        };
        camera.frame(bounds.size * 1.2, &bounds);

        let distance = (camera.position - bounds.center).length();
        // The whole volume fits between near and far along the view axis
        assert!(camera.near < distance - bounds.size * 0.5);
        assert!(camera.far > distance + bounds.size * 0.5);
    }
}
