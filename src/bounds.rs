use glam::Vec3;

use crate::math::Aabb;
use crate::scene::{NodeId, NodeKind, Scene};

/// World-space bounding volume of a subtree: box center plus the Euclidean
/// length of the box diagonal. The diagonal (rather than the largest axis)
/// gives one scalar usable as a fit distance regardless of the subtree's
/// aspect ratio.
///
/// Derived on demand and never cached: stale the moment the subtree mutates,
/// so recompute after any structural change before framing a camera.
#[derive(Clone, Copy, Debug)]
pub struct BoundingVolume {
    pub center: Vec3,
    pub size: f32,
}

/// Compute the bounding volume of the subtree rooted at `node`, in world
/// space (every descendant's cumulative transform applied). A subtree with
/// no mesh geometry yields a zero-size volume centered at the node's own
/// world position.
pub fn compute_bounds(scene: &Scene, node: NodeId) -> BoundingVolume {
    let mut combined: Option<Aabb> = None;
    scene.visit(node, &mut |_, kind, world| {
        if let NodeKind::Mesh(mesh) = kind {
            if let Some(local) = mesh.local_bounds() {
                let world_bounds = local.transformed(world);
                combined = Some(match combined {
                    Some(acc) => acc.union(&world_bounds),
                    None => world_bounds,
                });
            }
        }
    });

    match combined {
        Some(aabb) => BoundingVolume {
            center: aabb.center(),
            size: aabb.diagonal(),
        },
        None => BoundingVolume {
            center: scene
                .world_transform(node)
                .transform_point3(Vec3::ZERO),
            size: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Material, Mesh, Node, Transform};
    use glam::Quat;

    fn unit_cube() -> Mesh {
        let positions = vec![Vec3::splat(-0.5), Vec3::splat(0.5)];
        let n = positions.len();
        Mesh::new(
            positions,
            vec![Vec3::Y; n],
            vec![[0.0, 0.0]; n],
            vec![],
            Material::color([1.0; 3]),
        )
    }

    #[test]
    fn test_single_mesh_bounds() {
        let mut scene = Scene::new();
        let id = scene.attach(scene.root(), Node::mesh(unit_cube()));

        let bounds = compute_bounds(&scene, id);
        assert!(bounds.center.length() < 1e-6);
        assert!((bounds.size - 3.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_span_multiple_meshes() {
        let mut scene = Scene::new();
        let group = scene.attach(scene.root(), Node::group());
        let _ = scene.attach(group, Node::mesh(unit_cube()).translated(Vec3::new(-2.0, 0.0, 0.0)));
        let _ = scene.attach(group, Node::mesh(unit_cube()).translated(Vec3::new(2.0, 0.0, 0.0)));

        let bounds = compute_bounds(&scene, group);
        assert!(bounds.center.length() < 1e-6);
        // Box is 5 x 1 x 1
        assert!((bounds.size - (25.0f32 + 1.0 + 1.0).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_bounds_include_nested_transforms() {
        let mut scene = Scene::new();
        let outer = scene.attach(
            scene.root(),
            Node::group().translated(Vec3::new(0.0, 10.0, 0.0)),
        );
        let inner = scene.attach(outer, Node::mesh(unit_cube()).translated(Vec3::new(1.0, 0.0, 0.0)));
        let _ = inner;

        let bounds = compute_bounds(&scene, outer);
        assert!((bounds.center - Vec3::new(1.0, 10.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_scaled_subtree_grows_bounds() {
        let mut scene = Scene::new();
        let id = scene.attach(
            scene.root(),
            Node::mesh(unit_cube()).with_transform(Transform {
                translation: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                scale: Vec3::splat(2.0),
            }),
        );

        let bounds = compute_bounds(&scene, id);
        assert!((bounds.size - 2.0 * 3.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_empty_subtree_zero_size_at_node_position() {
        let mut scene = Scene::new();
        let id = scene.attach(
            scene.root(),
            Node::group().translated(Vec3::new(3.0, 4.0, 5.0)),
        );

        let bounds = compute_bounds(&scene, id);
        assert_eq!(bounds.size, 0.0);
        assert!((bounds.center - Vec3::new(3.0, 4.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn test_translation_invariance() {
        let mut scene = Scene::new();
        let group = scene.attach(scene.root(), Node::group());
        let _ = scene.attach(group, Node::mesh(unit_cube()));
        let _ = scene.attach(group, Node::mesh(unit_cube()).translated(Vec3::new(0.0, 3.0, 0.0)));
        let before = compute_bounds(&scene, group);

        let offset = Vec3::new(-7.0, 2.0, 9.0);
        scene.transform_mut(group).translation = offset;
        let after = compute_bounds(&scene, group);

        assert!((after.center - (before.center + offset)).length() < 1e-5);
        assert!((after.size - before.size).abs() < 1e-5);
    }
}
