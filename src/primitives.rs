use glam::Vec3;

use crate::scene::{Material, Mesh};

/// Flat ground plane in the XZ plane, centered at the origin, facing +Y.
/// `uv_repeat` scales the texture coordinates so a repeat-wrapped texture
/// tiles that many times across the plane.
pub fn plane(size: f32, uv_repeat: f32, material: Material) -> Mesh {
    let half = size * 0.5;
    let positions = vec![
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(half, 0.0, half),
        Vec3::new(-half, 0.0, half),
    ];
    let normals = vec![Vec3::Y; 4];
    let uvs = vec![
        [0.0, 0.0],
        [uv_repeat, 0.0],
        [uv_repeat, uv_repeat],
        [0.0, uv_repeat],
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];
    Mesh::new(positions, normals, uvs, indices, material)
}

/// Axis-aligned box centered at the origin, flat-shaded (four vertices per
/// face so each face keeps its own normal).
pub fn cuboid(size: Vec3, material: Material) -> Mesh {
    let h = size * 0.5;
    // (normal, four corners counter-clockwise seen from outside)
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::X,
            [
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, h.z),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, -h.z),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(-h.x, h.y, -h.z),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(-h.x, -h.y, h.z),
            ],
        ),
        (
            Vec3::Z,
            [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
            ],
        ),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(&corners);
        normals.extend(std::iter::repeat(normal).take(4));
        uvs.extend_from_slice(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(positions, normals, uvs, indices, material)
}

/// Cone with its base circle on the XZ plane and apex at `(0, height, 0)`.
/// Flat-shaded so a low segment count reads as visible facets while it spins.
pub fn cone(radius: f32, height: f32, segments: u32, material: Material) -> Mesh {
    let segments = segments.max(3);
    let apex = Vec3::new(0.0, height, 0.0);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    let ring: Vec<Vec3> = (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect();

    // Side faces
    for i in 0..segments as usize {
        let a = ring[i];
        let b = ring[(i + 1) % segments as usize];
        let normal = (apex - a).cross(b - a).normalize();

        let base = positions.len() as u32;
        positions.extend_from_slice(&[a, apex, b]);
        normals.extend(std::iter::repeat(normal).take(3));
        uvs.extend_from_slice(&[[0.0, 0.0], [0.5, 1.0], [1.0, 0.0]]);
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    // Base cap, facing down
    let cap_start = positions.len() as u32;
    for p in &ring {
        positions.push(*p);
        normals.push(Vec3::NEG_Y);
        uvs.push([0.0, 0.0]);
    }
    for i in 1..segments - 1 {
        indices.extend_from_slice(&[cap_start, cap_start + i, cap_start + i + 1]);
    }

    Mesh::new(positions, normals, uvs, indices, material)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_bounds_match_size() {
        let mesh = plane(40.0, 20.0, Material::color([1.0; 3]));
        let bounds = mesh.local_bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-20.0, 0.0, -20.0));
        assert_eq!(bounds.max, Vec3::new(20.0, 0.0, 20.0));
    }

    #[test]
    fn test_plane_uv_repeat() {
        let mesh = plane(40.0, 20.0, Material::color([1.0; 3]));
        assert_eq!(mesh.uvs[2], [20.0, 20.0]);
    }

    #[test]
    fn test_cuboid_has_24_vertices_36_indices() {
        let mesh = cuboid(Vec3::new(2.0, 1.0, 3.0), Material::color([1.0; 3]));
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.normals.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        let bounds = mesh.local_bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -0.5, -1.5));
        assert_eq!(bounds.max, Vec3::new(1.0, 0.5, 1.5));
    }

    #[test]
    fn test_cuboid_normals_are_unit_axes() {
        let mesh = cuboid(Vec3::splat(1.0), Material::color([1.0; 3]));
        for normal in &mesh.normals {
            assert!((normal.length() - 1.0).abs() < 1e-6);
            assert_eq!(normal.abs().max_element(), 1.0);
        }
    }

    #[test]
    fn test_cone_dimensions() {
        let mesh = cone(1.0, 2.0, 12, Material::color([1.0; 3]));
        let bounds = mesh.local_bounds().unwrap();
        assert!((bounds.max.y - 2.0).abs() < 1e-6);
        assert!((bounds.min.y).abs() < 1e-6);
        assert!((bounds.max.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cone_side_normals_point_outward() {
        let mesh = cone(1.0, 2.0, 8, Material::color([1.0; 3]));
        // The first 3*segments vertices are side faces
        for (p, n) in mesh.positions.iter().zip(&mesh.normals).take(24) {
            let outward = Vec3::new(p.x, 0.0, p.z);
            if outward.length() > 1e-3 {
                assert!(n.dot(outward.normalize()) > 0.0);
            }
        }
    }

    #[test]
    fn test_cone_minimum_segments() {
        let mesh = cone(1.0, 1.0, 0, Material::color([1.0; 3]));
        assert!(!mesh.indices.is_empty());
    }
}
