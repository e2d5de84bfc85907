use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use log::{info, warn};

use crate::scene::{Material, Mesh, Node, Transform};
use crate::texture::{MagFilter, TextureData, TextureOptions, WrapMode};

/// Completion message for one asset load request, delivered over the
/// viewer's channel and processed by the render loop.
pub struct LoadEvent {
    pub slot: String,
    pub result: Result<Node>,
}

/// Fire-and-forget load of one model file on a worker thread. No retry, no
/// cancellation; completion (or failure) arrives as a [`LoadEvent`].
pub fn spawn_load(slot: String, path: PathBuf, sender: Sender<LoadEvent>) {
    let _ = std::thread::spawn(move || {
        let result = load_model(&path);
        // A closed receiver means the viewer already shut down
        let _ = sender.send(LoadEvent { slot, result });
    });
}

/// Loads a glTF file into a detached scene subtree: node hierarchy with
/// transforms, meshes with base-color materials, and base-color textures
/// where the file carries them.
pub fn load_model(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    info!("Loading model: {:?}", path);

    let (document, buffers, images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    let mut root = Node::group();
    for scene in document.scenes() {
        for node in scene.nodes() {
            root.children.push(convert_node(&node, &buffers, &images)?);
        }
    }

    let mesh_count = document.meshes().count();
    if mesh_count == 0 {
        warn!("No geometry found in {:?}", path);
    } else {
        info!(
            "Loaded {:?}: {} nodes, {} meshes",
            path,
            document.nodes().count(),
            mesh_count
        );
    }

    Ok(root)
}

fn convert_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
) -> Result<Node> {
    let (translation, rotation, scale) = node.transform().decomposed();
    let mut out = Node::group().with_transform(Transform {
        translation: Vec3::from_array(translation),
        rotation: Quat::from_array(rotation),
        scale: Vec3::from_array(scale),
    });

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if let Some(converted) = convert_primitive(&primitive, buffers, images)? {
                out.children.push(Node::mesh(converted));
            }
        }
    }

    for child in node.children() {
        out.children.push(convert_node(&child, buffers, images)?);
    }

    Ok(out)
}

fn convert_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
) -> Result<Option<Mesh>> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let Some(positions) = reader.read_positions() else {
        return Ok(None);
    };
    let positions: Vec<Vec3> = positions.map(Vec3::from_array).collect();
    if positions.is_empty() {
        return Ok(None);
    }

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(normals) => normals.map(Vec3::from_array).collect(),
        None => smooth_normals(&positions, &indices),
    };

    let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
        Some(coords) => coords.into_f32().collect(),
        None => vec![[0.0, 0.0]; positions.len()],
    };

    let pbr = primitive.material().pbr_metallic_roughness();
    let base_color = pbr.base_color_factor();
    let texture = pbr
        .base_color_texture()
        .and_then(|info| convert_texture(&info.texture(), images));

    let material = Material {
        base_color: [base_color[0], base_color[1], base_color[2]],
        texture,
    };

    Ok(Some(Mesh::new(positions, normals, uvs, indices, material)))
}

fn convert_texture(texture: &gltf::Texture, images: &[gltf::image::Data]) -> Option<TextureData> {
    let image = images.get(texture.source().index())?;

    let pixels = match image.format {
        gltf::image::Format::R8G8B8A8 => image.pixels.clone(),
        gltf::image::Format::R8G8B8 => image
            .pixels
            .chunks(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        other => {
            warn!("Unsupported texture format {:?}, skipping", other);
            return None;
        }
    };

    let sampler = texture.sampler();
    let wrap = match sampler.wrap_s() {
        gltf::texture::WrappingMode::ClampToEdge => WrapMode::ClampToEdge,
        _ => WrapMode::Repeat,
    };
    let mag_filter = match sampler.mag_filter() {
        Some(gltf::texture::MagFilter::Nearest) => MagFilter::Nearest,
        _ => MagFilter::Linear,
    };

    Some(TextureData::new(
        image.width,
        image.height,
        pixels,
        TextureOptions { wrap, mag_filter },
    ))
}

/// Per-vertex normals from accumulated face normals, for primitives that
/// ship positions only
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for triangle in indices.chunks(3) {
        if let [a, b, c] = *triangle {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            if a < positions.len() && b < positions.len() && c < positions.len() {
                let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
                normals[a] += face;
                normals[b] += face;
                normals[c] += face;
            }
        }
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}
