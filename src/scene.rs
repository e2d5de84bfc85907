use glam::{Mat4, Quat, Vec3};

use crate::math::Aabb;
use crate::texture::TextureData;

/// Handle to a node owned by a [`Scene`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Local transform: translation, rotation, scale
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Surface appearance of a mesh
#[derive(Clone, Debug)]
pub struct Material {
    pub base_color: [f32; 3],
    pub texture: Option<TextureData>,
}

impl Material {
    pub fn color(base_color: [f32; 3]) -> Self {
        Self {
            base_color,
            texture: None,
        }
    }

    pub fn textured(base_color: [f32; 3], texture: TextureData) -> Self {
        Self {
            base_color,
            texture: Some(texture),
        }
    }
}

/// Indexed triangle mesh with per-vertex normals and texture coordinates
#[derive(Clone, Debug)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub material: Material,
    local_bounds: Option<Aabb>,
}

impl Mesh {
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<[f32; 2]>,
        indices: Vec<u32>,
        material: Material,
    ) -> Self {
        let local_bounds = Aabb::from_points(positions.iter().copied());
        Self {
            positions,
            normals,
            uvs,
            indices,
            material,
            local_bounds,
        }
    }

    /// Bounds in the mesh's own coordinate space. `None` for a vertex-less mesh.
    pub fn local_bounds(&self) -> Option<Aabb> {
        self.local_bounds
    }
}

/// Scene lighting variants
#[derive(Clone, Debug)]
pub enum Light {
    /// Sky/ground fill light, blended by surface normal direction
    Hemisphere {
        sky_color: [f32; 3],
        ground_color: [f32; 3],
        intensity: f32,
    },
    /// Key light shining from the node's position toward `position + target_offset`
    Directional {
        color: [f32; 3],
        intensity: f32,
        target_offset: Vec3,
    },
}

/// Closed set of renderable node variants
#[derive(Clone, Debug)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
    Light(Light),
}

/// A detached subtree. Built freely (including on worker threads) and then
/// attached to a [`Scene`], which takes ownership of the whole tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub transform: Transform,
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn group() -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: NodeKind::Group,
            children: Vec::new(),
        }
    }

    pub fn mesh(mesh: Mesh) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: NodeKind::Mesh(mesh),
            children: Vec::new(),
        }
    }

    pub fn light(light: Light) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: NodeKind::Light(light),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn translated(self, translation: Vec3) -> Self {
        self.with_transform(Transform::from_translation(translation))
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

struct Entry {
    transform: Transform,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Scene graph: a tree of nodes stored in an arena and addressed by
/// [`NodeId`]. The root group lives for the whole session; nodes are only
/// ever appended, never removed.
pub struct Scene {
    entries: Vec<Entry>,
    root: NodeId,
    pub background: [f32; 3],
}

impl Scene {
    pub fn new() -> Self {
        let root = Entry {
            transform: Transform::IDENTITY,
            kind: NodeKind::Group,
            parent: None,
            children: Vec::new(),
        };
        Self {
            entries: vec![root],
            root: NodeId(0),
            background: [0.0, 0.0, 0.0],
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    /// Attach a detached subtree under `parent`. Returns the id of the
    /// subtree's root node.
    pub fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry {
            transform: node.transform,
            kind: node.kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entries[parent.0].children.push(id);
        for child in node.children {
            let _ = self.attach(id, child);
        }
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.entries[id.0].kind
    }

    pub fn transform(&self, id: NodeId) -> Transform {
        self.entries[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.entries[id.0].transform
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.0].children
    }

    /// Cumulative transform from the root down to (and including) `id`
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let entry = &self.entries[id.0];
        let local = entry.transform.matrix();
        match entry.parent {
            Some(parent) => self.world_transform(parent) * local,
            None => local,
        }
    }

    /// Depth-first walk of the subtree rooted at `from`, passing each node's
    /// cumulative world transform.
    pub fn visit(&self, from: NodeId, f: &mut impl FnMut(NodeId, &NodeKind, &Mat4)) {
        let ambient = match self.entries[from.0].parent {
            Some(parent) => self.world_transform(parent),
            None => Mat4::IDENTITY,
        };
        self.visit_inner(from, &ambient, f);
    }

    fn visit_inner(
        &self,
        id: NodeId,
        parent_world: &Mat4,
        f: &mut impl FnMut(NodeId, &NodeKind, &Mat4),
    ) {
        let entry = &self.entries[id.0];
        let world = *parent_world * entry.transform.matrix();
        f(id, &entry.kind, &world);
        for child in &entry.children {
            self.visit_inner(*child, &world, f);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
