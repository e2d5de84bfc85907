use std::sync::mpsc::Sender;

use glam::Vec3;
use log::{info, warn};

use crate::animation::Spinners;
use crate::bounds::compute_bounds;
use crate::camera::{PerspectiveCamera, MIN_BOUNDS_SIZE};
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::loaders::{spawn_load, LoadEvent};
use crate::primitives::{cone, cuboid, plane};
use crate::scene::{Light, Material, Node, NodeId, Scene};
use crate::texture::{MagFilter, TextureData, TextureOptions, WrapMode};

/// Orbit zoom-out limit as a multiple of the framed bounds size
pub const MAX_DISTANCE_FACTOR: f32 = 10.0;

const TROPHY_COLOR: [f32; 3] = [1.0, 0.78, 0.1];
const PODIUM_COLOR: [f32; 3] = [0.55, 0.56, 0.62];

// Ranked podium steps: (center, size). First place front and center,
// runners-up beside it.
const PODIUM_STEPS: [([f32; 3], [f32; 3]); 3] = [
    ([0.0, 1.0, 0.0], [3.0, 2.0, 3.0]),
    ([-4.0, 0.75, 0.0], [3.0, 1.5, 3.0]),
    ([4.0, 0.5, 0.0], [3.0, 1.0, 3.0]),
];

/// Static scene content plus the spinner registry the render loop animates
pub struct Composition {
    pub scene: Scene,
    pub spinners: Spinners,
}

/// Build all static content once, synchronously: textured ground plane, the
/// two lights, the ranked podium boxes, and the trophy cone (registered as a
/// spinner). Model assets arrive later through [`issue_load_requests`].
pub fn compose(config: &ViewerConfig) -> Composition {
    let mut scene = Scene::new();
    scene.background = config.background;
    let root = scene.root();

    // Tiled floor, nearest-filtered so the tiles stay crisp up close
    let floor_texture = TextureData::checkerboard(
        2,
        [200, 200, 200],
        [120, 120, 125],
        TextureOptions {
            wrap: WrapMode::Repeat,
            mag_filter: MagFilter::Nearest,
        },
    );
    let ground = plane(
        config.ground.size,
        config.ground.texture_repeats,
        Material::textured([1.0, 1.0, 1.0], floor_texture),
    );
    let _ = scene.attach(root, Node::mesh(ground));

    // Sky/ground fill so unlit faces never go fully black
    let _ = scene.attach(
        root,
        Node::light(Light::Hemisphere {
            sky_color: [0.694, 0.882, 1.0],
            ground_color: [0.725, 0.478, 0.125],
            intensity: 2.0,
        }),
    );

    // Key light above the podium, aimed off-center
    let _ = scene.attach(
        root,
        Node::light(Light::Directional {
            color: [1.0, 1.0, 1.0],
            intensity: 2.5,
            target_offset: Vec3::new(-5.0, -10.0, 0.0),
        })
        .translated(Vec3::new(0.0, 10.0, 0.0)),
    );

    for (center, size) in PODIUM_STEPS {
        let step = cuboid(Vec3::from_array(size), Material::color(PODIUM_COLOR));
        let _ = scene.attach(root, Node::mesh(step).translated(Vec3::from_array(center)));
    }

    // Trophy on the winner's step, spinning about its own axis
    let mut spinners = Spinners::new();
    let trophy = cone(0.6, 1.6, 12, Material::color(TROPHY_COLOR));
    let trophy_id = scene.attach(root, Node::mesh(trophy).translated(Vec3::new(0.0, 2.0, 0.0)));
    spinners.register(trophy_id);

    info!(
        "Scene composed: {} nodes, {} spinner(s), {} model slot(s) pending",
        scene.node_count(),
        spinners.len(),
        config.models.len()
    );

    Composition { scene, spinners }
}

/// Fire one asynchronous load per configured model slot. Requests are
/// independent and unordered; each completion arrives as a [`LoadEvent`] on
/// `sender`.
pub fn issue_load_requests(config: &ViewerConfig, sender: &Sender<LoadEvent>) {
    for slot in &config.models {
        spawn_load(slot.name.clone(), slot.path.clone(), sender.clone());
    }
}

/// Process one load completion: attach the subtree to the scene root at its
/// slot's staging offset. For the primary slot only, additionally frame the
/// camera around the loaded content and retarget the orbit controls.
///
/// A failed load is logged and dropped; the slot simply never appears.
pub fn handle_load_event(
    scene: &mut Scene,
    camera: &mut PerspectiveCamera,
    controls: &mut OrbitControls,
    config: &ViewerConfig,
    event: LoadEvent,
) -> Option<NodeId> {
    let subtree = match event.result {
        Ok(subtree) => subtree,
        Err(error) => {
            warn!("Load failed for slot '{}': {:#}", event.slot, error);
            return None;
        }
    };

    let Some(slot) = config.models.iter().find(|slot| slot.name == event.slot) else {
        warn!("Load completed for unknown slot '{}', dropping", event.slot);
        return None;
    };

    let attached = scene.attach(
        scene.root(),
        subtree.translated(Vec3::from_array(slot.offset)),
    );
    info!("Attached model '{}' (scene now {} nodes)", slot.name, scene.node_count());

    let is_primary = config
        .primary_slot()
        .is_some_and(|primary| primary.name == slot.name);
    if is_primary {
        let bounds = compute_bounds(scene, attached);
        camera.frame(bounds.size * config.frame_margin, &bounds);
        controls.target = bounds.center;
        controls.max_distance = bounds.size.max(MIN_BOUNDS_SIZE) * MAX_DISTANCE_FACTOR;
        controls.sync_to(camera);
        info!(
            "Framed camera on '{}': center {:?}, size {:.3}",
            slot.name, bounds.center, bounds.size
        );
    }

    Some(attached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    #[test]
    fn test_compose_builds_static_content() {
        let composition = compose(&ViewerConfig::default());

        let mut meshes = 0;
        let mut lights = 0;
        composition
            .scene
            .visit(composition.scene.root(), &mut |_, kind, _| match kind {
                NodeKind::Mesh(_) => meshes += 1,
                NodeKind::Light(_) => lights += 1,
                NodeKind::Group => {}
            });

        // Ground + 3 podium steps + trophy
        assert_eq!(meshes, 5);
        assert_eq!(lights, 2);
        assert_eq!(composition.spinners.len(), 1);
    }

    #[test]
    fn test_compose_ground_is_textured() {
        let composition = compose(&ViewerConfig::default());
        let mut textured = 0;
        composition
            .scene
            .visit(composition.scene.root(), &mut |_, kind, _| {
                if let NodeKind::Mesh(mesh) = kind {
                    if mesh.material.texture.is_some() {
                        textured += 1;
                    }
                }
            });
        assert_eq!(textured, 1);
    }

    #[test]
    fn test_compose_sets_background() {
        let composition = compose(&ViewerConfig::default());
        assert_eq!(composition.scene.background, [0.678, 0.847, 0.902]);
    }
}
