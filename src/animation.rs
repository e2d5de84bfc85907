use glam::Quat;

use crate::scene::{NodeId, Scene};

pub const BASE_SPIN_SPEED: f32 = 0.8;
pub const SPIN_SPEED_STEP: f32 = 0.25;

/// Rotation angle (radians, about +Y) for the spinner at `index` after
/// `elapsed_seconds` of wall-clock time. A pure function of the timestamp
/// and list position, so animation is deterministic and resumable; no
/// per-frame delta accumulates.
pub fn spin_angle(elapsed_seconds: f32, index: usize) -> f32 {
    elapsed_seconds * (BASE_SPIN_SPEED + index as f32 * SPIN_SPEED_STEP)
}

/// Append-only list of procedural nodes the render loop spins every tick.
/// Insertion order derives each entry's speed offset.
#[derive(Default)]
pub struct Spinners {
    ids: Vec<NodeId>,
}

impl Spinners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: NodeId) {
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Set every spinner's rotation for the given elapsed time
    pub fn apply(&self, scene: &mut Scene, elapsed_seconds: f32) {
        for (index, id) in self.ids.iter().enumerate() {
            scene.transform_mut(*id).rotation =
                Quat::from_rotation_y(spin_angle(elapsed_seconds, index));
        }
    }
}
