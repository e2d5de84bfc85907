pub mod animation;
pub mod bounds;
pub mod camera;
pub mod cli;
pub mod composer;
pub mod config;
pub mod controls;
pub mod loaders;
pub mod math;
pub mod primitives;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod viewer;

pub use bounds::{compute_bounds, BoundingVolume};
pub use camera::PerspectiveCamera;
pub use math::Aabb;
pub use scene::{Node, NodeId, NodeKind, Scene};
