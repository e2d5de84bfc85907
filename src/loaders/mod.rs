mod gltf;

pub use gltf::{load_model, spawn_load, LoadEvent};
