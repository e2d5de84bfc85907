use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One external model asset: where to load it from, where to stage it, and
/// whether it is the hero the camera frames itself around. Staging offsets
/// are data, not code: second/third place sit beside the hero at whatever
/// offsets the config gives them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSlot {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub size: f32,
    /// Times the floor texture tiles across the plane
    pub texture_repeats: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 40.0,
            texture_repeats: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 40.0,
            near: 0.1,
            far: 50.0,
            position: [0.0, 10.0, 20.0],
            target: [0.0, 5.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub background: [f32; 3],
    pub ground: GroundConfig,
    pub camera: CameraConfig,
    /// Multiple of the bounds size used as framing coverage (leaves margin)
    pub frame_margin: f32,
    pub models: Vec<ModelSlot>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            // Light blue sky
            background: [0.678, 0.847, 0.902],
            ground: GroundConfig::default(),
            camera: CameraConfig::default(),
            frame_margin: 1.2,
            models: Vec::new(),
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// The slot whose load completion drives camera framing: the first slot
    /// marked primary, falling back to the first slot.
    pub fn primary_slot(&self) -> Option<&ModelSlot> {
        self.models
            .iter()
            .find(|slot| slot.primary)
            .or_else(|| self.models.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_initial_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera.fov_y_degrees, 40.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.camera.far, 50.0);
        assert_eq!(config.camera.position, [0.0, 10.0, 20.0]);
        assert_eq!(config.ground.size, 40.0);
        assert_eq!(config.ground.texture_repeats, 20.0);
        assert_eq!(config.frame_margin, 1.2);
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let json = r#"{
            "models": [
                { "name": "first", "path": "models/first.glb", "primary": true },
                { "name": "second", "path": "models/second.glb", "offset": [4.0, 0.0, 0.0] }
            ]
        }"#;
        let config: ViewerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.models[0].offset, [0.0, 0.0, 0.0]);
        assert_eq!(config.models[1].offset, [4.0, 0.0, 0.0]);
        assert_eq!(config.camera.fov_y_degrees, 40.0);
    }

    #[test]
    fn test_primary_slot_prefers_marked() {
        let json = r#"{
            "models": [
                { "name": "a", "path": "a.glb" },
                { "name": "b", "path": "b.glb", "primary": true }
            ]
        }"#;
        let config: ViewerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.primary_slot().unwrap().name, "b");
    }

    #[test]
    fn test_primary_slot_falls_back_to_first() {
        let json = r#"{ "models": [ { "name": "only", "path": "x.glb" } ] }"#;
        let config: ViewerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.primary_slot().unwrap().name, "only");
    }

    #[test]
    fn test_primary_slot_empty_models() {
        assert!(ViewerConfig::default().primary_slot().is_none());
    }
}
