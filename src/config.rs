// config.rs - Scene configuration with inline defaults and optional JSON overrides
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Model locators, relative to the models directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetLocators {
    pub braces: String,
    pub pill: String,
    pub document: String,
}

impl Default for AssetLocators {
    fn default() -> Self {
        Self {
            braces: "models/braces/braces.glb".to_string(),
            pill: "models/pill/pill.glb".to_string(),
            document: "models/document/document.glb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub auto_rotate: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 55.0,
            near: 0.1,
            far: 100.0,
            position: [9.0, 13.0, -9.0],
            target: [0.0, 0.75, 0.0],
            auto_rotate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub position: [f32; 3],
    pub shadow_map_size: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            directional_intensity: 0.6,
            position: [2.5, 2.9, 0.7],
            shadow_map_size: 1024,
        }
    }
}

/// Timings of the completion-chaining demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub enabled: bool,
    /// Seconds until "Data A Loaded"
    pub first_delay: f32,
    /// Seconds until "Data B Loaded"
    pub second_delay: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            first_delay: 1.0,
            second_delay: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub assets: AssetLocators,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub demo: DemoConfig,
}

impl SceneConfig {
    /// Read a JSON config; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid config {:?}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// `load`, falling back to defaults with a warning
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
