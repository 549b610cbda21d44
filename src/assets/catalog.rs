//! Viewer configuration document.
//!
//! The model table is data, not code: a JSON document lists every model the
//! viewer can show, where to load it from, how to place it, and the keyframe
//! sets it can play.
//!
//! ```json
//! {
//!   "surface": ".webgl",
//!   "max_pixel_ratio": 2.0,
//!   "models": [
//!     { "name": "car-model", "path": "models/car-model.rig.json", "position": [0, -2, 0] },
//!     {
//!       "name": "human-model",
//!       "path": "models/human-model.rig.json",
//!       "scale": [4, 4, 4],
//!       "position": [0, -5, 0],
//!       "default_animation": "idle",
//!       "animations": { "idle": { "Head": [{ "time": 0, "rotation": [-0.3, 0, 0] }] } }
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec3;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::animation::KeyframeSet;
use crate::errors::{Error, Result};

fn default_surface() -> String {
    ".webgl".to_string()
}

fn default_max_pixel_ratio() -> f32 {
    2.0
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// How to load and initially place one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    /// Asset location, relative to the loader root.
    pub path: String,
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub position: [f32; 3],
    /// Named keyframe sets ("idle", "walking", ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub animations: BTreeMap<String, KeyframeSet>,
    /// Keyframe set played as soon as the model is displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_animation: Option<String>,
}

impl ModelDescriptor {
    #[must_use]
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            scale: default_scale(),
            position: [0.0; 3],
            animations: BTreeMap::new(),
            default_animation: None,
        }
    }

    #[must_use]
    pub fn scale_vec(&self) -> Vec3 {
        Vec3::from_array(self.scale)
    }

    #[must_use]
    pub fn position_vec(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[must_use]
    pub fn animation(&self, name: &str) -> Option<&KeyframeSet> {
        self.animations.get(name)
    }

    pub fn animation_names(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }

    /// The keyframe set named by `default_animation`, if any.
    #[must_use]
    pub fn default_keyframes(&self) -> Option<(&str, &KeyframeSet)> {
        let name = self.default_animation.as_deref()?;
        self.animations.get(name).map(|set| (name, set))
    }

    fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::Config(format!("model '{}': {msg}", self.name)));

        if self.name.is_empty() {
            return Err(Error::Config("model with empty name".to_string()));
        }
        if self.path.is_empty() {
            return fail("empty asset path".to_string());
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return fail(format!("scale must be positive, got {:?}", self.scale));
        }
        if self.position.iter().any(|p| !p.is_finite()) {
            return fail(format!("position must be finite, got {:?}", self.position));
        }

        for (anim, set) in &self.animations {
            for (bone, keyframes) in set.iter() {
                if keyframes.is_empty() {
                    return fail(format!("animation '{anim}', bone '{bone}': no keyframes"));
                }
                let mut previous = f32::NEG_INFINITY;
                for k in keyframes {
                    if !k.time.is_finite() || k.time < previous {
                        return fail(format!(
                            "animation '{anim}', bone '{bone}': keyframe times must be finite and non-decreasing"
                        ));
                    }
                    previous = k.time;
                }
            }
        }

        if let Some(default) = &self.default_animation
            && !self.animations.contains_key(default)
        {
            return fail(format!("default animation '{default}' is not defined"));
        }

        Ok(())
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Selector of the output surface.
    #[serde(default = "default_surface")]
    pub surface: String,
    /// Upper bound for the device pixel ratio used by the output surface.
    #[serde(default = "default_max_pixel_ratio")]
    pub max_pixel_ratio: f32,
    pub models: Vec<ModelDescriptor>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            surface: default_surface(),
            max_pixel_ratio: default_max_pixel_ratio(),
            models: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded {} model descriptor(s) from {}", config.models.len(), path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.surface.is_empty() {
            return Err(Error::Config("surface selector is empty".to_string()));
        }
        if !self.max_pixel_ratio.is_finite() || self.max_pixel_ratio <= 0.0 {
            return Err(Error::Config(format!(
                "max_pixel_ratio must be positive, got {}",
                self.max_pixel_ratio
            )));
        }

        let mut names = FxHashSet::default();
        for model in &self.models {
            model.validate()?;
            if !names.insert(model.name.as_str()) {
                return Err(Error::Config(format!("duplicate model name '{}'", model.name)));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }
}
