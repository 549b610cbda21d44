//! Model loading.
//!
//! [`ModelLoader`] resolves an asset path into a [`SkinnedModel`]. Decoding of
//! binary 3D formats is left to other implementations of the trait; the crate
//! ships [`RigLoader`], which reads a JSON rig document describing the bone
//! hierarchy:
//!
//! ```json
//! {
//!   "name": "human",
//!   "bones": [
//!     { "name": "Hip", "position": [0, 1.2, 0] },
//!     { "name": "Spine", "parent": "Hip", "rotation": [-0.27, 0.01, 0] }
//!   ]
//! }
//! ```

use std::future::Future;

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::euler_to_quat;
use crate::assets::io::{AssetReader, FileAssetReader};
use crate::errors::LoadError;
use crate::scene::{BoneHandle, Skeleton, SkinnedModel, Transform};

pub trait ModelLoader: Send + Sync {
    fn load(&self, path: &str) -> impl Future<Output = Result<SkinnedModel, LoadError>> + Send;
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigBone {
    pub name: String,
    /// Name of a bone declared earlier in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub position: [f32; 3],
    /// Intrinsic XYZ Euler angles in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bones, parents first. Empty for static models.
    #[serde(default)]
    pub bones: Vec<RigBone>,
}

impl RigDocument {
    /// Builds the model. `fallback_name` is used when the document has no name.
    pub fn into_model(self, fallback_name: &str) -> Result<SkinnedModel, String> {
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        if self.bones.is_empty() {
            return Ok(SkinnedModel::new(&name, None));
        }

        let mut skeleton = Skeleton::new(&name);
        let mut handles: FxHashMap<String, BoneHandle> = FxHashMap::default();

        for bone in self.bones {
            let parent = match &bone.parent {
                Some(p) => Some(*handles.get(p.as_str()).ok_or_else(|| {
                    format!("bone '{}': parent '{p}' is not declared before it", bone.name)
                })?),
                None => None,
            };

            let transform = Transform::from_trs(
                Vec3::from_array(bone.position),
                euler_to_quat(Vec3::from_array(bone.rotation)),
                Vec3::from_array(bone.scale),
            );
            let handle = skeleton
                .add_bone(&bone.name, parent, transform)
                .ok_or_else(|| format!("bone '{}': invalid parent", bone.name))?;
            handles.entry(bone.name).or_insert(handle);
        }

        skeleton.update_world_matrices();
        Ok(SkinnedModel::new(&name, Some(skeleton)))
    }
}

/// Loads rig documents through an [`AssetReader`].
#[derive(Debug, Clone)]
pub struct RigLoader<R: AssetReader = FileAssetReader> {
    reader: R,
}

impl<R: AssetReader> RigLoader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }
}

impl RigLoader<FileAssetReader> {
    /// Loader rooted at an asset directory.
    pub fn from_dir(root: impl AsRef<std::path::Path>) -> Self {
        Self::new(FileAssetReader::new(root))
    }
}

impl<R: AssetReader> ModelLoader for RigLoader<R> {
    async fn load(&self, path: &str) -> Result<SkinnedModel, LoadError> {
        let bytes = self.reader.read_bytes(path).await?;

        let doc: RigDocument = serde_json::from_slice(&bytes)
            .map_err(|e| LoadError::new(path, format!("invalid rig document: {e}")))?;

        let stem = std::path::Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(path);

        let model = doc
            .into_model(stem.trim_end_matches(".rig"))
            .map_err(|reason| LoadError::new(path, reason))?;

        log::debug!(
            "loaded '{}' from {path} ({} bone(s))",
            model.name,
            model.skeleton().map_or(0, Skeleton::len)
        );
        Ok(model)
    }
}
