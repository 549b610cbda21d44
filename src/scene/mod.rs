//! Scene data for animated models.
//!
//! - [`Transform`]: position, rotation and scale with a cached local matrix
//! - [`Skeleton`]: named bone hierarchy with a rest pose
//! - [`SkinnedModel`]: a loaded model, its skeleton and its mixer

pub mod model;
pub mod skeleton;
pub mod transform;

pub use model::SkinnedModel;
pub use skeleton::{Bone, Skeleton};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct BoneHandle;
}
