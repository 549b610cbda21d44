//! Authored keyframe data.
//!
//! ```json
//! {
//!   "Head": [
//!     { "time": 0.0, "rotation": [-0.3, 0.0, 0.0] },
//!     { "time": 0.5, "rotation": [-0.3, 0.1, 0.0] },
//!     { "time": 1.0, "rotation": [-0.3, 0.0, 0.0] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One authored pose sample of a bone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position on the clip timeline, conventionally in `0..=1`.
    pub time: f32,
    /// Bone-local translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    /// Intrinsic XYZ Euler angles in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
}

impl Keyframe {
    #[must_use]
    pub fn at(time: f32) -> Self {
        Self {
            time,
            position: None,
            rotation: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn position_vec(&self) -> Option<Vec3> {
        self.position.map(Vec3::from_array)
    }

    #[must_use]
    pub fn rotation_vec(&self) -> Option<Vec3> {
        self.rotation.map(Vec3::from_array)
    }
}

/// One named animation: bone name → keyframes of that bone.
///
/// Iteration is ordered by bone name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyframeSet {
    bones: BTreeMap<String, Vec<Keyframe>>,
}

impl KeyframeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_bone(mut self, bone: &str, keyframes: Vec<Keyframe>) -> Self {
        self.insert(bone, keyframes);
        self
    }

    /// Replaces the keyframes of `bone`, returning the previous ones.
    pub fn insert(&mut self, bone: &str, keyframes: Vec<Keyframe>) -> Option<Vec<Keyframe>> {
        self.bones.insert(bone.to_string(), keyframes)
    }

    #[must_use]
    pub fn get(&self, bone: &str) -> Option<&[Keyframe]> {
        self.bones.get(bone).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Keyframe])> {
        self.bones.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn bone_names(&self) -> impl Iterator<Item = &str> {
        self.bones.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Vec<Keyframe>)> for KeyframeSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, Vec<Keyframe>)>>(iter: I) -> Self {
        Self {
            bones: iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_channels() {
        let json = r#"{
            "Hand_IKL": [
                { "time": 0, "position": [0.37, -0.43, -0.12], "rotation": [0.2, 5, 0.001] },
                { "time": 0.5, "rotation": [0.2, 5, 0.001] }
            ],
            "Head": [{ "time": 1 }]
        }"#;
        let set: KeyframeSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.len(), 2);
        let hand = set.get("Hand_IKL").unwrap();
        assert_eq!(hand[0].position, Some([0.37, -0.43, -0.12]));
        assert_eq!(hand[1].position, None);
        assert_eq!(hand[1].rotation, Some([0.2, 5.0, 0.001]));
        assert_eq!(set.get("Head").unwrap(), &[Keyframe::at(1.0)]);
        // ordered by name
        assert_eq!(set.bone_names().collect::<Vec<_>>(), ["Hand_IKL", "Head"]);
    }

    #[test]
    fn omitted_channels_are_not_serialized() {
        let json = serde_json::to_string(&Keyframe::at(0.25).with_rotation([0.0, 0.1, 0.0])).unwrap();
        assert_eq!(json, r#"{"time":0.25,"rotation":[0.0,0.1,0.0]}"#);
    }
}
