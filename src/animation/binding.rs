use crate::scene::BoneHandle;

/// Bone property driven by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    /// Maps to `transform.position`
    Position,
    /// Maps to `transform.rotation` (quaternion)
    Rotation,
}

impl TargetPath {
    /// Property suffix used in track names (`"<bone>.position"`).
    #[must_use]
    pub fn property_name(self) -> &'static str {
        match self {
            TargetPath::Position => "position",
            TargetPath::Rotation => "quaternion",
        }
    }
}

/// Maps track `track_index` of a clip to a property of `bone` in a skeleton.
#[derive(Debug, Clone)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub bone: BoneHandle,
    pub target: TargetPath,
}
