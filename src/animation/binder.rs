use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::Skeleton;

pub struct Binder;

impl Binder {
    /// Resolves every track of `clip` to a bone of `skeleton`.
    ///
    /// Tracks naming a bone the skeleton does not have produce no binding.
    #[must_use]
    pub fn bind(skeleton: &Skeleton, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            match skeleton.find_bone(&track.meta.bone_name) {
                Some(bone) => bindings.push(PropertyBinding {
                    track_index,
                    bone,
                    target: track.meta.target,
                }),
                None => log::debug!(
                    "clip '{}': no bone for track {}",
                    clip.name,
                    track.meta.path()
                ),
            }
        }

        bindings
    }
}
