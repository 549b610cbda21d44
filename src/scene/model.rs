use crate::animation::AnimationMixer;
use crate::scene::skeleton::Skeleton;
use crate::scene::transform::Transform;

/// A loaded model: placement transform, optional bone hierarchy and the
/// mixer that animates it.
#[derive(Debug, Default)]
pub struct SkinnedModel {
    pub name: String,
    /// Placement of the model root in the scene.
    pub transform: Transform,

    skeleton: Option<Skeleton>,
    mixer: Option<AnimationMixer>,
}

impl SkinnedModel {
    #[must_use]
    pub fn new(name: &str, skeleton: Option<Skeleton>) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::new(),
            skeleton,
            mixer: None,
        }
    }

    #[must_use]
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    pub fn skeleton_mut(&mut self) -> Option<&mut Skeleton> {
        self.skeleton.as_mut()
    }

    #[must_use]
    pub fn mixer(&self) -> Option<&AnimationMixer> {
        self.mixer.as_ref()
    }

    /// The model's mixer, created on first use.
    pub fn mixer_or_init(&mut self) -> &mut AnimationMixer {
        self.mixer.get_or_insert_with(AnimationMixer::new)
    }

    /// Split borrow of the skeleton and the (lazily created) mixer.
    pub fn rig_mut(&mut self) -> Option<(&mut Skeleton, &mut AnimationMixer)> {
        let skeleton = self.skeleton.as_mut()?;
        let mixer = self.mixer.get_or_insert_with(AnimationMixer::new);
        Some((skeleton, mixer))
    }

    /// Drops all clips and puts the bones back in their rest pose.
    pub fn clear_animation(&mut self) {
        self.mixer = None;
        if let Some(skeleton) = self.skeleton.as_mut() {
            skeleton.reset_pose();
            skeleton.update_world_matrices();
        }
    }

    /// Per-frame step: advances the mixer and refreshes bone matrices.
    pub fn advance(&mut self, dt: f32) {
        self.transform.update_local_matrix();

        let Some(skeleton) = self.skeleton.as_mut() else {
            return;
        };
        if let Some(mixer) = self.mixer.as_mut() {
            mixer.update(dt, skeleton);
        }
        skeleton.update_world_matrices();
    }
}
