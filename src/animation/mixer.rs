use std::sync::Arc;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binder::Binder;
use crate::animation::binding::TargetPath;
use crate::animation::clip::AnimationClip;
use crate::scene::Skeleton;

/// Playback controller of one model.
///
/// Every clip playing on the model lives here as an [`AnimationAction`], so a
/// single [`update`](Self::update) per frame advances all of them together.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the action for `clip`, creating and binding it on first use.
    ///
    /// Actions are keyed by clip name. Passing a different clip under a name
    /// that already has an action rebinds that action to the new clip.
    pub fn clip_action(
        &mut self,
        clip: Arc<AnimationClip>,
        skeleton: &Skeleton,
    ) -> &mut AnimationAction {
        let index = match self.index_of(&clip.name) {
            Some(index) => {
                let action = &mut self.actions[index];
                if !Arc::ptr_eq(action.clip(), &clip) {
                    log::debug!("replacing clip '{}'", clip.name);
                    let bindings = Binder::bind(skeleton, &clip);
                    action.replace_clip(clip, bindings);
                }
                index
            }
            None => {
                let mut action = AnimationAction::new(clip);
                action.bindings = Binder::bind(skeleton, action.clip());
                self.actions.push(action);
                self.actions.len() - 1
            }
        };
        &mut self.actions[index]
    }

    #[must_use]
    pub fn action(&self, clip_name: &str) -> Option<&AnimationAction> {
        self.index_of(clip_name).map(|i| &self.actions[i])
    }

    pub fn action_mut(&mut self, clip_name: &str) -> Option<&mut AnimationAction> {
        self.index_of(clip_name).map(move |i| &mut self.actions[i])
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn stop_all(&mut self) {
        for action in &mut self.actions {
            action.stop();
        }
    }

    /// Advances every action by `dt` seconds and writes the sampled values
    /// into the bound bones.
    pub fn update(&mut self, dt: f32, skeleton: &mut Skeleton) {
        for action in &mut self.actions {
            action.update(dt);
        }

        for action in &mut self.actions {
            if !action.is_running() {
                continue;
            }

            for i in 0..action.bindings.len() {
                let binding = action.bindings[i].clone();
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };
                let Some(bone) = skeleton.bone_mut(binding.bone) else {
                    continue;
                };

                match (value, binding.target) {
                    (TrackValue::Vector3(v), TargetPath::Position) => {
                        bone.transform.position = v;
                    }
                    (TrackValue::Quaternion(q), TargetPath::Rotation) => {
                        bone.transform.rotation = q;
                    }
                    _ => continue,
                }
                bone.transform.mark_dirty();
            }
        }
    }

    fn index_of(&self, clip_name: &str) -> Option<usize> {
        self.actions.iter().position(|a| a.clip().name == clip_name)
    }
}
