//! Keyframe Animation Compiler
//!
//! Turns a [`KeyframeSet`] into one looping [`AnimationClip`] per bone and
//! starts those clips on a model's mixer.
//!
//! For every bone of the set:
//!
//! 1. The bone is resolved by name. Unknown bones are skipped and reported
//!    in the [`CompileReport`], never raised.
//! 2. If any keyframe carries a `position`, a position track is built with
//!    one sample per keyframe. Keyframes without a position contribute
//!    `[0, 0, 0]`.
//! 3. If any keyframe carries a `rotation`, a rotation track is built the
//!    same way from the Euler angles converted to quaternions. Keyframes
//!    without a rotation contribute the identity quaternion.
//! 4. The tracks share the bone's timeline (keyframe times in given order,
//!    unsorted and unvalidated) and form a clip named `"<bone>_animation"`
//!    whose duration is the latest keyframe time.
//!
//! All clips of one model share the model's single [`AnimationMixer`], so one
//! per-frame update drives every bone in lock-step.
//!
//! [`AnimationMixer`]: crate::animation::AnimationMixer

use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::action::LoopMode;
use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use crate::animation::euler::{align_hemispheres, euler_to_quat};
use crate::animation::keyframes::{Keyframe, KeyframeSet};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::scene::{Skeleton, SkinnedModel};

/// Suffix appended to the bone name to form the clip name.
pub const CLIP_NAME_SUFFIX: &str = "_animation";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompileOptions {
    /// Flip rotation samples onto the hemisphere of their predecessor.
    pub hemisphere_continuity: bool,
    /// Loop mode of the started actions.
    pub loop_mode: LoopMode,
    pub interpolation: InterpolationMode,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            hemisphere_continuity: true,
            loop_mode: LoopMode::Loop,
            interpolation: InterpolationMode::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The model has no bone with this name.
    MissingBone,
    /// None of the keyframes carries a position or a rotation.
    NoChannels,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBone {
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of compiling one keyframe set against one model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Bones that received a clip, in compilation order.
    pub animated: Vec<String>,
    pub skipped: Vec<SkippedBone>,
}

impl CompileReport {
    /// Number of bones that produced a clip.
    #[inline]
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.animated.len()
    }

    /// Names of bones the model does not have.
    pub fn missing_bones(&self) -> impl Iterator<Item = &str> {
        self.skipped
            .iter()
            .filter(|s| s.reason == SkipReason::MissingBone)
            .map(|s| s.name.as_str())
    }

    fn skip(&mut self, name: &str, reason: SkipReason) {
        self.skipped.push(SkippedBone {
            name: name.to_string(),
            reason,
        });
    }
}

/// Clips produced by [`KeyframeCompiler::compile`], not yet playing.
#[derive(Debug, Clone, Default)]
pub struct CompiledAnimation {
    pub clips: Vec<Arc<AnimationClip>>,
    pub report: CompileReport,
}

#[derive(Debug, Clone, Default)]
pub struct KeyframeCompiler {
    pub options: CompileOptions,
}

impl KeyframeCompiler {
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compiles `set` against `model` and starts every produced clip on the
    /// model's mixer, creating the mixer if needed.
    ///
    /// A model without a skeleton reports every bone as missing.
    pub fn compile_and_play(&self, model: &mut SkinnedModel, set: &KeyframeSet) -> CompileReport {
        let model_name = model.name.clone();
        let Some((skeleton, mixer)) = model.rig_mut() else {
            let mut report = CompileReport::default();
            for name in set.bone_names() {
                log::warn!("model '{model_name}' has no skeleton, skipping bone '{name}'");
                report.skip(name, SkipReason::MissingBone);
            }
            return report;
        };

        let CompiledAnimation { clips, report } = self.compile(skeleton, set);
        for clip in clips {
            mixer
                .clip_action(clip, skeleton)
                .set_loop(self.options.loop_mode)
                .play();
        }

        log::debug!(
            "model '{model_name}': {} bone clip(s) playing, {} skipped",
            report.eligible_count(),
            report.skipped.len()
        );
        report
    }

    /// Builds the clips for every bone of `set` that exists in `skeleton`.
    #[must_use]
    pub fn compile(&self, skeleton: &Skeleton, set: &KeyframeSet) -> CompiledAnimation {
        let mut out = CompiledAnimation::default();

        for (name, keyframes) in set.iter() {
            let Some(handle) = skeleton.find_bone(name) else {
                log::warn!("skeleton '{}' has no bone '{name}', skipping", skeleton.name);
                out.report.skip(name, SkipReason::MissingBone);
                continue;
            };

            if let Some(bone) = skeleton.bone(handle) {
                log::debug!(
                    "bone '{name}': default position {:?}, default rotation {:?}",
                    bone.transform.position,
                    bone.transform.rotation_euler()
                );
            }

            match self.compile_bone(name, keyframes) {
                Some(clip) => {
                    out.report.animated.push(name.to_string());
                    out.clips.push(Arc::new(clip));
                }
                None => out.report.skip(name, SkipReason::NoChannels),
            }
        }

        out
    }

    /// Builds the clip of a single bone, or `None` when no keyframe carries a
    /// position or a rotation.
    #[must_use]
    pub fn compile_bone(&self, bone_name: &str, keyframes: &[Keyframe]) -> Option<AnimationClip> {
        let times: Vec<f32> = keyframes.iter().map(|k| k.time).collect();
        let mut tracks = Vec::with_capacity(2);

        if keyframes.iter().any(|k| k.position.is_some()) {
            let values = keyframes
                .iter()
                .map(|k| k.position_vec().unwrap_or(Vec3::ZERO))
                .collect();
            tracks.push(Track {
                meta: TrackMeta {
                    bone_name: bone_name.to_string(),
                    target: TargetPath::Position,
                },
                data: TrackData::Vector3(KeyframeTrack::new(
                    times.clone(),
                    values,
                    self.options.interpolation,
                )),
            });
        }

        if keyframes.iter().any(|k| k.rotation.is_some()) {
            let mut values: Vec<Quat> = keyframes
                .iter()
                .map(|k| k.rotation_vec().map_or(Quat::IDENTITY, euler_to_quat))
                .collect();
            if self.options.hemisphere_continuity {
                align_hemispheres(&mut values);
            }
            tracks.push(Track {
                meta: TrackMeta {
                    bone_name: bone_name.to_string(),
                    target: TargetPath::Rotation,
                },
                data: TrackData::Quaternion(KeyframeTrack::new(
                    times,
                    values,
                    self.options.interpolation,
                )),
            });
        }

        if tracks.is_empty() {
            return None;
        }

        Some(AnimationClip::new(
            format!("{bone_name}{CLIP_NAME_SUFFIX}"),
            tracks,
        ))
    }
}

/// [`KeyframeCompiler::compile_and_play`] with default options.
pub fn compile_and_play(model: &mut SkinnedModel, set: &KeyframeSet) -> CompileReport {
    KeyframeCompiler::default().compile_and_play(model, set)
}
