//! Skeletal animation: keyframe tracks, clips, actions, the per-model mixer
//! and the compiler that builds clips from authored keyframe data.

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod compiler;
pub mod euler;
pub mod keyframes;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, LoopMode, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use compiler::{
    CompileOptions, CompileReport, CompiledAnimation, KeyframeCompiler, SkipReason, SkippedBone,
    compile_and_play,
};
pub use euler::euler_to_quat;
pub use keyframes::{Keyframe, KeyframeSet};
pub use mixer::AnimationMixer;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
