#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod errors;
pub mod scene;
pub mod utils;

pub use animation::{
    AnimationAction, AnimationClip, AnimationMixer, Binder, CompileReport, Keyframe,
    KeyframeCompiler, KeyframeSet, LoopMode,
};
pub use app::{LoadOutcome, SurfaceHost, SurfaceSize, Viewer};
pub use assets::{ModelDescriptor, ModelLoader, RigLoader, ViewerConfig};
pub use errors::{Error, LoadError, Result};
pub use scene::{Skeleton, SkinnedModel};
pub use utils::Timer;
