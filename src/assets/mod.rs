//! Asset Module
//!
//! - [`catalog`]: the viewer configuration document and its model table
//! - [`io`]: byte sources ([`FileAssetReader`], [`MemoryAssetReader`])
//! - [`loader`]: the [`ModelLoader`] seam and the JSON [`RigLoader`]

pub mod catalog;
pub mod io;
pub mod loader;

pub use catalog::{ModelDescriptor, ViewerConfig};
pub use io::{AssetReader, FileAssetReader, MemoryAssetReader};
pub use loader::{ModelLoader, RigBone, RigDocument, RigLoader};
