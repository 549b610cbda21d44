//! Viewer application layer.
//!
//! - [`viewport`]: output surface lookup and sizing
//! - [`viewer`]: model switching, load sequencing and the frame loop

pub mod viewer;
pub mod viewport;

pub use viewer::{LoadOutcome, LoadTicket, Viewer};
pub use viewport::{SurfaceHost, SurfaceSize, Viewport};
