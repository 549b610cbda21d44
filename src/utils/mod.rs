//! Utility Module
//!
//! - [`time`]: frame clock used to drive playback

pub mod time;

pub use time::Timer;
