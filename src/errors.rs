//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`Error`] covers the failure modes of the viewer:
//! - Startup configuration errors (missing render surface, invalid catalog)
//! - Asset loading errors, carried as a typed [`LoadError`]
//! - Selection errors (unknown model or animation name)
//!
//! Unresolvable bone names in keyframe data are *not* errors; they are
//! reported by [`CompileReport`](crate::animation::CompileReport).
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! ```rust,ignore
//! use skelview::errors::Result;
//!
//! fn start() -> Result<()> {
//!     let config = skelview::ViewerConfig::load("assets/viewer.json")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type of the viewer.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Startup Errors
    // ========================================================================
    /// The configured render surface could not be found.
    #[error("Render surface not found: {0}")]
    MissingSurface(String),

    /// The viewer configuration document is invalid.
    #[error("Invalid viewer configuration: {0}")]
    Config(String),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// A model asset failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    // ========================================================================
    // Selection Errors
    // ========================================================================
    /// No model with this name exists in the catalog.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// The model has no keyframe set with this name.
    #[error("Unknown animation '{animation}' for model '{model}'")]
    UnknownAnimation {
        /// Name of the model that was searched
        model: String,
        /// The animation name that was requested
        animation: String,
    },

    /// An operation required a displayed model but none is active.
    #[error("No model is currently displayed")]
    NoActiveModel,

    // ========================================================================
    // I/O & Parsing Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to resolve an asset path into a loaded model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load '{path}': {reason}")]
pub struct LoadError {
    /// The asset path that was requested
    pub path: String,
    /// Human readable cause
    pub reason: String,
}

impl LoadError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
