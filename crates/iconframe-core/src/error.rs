//! Error types for iconframe.

use thiserror::Error;

/// The main error type for iconframe operations.
#[derive(Error, Debug)]
pub enum FrameError {
    /// A collection with the given name was not found in the scene.
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    /// A camera with the given name was not found in the scene.
    #[error("camera '{0}' not found")]
    CameraNotFound(String),

    /// The scene has no active camera and none was named.
    #[error("no camera found in scene")]
    NoCamera,

    /// A camera pose cannot be used (degenerate rotation or non-finite position).
    #[error("invalid camera pose: {0}")]
    InvalidPose(String),

    /// The framing policy cannot be used for a fit.
    #[error("invalid framing policy: {0}")]
    InvalidPolicy(String),

    /// The requested output resolution is unusable.
    #[error("invalid resolution {resolution}: must be at least {minimum}")]
    InvalidResolution { resolution: u32, minimum: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for iconframe operations.
pub type Result<T> = std::result::Result<T, FrameError>;
