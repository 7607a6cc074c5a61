//! Core abstractions for iconframe.
//!
//! This crate provides the data model shared by every other iconframe crate:
//! - [`CameraPose`] for camera placement (only its position is ever fitted)
//! - [`ProjectionModel`] with the pinhole field-of-view derivation
//! - [`PointCloud`] and [`LocalRect`] for subject extents
//! - [`FramingPolicy`] and the error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod points;
pub mod policy;
pub mod pose;
pub mod projection;
pub mod selection;

pub use error::{FrameError, Result};
pub use points::{LocalRect, PointCloud};
pub use policy::FramingPolicy;
pub use pose::CameraPose;
pub use projection::{FrameSettings, HalfFov, PerspectiveParams, ProjectionModel, SensorFit};
pub use selection::{ObjectId, Selection};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};

/// Floor applied to aspect ratios, field-of-view tangents and depth
/// denominators.
pub const DIV_EPSILON: f32 = 1e-6;

/// Minimum depth a point may have before the solvers push the camera back.
pub const NEAR_EPSILON: f32 = 1e-4;
