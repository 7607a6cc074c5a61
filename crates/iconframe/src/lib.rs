//! iconframe: camera framing for icon and thumbnail renders.
//!
//! Given a scene, a camera and a subject collection, iconframe moves the
//! camera (without rotating it) so the subject fills a square frame with a
//! chosen margin.
//!
//! # Quick Start
//!
//! ```no_run
//! use iconframe::*;
//!
//! fn main() -> Result<()> {
//!     let mut scene = MemoryScene::load("scene.json")?;
//!     let report = frame_icon(&mut scene, &IconConfig::default())?;
//!     println!("camera moved to {:?}", report.position);
//!     Ok(())
//! }
//! ```
//!
//! # Strategies
//!
//! - [`FitStrategy::ClosedForm`] - solves the translation directly from the
//!   sampled points (perspective or orthographic)
//! - [`FitStrategy::Delegated`] - lets the host's viewport align the camera to
//!   the selection, then dollies to the requested margin; falls back to the
//!   closed-form solve whenever the host cannot do it
//!
//! Hosts implement [`SceneHost`]; [`MemoryScene`] is a ready-made host that
//! loads scenes from JSON.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod pipeline;

// Re-export core types
pub use iconframe_core::{
    CameraPose, FrameError, FrameSettings, FramingPolicy, ObjectId, PerspectiveParams,
    PointCloud, ProjectionModel, Result, Selection, SensorFit, Mat4, Quat, Vec2, Vec3,
};

// Re-export fitting
pub use iconframe_fit::{
    AlignmentError, AlignmentOracle, CameraFitter, DollyOutcome, DollySearch, FitMethod,
    FitReport, FitResult, FitStrategy, FrameOutcome, Framer, SelectionHost,
};

// Re-export scene access
pub use iconframe_scene::{
    find_best_lod_collection, EvaluatedMesh, HostCamera, MemoryScene, ObjectKind, PointSampler,
    SceneHost, SceneObject,
};

pub use config::{IconConfig, DEFAULT_FRAMING_SCALE, DEFAULT_RESOLUTION, MIN_RESOLUTION};
pub use pipeline::{frame_icon, resolve_camera, resolve_collection, IconReport};
