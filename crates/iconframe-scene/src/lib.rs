//! Scene access for iconframe.
//!
//! [`SceneHost`] is the seam to the application that owns the scene. On top
//! of it this crate provides render-candidate filtering and point sampling
//! ([`PointSampler`]), LOD collection lookup, and [`MemoryScene`], a
//! self-contained host that can be loaded from JSON.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod host;
pub mod lod;
pub mod memory;
pub mod object;
pub mod sampler;

pub use host::{EvaluatedMesh, HostCamera, SceneHost};
pub use lod::{find_best_lod_collection, LOD_SUFFIXES};
pub use memory::{MemoryCollection, MemoryObject, MemoryScene};
pub use object::{ObjectKind, SceneObject};
pub use sampler::PointSampler;
