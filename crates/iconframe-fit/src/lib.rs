//! Camera fitting for iconframe.
//!
//! - [`CameraFitter`]: closed-form translation-only fit (primary strategy)
//! - [`DollySearch`]: bracket-and-bisect refinement along the view axis
//! - [`AlignmentOracle`]: optional host viewport capability
//! - [`Framer`]: picks between the two and always falls back to the math

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Solver entry points take the full camera description
#![allow(clippy::too_many_arguments)]

pub mod dolly;
pub mod fitter;
pub mod oracle;
pub mod strategy;

pub use dolly::{screen_half_extent, DollyOutcome, DollySearch};
pub use fitter::{
    apply_near_guard, center_on_subject, normalized_extent, solve_orthographic,
    solve_perspective, BindingPoint, CameraFitter, FitReport, FitResult, PerspectiveSolve,
};
pub use oracle::{AlignmentError, AlignmentOracle, SelectionHost, SelectionScope};
pub use strategy::{FitMethod, FitStrategy, FrameOutcome, Framer};
