//! Framing policy.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// How tightly the subject should fill the frame.
///
/// `framing_scale` is a zoom-out factor: `1.0` makes the outermost point touch
/// the frame edge, values above `1.0` leave headroom and values below `1.0`
/// crop into the subject. Solvers aim for a normalized extent of
/// `1.0 / framing_scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingPolicy {
    /// Zoom-out factor relative to a tight fit.
    pub framing_scale: f32,
    /// Whether the camera may slide along its local X/Y to center the subject.
    pub allow_center: bool,
}

impl Default for FramingPolicy {
    fn default() -> Self {
        Self {
            framing_scale: 1.0,
            allow_center: true,
        }
    }
}

impl FramingPolicy {
    /// Creates a new policy.
    #[must_use]
    pub fn new(framing_scale: f32, allow_center: bool) -> Self {
        Self {
            framing_scale,
            allow_center,
        }
    }

    /// Target normalized extent of the outermost point.
    #[must_use]
    pub fn target_extent(&self) -> f32 {
        1.0 / self.framing_scale
    }

    /// Checks that the policy can drive a fit.
    pub fn validate(&self) -> Result<()> {
        if !self.framing_scale.is_finite() || self.framing_scale <= 0.0 {
            return Err(FrameError::InvalidPolicy(format!(
                "framing scale must be positive and finite, got {}",
                self.framing_scale
            )));
        }
        Ok(())
    }
}
