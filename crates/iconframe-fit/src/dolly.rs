//! Bracket-and-bisect dolly search.
//!
//! Used to fine-tune a camera that was positioned by something other than
//! the closed-form solve (for example a host viewport operator), where only
//! the projected result can be measured.

use glam::Vec2;
use iconframe_core::{
    CameraPose, FrameError, FrameSettings, PointCloud, ProjectionModel, Result, NEAR_EPSILON,
};
use serde::{Deserialize, Serialize};

/// Scales within this distance of 1.0 need no dolly.
const SCALE_TOLERANCE: f32 = 1e-6;

/// Extents below this are treated as an empty frame.
const MIN_EXTENT: f32 = 1e-6;

/// On-screen half extent of a subject in normalized view coordinates.
///
/// View coordinates run from 0 to 1 across the frame with 0.5 at the center,
/// so 0.5 means the outermost point touches a frame edge. Returns 0.5 for an
/// empty cloud and infinity when any point is at or behind the camera.
pub fn screen_half_extent(
    pose: &CameraPose,
    projection: &ProjectionModel,
    frame: &FrameSettings,
    points: &PointCloud,
) -> f32 {
    if points.is_empty() {
        return 0.5;
    }
    let aspect = frame.aspect();
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for point in points.iter() {
        let Some(ndc) = projection.normalize(pose.to_local(*point), aspect, NEAR_EPSILON) else {
            return f32::INFINITY;
        };
        let uv = ndc * 0.5 + Vec2::splat(0.5);
        min = min.min(uv);
        max = max.max(uv);
    }
    (max.x - 0.5)
        .max(0.5 - min.x)
        .max(max.y - 0.5)
        .max(0.5 - min.y)
}

/// Result of a dolly search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DollyOutcome {
    /// No move was needed or possible.
    Unchanged,
    /// The target was bracketed and refined.
    Converged {
        /// Signed distance moved along the forward axis.
        distance: f32,
    },
    /// The target was not bracketed; the last tested position was kept.
    BestEffort {
        /// Signed distance moved along the forward axis.
        distance: f32,
    },
}

impl DollyOutcome {
    /// Signed distance moved along the forward axis.
    #[must_use]
    pub fn distance(&self) -> f32 {
        match self {
            Self::Unchanged => 0.0,
            Self::Converged { distance } | Self::BestEffort { distance } => *distance,
        }
    }
}

/// Expanding-bracket then bisection search along the camera's forward axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DollySearch {
    /// First bracket step, in world units.
    pub initial_step: f32,
    /// Step multiplier per bracket expansion.
    pub growth: f32,
    /// Maximum bracket expansions.
    pub max_expansions: usize,
    /// Bisection iterations once bracketed.
    pub max_bisections: usize,
}

impl Default for DollySearch {
    fn default() -> Self {
        Self {
            initial_step: 0.05,
            growth: 1.6,
            max_expansions: 24,
            max_bisections: 28,
        }
    }
}

impl DollySearch {
    /// Checks that the search can bracket a target: a positive first step,
    /// non-shrinking steps and at least one expansion.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_step.is_finite() || self.initial_step <= 0.0 {
            return Err(FrameError::InvalidPolicy(format!(
                "dolly initial step must be positive and finite, got {}",
                self.initial_step
            )));
        }
        if !self.growth.is_finite() || self.growth < 1.0 {
            return Err(FrameError::InvalidPolicy(format!(
                "dolly growth must be finite and at least 1, got {}",
                self.growth
            )));
        }
        if self.max_expansions == 0 {
            return Err(FrameError::InvalidPolicy(
                "dolly needs at least one bracket expansion".to_string(),
            ));
        }
        Ok(())
    }

    /// Dollies `pose` until the subject's screen half extent equals its
    /// current half extent divided by `framing_scale`.
    pub fn run(
        &self,
        pose: &mut CameraPose,
        projection: &ProjectionModel,
        frame: &FrameSettings,
        points: &PointCloud,
        framing_scale: f32,
    ) -> DollyOutcome {
        if !projection.is_perspective() {
            log::debug!("dolly: orthographic extent does not depend on distance");
            return DollyOutcome::Unchanged;
        }
        if (framing_scale - 1.0).abs() < SCALE_TOLERANCE {
            return DollyOutcome::Unchanged;
        }
        let base = screen_half_extent(pose, projection, frame, points);
        if !base.is_finite() || base <= MIN_EXTENT {
            log::debug!("dolly: no measurable extent ({base})");
            return DollyOutcome::Unchanged;
        }

        let target = base / framing_scale;
        let backward = target < base;
        let direction = if backward { -pose.forward() } else { pose.forward() };
        let origin = pose.position;
        log::debug!(
            "dolly: base={base:.6} target={target:.6} dir={}",
            if backward { "backward" } else { "forward" }
        );

        let extent_at = |distance: f32| {
            let probe = CameraPose {
                position: origin + direction * distance,
                ..*pose
            };
            screen_half_extent(&probe, projection, frame, points)
        };
        let reached = |extent: f32| {
            if backward {
                extent <= target
            } else {
                extent >= target
            }
        };

        let mut lo = 0.0_f32;
        let mut hi = 0.0_f32;
        let mut step = self.initial_step;
        let mut bracketed = false;
        for _ in 0..self.max_expansions {
            hi += step;
            if reached(extent_at(hi)) {
                bracketed = true;
                break;
            }
            step *= self.growth;
        }

        if bracketed {
            for _ in 0..self.max_bisections {
                let mid = 0.5 * (lo + hi);
                if reached(extent_at(mid)) {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
        } else {
            log::warn!(
                "dolly: target extent {target:.6} not bracketed within {} steps, keeping last tested distance {hi:.6}",
                self.max_expansions
            );
        }

        pose.position = origin + direction * hi;
        let distance = if backward { -hi } else { hi };
        if bracketed {
            DollyOutcome::Converged { distance }
        } else {
            DollyOutcome::BestEffort { distance }
        }
    }
}
