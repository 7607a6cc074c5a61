//! Strategy selection between the closed-form fit and viewport delegation.

use iconframe_core::{
    CameraPose, FrameSettings, FramingPolicy, ObjectId, PointCloud, ProjectionModel, Result,
};
use serde::{Deserialize, Serialize};

use crate::dolly::{DollyOutcome, DollySearch};
use crate::fitter::{CameraFitter, FitReport};
use crate::oracle::{AlignmentError, AlignmentOracle, SelectionScope};

/// Preferred way of positioning the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Closed-form perspective/orthographic solve.
    #[default]
    ClosedForm,
    /// Host viewport alignment followed by a dolly search, when available.
    Delegated,
}

/// How the camera was actually positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    /// Nothing to frame.
    Skipped,
    /// Closed-form solve.
    ClosedForm,
    /// Host alignment plus dolly.
    Delegated,
}

/// Result of [`Framer::frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// New pose. The rotation is always the input rotation.
    pub pose: CameraPose,
    /// Projection after framing.
    pub projection: ProjectionModel,
    /// Method used.
    pub method: FitMethod,
    /// Closed-form diagnostics, when the closed-form solve ran.
    pub report: Option<FitReport>,
    /// Dolly result, when delegation ran.
    pub dolly: Option<DollyOutcome>,
}

/// Picks a fitting method from the requested strategy and what the host can
/// do, and runs it.
#[derive(Debug, Clone, Copy)]
pub struct Framer {
    fitter: CameraFitter,
    strategy: FitStrategy,
    dolly: DollySearch,
}

impl Framer {
    /// Creates a framer, rejecting unusable policies.
    pub fn new(policy: FramingPolicy, strategy: FitStrategy) -> Result<Self> {
        Ok(Self {
            fitter: CameraFitter::new(policy)?,
            strategy,
            dolly: DollySearch::default(),
        })
    }

    /// Replaces the dolly search parameters.
    #[must_use]
    pub fn with_dolly(mut self, dolly: DollySearch) -> Self {
        self.dolly = dolly;
        self
    }

    /// Returns the framing policy.
    pub fn policy(&self) -> &FramingPolicy {
        self.fitter.policy()
    }

    /// Frames `points` (the sampled extent of the objects in `subject`).
    ///
    /// Delegation is used only when requested, the camera is perspective and
    /// `oracle` reports an interactive viewport; every other case, including
    /// a failed alignment, falls back to the closed-form solve.
    pub fn frame(
        &self,
        pose: &CameraPose,
        projection: &ProjectionModel,
        frame: &FrameSettings,
        points: &PointCloud,
        subject: &[ObjectId],
        oracle: Option<&mut dyn AlignmentOracle>,
    ) -> FrameOutcome {
        if points.is_empty() {
            log::debug!("nothing to frame, camera left in place");
            return FrameOutcome {
                pose: *pose,
                projection: *projection,
                method: FitMethod::Skipped,
                report: None,
                dolly: None,
            };
        }

        if self.strategy == FitStrategy::Delegated {
            match oracle {
                Some(_) if !projection.is_perspective() => {
                    log::debug!("orthographic camera, using closed-form fit");
                }
                Some(oracle) if oracle.viewport_available() => {
                    match self.delegate(oracle, pose, projection, frame, points, subject) {
                        Ok(outcome) => return outcome,
                        Err(err) => {
                            log::warn!("viewport alignment failed ({err}), using closed-form fit");
                        }
                    }
                }
                Some(_) | None => {
                    log::info!("no interactive viewport, using closed-form fit");
                }
            }
        }

        let fit = self.fitter.fit(pose, projection, frame, points);
        FrameOutcome {
            pose: fit.pose,
            projection: fit.projection,
            method: FitMethod::ClosedForm,
            report: Some(fit.report),
            dolly: None,
        }
    }

    fn delegate(
        &self,
        oracle: &mut dyn AlignmentOracle,
        pose: &CameraPose,
        projection: &ProjectionModel,
        frame: &FrameSettings,
        points: &PointCloud,
        subject: &[ObjectId],
    ) -> std::result::Result<FrameOutcome, AlignmentError> {
        let mut aligned = *pose;
        {
            let mut scope = SelectionScope::enter(oracle, subject);
            scope.align_camera_to_selection(&mut aligned)?;
        }
        // Only the translation is taken from the host.
        aligned.rotation = pose.rotation;

        let dolly = self.dolly.run(
            &mut aligned,
            projection,
            frame,
            points,
            self.policy().framing_scale,
        );
        log::debug!("delegated fit: pos={:?} dolly={dolly:?}", aligned.position);

        Ok(FrameOutcome {
            pose: aligned,
            projection: *projection,
            method: FitMethod::Delegated,
            report: None,
            dolly: Some(dolly),
        })
    }
}
