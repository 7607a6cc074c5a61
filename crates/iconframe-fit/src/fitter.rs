//! Closed-form camera fitting.
//!
//! The fitter only translates the camera. Because a dolly along the optical
//! axis leaves every point's camera-local (x, y) untouched and shifts every
//! depth by the same amount, a point's normalized extent `r = a / d` is a
//! hyperbola in the dolly distance and can be inverted directly. No search
//! is needed for perspective cameras; orthographic cameras are fitted by
//! rescaling `ortho_scale` instead.

use glam::Vec2;
use iconframe_core::{
    CameraPose, FrameSettings, FramingPolicy, PerspectiveParams, PointCloud, ProjectionModel,
    Result, DIV_EPSILON, NEAR_EPSILON,
};

/// The point that limits a perspective fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindingPoint {
    /// Normalized extent before the dolly (1.0 = frame edge).
    pub extent: f32,
    /// Depth before the dolly.
    pub depth: f32,
}

/// What a fit did to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitReport {
    /// True when the fit was a no-op because there was nothing to frame.
    pub skipped: bool,
    /// Local (right, up) translation applied by centering.
    pub center_offset: Vec2,
    /// Backward translation applied by the near-plane guard.
    pub near_backoff: f32,
    /// Forward translation applied by the perspective solve.
    pub dolly: f32,
    /// Binding point of the perspective solve, if any point constrained it.
    pub binding: Option<BindingPoint>,
    /// Largest normalized extent after the fit.
    pub final_extent: f32,
}

/// Fitted camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// New pose. The rotation is always the input rotation.
    pub pose: CameraPose,
    /// Projection after the fit. Only `ortho_scale` can differ from the input.
    pub projection: ProjectionModel,
    /// Diagnostics.
    pub report: FitReport,
}

impl FitResult {
    fn unchanged(pose: &CameraPose, projection: &ProjectionModel) -> Self {
        Self {
            pose: *pose,
            projection: *projection,
            report: FitReport {
                skipped: true,
                ..FitReport::default()
            },
        }
    }

    /// New orthographic scale, for orthographic cameras.
    #[must_use]
    pub fn ortho_scale(&self) -> Option<f32> {
        self.projection.ortho_scale()
    }
}

/// Translation computed by [`solve_perspective`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveSolve {
    /// Distance to move along the forward axis. Negative backs off.
    pub translation: f32,
    /// The point with the largest normalized extent before the move.
    pub binding: Option<BindingPoint>,
}

/// Fits a camera to a point cloud with a fixed [`FramingPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct CameraFitter {
    policy: FramingPolicy,
}

impl CameraFitter {
    /// Creates a fitter, rejecting unusable policies.
    pub fn new(policy: FramingPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Returns the policy.
    pub fn policy(&self) -> &FramingPolicy {
        &self.policy
    }

    /// Computes the camera translation (and orthographic scale) that frames
    /// `points`. An empty cloud leaves the camera untouched.
    pub fn fit(
        &self,
        pose: &CameraPose,
        projection: &ProjectionModel,
        frame: &FrameSettings,
        points: &PointCloud,
    ) -> FitResult {
        if points.is_empty() {
            log::debug!("nothing to frame, camera left in place");
            return FitResult::unchanged(pose, projection);
        }

        let aspect = frame.aspect();
        let mut fitted = *pose;
        let mut projection = *projection;
        let mut report = FitReport::default();

        if self.policy.allow_center {
            report.center_offset = center_on_subject(&mut fitted, points);
        }
        report.near_backoff = apply_near_guard(&mut fitted, points);

        match projection {
            ProjectionModel::Perspective(params) => {
                let solve = solve_perspective(&fitted, &params, aspect, points, &self.policy);
                fitted.dolly(solve.translation);
                report.dolly = solve.translation;
                report.binding = solve.binding;
            }
            ProjectionModel::Orthographic { .. } => {
                if let Some(ortho_scale) =
                    solve_orthographic(&fitted, aspect, points, &self.policy)
                {
                    projection = ProjectionModel::Orthographic { ortho_scale };
                }
            }
        }

        report.final_extent = normalized_extent(&fitted, &projection, frame, points);
        log::debug!(
            "fit: center={:?} backoff={:.6} dolly={:.6} extent={:.6}",
            report.center_offset,
            report.near_backoff,
            report.dolly,
            report.final_extent
        );

        FitResult {
            pose: fitted,
            projection,
            report,
        }
    }
}

/// Slides the camera along its local right/up axes so the midpoint of the
/// subject's camera-plane rectangle lies on the optical axis.
///
/// Returns the applied (right, up) offset.
pub fn center_on_subject(pose: &mut CameraPose, points: &PointCloud) -> Vec2 {
    let Some(rect) = points.local_rect(pose) else {
        return Vec2::ZERO;
    };
    let offset = rect.center();
    pose.translate_local(offset.x, offset.y, 0.0);
    offset
}

/// Backs the camera off until every point lies at least `2 * NEAR_EPSILON`
/// in front of it, if any point is at or behind `NEAR_EPSILON`.
///
/// Returns the backward distance moved.
pub fn apply_near_guard(pose: &mut CameraPose, points: &PointCloud) -> f32 {
    let Some(min_depth) = points.min_depth(pose) else {
        return 0.0;
    };
    if min_depth > NEAR_EPSILON {
        return 0.0;
    }
    let backoff = 2.0 * NEAR_EPSILON - min_depth;
    pose.dolly(-backoff);
    log::debug!("near-plane guard: backed off {backoff:.6} (nearest depth {min_depth:.6})");
    backoff
}

/// Closed-form dolly for a perspective camera.
///
/// Each point has a lateral size `a = max(|x| / tan_x, |y| / tan_y)` and a
/// normalized extent `r = a / d`. Moving forward by `t` gives `a / (d - t)`,
/// so the point reaches the target extent at `t = d - a / r_target`. The
/// smallest such `t` over all points keeps every point inside the target;
/// for the binding point it is `d* - d* / s` with `s = r_target / r_max`.
///
/// Assumes every point is in front of the camera (see [`apply_near_guard`]).
pub fn solve_perspective(
    pose: &CameraPose,
    params: &PerspectiveParams,
    aspect: f32,
    points: &PointCloud,
    policy: &FramingPolicy,
) -> PerspectiveSolve {
    let fov = params.half_fov(aspect);
    let target = policy.target_extent();

    let mut binding: Option<BindingPoint> = None;
    let mut min_depth = f32::INFINITY;
    let mut translation = f32::INFINITY;

    for local in points.to_camera_space(pose) {
        let depth = (-local.z).max(DIV_EPSILON);
        let lateral = (local.x.abs() / fov.tan_x).max(local.y.abs() / fov.tan_y);
        let extent = lateral / depth;

        if binding.map_or(true, |b| extent > b.extent) {
            binding = Some(BindingPoint { extent, depth });
        }
        min_depth = min_depth.min(depth);
        translation = translation.min(depth - lateral / target);
    }

    match binding {
        // r_max = 0: every point is on the optical axis, nothing constrains the depth.
        Some(b) if b.extent > DIV_EPSILON => PerspectiveSolve {
            translation: translation.min(min_depth - NEAR_EPSILON),
            binding,
        },
        _ => PerspectiveSolve {
            translation: 0.0,
            binding: None,
        },
    }
}

/// Orthographic scale that frames the subject's camera-plane rectangle.
///
/// `ortho_scale` is the frame width, so the rectangle height is converted
/// with the aspect ratio before taking the larger of the two. Returns `None`
/// for a subject with no extent.
pub fn solve_orthographic(
    pose: &CameraPose,
    aspect: f32,
    points: &PointCloud,
    policy: &FramingPolicy,
) -> Option<f32> {
    let rect = points.local_rect(pose)?;
    let width = rect.width() * policy.framing_scale;
    let height = rect.height() * policy.framing_scale;
    let ortho_scale = width.max(height * aspect);
    (ortho_scale > DIV_EPSILON).then_some(ortho_scale)
}

/// Largest normalized extent of any point (1.0 = frame edge).
///
/// Points at or behind the camera count as infinitely far out. An empty
/// cloud has extent zero.
pub fn normalized_extent(
    pose: &CameraPose,
    projection: &ProjectionModel,
    frame: &FrameSettings,
    points: &PointCloud,
) -> f32 {
    let aspect = frame.aspect();
    points
        .iter()
        .map(|p| {
            projection
                .normalize(pose.to_local(*p), aspect, 0.0)
                .map_or(f32::INFINITY, |n| n.x.abs().max(n.y.abs()))
        })
        .fold(0.0, f32::max)
}
