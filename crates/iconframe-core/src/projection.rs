//! Projection models and field-of-view derivation.
//!
//! A perspective camera is described the way a physical camera is: a lens
//! focal length and a sensor size, plus a [`SensorFit`] policy saying which
//! image axis the sensor is calibrated against. The half field of view on
//! each axis follows from those and the output aspect ratio.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::DIV_EPSILON;

/// Which image axis the sensor dimension is calibrated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorFit {
    /// Sensor width spans the larger image dimension.
    #[default]
    Auto,
    /// Sensor width spans the image width.
    Horizontal,
    /// Sensor height spans the image height.
    Vertical,
}

/// Tangents of the half field of view on each image axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfFov {
    /// `tan(half horizontal fov)`.
    pub tan_x: f32,
    /// `tan(half vertical fov)`.
    pub tan_y: f32,
}

impl HalfFov {
    fn new(tan_x: f32, tan_y: f32) -> Self {
        Self {
            tan_x: tan_x.max(DIV_EPSILON),
            tan_y: tan_y.max(DIV_EPSILON),
        }
    }

    /// Half horizontal field of view in radians.
    #[must_use]
    pub fn angle_x(&self) -> f32 {
        self.tan_x.atan()
    }

    /// Half vertical field of view in radians.
    #[must_use]
    pub fn angle_y(&self) -> f32 {
        self.tan_y.atan()
    }
}

/// Pinhole camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveParams {
    /// Focal length in millimetres.
    pub lens_mm: f32,
    /// Sensor width in millimetres.
    pub sensor_width_mm: f32,
    /// Sensor height in millimetres.
    pub sensor_height_mm: f32,
    /// Sensor fit policy.
    pub sensor_fit: SensorFit,
}

impl Default for PerspectiveParams {
    fn default() -> Self {
        Self {
            lens_mm: 50.0,
            sensor_width_mm: 36.0,
            sensor_height_mm: 24.0,
            sensor_fit: SensorFit::Auto,
        }
    }
}

impl PerspectiveParams {
    /// Creates parameters that produce the given full field of view (radians)
    /// on the axis `sensor_fit` calibrates, using a 36x24 mm sensor.
    #[must_use]
    pub fn from_fov(fov: f32, sensor_fit: SensorFit) -> Self {
        let base = Self {
            sensor_fit,
            ..Self::default()
        };
        let sensor = match sensor_fit {
            SensorFit::Auto | SensorFit::Horizontal => base.sensor_width_mm,
            SensorFit::Vertical => base.sensor_height_mm,
        };
        let half_tan = (fov * 0.5).tan().max(DIV_EPSILON);
        Self {
            lens_mm: sensor * 0.5 / half_tan,
            ..base
        }
    }

    /// Creates parameters from a full field of view given in degrees.
    #[must_use]
    pub fn from_fov_degrees(degrees: f32, sensor_fit: SensorFit) -> Self {
        Self::from_fov(degrees.to_radians(), sensor_fit)
    }

    /// Derives the half field of view for an output of the given aspect
    /// ratio (width / height).
    #[must_use]
    pub fn half_fov(&self, aspect: f32) -> HalfFov {
        let aspect = aspect.max(DIV_EPSILON);
        let lens = self.lens_mm.max(DIV_EPSILON);
        match self.sensor_fit {
            SensorFit::Horizontal => {
                let tan_x = self.sensor_width_mm * 0.5 / lens;
                HalfFov::new(tan_x, tan_x / aspect)
            }
            SensorFit::Vertical => {
                let tan_y = self.sensor_height_mm * 0.5 / lens;
                HalfFov::new(tan_y * aspect, tan_y)
            }
            SensorFit::Auto => {
                // Sensor width always spans the larger image dimension.
                let tan = self.sensor_width_mm * 0.5 / lens;
                if aspect >= 1.0 {
                    HalfFov::new(tan, tan / aspect)
                } else {
                    HalfFov::new(tan * aspect, tan)
                }
            }
        }
    }
}

/// How camera space maps onto the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionModel {
    /// Pinhole perspective projection.
    Perspective(PerspectiveParams),
    /// Parallel projection.
    Orthographic {
        /// World-space width covered by the frame.
        ortho_scale: f32,
    },
}

impl Default for ProjectionModel {
    fn default() -> Self {
        Self::Perspective(PerspectiveParams::default())
    }
}

impl ProjectionModel {
    /// Returns true for perspective projections.
    #[must_use]
    pub fn is_perspective(&self) -> bool {
        matches!(self, Self::Perspective(_))
    }

    /// Returns the orthographic scale, if orthographic.
    #[must_use]
    pub fn ortho_scale(&self) -> Option<f32> {
        match self {
            Self::Perspective(_) => None,
            Self::Orthographic { ortho_scale } => Some(*ortho_scale),
        }
    }

    /// Maps a camera-space point to normalized image coordinates, where
    /// `(±1, ±1)` are the frame edges.
    ///
    /// Returns `None` for perspective points at or behind `near`.
    #[must_use]
    pub fn normalize(&self, local: Vec3, aspect: f32, near: f32) -> Option<Vec2> {
        let aspect = aspect.max(DIV_EPSILON);
        match self {
            Self::Perspective(params) => {
                let depth = -local.z;
                if depth <= near {
                    return None;
                }
                let fov = params.half_fov(aspect);
                Some(Vec2::new(
                    local.x / (depth * fov.tan_x),
                    local.y / (depth * fov.tan_y),
                ))
            }
            Self::Orthographic { ortho_scale } => {
                let half_width = (ortho_scale * 0.5).max(DIV_EPSILON);
                let half_height = (half_width / aspect).max(DIV_EPSILON);
                Some(Vec2::new(local.x / half_width, local.y / half_height))
            }
        }
    }
}

/// Output resolution of the render the camera is framed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSettings {
    /// Horizontal resolution in pixels.
    pub resolution_x: u32,
    /// Vertical resolution in pixels.
    pub resolution_y: u32,
}

impl FrameSettings {
    /// Creates new frame settings.
    #[must_use]
    pub fn new(resolution_x: u32, resolution_y: u32) -> Self {
        Self {
            resolution_x,
            resolution_y,
        }
    }

    /// Creates square frame settings.
    #[must_use]
    pub fn square(resolution: u32) -> Self {
        Self::new(resolution, resolution)
    }

    /// Returns the aspect ratio (width / height), never zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        let x = self.resolution_x.max(1) as f32;
        let y = self.resolution_y.max(1) as f32;
        (x / y).max(DIV_EPSILON)
    }
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self::square(512)
    }
}
