//! World-space point clouds and their camera-space extents.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::pose::CameraPose;

/// An unordered set of world-space points describing a subject's extent.
///
/// Order and duplicates are irrelevant to every consumer; only extrema matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    /// Creates a point cloud from world-space points.
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the cloud has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Adds a point.
    pub fn push(&mut self, point: Vec3) {
        self.points.push(point);
    }

    /// Returns an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter()
    }

    /// Returns the axis-aligned bounding box in world coordinates.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Maps every point into the camera space of `pose`.
    #[must_use]
    pub fn to_camera_space(&self, pose: &CameraPose) -> Vec<Vec3> {
        self.points.iter().map(|p| pose.to_local(*p)).collect()
    }

    /// Returns the smallest depth of any point as seen from `pose`.
    #[must_use]
    pub fn min_depth(&self, pose: &CameraPose) -> Option<f32> {
        self.points
            .iter()
            .map(|p| pose.depth(*p))
            .reduce(f32::min)
    }

    /// Returns the camera-plane bounding rectangle as seen from `pose`.
    #[must_use]
    pub fn local_rect(&self, pose: &CameraPose) -> Option<LocalRect> {
        LocalRect::from_local_points(&self.to_camera_space(pose))
    }
}

impl From<Vec<Vec3>> for PointCloud {
    fn from(points: Vec<Vec3>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Vec3> for PointCloud {
    fn from_iter<T: IntoIterator<Item = Vec3>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Vec3> for PointCloud {
    fn extend<T: IntoIterator<Item = Vec3>>(&mut self, iter: T) {
        self.points.extend(iter);
    }
}

/// Axis-aligned rectangle in the camera's local XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalRect {
    /// Minimum local (x, y).
    pub min: Vec2,
    /// Maximum local (x, y).
    pub max: Vec2,
}

impl LocalRect {
    /// Bounds the XY components of camera-space points.
    #[must_use]
    pub fn from_local_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?.truncate();
        let (min, max) = points.iter().fold((first, first), |(min, max), p| {
            let xy = p.truncate();
            (min.min(xy), max.max(xy))
        });
        Some(Self { min, max })
    }

    /// Midpoint of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Extent along local X.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along local Y.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(center: Vec3, half: f32) -> PointCloud {
        let mut cloud = PointCloud::default();
        for x in [-half, half] {
            for y in [-half, half] {
                for z in [-half, half] {
                    cloud.push(center + Vec3::new(x, y, z));
                }
            }
        }
        cloud
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = PointCloud::default();
        assert!(cloud.is_empty());
        assert!(cloud.bounding_box().is_none());
        assert!(cloud.local_rect(&CameraPose::default()).is_none());
        assert!(cloud.min_depth(&CameraPose::default()).is_none());
    }

    #[test]
    fn test_bounding_box() {
        let cloud = cube(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let (min, max) = cloud.bounding_box().unwrap();
        assert_eq!(min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(max, Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_local_rect_and_depth() {
        let cloud = cube(Vec3::new(1.0, -1.0, -10.0), 1.0);
        let pose = CameraPose::default();
        let rect = cloud.local_rect(&pose).unwrap();
        assert_eq!(rect.center(), Vec2::new(1.0, -1.0));
        assert_eq!(rect.width(), 2.0);
        assert_eq!(rect.height(), 2.0);
        assert_eq!(cloud.min_depth(&pose), Some(9.0));
    }

    #[test]
    fn test_duplicates_do_not_change_extent() {
        let mut cloud = cube(Vec3::ZERO, 1.0);
        let before = cloud.bounding_box();
        let copy: Vec<Vec3> = cloud.points().to_vec();
        cloud.extend(copy);
        assert_eq!(cloud.len(), 16);
        assert_eq!(cloud.bounding_box(), before);
    }

    #[test]
    fn test_json_is_plain_array() {
        let cloud = PointCloud::new(vec![Vec3::X]);
        let json = serde_json::to_string(&cloud).unwrap();
        assert_eq!(json, "[[1.0,0.0,0.0]]");
    }
}
