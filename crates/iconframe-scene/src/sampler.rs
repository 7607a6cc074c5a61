//! Point sampling of render candidates.

use std::collections::HashSet;

use iconframe_core::PointCloud;

use crate::host::SceneHost;
use crate::object::{ObjectKind, SceneObject};

/// Turns scene objects into a world-space [`PointCloud`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSampler {
    /// Keep empties as zero-extent markers when no geometry is present.
    pub empty_fallback: bool,
}

impl Default for PointSampler {
    fn default() -> Self {
        Self {
            empty_fallback: true,
        }
    }
}

impl PointSampler {
    /// Creates a sampler.
    pub fn new(empty_fallback: bool) -> Self {
        Self { empty_fallback }
    }

    /// Filters `objects` down to what would show up in a render.
    ///
    /// Hidden objects are dropped, geometry kinds are kept, and empties are
    /// kept only when nothing geometry-bearing survives. Each object id is
    /// kept once.
    pub fn render_candidates(
        &self,
        objects: impl IntoIterator<Item = SceneObject>,
    ) -> Vec<SceneObject> {
        let mut seen = HashSet::new();
        let (geometry, empties): (Vec<_>, Vec<_>) = objects
            .into_iter()
            .filter(SceneObject::is_renderable)
            .filter(|o| o.kind.is_geometry() || o.kind == ObjectKind::Empty)
            .filter(|o| seen.insert(o.id))
            .partition(|o| o.kind.is_geometry());

        if geometry.is_empty() && self.empty_fallback {
            log::debug!("no geometry among candidates, using {} empties", empties.len());
            empties
        } else {
            geometry
        }
    }

    /// Samples world-space points from `objects`.
    ///
    /// Meshes contribute their evaluated vertices; other geometry, and meshes
    /// the host cannot evaluate, contribute their bounding-box corners.
    /// Empties contribute their origin.
    pub fn sample<H: SceneHost + ?Sized>(&self, host: &H, objects: &[SceneObject]) -> PointCloud {
        let mut cloud = PointCloud::default();
        for object in objects {
            if object.kind == ObjectKind::Empty {
                cloud.push(object.world_origin());
                continue;
            }
            if !object.kind.is_geometry() {
                continue;
            }

            if object.kind == ObjectKind::Mesh {
                if let Some(mesh) = host.evaluated_mesh(object.id) {
                    if !mesh.is_empty() {
                        cloud.extend(mesh.world_points());
                        continue;
                    }
                }
                log::debug!("'{}': no evaluated mesh, using bounds", object.name);
            }

            match host.bounding_box_corners(object) {
                Some(corners) => cloud.extend(corners),
                None => {
                    log::debug!("'{}': no bounds, using origin", object.name);
                    cloud.push(object.world_origin());
                }
            }
        }
        log::debug!("sampled {} points from {} objects", cloud.len(), objects.len());
        cloud
    }
}
