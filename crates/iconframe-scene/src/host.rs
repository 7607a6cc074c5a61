//! The interface iconframe needs from the application that owns the scene.

use std::borrow::Cow;

use glam::{Mat4, Vec3};
use iconframe_core::{CameraPose, FrameSettings, ObjectId, ProjectionModel, Result};
use iconframe_fit::AlignmentOracle;
use serde::{Deserialize, Serialize};

use crate::object::SceneObject;

/// Post-modifier mesh data borrowed from the host.
///
/// Evaluated meshes are expensive host resources. The release hook runs when
/// the value is dropped, so holders cannot leak one past their scope.
pub struct EvaluatedMesh<'a> {
    vertices: Cow<'a, [Vec3]>,
    world: Mat4,
    release: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> EvaluatedMesh<'a> {
    /// Wraps object-space vertices and the evaluated object-to-world matrix.
    pub fn new(vertices: impl Into<Cow<'a, [Vec3]>>, world: Mat4) -> Self {
        Self {
            vertices: vertices.into(),
            world,
            release: None,
        }
    }

    /// Registers a hook to run when the mesh is dropped.
    #[must_use]
    pub fn on_release(mut self, release: impl FnOnce() + 'a) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices transformed to world space.
    pub fn world_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| self.world.transform_point3(*v))
    }
}

impl Drop for EvaluatedMesh<'_> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// A camera as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCamera {
    /// Camera object name.
    pub name: String,
    /// Camera placement.
    pub pose: CameraPose,
    /// Projection settings.
    #[serde(default)]
    pub projection: ProjectionModel,
}

/// The scene-owning application.
///
/// Only the operations listed here are used; everything else about the host
/// (asset loading, materials, rendering) stays on the host's side.
pub trait SceneHost {
    /// Names of every collection in the scene.
    fn collection_names(&self) -> Vec<String>;

    /// Name of the scene's root collection.
    fn root_collection(&self) -> String;

    /// Every object in `collection` and its child collections, each once.
    fn collection_objects(&self, collection: &str) -> Result<Vec<SceneObject>>;

    /// Evaluated (post-modifier) mesh of an object, if it has one.
    fn evaluated_mesh(&self, id: ObjectId) -> Option<EvaluatedMesh<'_>>;

    /// World-space bounding-box corners of an object.
    fn bounding_box_corners(&self, object: &SceneObject) -> Option<[Vec3; 8]> {
        object.bounding_box_corners()
    }

    /// Name of the scene's active camera.
    fn active_camera(&self) -> Option<String>;

    /// Looks up a camera by name.
    fn camera(&self, name: &str) -> Result<HostCamera>;

    /// Output resolution.
    fn frame_settings(&self) -> FrameSettings;

    /// Sets the output resolution.
    fn set_frame_settings(&mut self, frame: FrameSettings);

    /// Moves a camera.
    fn set_camera_position(&mut self, name: &str, position: Vec3) -> Result<()>;

    /// Sets an orthographic camera's scale.
    fn set_ortho_scale(&mut self, name: &str, ortho_scale: f32) -> Result<()>;

    /// The host's viewport alignment capability, if it has one.
    fn alignment_oracle(&mut self) -> Option<&mut dyn AlignmentOracle> {
        None
    }
}
