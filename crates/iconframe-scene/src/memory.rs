//! In-memory scene host.
//!
//! Backs the headless command-line runner and the tests. Scenes can be built
//! in code or loaded from JSON.

use std::cell::Cell;
use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use iconframe_core::{
    CameraPose, FrameError, FrameSettings, FramingPolicy, ObjectId, ProjectionModel, Result,
    Selection,
};
use iconframe_fit::{AlignmentError, AlignmentOracle, CameraFitter, SelectionHost};
use serde::{Deserialize, Serialize};

use crate::host::{EvaluatedMesh, HostCamera, SceneHost};
use crate::object::SceneObject;
use crate::sampler::PointSampler;

fn default_root() -> String {
    "Scene Collection".to_string()
}

/// An object plus its evaluated mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryObject {
    /// Object state.
    #[serde(flatten)]
    pub object: SceneObject,
    /// Evaluated object-space vertices; `None` if evaluation is unavailable.
    #[serde(default)]
    pub mesh: Option<Vec<Vec3>>,
}

/// A named collection of objects and child collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCollection {
    /// Collection name.
    pub name: String,
    /// Objects directly in this collection.
    #[serde(default)]
    pub objects: Vec<ObjectId>,
    /// Child collection names.
    #[serde(default)]
    pub children: Vec<String>,
}

/// A complete scene held in memory.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryScene {
    /// Name of the root collection.
    #[serde(default = "default_root")]
    pub root: String,
    /// Objects.
    pub objects: Vec<MemoryObject>,
    /// Collections, including the root.
    pub collections: Vec<MemoryCollection>,
    /// Cameras.
    pub cameras: Vec<HostCamera>,
    /// Active camera name.
    pub active_camera: Option<String>,
    /// Output resolution.
    pub frame: FrameSettings,
    /// Current selection.
    pub selection: Selection,
    /// Whether an interactive viewport exists.
    pub viewport: bool,
    #[serde(skip)]
    live_meshes: Cell<usize>,
}

impl MemoryScene {
    /// Creates an empty scene with an empty root collection.
    pub fn new() -> Self {
        let root = default_root();
        Self {
            collections: vec![MemoryCollection {
                name: root.clone(),
                objects: Vec::new(),
                children: Vec::new(),
            }],
            root,
            ..Self::default()
        }
    }

    /// Parses a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the scene to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Enables or disables the simulated interactive viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: bool) -> Self {
        self.viewport = viewport;
        self
    }

    /// Adds an object to the root collection.
    pub fn add_object(&mut self, object: SceneObject, mesh: Option<Vec<Vec3>>) -> ObjectId {
        let id = object.id;
        let root = self.root.clone();
        self.objects.push(MemoryObject { object, mesh });
        if let Some(collection) = self.collections.iter_mut().find(|c| c.name == root) {
            collection.objects.push(id);
        }
        id
    }

    /// Adds a collection and links it under the root.
    pub fn add_collection(&mut self, name: impl Into<String>, objects: Vec<ObjectId>) {
        let name = name.into();
        let root = self.root.clone();
        if let Some(parent) = self.collections.iter_mut().find(|c| c.name == root) {
            parent.children.push(name.clone());
        }
        self.collections.push(MemoryCollection {
            name,
            objects,
            children: Vec::new(),
        });
    }

    /// Adds a camera, making it active if it is the first one.
    pub fn add_camera(
        &mut self,
        name: impl Into<String>,
        pose: CameraPose,
        projection: ProjectionModel,
    ) {
        let name = name.into();
        if self.active_camera.is_none() {
            self.active_camera = Some(name.clone());
        }
        self.cameras.push(HostCamera {
            name,
            pose,
            projection,
        });
    }

    /// Number of evaluated meshes handed out and not yet released.
    pub fn live_evaluated_meshes(&self) -> usize {
        self.live_meshes.get()
    }

    fn object(&self, id: ObjectId) -> Option<&MemoryObject> {
        self.objects.iter().find(|o| o.object.id == id)
    }

    fn camera_mut(&mut self, name: &str) -> Result<&mut HostCamera> {
        self.cameras
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| FrameError::CameraNotFound(name.to_string()))
    }
}

impl SceneHost for MemoryScene {
    fn collection_names(&self) -> Vec<String> {
        self.collections.iter().map(|c| c.name.clone()).collect()
    }

    fn root_collection(&self) -> String {
        self.root.clone()
    }

    fn collection_objects(&self, collection: &str) -> Result<Vec<SceneObject>> {
        if !self.collections.iter().any(|c| c.name == collection) {
            return Err(FrameError::CollectionNotFound(collection.to_string()));
        }

        let mut visited = HashSet::new();
        let mut seen = HashSet::new();
        let mut objects = Vec::new();
        let mut stack = vec![collection.to_string()];
        while let Some(name) = stack.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            let Some(current) = self.collections.iter().find(|c| c.name == name) else {
                log::warn!("collection '{name}' linked but not defined");
                continue;
            };
            for id in &current.objects {
                match self.object(*id) {
                    Some(o) if seen.insert(*id) => objects.push(o.object.clone()),
                    Some(_) => {}
                    None => log::warn!("collection '{name}' references missing object {id}"),
                }
            }
            stack.extend(current.children.iter().rev().cloned());
        }
        Ok(objects)
    }

    fn evaluated_mesh(&self, id: ObjectId) -> Option<EvaluatedMesh<'_>> {
        let object = self.object(id)?;
        let vertices = object.mesh.as_deref()?;
        let live = &self.live_meshes;
        live.set(live.get() + 1);
        Some(
            EvaluatedMesh::new(vertices, object.object.world)
                .on_release(move || live.set(live.get() - 1)),
        )
    }

    fn active_camera(&self) -> Option<String> {
        self.active_camera.clone()
    }

    fn camera(&self, name: &str) -> Result<HostCamera> {
        self.cameras
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| FrameError::CameraNotFound(name.to_string()))
    }

    fn frame_settings(&self) -> FrameSettings {
        self.frame
    }

    fn set_frame_settings(&mut self, frame: FrameSettings) {
        self.frame = frame;
    }

    fn set_camera_position(&mut self, name: &str, position: Vec3) -> Result<()> {
        self.camera_mut(name)?.pose.position = position;
        Ok(())
    }

    fn set_ortho_scale(&mut self, name: &str, ortho_scale: f32) -> Result<()> {
        let camera = self.camera_mut(name)?;
        if let ProjectionModel::Orthographic { ortho_scale: current } = &mut camera.projection {
            *current = ortho_scale;
        }
        Ok(())
    }

    fn alignment_oracle(&mut self) -> Option<&mut dyn AlignmentOracle> {
        Some(self)
    }
}

impl SelectionHost for MemoryScene {
    fn selection(&self) -> Selection {
        self.selection.clone()
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }
}

impl AlignmentOracle for MemoryScene {
    fn viewport_available(&self) -> bool {
        self.viewport
    }

    /// Simulated viewport: a centered tight fit of the selected objects,
    /// using the active camera's projection.
    fn align_camera_to_selection(
        &mut self,
        pose: &mut CameraPose,
    ) -> std::result::Result<(), AlignmentError> {
        if !self.viewport {
            return Err(AlignmentError::ViewportUnavailable);
        }
        let camera = self
            .active_camera
            .as_deref()
            .and_then(|name| self.camera(name).ok())
            .ok_or_else(|| AlignmentError::Failed("no active camera".into()))?;

        let selected: Vec<SceneObject> = self
            .selection
            .selected
            .iter()
            .filter_map(|id| self.object(*id).map(|o| o.object.clone()))
            .collect();
        let points = PointSampler::default().sample(&*self, &selected);
        if points.is_empty() {
            return Err(AlignmentError::Failed("nothing selected".into()));
        }

        let fitter = CameraFitter::new(FramingPolicy::new(1.0, true))
            .map_err(|e| AlignmentError::Failed(e.to_string()))?;
        *pose = fitter.fit(pose, &camera.projection, &self.frame, &points).pose;
        Ok(())
    }
}
