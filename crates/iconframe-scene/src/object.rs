//! Scene objects as seen by the sampler.

use glam::{Mat4, Vec3};
use iconframe_core::ObjectId;
use serde::{Deserialize, Serialize};

/// Kind of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Polygon mesh.
    Mesh,
    /// Curve object.
    Curve,
    /// NURBS surface.
    Surface,
    /// Text object.
    Font,
    /// Metaball.
    Meta,
    /// Volume.
    Volume,
    /// Empty (transform only).
    Empty,
    /// Camera.
    Camera,
    /// Light.
    Light,
    /// Anything else.
    Other,
}

impl ObjectKind {
    /// Returns true for kinds that render as geometry.
    #[must_use]
    pub fn is_geometry(self) -> bool {
        matches!(
            self,
            Self::Mesh | Self::Curve | Self::Surface | Self::Font | Self::Meta | Self::Volume
        )
    }
}

fn default_visible() -> bool {
    true
}

/// A scene object with the state the sampler needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique id.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Excluded from renders.
    #[serde(default)]
    pub hide_render: bool,
    /// Visible in the current view layer.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Object-to-world transform.
    #[serde(default)]
    pub world: Mat4,
    /// Local-space axis-aligned bounds.
    #[serde(default)]
    pub bounds: Option<(Vec3, Vec3)>,
    /// Parent object, if the object is part of a hierarchy.
    #[serde(default)]
    pub parent: Option<ObjectId>,
}

impl SceneObject {
    /// Creates a visible, renderable object at the origin with no bounds.
    pub fn new(id: ObjectId, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            hide_render: false,
            visible: true,
            world: Mat4::IDENTITY,
            bounds: None,
            parent: None,
        }
    }

    /// Sets the object-to-world transform.
    #[must_use]
    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    /// Sets the local-space bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: Vec3, max: Vec3) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// Sets the parent object.
    #[must_use]
    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Returns true if the object has no parent.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns true if the object takes part in renders.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.hide_render && self.visible
    }

    /// World-space origin of the object.
    #[must_use]
    pub fn world_origin(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }

    /// The eight corners of the local bounds, in world space.
    #[must_use]
    pub fn bounding_box_corners(&self) -> Option<[Vec3; 8]> {
        let (min, max) = self.bounds?;
        let corner = |i: usize| {
            Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        };
        Some(std::array::from_fn(|i| self.world.transform_point3(corner(i))))
    }
}
