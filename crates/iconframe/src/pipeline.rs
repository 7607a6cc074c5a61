//! The icon framing pipeline: pick a collection and camera, sample the
//! subject, fit, and write the camera back to the host.

use glam::Vec3;
use iconframe_core::{FrameError, FrameSettings, ObjectId, Result};
use iconframe_fit::{normalized_extent, FitMethod, Framer};
use iconframe_scene::{find_best_lod_collection, PointSampler, SceneHost, SceneObject};
use serde::{Deserialize, Serialize};

use crate::config::IconConfig;

/// Summary of a framing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconReport {
    /// Collection that was framed.
    pub collection: String,
    /// Camera that was moved.
    pub camera: String,
    /// Square output resolution applied to the scene.
    pub resolution: u32,
    /// Render candidates found in the collection.
    pub objects: usize,
    /// World-space points sampled from them.
    pub points: usize,
    /// How the camera was positioned.
    pub method: FitMethod,
    /// Final camera position.
    pub position: Vec3,
    /// Final orthographic scale, for orthographic cameras.
    pub ortho_scale: Option<f32>,
    /// Distance moved by the dolly search, when delegation ran.
    pub dolly: Option<f32>,
    /// Largest normalized extent of the subject in the final frame.
    pub final_extent: f32,
}

/// Picks the collection to frame: `explicit`, else the most detailed LOD
/// collection, else the scene root.
pub fn resolve_collection<H: SceneHost + ?Sized>(host: &H, explicit: Option<&str>) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    let names = host.collection_names();
    match find_best_lod_collection(&names) {
        Some(name) => {
            log::debug!("using LOD collection '{name}'");
            name.to_string()
        }
        None => host.root_collection(),
    }
}

/// Picks the camera to move: `explicit`, else the scene's active camera.
pub fn resolve_camera<H: SceneHost + ?Sized>(host: &H, explicit: Option<&str>) -> Result<String> {
    explicit
        .map(str::to_string)
        .or_else(|| host.active_camera())
        .ok_or(FrameError::NoCamera)
}

/// Frames the configured collection with the configured camera and writes
/// the result back to `host`.
///
/// The scene's resolution is set to a square `config.resolution` first. When
/// no collection is named and no LOD collection exists, only the root's
/// top-level (unparented) objects are framed. An empty subject leaves the
/// camera where it was.
pub fn frame_icon<H: SceneHost + ?Sized>(host: &mut H, config: &IconConfig) -> Result<IconReport> {
    config.validate()?;
    let framer = Framer::new(config.policy(), config.strategy)?.with_dolly(config.dolly);

    let collection = resolve_collection(host, config.collection.as_deref());
    let camera_name = resolve_camera(host, config.camera.as_deref())?;
    let camera = host.camera(&camera_name)?;
    let mut objects = host.collection_objects(&collection)?;
    // Falling back to the root frames the scene's top-level objects only.
    if config.collection.is_none() && collection == host.root_collection() {
        objects.retain(SceneObject::is_top_level);
    }

    let frame = FrameSettings::square(config.resolution);
    host.set_frame_settings(frame);

    let sampler = PointSampler::default();
    let candidates = sampler.render_candidates(objects);
    let points = sampler.sample(&*host, &candidates);
    let subject: Vec<ObjectId> = candidates.iter().map(|o| o.id).collect();
    log::info!(
        "framing '{collection}' with '{camera_name}': {} objects, {} points",
        candidates.len(),
        points.len()
    );

    let outcome = framer.frame(
        &camera.pose,
        &camera.projection,
        &frame,
        &points,
        &subject,
        host.alignment_oracle(),
    );

    if outcome.method != FitMethod::Skipped {
        host.set_camera_position(&camera_name, outcome.pose.position)?;
        if let Some(ortho_scale) = outcome.projection.ortho_scale() {
            host.set_ortho_scale(&camera_name, ortho_scale)?;
        }
    }

    let final_extent = outcome.report.map_or_else(
        || normalized_extent(&outcome.pose, &outcome.projection, &frame, &points),
        |report| report.final_extent,
    );
    log::info!(
        "camera '{camera_name}' at {:?} ({:?}, extent {final_extent:.4})",
        outcome.pose.position,
        outcome.method
    );

    Ok(IconReport {
        collection,
        camera: camera_name,
        resolution: config.resolution,
        objects: candidates.len(),
        points: points.len(),
        method: outcome.method,
        position: outcome.pose.position,
        ortho_scale: outcome.projection.ortho_scale(),
        dolly: outcome.dolly.map(|d| d.distance()),
        final_extent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconframe_core::{CameraPose, ProjectionModel};
    use iconframe_scene::{MemoryScene, ObjectKind};

    fn scene_with_camera() -> MemoryScene {
        let mut scene = MemoryScene::new();
        scene.add_camera(
            "Camera",
            CameraPose::new(Vec3::new(0.0, 0.0, 10.0), glam::Quat::IDENTITY),
            ProjectionModel::default(),
        );
        scene
    }

    #[test]
    fn test_collection_resolution_order() {
        let mut scene = scene_with_camera();
        assert_eq!(resolve_collection(&scene, None), "Scene Collection");

        scene.add_collection("Brick_LOD_1", Vec::new());
        scene.add_collection("Brick_LOD_0", Vec::new());
        assert_eq!(resolve_collection(&scene, None), "Brick_LOD_0");
        assert_eq!(resolve_collection(&scene, Some("Props")), "Props");
    }

    #[test]
    fn test_camera_resolution_order() {
        let mut scene = MemoryScene::new();
        assert!(matches!(resolve_camera(&scene, None), Err(FrameError::NoCamera)));
        assert_eq!(resolve_camera(&scene, Some("Side")).unwrap(), "Side");

        scene.add_camera("Camera", CameraPose::default(), ProjectionModel::default());
        assert_eq!(resolve_camera(&scene, None).unwrap(), "Camera");
    }

    #[test]
    fn test_sets_square_resolution() {
        let mut scene = scene_with_camera();
        scene.frame = FrameSettings::new(1920, 1080);
        let config = IconConfig {
            resolution: 128,
            ..IconConfig::default()
        };
        let report = frame_icon(&mut scene, &config).unwrap();
        assert_eq!(scene.frame, FrameSettings::square(128));
        assert_eq!(report.method, FitMethod::Skipped);
    }

    #[test]
    fn test_empty_collection_leaves_camera() {
        let mut scene = scene_with_camera();
        let before = scene.camera("Camera").unwrap();
        let report = frame_icon(&mut scene, &IconConfig::default()).unwrap();
        assert_eq!(report.points, 0);
        assert_eq!(scene.camera("Camera").unwrap(), before);
    }

    #[test]
    fn test_unknown_names_are_errors() {
        let mut scene = scene_with_camera();
        let config = IconConfig {
            collection: Some("Missing".into()),
            ..IconConfig::default()
        };
        assert!(matches!(
            frame_icon(&mut scene, &config),
            Err(FrameError::CollectionNotFound(_))
        ));

        let config = IconConfig {
            camera: Some("Missing".into()),
            ..IconConfig::default()
        };
        assert!(matches!(
            frame_icon(&mut scene, &config),
            Err(FrameError::CameraNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_config_touches_nothing() {
        let mut scene = scene_with_camera();
        scene.frame = FrameSettings::new(640, 480);
        let config = IconConfig {
            resolution: 8,
            ..IconConfig::default()
        };
        assert!(frame_icon(&mut scene, &config).is_err());
        assert_eq!(scene.frame, FrameSettings::new(640, 480));
    }

    #[test]
    fn test_root_fallback_frames_top_level_only() {
        let mut scene = scene_with_camera();
        let body = scene.add_object(
            SceneObject::new(ObjectId(1), "Body", ObjectKind::Mesh)
                .with_bounds(Vec3::splat(-1.0), Vec3::splat(1.0)),
            None,
        );
        scene.add_object(
            SceneObject::new(ObjectId(2), "Antenna", ObjectKind::Mesh)
                .with_bounds(Vec3::splat(-1.0), Vec3::splat(1.0))
                .with_parent(body),
            None,
        );

        let report = frame_icon(&mut scene, &IconConfig::default()).unwrap();
        assert_eq!(report.collection, "Scene Collection");
        assert_eq!(report.objects, 1);

        let config = IconConfig {
            collection: Some("Scene Collection".into()),
            ..IconConfig::default()
        };
        let report = frame_icon(&mut scene, &config).unwrap();
        assert_eq!(report.objects, 2);
    }

    #[test]
    fn test_lod_collection_keeps_children() {
        let mut scene = scene_with_camera();
        let body = scene.add_object(
            SceneObject::new(ObjectId(1), "Body", ObjectKind::Mesh)
                .with_bounds(Vec3::splat(-1.0), Vec3::splat(1.0)),
            None,
        );
        scene.add_object(
            SceneObject::new(ObjectId(2), "Antenna", ObjectKind::Mesh)
                .with_bounds(Vec3::splat(-1.0), Vec3::splat(1.0))
                .with_parent(body),
            None,
        );
        scene.add_collection("Rover_LOD_0", vec![ObjectId(1), ObjectId(2)]);

        let report = frame_icon(&mut scene, &IconConfig::default()).unwrap();
        assert_eq!(report.collection, "Rover_LOD_0");
        assert_eq!(report.objects, 2);
    }

    #[test]
    fn test_frames_mesh_in_root() {
        let mut scene = scene_with_camera();
        scene.add_object(
            SceneObject::new(ObjectId(1), "Cube", ObjectKind::Mesh)
                .with_bounds(Vec3::splat(-1.0), Vec3::splat(1.0)),
            None,
        );
        let report = frame_icon(&mut scene, &IconConfig::default()).unwrap();
        assert_eq!(report.method, FitMethod::ClosedForm);
        assert_eq!(report.objects, 1);
        assert_eq!(report.points, 8);
        assert!((report.final_extent - 1.0 / 1.02).abs() < 1e-4);
        assert_eq!(scene.camera("Camera").unwrap().pose.position, report.position);
    }
}
