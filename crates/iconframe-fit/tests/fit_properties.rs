//! Property tests for the closed-form fitter.

use glam::{Quat, Vec3};
use iconframe_core::{
    CameraPose, FrameSettings, FramingPolicy, PerspectiveParams, PointCloud, ProjectionModel,
    SensorFit,
};
use iconframe_fit::{normalized_extent, CameraFitter};
use proptest::prelude::*;

fn cloud_strategy() -> impl Strategy<Value = PointCloud> {
    let center = (-3.0f32..3.0, -3.0f32..3.0, -30.0f32..-10.0);
    let offsets = prop::collection::vec((-2.0f32..2.0, -2.0f32..2.0, -2.0f32..2.0), 2..20);
    (center, offsets).prop_map(|((cx, cy, cz), offsets)| {
        offsets
            .into_iter()
            .map(|(x, y, z)| Vec3::new(cx + x, cy + y, cz + z))
            .collect()
    })
}

fn projection_strategy() -> impl Strategy<Value = ProjectionModel> {
    (20.0f32..90.0, prop_oneof![
        Just(SensorFit::Auto),
        Just(SensorFit::Horizontal),
        Just(SensorFit::Vertical),
    ])
        .prop_map(|(fov, fit)| {
            ProjectionModel::Perspective(PerspectiveParams::from_fov_degrees(fov, fit))
        })
}

fn frame_strategy() -> impl Strategy<Value = FrameSettings> {
    (256u32..2048, 256u32..2048).prop_map(|(x, y)| FrameSettings::new(x, y))
}

fn has_lateral_extent(pose: &CameraPose, points: &PointCloud) -> bool {
    points
        .local_rect(pose)
        .is_some_and(|rect| rect.width() > 0.1 || rect.height() > 0.1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn fit_reaches_target_extent(
        points in cloud_strategy(),
        projection in projection_strategy(),
        frame in frame_strategy(),
        scale in 0.6f32..2.0,
        yaw in -0.3f32..0.3,
    ) {
        let pose = CameraPose::new(Vec3::ZERO, Quat::from_rotation_y(yaw));
        prop_assume!(has_lateral_extent(&pose, &points));

        let fitter = CameraFitter::new(FramingPolicy::new(scale, true)).unwrap();
        let result = fitter.fit(&pose, &projection, &frame, &points);
        let extent = normalized_extent(&result.pose, &projection, &frame, &points);

        prop_assert!((extent - 1.0 / scale).abs() < 1e-3, "extent {} for scale {}", extent, scale);
        prop_assert_eq!(result.pose.rotation, pose.rotation);
    }

    #[test]
    fn fit_is_idempotent(
        points in cloud_strategy(),
        projection in projection_strategy(),
        frame in frame_strategy(),
        scale in 0.6f32..2.0,
        center in any::<bool>(),
    ) {
        let pose = CameraPose::default();
        prop_assume!(has_lateral_extent(&pose, &points));

        let fitter = CameraFitter::new(FramingPolicy::new(scale, center)).unwrap();
        let first = fitter.fit(&pose, &projection, &frame, &points);
        let second = fitter.fit(&first.pose, &first.projection, &frame, &points);

        prop_assert!(
            second.pose.position.abs_diff_eq(first.pose.position, 1e-3),
            "{:?} moved to {:?}", first.pose.position, second.pose.position
        );
    }

    #[test]
    fn orthographic_scale_matches_rectangle(
        width in 0.1f32..20.0,
        height in 0.1f32..20.0,
        frame in frame_strategy(),
    ) {
        let points = PointCloud::new(vec![
            Vec3::new(-0.5 * width, -0.5 * height, -5.0),
            Vec3::new(0.5 * width, 0.5 * height, -5.0),
        ]);
        let fitter = CameraFitter::new(FramingPolicy::new(1.0, false)).unwrap();
        let result = fitter.fit(
            &CameraPose::default(),
            &ProjectionModel::Orthographic { ortho_scale: 1.0 },
            &frame,
            &points,
        );
        let expected = width.max(height * frame.aspect());
        let ortho = result.ortho_scale().unwrap();
        prop_assert!((ortho - expected).abs() <= expected * 1e-5, "{} vs {}", ortho, expected);
    }
}
