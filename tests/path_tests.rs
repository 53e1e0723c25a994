// Host-side tests for the camera path and interpolator.
// The main crate is wasm-only; these exercise the pure core crate directly.

use glam::Vec3;
use tour_core::error::ConfigError;
use tour_core::path::{interpolate, CameraPath, CameraPose, Keyframe};

fn kf(position: [f32; 3], look_at: [f32; 3], t: f32) -> Keyframe {
    Keyframe::new(Vec3::from(position), Vec3::from(look_at), t)
}

fn three_keyframe_path() -> CameraPath {
    CameraPath::new(vec![
        kf([0.0, 1.6, 12.0], [0.0, 1.6, 0.0], 0.0),
        kf([0.0, 1.6, 6.0], [0.0, 1.6, 0.0], 0.15),
        kf([-4.0, 1.6, -2.0], [-8.0, 1.6, -2.0], 0.35),
    ])
    .unwrap()
}

fn apartment_path() -> CameraPath {
    tour_core::Tour::apartment().unwrap().path
}

#[test]
fn scenario_midpoints_of_first_and_second_segment() {
    let path = three_keyframe_path();

    let a = interpolate(&path, 0.075);
    assert!(a.position.abs_diff_eq(Vec3::new(0.0, 1.6, 9.0), 1e-4));
    assert!(a.look_at.abs_diff_eq(Vec3::new(0.0, 1.6, 0.0), 1e-6));

    let sample = path.locate(0.25);
    assert_eq!(sample.segment, 1);
    assert!((sample.u - 0.5).abs() < 1e-4);
    let b = interpolate(&path, 0.25);
    assert!(b.position.abs_diff_eq(Vec3::new(-2.0, 1.6, 2.0), 1e-3));
    assert!(b.look_at.abs_diff_eq(Vec3::new(-4.0, 1.6, -1.0), 1e-3));
}

#[test]
fn every_keyframe_is_hit_exactly() {
    for path in [three_keyframe_path(), apartment_path()] {
        for k in path.keyframes() {
            assert_eq!(path.interpolate(k.t), k.pose(), "keyframe at t={}", k.t);
        }
    }
}

#[test]
fn progress_is_clamped_not_rejected() {
    let path = apartment_path();
    assert_eq!(path.interpolate(-0.5), path.interpolate(0.0));
    assert_eq!(path.interpolate(1.5), path.interpolate(1.0));
    assert_eq!(path.interpolate(1.0), path.end_pose());
    assert_eq!(path.interpolate(f32::NEG_INFINITY), path.start_pose());
    assert_eq!(path.interpolate(f32::INFINITY), path.end_pose());
}

#[test]
fn nan_progress_resolves_to_start() {
    let path = apartment_path();
    assert_eq!(path.interpolate(f32::NAN), path.start_pose());
}

#[test]
fn progress_beyond_last_keyframe_holds_end_pose() {
    let path = three_keyframe_path();
    assert_eq!(path.interpolate(0.35), path.end_pose());
    assert_eq!(path.interpolate(0.9), path.end_pose());
    assert_eq!(path.locate(1.0).segment, 1);
}

#[test]
fn poses_are_finite_across_the_range() {
    let path = apartment_path();
    for i in 0..=1000 {
        let pose = path.interpolate(i as f32 / 1000.0);
        assert!(pose.is_finite(), "non-finite pose at step {i}");
    }
}

#[test]
fn no_jump_at_segment_boundaries() {
    let path = apartment_path();
    for k in &path.keyframes()[1..] {
        let before = path.interpolate(k.t - 1e-5);
        let at = path.interpolate(k.t);
        assert!(before.position.abs_diff_eq(at.position, 1e-2), "seam at t={}", k.t);
        assert!(before.look_at.abs_diff_eq(at.look_at, 1e-2), "seam at t={}", k.t);
    }
}

#[test]
fn local_parameter_never_decreases_within_a_segment() {
    let path = apartment_path();
    let mut last: Option<(usize, f32)> = None;
    for i in 0..=2000 {
        let sample = path.locate(i as f32 / 2000.0);
        if let Some((segment, u)) = last {
            assert!(sample.segment >= segment);
            if sample.segment == segment {
                assert!(sample.u >= u, "u went backwards in segment {segment}");
            }
        }
        last = Some((sample.segment, sample.u));
    }
}

#[test]
fn interpolation_is_deterministic() {
    let path = apartment_path();
    let a: Vec<CameraPose> = (0..50).map(|i| path.interpolate(i as f32 / 49.0)).collect();
    let b: Vec<CameraPose> = (0..50).map(|i| path.interpolate(i as f32 / 49.0)).collect();
    assert_eq!(a, b);
}

#[test]
fn rejects_too_few_keyframes() {
    let err = CameraPath::new(vec![kf([0.0; 3], [0.0, 0.0, -1.0], 0.0)]).unwrap_err();
    assert_eq!(err, ConfigError::TooFewKeyframes(1));
}

#[test]
fn rejects_duplicate_t() {
    let err = CameraPath::new(vec![
        kf([0.0; 3], [0.0, 0.0, -1.0], 0.0),
        kf([1.0; 3], [0.0, 0.0, -1.0], 0.5),
        kf([2.0; 3], [0.0, 0.0, -1.0], 0.5),
        kf([3.0; 3], [0.0, 0.0, -1.0], 1.0),
    ])
    .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateT { index: 2, t: 0.5 });
}

#[test]
fn rejects_decreasing_t() {
    let err = CameraPath::new(vec![
        kf([0.0; 3], [0.0, 0.0, -1.0], 0.0),
        kf([1.0; 3], [0.0, 0.0, -1.0], 0.6),
        kf([2.0; 3], [0.0, 0.0, -1.0], 0.4),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::NonMonotonic { index: 2, .. }));
}

#[test]
fn rejects_non_finite_and_out_of_range_values() {
    let err = CameraPath::new(vec![
        kf([0.0; 3], [0.0, 0.0, -1.0], 0.0),
        kf([f32::NAN, 0.0, 0.0], [0.0, 0.0, -1.0], 1.0),
    ])
    .unwrap_err();
    assert_eq!(err, ConfigError::NonFiniteKeyframe { index: 1 });

    let err = CameraPath::new(vec![
        kf([0.0; 3], [0.0, 0.0, -1.0], 0.0),
        kf([1.0; 3], [0.0, 0.0, -1.0], 1.2),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::KeyframeOutOfRange { index: 1, .. }));
}

#[test]
fn anchored_path_must_span_zero_to_one() {
    let frames = vec![
        kf([0.0; 3], [0.0, 0.0, -1.0], 0.0),
        kf([1.0; 3], [0.0, 0.0, -1.0], 0.35),
    ];
    assert!(CameraPath::new(frames.clone()).is_ok());
    let err = CameraPath::anchored(frames).unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnanchoredEnds {
            first: 0.0,
            last: 0.35
        }
    );
}
