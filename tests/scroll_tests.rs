// Host-side tests for scroll-to-progress mapping, scrub and room labels.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tour_core::error::ConfigError;
use tour_core::pose::pose_slot;
use tour_core::scroll::{
    RoomLabels, ScrollBinder, ScrollMetrics, ScrollObserver, ScrollUpdate, Scrub, VirtualPage,
};
use tour_core::{Tour, TourConfig, TourContext};

fn metrics(top: f64, height: f64, viewport: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: top,
        scroll_height: height,
        viewport_height: viewport,
    }
}

fn labels() -> RoomLabels {
    RoomLabels::new(
        vec!["A".into(), "B".into(), "C".into()],
        vec![0.0, 0.3, 0.7],
    )
    .unwrap()
}

#[test]
fn metrics_map_to_unit_progress() {
    assert_eq!(metrics(0.0, 5000.0, 1000.0).progress(), Some(0.0));
    assert_eq!(metrics(2000.0, 5000.0, 1000.0).progress(), Some(0.5));
    assert_eq!(metrics(4000.0, 5000.0, 1000.0).progress(), Some(1.0));
    // Overscroll (rubber-banding) clamps.
    assert_eq!(metrics(-50.0, 5000.0, 1000.0).progress(), Some(0.0));
    assert_eq!(metrics(4100.0, 5000.0, 1000.0).progress(), Some(1.0));
}

#[test]
fn unscrollable_page_sits_at_start() {
    assert_eq!(metrics(0.0, 800.0, 1000.0).progress(), Some(0.0));
    assert_eq!(metrics(0.0, 1000.0, 1000.0).progress(), Some(0.0));
}

#[test]
fn malformed_metrics_are_rejected() {
    assert_eq!(metrics(f64::NAN, 5000.0, 1000.0).progress(), None);
    assert_eq!(metrics(0.0, f64::INFINITY, 1000.0).progress(), None);
}

#[test]
fn scrub_converges_and_snaps() {
    let scrub = Scrub::new(0.35);
    let mut p = 0.0;
    let mut steps = 0;
    while p != 1.0 {
        p = scrub.step(p, 1.0, Duration::from_millis(16));
        steps += 1;
        assert!(steps < 1000, "scrub never settled");
    }
    assert!(steps > 5, "scrub should not jump straight to target");
}

#[test]
fn zero_tau_disables_smoothing() {
    let scrub = Scrub::new(0.0);
    assert_eq!(scrub.step(0.2, 0.8, Duration::from_millis(16)), 0.8);
}

#[test]
fn long_stall_does_not_overshoot() {
    let scrub = Scrub::new(0.35);
    let p = scrub.step(0.0, 1.0, Duration::from_secs(10));
    assert!(p > 0.0 && p < 1.0);
}

#[test]
fn binder_keeps_last_valid_target_on_nan() {
    let mut binder = ScrollBinder::new(Scrub::new(0.0), 0.0);
    assert!(binder.set_target(0.4));
    assert!(!binder.set_target(f32::NAN));
    assert_eq!(binder.target(), 0.4);
    assert_eq!(binder.step(Duration::from_millis(16)), 0.4);
    assert!(binder.is_settled());
}

#[test]
fn binder_jump_skips_the_scrub() {
    let mut binder = ScrollBinder::new(Scrub::new(0.5), 0.0);
    binder.jump(0.75);
    assert_eq!(binder.current(), 0.75);
    assert!(binder.is_settled());
}

#[test]
fn labels_partition_unit_range() {
    let l = labels();
    assert_eq!(l.index_for(0.0), 0);
    assert_eq!(l.index_for(0.29), 0);
    assert_eq!(l.index_for(0.3), 1);
    assert_eq!(l.index_for(0.69), 1);
    assert_eq!(l.index_for(0.7), 2);
    assert_eq!(l.index_for(1.0), 2);
    assert_eq!(l.index_for(5.0), 2);
    assert_eq!(l.index_for(f32::NAN), 0);
    assert_eq!(l.name(1), Some("B"));
    assert_eq!(l.name(3), None);
}

#[test]
fn labels_reject_bad_thresholds() {
    let names = || vec!["A".to_string(), "B".to_string()];
    assert!(matches!(
        RoomLabels::new(names(), vec![0.0]),
        Err(ConfigError::InvalidThresholds(_))
    ));
    assert!(RoomLabels::new(names(), vec![0.1, 0.5]).is_err());
    assert!(RoomLabels::new(names(), vec![0.0, 0.0]).is_err());
    assert!(RoomLabels::new(names(), vec![0.0, 1.0]).is_err());
    assert!(RoomLabels::new(Vec::new(), Vec::new()).is_err());
}

#[test]
fn virtual_page_clamps_and_pages() {
    let mut page = VirtualPage::new(5000.0, 1000.0);
    page.scroll_by(-100.0);
    assert_eq!(page.offset(), 0.0);
    page.page_by(1.0);
    assert_eq!(page.offset(), 900.0);
    page.scroll_by(f64::NAN);
    assert_eq!(page.offset(), 900.0);
    page.scroll_to_end();
    assert_eq!(page.metrics().progress(), Some(1.0));
    page.scroll_to_start();
    assert_eq!(page.metrics().progress(), Some(0.0));
}

#[test]
fn virtual_page_resize_keeps_progress() {
    let mut page = VirtualPage::new(5000.0, 1000.0);
    page.scroll_by(2000.0);
    let before = page.metrics().progress().unwrap();
    page.set_viewport_height(600.0);
    let after = page.metrics().progress().unwrap();
    assert!((before - after).abs() < 1e-6);
    assert_eq!(page.viewport_height(), 600.0);
}

#[derive(Default)]
struct Recorder {
    updates: Vec<(f32, usize, String)>,
}

struct Shared(Rc<RefCell<Recorder>>);

impl ScrollObserver for Shared {
    fn on_scroll_update(&mut self, update: &ScrollUpdate, room_label: &str) {
        self.0
            .borrow_mut()
            .updates
            .push((update.progress, update.room_index, room_label.to_string()));
    }
}

fn context(tau: f32) -> (TourContext, Rc<RefCell<Recorder>>, tour_core::PoseReader) {
    let tour = Tour::apartment().unwrap();
    let config = TourConfig {
        scrub_tau_sec: tau,
        ..TourConfig::default()
    };
    let (writer, reader) = pose_slot(tour.path.start_pose());
    let mut ctx = TourContext::new(tour.path, tour.labels, &config, writer);
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    ctx.subscribe(Box::new(Shared(recorder.clone())));
    (ctx, recorder, reader)
}

#[test]
fn context_publishes_once_per_change() {
    let (mut ctx, recorder, mut reader) = context(0.0);
    ctx.on_scroll(metrics(0.0, 5000.0, 1000.0));
    assert!(ctx.advance(Duration::from_millis(16)).is_some());
    // Same progress again: nothing new to publish.
    ctx.on_scroll(metrics(0.0, 5000.0, 1000.0));
    assert!(ctx.advance(Duration::from_millis(16)).is_none());
    assert_eq!(recorder.borrow().updates.len(), 1);
    assert!(reader.take_new().is_some());
    assert!(reader.take_new().is_none());
}

#[test]
fn context_tracks_room_and_pose() {
    let (mut ctx, recorder, reader) = context(0.0);
    let update = ctx.jump_to(0.5).unwrap();
    assert_eq!(update.room_index, 1);
    assert_eq!(ctx.room_label(), "Kitchen");
    assert_eq!(ctx.state().progress, 0.5);
    assert_eq!(reader.latest(), ctx.path().interpolate(0.5));
    assert_eq!(recorder.borrow().updates.last().unwrap().2, "Kitchen");
}

#[test]
fn context_ignores_malformed_scroll_and_keeps_pose() {
    let (mut ctx, _recorder, reader) = context(0.0);
    ctx.jump_to(0.6);
    let pose = reader.latest();
    ctx.on_scroll(metrics(f64::NAN, 5000.0, 1000.0));
    ctx.set_target(f32::NAN);
    assert!(ctx.advance(Duration::from_millis(16)).is_none());
    assert_eq!(reader.latest(), pose);
    assert_eq!(ctx.state().progress, 0.6);
}

#[test]
fn context_scrubs_toward_target() {
    let (mut ctx, _recorder, _reader) = context(0.35);
    ctx.jump_to(0.0);
    ctx.set_target(1.0);
    let first = ctx.advance(Duration::from_millis(16)).unwrap();
    assert!(first.progress > 0.0 && first.progress < 1.0);
    for _ in 0..600 {
        ctx.advance(Duration::from_millis(16));
    }
    assert_eq!(ctx.state().progress, 1.0);
    assert_eq!(ctx.room_label(), "Bathroom");
}
