//! Explicit per-instance state tying scroll input to the camera path.
//!
//! Everything that used to be ambient (progress, current room, last pose)
//! lives here, so independent instances never share state.

use crate::config::TourConfig;
use crate::path::CameraPath;
use crate::pose::PoseWriter;
use crate::scroll::{
    RoomLabels, ScrollBinder, ScrollMetrics, ScrollObserver, ScrollState, ScrollUpdate, Scrub,
};
use std::time::Duration;

pub struct TourContext {
    path: CameraPath,
    labels: RoomLabels,
    binder: ScrollBinder,
    poses: PoseWriter,
    state: ScrollState,
    last_update: Option<ScrollUpdate>,
    observers: Vec<Box<dyn ScrollObserver>>,
}

impl TourContext {
    pub fn new(
        path: CameraPath,
        labels: RoomLabels,
        config: &TourConfig,
        poses: PoseWriter,
    ) -> Self {
        Self {
            path,
            labels,
            binder: ScrollBinder::new(Scrub::new(config.scrub_tau_sec), 0.0),
            poses,
            state: ScrollState::default(),
            last_update: None,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn ScrollObserver>) {
        self.observers.push(observer);
    }

    pub fn path(&self) -> &CameraPath {
        &self.path
    }

    pub fn labels(&self) -> &RoomLabels {
        &self.labels
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn last_update(&self) -> Option<ScrollUpdate> {
        self.last_update
    }

    pub fn room_label(&self) -> &str {
        self.labels.name(self.state.room_index).unwrap_or_default()
    }

    /// Feed a scroll measurement. Malformed measurements are ignored.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        match metrics.progress() {
            Some(p) => {
                self.binder.set_target(p);
            }
            None => log::debug!("ignoring malformed scroll metrics {metrics:?}"),
        }
    }

    /// Set the scroll target directly in progress units.
    pub fn set_target(&mut self, progress: f32) {
        self.binder.set_target(progress);
    }

    /// Move to `progress` without smoothing and publish immediately.
    pub fn jump_to(&mut self, progress: f32) -> Option<ScrollUpdate> {
        self.binder.jump(progress);
        self.recompute()
    }

    /// Advance the scrub by `dt` and publish if progress changed.
    pub fn advance(&mut self, dt: Duration) -> Option<ScrollUpdate> {
        self.binder.step(dt);
        self.recompute()
    }

    fn recompute(&mut self) -> Option<ScrollUpdate> {
        let progress = self.binder.current();
        if self.last_update.is_some_and(|u| u.progress == progress) {
            return None;
        }
        let update = ScrollUpdate {
            progress,
            pose: self.path.interpolate(progress),
            room_index: self.labels.index_for(progress),
        };
        if self.state.room_index != update.room_index || self.last_update.is_none() {
            log::info!(
                "[tour] room {} '{}' at progress {:.3}",
                update.room_index,
                self.labels.name(update.room_index).unwrap_or_default(),
                progress
            );
        }
        self.poses.publish(update.pose);
        self.state = ScrollState {
            progress,
            room_index: update.room_index,
        };
        self.last_update = Some(update);
        let label = self.labels.name(update.room_index).unwrap_or_default();
        for observer in &mut self.observers {
            observer.on_scroll_update(&update, label);
        }
        Some(update)
    }
}
