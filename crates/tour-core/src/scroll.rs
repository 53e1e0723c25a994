//! Scroll-to-progress mapping, scrub smoothing and room label buckets.

use crate::constants::{MAX_SCRUB_STEP_SEC, SCRUB_SNAP_EPSILON};
use crate::error::ConfigError;
use crate::path::{clamp_progress, CameraPose};
use std::time::Duration;

/// Raw numbers pulled from the page (or a virtual page on native).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Normalized progress in `[0, 1]`, or `None` for a malformed measurement.
    ///
    /// A page that cannot scroll sits at the start of the tour.
    pub fn progress(&self) -> Option<f32> {
        let (top, height, viewport) = (self.scroll_top, self.scroll_height, self.viewport_height);
        if !(top.is_finite() && height.is_finite() && viewport.is_finite()) {
            return None;
        }
        let max = height - viewport;
        if max <= 0.0 {
            return Some(0.0);
        }
        Some((top / max).clamp(0.0, 1.0) as f32)
    }
}

/// A scrollable page of fixed height for hosts without a document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VirtualPage {
    offset: f64,
    page_height: f64,
    viewport_height: f64,
}

impl VirtualPage {
    pub fn new(page_height: f64, viewport_height: f64) -> Self {
        Self {
            offset: 0.0,
            page_height,
            viewport_height,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn max_offset(&self) -> f64 {
        (self.page_height - self.viewport_height).max(0.0)
    }

    /// Scroll by `delta` pixels, clamped to the page. Non-finite deltas are
    /// ignored.
    pub fn scroll_by(&mut self, delta: f64) {
        if delta.is_finite() {
            self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
        }
    }

    /// Scroll by whole screens (keyboard paging keeps a little overlap).
    pub fn page_by(&mut self, pages: f64) {
        self.scroll_by(pages * self.viewport_height * 0.9);
    }

    pub fn scroll_to_start(&mut self) {
        self.offset = 0.0;
    }

    pub fn scroll_to_end(&mut self) {
        self.offset = self.max_offset();
    }

    /// Change the visible height while keeping the same progress.
    pub fn set_viewport_height(&mut self, height: f64) {
        if !(height.is_finite() && height > 0.0) {
            return;
        }
        let progress = self.metrics().progress().unwrap_or(0.0) as f64;
        self.viewport_height = height;
        self.offset = progress * self.max_offset();
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.offset,
            scroll_height: self.page_height,
            viewport_height: self.viewport_height,
        }
    }
}

/// First-order lag applied to progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrub {
    pub tau_sec: f32,
}

impl Scrub {
    pub fn new(tau_sec: f32) -> Self {
        Self {
            tau_sec: tau_sec.max(0.0),
        }
    }

    /// Move `current` toward `target` for `dt`; snaps once within epsilon.
    pub fn step(&self, current: f32, target: f32, dt: Duration) -> f32 {
        if self.tau_sec <= 0.0 {
            return target;
        }
        let dt_sec = dt.as_secs_f32().min(MAX_SCRUB_STEP_SEC);
        let alpha = 1.0 - (-dt_sec / self.tau_sec).exp();
        let next = current + (target - current) * alpha;
        if (target - next).abs() < SCRUB_SNAP_EPSILON {
            target
        } else {
            next
        }
    }
}

/// Holds the scroll target and the smoothed progress that chases it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollBinder {
    scrub: Scrub,
    target: f32,
    current: f32,
}

impl ScrollBinder {
    pub fn new(scrub: Scrub, initial: f32) -> Self {
        let p = clamp_progress(initial);
        Self {
            scrub,
            target: p,
            current: p,
        }
    }

    /// Record a new scroll target. Non-finite input is dropped and the last
    /// valid target retained. Returns whether the target was accepted.
    pub fn set_target(&mut self, progress: f32) -> bool {
        if !progress.is_finite() {
            log::debug!("ignoring non-finite scroll progress {progress}");
            return false;
        }
        self.target = progress.clamp(0.0, 1.0);
        true
    }

    /// Set target and current together, skipping the scrub.
    pub fn jump(&mut self, progress: f32) -> bool {
        if self.set_target(progress) {
            self.current = self.target;
            true
        } else {
            false
        }
    }

    pub fn step(&mut self, dt: Duration) -> f32 {
        self.current = self.scrub.step(self.current, self.target, dt);
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

/// Partition of `[0, 1]` into one bucket per named room.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomLabels {
    names: Vec<String>,
    starts: Vec<f32>,
}

impl RoomLabels {
    /// `starts[i]` is where room `i` begins; room `i` runs until `starts[i + 1]`
    /// and the last room until 1. Requires `starts[0] == 0`, strictly
    /// increasing values below 1 and one start per name.
    pub fn new(names: Vec<String>, starts: Vec<f32>) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::InvalidThresholds("no rooms".to_string()));
        }
        if names.len() != starts.len() {
            return Err(ConfigError::InvalidThresholds(format!(
                "{} names but {} thresholds",
                names.len(),
                starts.len()
            )));
        }
        if starts[0] != 0.0 {
            return Err(ConfigError::InvalidThresholds(format!(
                "first bucket must start at 0, got {}",
                starts[0]
            )));
        }
        if let Some(bad) = starts.iter().find(|s| !(s.is_finite() && **s < 1.0)) {
            return Err(ConfigError::InvalidThresholds(format!(
                "threshold {bad} must be finite and below 1"
            )));
        }
        if let Some(i) = starts.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ConfigError::InvalidThresholds(format!(
                "threshold {} ({}) does not increase past {}",
                i + 1,
                starts[i + 1],
                starts[i]
            )));
        }
        Ok(Self { names, starts })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn starts(&self) -> &[f32] {
        &self.starts
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Bucket containing `progress` (clamped; NaN resolves to the first room).
    pub fn index_for(&self, progress: f32) -> usize {
        let p = clamp_progress(progress);
        self.starts.partition_point(|s| *s <= p).saturating_sub(1)
    }
}

/// Read model handed to overlay observers after every progress change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollUpdate {
    pub progress: f32,
    pub pose: CameraPose,
    pub room_index: usize,
}

/// The single live scroll value of a walkthrough instance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub progress: f32,
    pub room_index: usize,
}

/// Receives every [`ScrollUpdate`]. Observers only read; nothing flows back.
pub trait ScrollObserver {
    fn on_scroll_update(&mut self, update: &ScrollUpdate, room_label: &str);
}
