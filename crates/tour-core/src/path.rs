//! Keyframed camera path and the pure interpolator that samples it.
//!
//! A path is a fixed, ordered list of keyframes anchored to normalized scroll
//! progress. Sampling it clamps progress into `[0, 1]`, finds the enclosing
//! segment and lerps position and look-at target independently. The view
//! orientation is never interpolated directly; `Camera::apply_pose` derives it
//! from the two interpolated points.

use crate::error::ConfigError;
use glam::Vec3;

/// An authored camera pose anchored to a progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub position: Vec3,
    pub look_at: Vec3,
    pub t: f32,
}

impl Keyframe {
    pub const fn new(position: Vec3, look_at: Vec3, t: f32) -> Self {
        Self {
            position,
            look_at,
            t,
        }
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
        }
    }
}

/// Camera position plus look-at target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

/// Where a progress value falls on the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSample {
    pub segment: usize,
    /// Local parameter within the segment, in `[0, 1]`.
    pub u: f32,
}

/// Validated, immutable keyframe sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPath {
    keyframes: Vec<Keyframe>,
}

impl CameraPath {
    /// Validate and wrap a keyframe list.
    ///
    /// Requires at least two keyframes, finite values and `t` strictly
    /// increasing inside `[0, 1]`. Progress before the first or after the
    /// last `t` holds the end pose.
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self, ConfigError> {
        if keyframes.len() < 2 {
            return Err(ConfigError::TooFewKeyframes(keyframes.len()));
        }
        for (index, k) in keyframes.iter().enumerate() {
            if !(k.position.is_finite() && k.look_at.is_finite() && k.t.is_finite()) {
                return Err(ConfigError::NonFiniteKeyframe { index });
            }
            if !(0.0..=1.0).contains(&k.t) {
                return Err(ConfigError::KeyframeOutOfRange { index, t: k.t });
            }
        }
        for (i, pair) in keyframes.windows(2).enumerate() {
            let (prev, next) = (pair[0].t, pair[1].t);
            if next == prev {
                return Err(ConfigError::DuplicateT {
                    index: i + 1,
                    t: next,
                });
            }
            if next < prev {
                return Err(ConfigError::NonMonotonic {
                    index: i + 1,
                    t: next,
                    previous: prev,
                });
            }
        }
        Ok(Self { keyframes })
    }

    /// Like [`CameraPath::new`], but the path must also span the whole tour:
    /// first `t` exactly 0, last exactly 1.
    pub fn anchored(keyframes: Vec<Keyframe>) -> Result<Self, ConfigError> {
        let path = Self::new(keyframes)?;
        let first = path.keyframes[0].t;
        let last = path.keyframes[path.keyframes.len() - 1].t;
        if first != 0.0 || last != 1.0 {
            return Err(ConfigError::UnanchoredEnds { first, last });
        }
        Ok(path)
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false for a validated path; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.keyframes.len() - 1
    }

    pub fn start_pose(&self) -> CameraPose {
        self.keyframes[0].pose()
    }

    pub fn end_pose(&self) -> CameraPose {
        self.keyframes[self.keyframes.len() - 1].pose()
    }

    /// Find the segment enclosing `progress` and the local parameter within it.
    pub fn locate(&self, progress: f32) -> SegmentSample {
        let p = clamp_progress(progress);
        let last_segment = self.segment_count() - 1;
        let segment = self
            .keyframes
            .partition_point(|k| k.t <= p)
            .saturating_sub(1)
            .min(last_segment);
        let a = self.keyframes[segment].t;
        let b = self.keyframes[segment + 1].t;
        let span = b - a;
        // Zero-length segments snap straight to their end.
        let u = if span > 0.0 {
            ((p - a) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        SegmentSample { segment, u }
    }

    /// Sample the path at `progress`.
    pub fn interpolate(&self, progress: f32) -> CameraPose {
        let SegmentSample { segment, u } = self.locate(progress);
        let a = &self.keyframes[segment];
        let b = &self.keyframes[segment + 1];
        if u <= 0.0 {
            return a.pose();
        }
        if u >= 1.0 {
            return b.pose();
        }
        CameraPose {
            position: lerp(a.position, b.position, u),
            look_at: lerp(a.look_at, b.look_at, u),
        }
    }
}

/// Free-function form of [`CameraPath::interpolate`].
#[inline]
pub fn interpolate(path: &CameraPath, progress: f32) -> CameraPose {
    path.interpolate(progress)
}

#[inline]
pub fn lerp(a: Vec3, b: Vec3, u: f32) -> Vec3 {
    a + (b - a) * u
}

/// Clamp into `[0, 1]`; NaN maps to the start of the tour.
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
