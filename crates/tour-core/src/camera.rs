//! Render-side camera state shared by the web and native frontends.
//!
//! These types avoid platform-specific APIs. The render loop owns one
//! `Camera`, feeds it the latest interpolated pose each frame and lets the
//! viewport adapter adjust its aspect ratio.

use crate::config::TourConfig;
use crate::constants::MIN_LOOK_DISTANCE_SQ;
use crate::path::CameraPose;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &TourConfig, pose: CameraPose, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: config.fov_y_degrees.to_radians(),
            znear: config.znear,
            zfar: config.zfar,
        };
        camera.set_aspect(aspect);
        camera.apply_pose(&pose);
        camera
    }

    /// Aim the camera from the pose position toward its look-at point.
    ///
    /// Poses that cannot define a view (non-finite, or eye on top of target)
    /// are rejected and the previous orientation is kept. Returns whether the
    /// pose was applied.
    pub fn apply_pose(&mut self, pose: &CameraPose) -> bool {
        if !pose.is_finite() {
            log::warn!("ignoring non-finite camera pose {pose:?}");
            return false;
        }
        if (pose.look_at - pose.position).length_squared() <= MIN_LOOK_DISTANCE_SQ {
            log::warn!("ignoring camera pose with coincident eye and target");
            return false;
        }
        self.eye = pose.position;
        self.target = pose.look_at;
        true
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.eye,
            look_at: self.target,
        }
    }

    /// Update the projection aspect; non-positive or non-finite values are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
