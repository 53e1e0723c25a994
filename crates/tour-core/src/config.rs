use crate::constants::*;
use crate::error::ConfigError;
use crate::scene::{AmbientLight, Color};

/// Runtime settings for a walkthrough instance.
///
/// The camera path and room tables are data in [`crate::tour`]; this struct
/// only carries the knobs a frontend may want to override.
#[derive(Clone, Debug, PartialEq)]
pub struct TourConfig {
    /// Time constant of the progress scrub; `0` disables smoothing.
    pub scrub_tau_sec: f32,
    pub fov_y_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub clear_color: [f32; 3],
    /// Height of the page the native viewer pretends to scroll.
    pub virtual_page_height: f64,
    /// Pixels moved per wheel line on the native viewer.
    pub wheel_line_px: f64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            scrub_tau_sec: DEFAULT_SCRUB_TAU_SEC,
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            znear: DEFAULT_ZNEAR,
            zfar: DEFAULT_ZFAR,
            ambient_color: Color::WHITE,
            ambient_intensity: DEFAULT_AMBIENT_INTENSITY,
            clear_color: DEFAULT_CLEAR_COLOR,
            virtual_page_height: DEFAULT_VIRTUAL_PAGE_HEIGHT,
            wheel_line_px: DEFAULT_WHEEL_LINE_PX,
        }
    }
}

impl TourConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scrub_tau_sec.is_finite() && self.scrub_tau_sec >= 0.0) {
            return Err(invalid("scrub_tau_sec", "must be a finite value >= 0"));
        }
        if !(self.fov_y_degrees > 1.0 && self.fov_y_degrees < 179.0) {
            return Err(invalid("fov_y_degrees", "must lie in (1, 179)"));
        }
        if !(self.znear > 0.0 && self.zfar > self.znear) {
            return Err(invalid("znear/zfar", "need 0 < znear < zfar"));
        }
        if !(self.ambient_intensity.is_finite() && self.ambient_intensity >= 0.0) {
            return Err(invalid("ambient_intensity", "must be a finite value >= 0"));
        }
        if !(self.virtual_page_height > 0.0 && self.wheel_line_px > 0.0) {
            return Err(invalid("virtual_page_height/wheel_line_px", "must be positive"));
        }
        Ok(())
    }

    pub fn ambient_light(&self) -> AmbientLight {
        AmbientLight {
            color: self.ambient_color,
            intensity: self.ambient_intensity,
        }
    }
}

fn invalid(name: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        name,
        reason: reason.to_string(),
    }
}
