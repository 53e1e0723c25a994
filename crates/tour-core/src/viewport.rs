use crate::camera::Camera;

/// Output size in CSS (logical) pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            pixel_ratio,
        }
    }

    /// A viewport already measured in physical pixels (native windows).
    pub fn physical(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64, 1.0)
    }

    pub fn is_valid(&self) -> bool {
        self.css_width.is_finite()
            && self.css_height.is_finite()
            && self.pixel_ratio.is_finite()
            && self.css_width > 0.0
            && self.css_height > 0.0
            && self.pixel_ratio > 0.0
    }

    /// Width over height. Not finite for a zero-height viewport, which
    /// [`crate::camera::Camera::set_aspect`] ignores.
    pub fn aspect(&self) -> f32 {
        (self.css_width / self.css_height) as f32
    }

    /// Backing-store size in physical pixels, never below 1x1.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let w = (self.css_width * self.pixel_ratio) as u32;
        let h = (self.css_height * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}

/// Propagates viewport changes into the camera projection.
///
/// Only the aspect ratio is touched; eye, target and scroll progress are left
/// alone.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportAdapter {
    current: Viewport,
}

impl ViewportAdapter {
    pub fn new(initial: Viewport) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Apply `viewport` to `camera`. Returns the new framebuffer size when it
    /// changed; degenerate (zero or non-finite) sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport, camera: &mut Camera) -> Option<(u32, u32)> {
        if !viewport.is_valid() {
            log::debug!("ignoring degenerate viewport {viewport:?}");
            return None;
        }
        camera.set_aspect(viewport.aspect());
        let previous = self.current.framebuffer_size();
        self.current = viewport;
        let size = viewport.framebuffer_size();
        if size != previous {
            log::info!("[viewport] resized to {}x{} (aspect {:.3})", size.0, size.1, camera.aspect);
            Some(size)
        } else {
            None
        }
    }
}
