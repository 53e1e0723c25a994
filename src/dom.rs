use crate::constants::{FOV_ATTR, SCRUB_TAU_ATTR};
use tour_core::error::ConfigError;
use tour_core::scroll::ScrollMetrics;
use tour_core::viewport::Viewport;
use tour_core::TourConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// An event listener that detaches itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut() + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// CSS size of the canvas and the device pixel ratio.
pub fn viewport(window: &web::Window, canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(rect.width(), rect.height(), window.device_pixel_ratio())
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    if !viewport.is_valid() {
        return;
    }
    let (w, h) = viewport.framebuffer_size();
    canvas.set_width(w);
    canvas.set_height(h);
}

/// Current document scroll position, or `None` while layout is unavailable.
///
/// The viewport height is the root element's client height, which excludes a
/// horizontal scrollbar, so the maximum scroll matches the browser's.
pub fn scroll_metrics(window: &web::Window) -> Option<ScrollMetrics> {
    let root = window.document()?.document_element()?;
    Some(ScrollMetrics {
        scroll_top: window.scroll_y().ok()?,
        scroll_height: root.scroll_height() as f64,
        viewport_height: root.client_height() as f64,
    })
}

/// Defaults overridden by `data-*` attributes on the canvas.
pub fn read_config(canvas: &web::HtmlCanvasElement) -> Result<TourConfig, ConfigError> {
    let mut config = TourConfig::default();
    if let Some(tau) = parse_attr(canvas, SCRUB_TAU_ATTR, "scrub_tau_sec")? {
        config.scrub_tau_sec = tau;
    }
    if let Some(fov) = parse_attr(canvas, FOV_ATTR, "fov_y_degrees")? {
        config.fov_y_degrees = fov;
    }
    config.validate()?;
    Ok(config)
}

fn parse_attr(
    canvas: &web::HtmlCanvasElement,
    attr: &str,
    name: &'static str,
) -> Result<Option<f32>, ConfigError> {
    let Some(raw) = canvas.get_attribute(attr) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f32>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidSetting {
            name,
            reason: format!("{attr}=\"{raw}\": {e}"),
        })
}
