use crate::dom::{self, Listener};
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use tour_core::TourContext;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Feed document scroll position into the tour.
pub fn wire_scroll(
    window: &web::Window,
    tour: Rc<RefCell<TourContext>>,
) -> Result<Listener, JsValue> {
    let w = window.clone();
    Listener::attach(window, "scroll", move || {
        let Some(metrics) = dom::scroll_metrics(&w) else {
            return;
        };
        if let Ok(mut tour) = tour.try_borrow_mut() {
            tour.on_scroll(metrics);
        }
    })
}

/// Re-measure the canvas when the window resizes. Progress and pose are left
/// untouched; only projection and surface follow the new size.
pub fn wire_resize(
    window: &web::Window,
    frame: Rc<RefCell<FrameContext>>,
) -> Result<Listener, JsValue> {
    let w = window.clone();
    Listener::attach(window, "resize", move || {
        let Ok(mut frame) = frame.try_borrow_mut() else {
            return;
        };
        let viewport = dom::viewport(&w, &frame.canvas);
        frame.on_resize(viewport);
    })
}

/// Tear down when the page goes away. Deferred so the listener is not
/// dropped while it is running.
pub fn wire_pagehide(window: &web::Window) -> Result<Listener, JsValue> {
    Listener::attach(window, "pagehide", || {
        wasm_bindgen_futures::spawn_local(async {
            crate::teardown();
        });
    })
}
