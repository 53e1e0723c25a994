use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tour_core::camera::Camera;
use tour_core::pose::PoseReader;
use tour_core::viewport::{Viewport, ViewportAdapter};
use tour_core::TourContext;
use tour_render::Renderer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// Everything one animation frame touches.
pub struct FrameContext {
    pub tour: Rc<RefCell<TourContext>>,
    pub poses: PoseReader,
    pub camera: Camera,
    pub viewport: ViewportAdapter,
    pub renderer: Renderer<'static>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Scroll listeners run between frames, so this borrow never contends.
        if let Ok(mut tour) = self.tour.try_borrow_mut() {
            tour.advance(dt);
        }
        if let Some(pose) = self.poses.take_new() {
            self.camera.apply_pose(&pose);
        }

        match self.renderer.render(&self.camera, dt.as_secs_f32()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("[frame] surface lost/outdated; reconfiguring");
                self.renderer.reconfigure();
            }
            Err(e) => log::warn!("[frame] skipped: {e:?}"),
        }
    }

    /// Apply a new canvas size: backing store, projection, then surface.
    pub fn on_resize(&mut self, viewport: Viewport) {
        dom::sync_canvas_backing_size(&self.canvas, &viewport);
        if let Some((w, h)) = self.viewport.resize(viewport, &mut self.camera) {
            self.renderer.resize(w, h);
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running requestAnimationFrame loop.
pub struct FrameLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
    ctx: Rc<RefCell<FrameContext>>,
}

fn request_frame(tick: &Tick, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {e:?}"),
        }
    }
}

pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    let ctx_tick = ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);
    FrameLoop { tick, pending, ctx }
}

impl FrameLoop {
    /// Stop scheduling frames and release the renderer's GPU resources.
    pub fn cancel(self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Dropping the closure breaks its self-reference.
        self.tick.borrow_mut().take();
        match self.ctx.try_borrow_mut() {
            Ok(mut ctx) => ctx.renderer.release(),
            Err(_) => log::warn!("[frame] context busy; renderer released on drop instead"),
        }
        log::info!("[frame] loop stopped");
    }
}
