#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use tour_core::camera::Camera;
use tour_core::error::TourError;
use tour_core::pose::pose_slot;
use tour_core::scene::build_scene;
use tour_core::viewport::ViewportAdapter;
use tour_core::{Lifecycle, Tour, TourContext};
use tour_render::Renderer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod overlay;

/// One running walkthrough. Dropped (and torn down) by [`teardown`].
struct App {
    lifecycle: Lifecycle,
    tour: Rc<RefCell<TourContext>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-web starting");

    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("tour-web already started");
        return Ok(());
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Scroll progress in [0, 1] as last published.
#[wasm_bindgen]
pub fn tour_progress() -> f32 {
    APP.with(|app| {
        app.borrow()
            .as_ref()
            .and_then(|a| a.tour.try_borrow().ok().map(|t| t.state().progress))
            .unwrap_or(0.0)
    })
}

/// Label of the room the camera is in, or an empty string before start.
#[wasm_bindgen]
pub fn tour_room() -> String {
    APP.with(|app| {
        app.borrow()
            .as_ref()
            .and_then(|a| a.tour.try_borrow().ok().map(|t| t.room_label().to_string()))
            .unwrap_or_default()
    })
}

/// Stop the frame loop, detach listeners and free GPU resources. Safe to call
/// more than once.
#[wasm_bindgen]
pub fn teardown() {
    let app = APP.with(|app| app.borrow_mut().take());
    match app {
        Some(mut app) => {
            app.lifecycle.teardown();
        }
        None => log::debug!("teardown: nothing running"),
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = dom::read_config(&canvas)?;
    let tour = Tour::apartment()?;
    let scene = build_scene(&tour.rooms, config.ambient_light());

    let viewport = dom::viewport(&window, &canvas);
    dom::sync_canvas_backing_size(&canvas, &viewport);
    let (width, height) = viewport.framebuffer_size();

    let instance = wgpu::Instance::default();
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| TourError::ResourceAcquisition(format!("create_surface: {e}")))?;
    let renderer =
        Renderer::new(&instance, surface, width, height, &scene, config.clear_color).await?;

    let (writer, reader) = pose_slot(tour.path.start_pose());
    let mut context = TourContext::new(tour.path, tour.labels, &config, writer);
    context.subscribe(Box::new(overlay::DomOverlay::new(&document)));
    // Start where the page already is (reload mid-scroll) without scrubbing.
    let initial = dom::scroll_metrics(&window)
        .and_then(|m| m.progress())
        .unwrap_or(0.0);
    context.jump_to(initial);
    let camera = Camera::new(&config, reader.latest(), viewport.aspect());
    let tour = Rc::new(RefCell::new(context));

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        tour: tour.clone(),
        poses: reader,
        camera,
        viewport: ViewportAdapter::new(viewport),
        renderer,
        canvas: canvas.clone(),
        last_instant: Instant::now(),
    }));

    let mut lifecycle = Lifecycle::new();
    let js_err = |e: JsValue| anyhow::anyhow!(format!("{:?}", e));
    let scroll = events::wire_scroll(&window, tour.clone()).map_err(js_err)?;
    lifecycle.register("scroll listener", move || drop(scroll));
    let resize = events::wire_resize(&window, frame_ctx.clone()).map_err(js_err)?;
    lifecycle.register("resize listener", move || drop(resize));
    let frame_loop = frame::start_loop(frame_ctx);
    lifecycle.register("frame loop", move || frame_loop.cancel());
    let pagehide = events::wire_pagehide(&window).map_err(js_err)?;
    lifecycle.register("pagehide listener", move || drop(pagehide));

    log::info!(
        "[init] tour ready: {}x{} progress={:.3} subscriptions={}",
        width,
        height,
        initial,
        lifecycle.active()
    );
    APP.with(|app| *app.borrow_mut() = Some(App { lifecycle, tour }));
    Ok(())
}
