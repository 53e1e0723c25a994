use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use winit::event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use tour_core::camera::Camera;
use tour_core::pose::{pose_slot, PoseReader};
use tour_core::scene::build_scene;
use tour_core::scroll::{ScrollObserver, ScrollUpdate, VirtualPage};
use tour_core::viewport::{Viewport, ViewportAdapter};
use tour_core::{Lifecycle, Tour, TourConfig, TourContext};
use tour_render::Renderer;

const WINDOW_TITLE: &str = "Apartment tour";

/// Keeps the window title in step with the current room.
struct TitleObserver {
    window: Arc<Window>,
    room: Option<usize>,
}

impl ScrollObserver for TitleObserver {
    fn on_scroll_update(&mut self, update: &ScrollUpdate, room_label: &str) {
        if self.room != Some(update.room_index) {
            self.room = Some(update.room_index);
            self.window
                .set_title(&format!("{WINDOW_TITLE} · {room_label}"));
        }
    }
}

enum PageMove {
    Lines(f64),
    Pages(f64),
    Start,
    End,
}

fn key_move(key: &Key, shift: bool) -> Option<PageMove> {
    match key {
        Key::Named(NamedKey::ArrowDown) => Some(PageMove::Lines(1.0)),
        Key::Named(NamedKey::ArrowUp) => Some(PageMove::Lines(-1.0)),
        Key::Named(NamedKey::PageDown) => Some(PageMove::Pages(1.0)),
        Key::Named(NamedKey::PageUp) => Some(PageMove::Pages(-1.0)),
        Key::Named(NamedKey::Space) => Some(PageMove::Pages(if shift { -1.0 } else { 1.0 })),
        Key::Named(NamedKey::Home) => Some(PageMove::Start),
        Key::Named(NamedKey::End) => Some(PageMove::End),
        _ => None,
    }
}

struct Viewer {
    window: Arc<Window>,
    config: TourConfig,
    tour: TourContext,
    poses: PoseReader,
    camera: Camera,
    viewport: ViewportAdapter,
    renderer: Rc<RefCell<Renderer<'static>>>,
    page: VirtualPage,
    shift: bool,
    last_frame: Instant,
    lifecycle: Lifecycle,
}

impl Viewer {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let config = TourConfig::default();
        config.validate()?;
        let tour = Tour::apartment()?;
        let scene = build_scene(&tour.rooms, config.ambient_light());

        let viewport = window_viewport(&window);
        let (width, height) = viewport.framebuffer_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;
        let renderer =
            Renderer::new(&instance, surface, width, height, &scene, config.clear_color).await?;
        let renderer = Rc::new(RefCell::new(renderer));

        let (writer, poses) = pose_slot(tour.path.start_pose());
        let mut context = TourContext::new(tour.path, tour.labels, &config, writer);
        context.subscribe(Box::new(TitleObserver {
            window: window.clone(),
            room: None,
        }));
        context.jump_to(0.0);
        let camera = Camera::new(&config, poses.latest(), viewport.aspect());

        let mut lifecycle = Lifecycle::new();
        let release = renderer.clone();
        lifecycle.register("renderer", move || release.borrow_mut().release());

        Ok(Self {
            page: VirtualPage::new(config.virtual_page_height, viewport.css_height),
            window,
            config,
            tour: context,
            poses,
            camera,
            viewport: ViewportAdapter::new(viewport),
            renderer,
            shift: false,
            last_frame: Instant::now(),
            lifecycle,
        })
    }

    fn scrolled(&mut self) {
        self.tour.on_scroll(self.page.metrics());
    }

    fn on_wheel(&mut self, delta: MouseScrollDelta) {
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, y) => -(y as f64) * self.config.wheel_line_px,
            MouseScrollDelta::PixelDelta(pos) => -pos.y / self.window.scale_factor(),
        };
        self.page.scroll_by(dy);
        self.scrolled();
    }

    fn on_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let Some(movement) = key_move(&event.logical_key, self.shift) else {
            return;
        };
        match movement {
            PageMove::Lines(n) => self.page.scroll_by(n * self.config.wheel_line_px),
            PageMove::Pages(n) => self.page.page_by(n),
            PageMove::Start => self.page.scroll_to_start(),
            PageMove::End => self.page.scroll_to_end(),
        }
        self.scrolled();
    }

    fn on_resize(&mut self) {
        let viewport = window_viewport(&self.window);
        self.page.set_viewport_height(viewport.css_height);
        self.scrolled();
        if let Some((w, h)) = self.viewport.resize(viewport, &mut self.camera) {
            self.renderer.borrow_mut().resize(w, h);
        }
    }

    /// Returns false when rendering can no longer continue.
    fn frame(&mut self) -> bool {
        if self.lifecycle.is_torn_down() {
            return true;
        }
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.tour.advance(dt);
        if let Some(pose) = self.poses.take_new() {
            self.camera.apply_pose(&pose);
        }
        let mut renderer = self.renderer.borrow_mut();
        match renderer.render(&self.camera, dt.as_secs_f32()) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[frame] out of GPU memory");
                false
            }
            Err(e) => {
                log::warn!("[frame] skipped: {e:?}");
                true
            }
        }
    }
}

fn window_viewport(window: &Window) -> Viewport {
    let scale = window.scale_factor();
    let size = window.inner_size().to_logical::<f64>(scale);
    Viewport::new(size.width, size.height, scale)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .build(&event_loop)?,
    );
    let mut viewer = pollster::block_on(Viewer::new(window))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => viewer.on_resize(),
            WindowEvent::MouseWheel { delta, .. } => viewer.on_wheel(delta),
            WindowEvent::ModifiersChanged(mods) => viewer.shift = mods.state().shift_key(),
            WindowEvent::KeyboardInput { event, .. } => viewer.on_key(&event),
            WindowEvent::CloseRequested => {
                viewer.lifecycle.teardown();
                elwt.exit();
            }
            _ => {}
        },
        Event::AboutToWait => {
            if viewer.frame() {
                viewer.window.request_redraw();
            } else {
                viewer.lifecycle.teardown();
                elwt.exit();
            }
        }
        _ => {}
    })?;
    Ok(())
}
