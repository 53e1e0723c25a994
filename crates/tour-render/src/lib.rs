//! Forward renderer for a baked apartment scene.
//!
//! The scene is static: every mesh is flattened into one world-space vertex
//! and index buffer at startup, lights are packed into a fixed-size uniform
//! array, and each frame only rewrites the globals (camera, time).

mod helpers;
mod targets;
mod uniforms;

use targets::DepthTarget;
use tour_core::camera::Camera;
use tour_core::constants::MAX_POINT_LIGHTS;
use tour_core::error::TourError;
use tour_core::mesh::bake_scene;
use tour_core::scene::{AmbientLight, SceneGraph};
use uniforms::{GpuLight, Globals};
use wgpu::util::DeviceExt;

pub struct Renderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    depth: DepthTarget,
    lights: [GpuLight; MAX_POINT_LIGHTS],
    light_count: usize,
    ambient: AmbientLight,
    clear_color: wgpu::Color,
    time_accum: f32,
    released: bool,
}

impl<'a> Renderer<'a> {
    /// Acquire adapter and device for `surface` and upload `scene`.
    ///
    /// Failure to obtain any of the GPU resources is a
    /// [`TourError::ResourceAcquisition`]; there is no fallback path.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'a>,
        width: u32,
        height: u32,
        scene: &SceneGraph,
        clear_color: [f32; 3],
    ) -> Result<Self, TourError> {
        let (width, height) = (width.max(1), height.max(1));
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| TourError::ResourceAcquisition("no compatible GPU adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("tour_device"),
                    required_features: wgpu::Features::empty(),
                    // Downlevel limits keep WebGL2-class browsers working.
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| TourError::ResourceAcquisition(format!("request_device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps)
            .ok_or_else(|| TourError::ResourceAcquisition("surface reports no formats".into()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(tour_core::SCENE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            uniforms::vertex_layout(),
            format,
        );
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let mesh = bake_scene(scene);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mut lights = [GpuLight::default(); MAX_POINT_LIGHTS];
        let mut light_count = 0;
        for (position, light) in scene.point_lights() {
            if light_count == MAX_POINT_LIGHTS {
                log::warn!("[render] more than {MAX_POINT_LIGHTS} point lights; extras ignored");
                break;
            }
            lights[light_count] = GpuLight::new(position, light);
            light_count += 1;
        }
        let ambient = scene.ambient().unwrap_or(AmbientLight {
            color: tour_core::scene::Color::WHITE,
            intensity: 0.0,
        });

        let depth = DepthTarget::new(&device, width, height);
        log::info!(
            "[render] ready {}x{} format={:?} vertices={} triangles={} lights={}",
            width,
            height,
            format,
            mesh.vertices.len(),
            mesh.triangle_count(),
            light_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            globals_bind_group,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            depth,
            lights,
            light_count,
            ambient,
            clear_color: wgpu::Color {
                r: clear_color[0] as f64,
                g: clear_color[1] as f64,
                b: clear_color[2] as f64,
                a: 1.0,
            },
            time_accum: 0.0,
            released: false,
        })
    }

    /// Reconfigure the surface and depth target for a new framebuffer size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.released || width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, width, height);
        log::info!("[render] surface reconfigured to {width}x{height}");
    }

    /// Re-apply the current configuration after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        if !self.released {
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Draw one frame from `camera`. `dt` advances the shader clock.
    pub fn render(&mut self, camera: &Camera, dt: f32) -> Result<(), wgpu::SurfaceError> {
        if self.released {
            return Ok(());
        }
        if dt.is_finite() && dt > 0.0 {
            self.time_accum += dt;
        }
        let globals = Globals::new(
            camera,
            self.time_accum,
            self.ambient,
            &self.lights,
            self.light_count,
        );
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if self.index_count > 0 {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Free GPU buffers and textures. Later calls, and later frames, do
    /// nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.globals_buffer.destroy();
        self.depth.tex.destroy();
        log::info!("[render] GPU resources released");
    }
}

impl Drop for Renderer<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
