use glam::Vec3;
use tour_core::camera::Camera;
use tour_core::constants::MAX_POINT_LIGHTS;
use tour_core::mesh::Vertex;
use tour_core::scene::{AmbientLight, PointLight};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GpuLight {
    position_range: [f32; 4],
    color_intensity: [f32; 4],
}

impl GpuLight {
    pub(crate) fn new(position: Vec3, light: &PointLight) -> Self {
        Self {
            position_range: [position.x, position.y, position.z, light.range],
            color_intensity: [
                light.color.0[0],
                light.color.0[1],
                light.color.0[2],
                light.intensity,
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_time: [f32; 4],
    ambient_count: [f32; 4],
    lights: [GpuLight; MAX_POINT_LIGHTS],
}

impl Globals {
    pub(crate) fn new(
        camera: &Camera,
        time: f32,
        ambient: AmbientLight,
        lights: &[GpuLight; MAX_POINT_LIGHTS],
        light_count: usize,
    ) -> Self {
        let a = ambient.color.0;
        let k = ambient.intensity;
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_time: [camera.eye.x, camera.eye.y, camera.eye.z, time],
            ambient_count: [a[0] * k, a[1] * k, a[2] * k, light_count as f32],
            lights: *lights,
        }
    }
}

pub(crate) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x3,
        3 => Float32,
        4 => Float32,
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}
