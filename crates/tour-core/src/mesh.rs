//! Tessellation of scene geometry into GPU-ready triangle lists.
//!
//! The scene is static, so the renderer bakes every mesh into a single
//! world-space vertex/index buffer once at startup.

use crate::scene::{Geometry, Material, SceneGraph};
use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub emissive: f32,
    pub specular: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            color: [1.0; 3],
            emissive: 0.0,
            specular: 0.0,
        });
        index
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Append `other` transformed by `transform` and painted with `material`.
    pub fn append(&mut self, other: &MeshData, transform: Mat4, material: &Material) {
        let base = self.vertices.len() as u32;
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        self.vertices.extend(other.vertices.iter().map(|v| Vertex {
            position: transform
                .transform_point3(Vec3::from(v.position))
                .to_array(),
            normal: (normal_matrix * Vec3::from(v.normal))
                .normalize_or_zero()
                .to_array(),
            color: material.color.0,
            emissive: material.emissive,
            specular: material.specular,
        }));
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }
}

/// Local-space triangles for one geometry primitive.
pub fn tessellate(geometry: &Geometry) -> MeshData {
    match *geometry {
        Geometry::Plane { width, height } => plane(width, height),
        Geometry::Box {
            width,
            height,
            depth,
        } => cuboid(Vec3::new(width, height, depth) * 0.5),
        Geometry::Cylinder {
            radius_top,
            radius_bottom,
            height,
            segments,
        } => frustum(radius_top, radius_bottom, height, segments, true),
        Geometry::Cone {
            radius,
            height,
            segments,
        } => frustum(0.0, radius, height, segments, false),
    }
}

/// Bake every mesh of the scene into one world-space buffer.
pub fn bake_scene(scene: &SceneGraph) -> MeshData {
    let mut out = MeshData::default();
    for (world, geometry, material) in scene.meshes() {
        out.append(&tessellate(geometry), world, material);
    }
    out
}

fn plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut m = MeshData::default();
    let a = m.push(Vec3::new(-hw, -hh, 0.0), Vec3::Z);
    let b = m.push(Vec3::new(hw, -hh, 0.0), Vec3::Z);
    let c = m.push(Vec3::new(hw, hh, 0.0), Vec3::Z);
    let d = m.push(Vec3::new(-hw, hh, 0.0), Vec3::Z);
    m.quad(a, b, c, d);
    m
}

fn cuboid(half: Vec3) -> MeshData {
    let mut m = MeshData::default();
    // (normal, tangent u, tangent v); u x v == normal keeps faces counter-clockwise
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let center = n * half;
        let du = u * half;
        let dv = v * half;
        let a = m.push(center - du - dv, n);
        let b = m.push(center + du - dv, n);
        let c = m.push(center + du + dv, n);
        let d = m.push(center - du + dv, n);
        m.quad(a, b, c, d);
    }
    m
}

fn frustum(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    top_cap: bool,
) -> MeshData {
    let segments = segments.max(3);
    let hh = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    let mut m = MeshData::default();

    let ring = |i: u32| {
        let theta = i as f32 / segments as f32 * TAU;
        (theta.cos(), theta.sin())
    };

    // side
    let side_start = m.vertices.len() as u32;
    for i in 0..=segments {
        let (c, s) = ring(i);
        let normal = Vec3::new(c, slope, s).normalize();
        m.push(Vec3::new(radius_bottom * c, -hh, radius_bottom * s), normal);
        m.push(Vec3::new(radius_top * c, hh, radius_top * s), normal);
    }
    for i in 0..segments {
        let b0 = side_start + i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        m.quad(b0, t0, t1, b1);
    }

    // caps
    let cap = |m: &mut MeshData, y: f32, radius: f32, normal: Vec3| {
        let center = m.push(Vec3::new(0.0, y, 0.0), normal);
        let rim = m.vertices.len() as u32;
        for i in 0..segments {
            let (c, s) = ring(i);
            m.push(Vec3::new(radius * c, y, radius * s), normal);
        }
        for i in 0..segments {
            let a = rim + i;
            let b = rim + (i + 1) % segments;
            if normal.y > 0.0 {
                m.indices.extend_from_slice(&[center, b, a]);
            } else {
                m.indices.extend_from_slice(&[center, a, b]);
            }
        }
    };
    cap(&mut m, -hh, radius_bottom, Vec3::NEG_Y);
    if top_cap {
        cap(&mut m, hh, radius_top, Vec3::Y);
    }
    m
}
