//! Declarative room/furniture descriptors and the scene graph built from them.
//!
//! Construction is a pure transform: the same descriptor tables always produce
//! a structurally identical [`SceneGraph`]. Nodes live in an arena indexed by
//! [`NodeId`]; every room is a transform group under the `world` root.

use crate::constants::*;
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::FRAC_PI_2;

/// Linear RGB colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0]);

    /// Decode `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Color([
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ])
    }

    pub fn lighten(self, amount: f32) -> Self {
        let [r, g, b] = self.0;
        let a = amount.clamp(0.0, 1.0);
        Color([r + (1.0 - r) * a, g + (1.0 - g) * a, b + (1.0 - b) * a])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FurnitureKind {
    Box,
    Lamp,
    Mirror,
}

/// One piece of furniture, owned by exactly one room.
///
/// `local_position` is the base centre in room space. For `Box` and `Mirror`
/// `dimensions` is width/height/depth; for `Lamp` it is shade radius, total
/// height, and unused.
#[derive(Clone, Debug, PartialEq)]
pub struct FurnitureDescriptor {
    pub kind: FurnitureKind,
    pub dimensions: Vec3,
    pub color: Color,
    pub local_position: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointLightDescriptor {
    pub local_position: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

/// Declarative room. Local space: floor centred on the origin, back wall at
/// `-depth / 2`, open side at `+depth / 2`. `yaw` turns the room about +Y so
/// its open side can face the corridor.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomDescriptor {
    pub name: String,
    pub origin: Vec3,
    pub yaw: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub wall_color: Color,
    pub floor_color: Color,
    pub lights: Vec<PointLightDescriptor>,
    pub furniture: Vec<FurnitureDescriptor>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// Quad in the local XY plane facing +Z, centred on the origin.
    Plane { width: f32, height: f32 },
    /// Axis-aligned box centred on the origin.
    Box { width: f32, height: f32, depth: f32 },
    /// Frustum along +Y centred on the origin.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    /// Cone along +Y centred on the origin, apex up.
    Cone {
        radius: f32,
        height: f32,
        segments: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: f32,
    pub specular: f32,
}

impl Material {
    pub const fn matte(color: Color) -> Self {
        Self {
            color,
            emissive: 0.0,
            specular: SURFACE_SPECULAR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh {
        geometry: Geometry,
        material: Material,
    },
    PointLight(PointLight),
    AmbientLight(AmbientLight),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 8]>,
    pub transform: Transform,
    pub kind: NodeKind,
}

/// Arena-backed transform tree rooted at `world`.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    by_name: FnvHashMap<String, NodeId>,
}

impl SceneGraph {
    pub const ROOT: NodeId = NodeId(0);

    fn new() -> Self {
        let root = Node {
            name: "world".to_string(),
            parent: None,
            children: SmallVec::new(),
            transform: Transform::IDENTITY,
            kind: NodeKind::Group,
        };
        let mut by_name = FnvHashMap::default();
        by_name.insert(root.name.clone(), Self::ROOT);
        Self {
            nodes: vec![root],
            by_name,
        }
    }

    fn add(
        &mut self,
        parent: NodeId,
        name: String,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(previous) = self.by_name.insert(name.clone(), id) {
            log::warn!("[scene] node name '{name}' reused; find() now skips {previous:?}");
        }
        self.nodes.push(Node {
            name,
            parent: Some(parent),
            children: SmallVec::new(),
            transform,
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Look up a node by its path-like name, e.g. `"Kitchen/floor"`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    /// Compose local transforms from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = self.nodes.get(id.0);
        while let Some(node) = cursor {
            matrix = node.transform.matrix() * matrix;
            cursor = node.parent.and_then(|p| self.nodes.get(p.0));
        }
        matrix
    }

    /// Room groups in construction order.
    pub fn rooms(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children(Self::ROOT)
            .iter()
            .copied()
            .filter(move |id| matches!(self.nodes[id.0].kind, NodeKind::Group))
    }

    /// Every mesh with its world matrix, in node order.
    pub fn meshes(&self) -> impl Iterator<Item = (Mat4, &Geometry, &Material)> + '_ {
        self.nodes().filter_map(move |(id, node)| match &node.kind {
            NodeKind::Mesh { geometry, material } => {
                Some((self.world_matrix(id), geometry, material))
            }
            _ => None,
        })
    }

    /// Every point light with its world position, in node order.
    pub fn point_lights(&self) -> impl Iterator<Item = (Vec3, &PointLight)> + '_ {
        self.nodes().filter_map(move |(id, node)| match &node.kind {
            NodeKind::PointLight(light) => {
                Some((self.world_matrix(id).transform_point3(Vec3::ZERO), light))
            }
            _ => None,
        })
    }

    pub fn ambient(&self) -> Option<AmbientLight> {
        self.nodes.iter().find_map(|n| match n.kind {
            NodeKind::AmbientLight(a) => Some(a),
            _ => None,
        })
    }
}

/// Builds a [`SceneGraph`] from room descriptors.
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    ambient: Option<AmbientLight>,
    rooms: Vec<RoomDescriptor>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = Some(ambient);
        self
    }

    pub fn room(mut self, room: RoomDescriptor) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn rooms(mut self, rooms: impl IntoIterator<Item = RoomDescriptor>) -> Self {
        self.rooms.extend(rooms);
        self
    }

    pub fn build(self) -> SceneGraph {
        let mut graph = SceneGraph::new();
        if let Some(ambient) = self.ambient {
            graph.add(
                SceneGraph::ROOT,
                "ambient".to_string(),
                Transform::IDENTITY,
                NodeKind::AmbientLight(ambient),
            );
        }
        for room in &self.rooms {
            add_room(&mut graph, room);
        }
        log::info!(
            "[scene] rooms={} nodes={} meshes={} lights={}",
            self.rooms.len(),
            graph.len(),
            graph.meshes().count(),
            graph.point_lights().count()
        );
        graph
    }
}

/// Convenience wrapper around [`SceneBuilder`].
pub fn build_scene(rooms: &[RoomDescriptor], ambient: AmbientLight) -> SceneGraph {
    SceneBuilder::new()
        .ambient(ambient)
        .rooms(rooms.iter().cloned())
        .build()
}

fn add_room(graph: &mut SceneGraph, room: &RoomDescriptor) -> NodeId {
    let group = graph.add(
        SceneGraph::ROOT,
        room.name.clone(),
        Transform::from_translation_rotation(room.origin, Quat::from_rotation_y(room.yaw)),
        NodeKind::Group,
    );
    let (w, d, h) = (room.width, room.depth, room.height);
    let wall = Material::matte(room.wall_color);
    let floor = Material::matte(room.floor_color);
    let mesh = |graph: &mut SceneGraph,
                part: &str,
                transform: Transform,
                geometry: Geometry,
                material: Material| {
        graph.add(
            group,
            format!("{}/{}", room.name, part),
            transform,
            NodeKind::Mesh { geometry, material },
        )
    };

    mesh(
        graph,
        "floor",
        Transform::from_translation_rotation(Vec3::ZERO, Quat::from_rotation_x(-FRAC_PI_2)),
        Geometry::Plane {
            width: w,
            height: d,
        },
        floor,
    );
    mesh(
        graph,
        "ceiling",
        Transform::from_translation_rotation(
            Vec3::new(0.0, h, 0.0),
            Quat::from_rotation_x(FRAC_PI_2),
        ),
        Geometry::Plane {
            width: w,
            height: d,
        },
        wall,
    );
    mesh(
        graph,
        "wall-back",
        Transform::from_translation(Vec3::new(0.0, h * 0.5, -d * 0.5)),
        Geometry::Plane {
            width: w,
            height: h,
        },
        wall,
    );
    mesh(
        graph,
        "wall-left",
        Transform::from_translation_rotation(
            Vec3::new(-w * 0.5, h * 0.5, 0.0),
            Quat::from_rotation_y(FRAC_PI_2),
        ),
        Geometry::Plane {
            width: d,
            height: h,
        },
        wall,
    );
    mesh(
        graph,
        "wall-right",
        Transform::from_translation_rotation(
            Vec3::new(w * 0.5, h * 0.5, 0.0),
            Quat::from_rotation_y(-FRAC_PI_2),
        ),
        Geometry::Plane {
            width: d,
            height: h,
        },
        wall,
    );
    mesh(
        graph,
        "baseboard",
        Transform::from_translation(Vec3::new(
            0.0,
            BASEBOARD_HEIGHT * 0.5,
            -d * 0.5 + BASEBOARD_DEPTH * 0.5,
        )),
        Geometry::Box {
            width: w,
            height: BASEBOARD_HEIGHT,
            depth: BASEBOARD_DEPTH,
        },
        Material::matte(room.wall_color.lighten(0.5)),
    );

    for (i, light) in room.lights.iter().enumerate() {
        graph.add(
            group,
            format!("{}/light-{}", room.name, i),
            Transform::from_translation(light.local_position),
            NodeKind::PointLight(PointLight {
                color: light.color,
                intensity: light.intensity,
                range: light.range,
            }),
        );
    }

    for (i, item) in room.furniture.iter().enumerate() {
        let name = format!("{}/furniture-{}", room.name, i);
        add_furniture(graph, group, name, item);
    }
    group
}

fn add_furniture(graph: &mut SceneGraph, room: NodeId, name: String, item: &FurnitureDescriptor) {
    let size = item.dimensions;
    match item.kind {
        FurnitureKind::Box => {
            graph.add(
                room,
                name,
                Transform::from_translation(
                    item.local_position + Vec3::new(0.0, size.y * 0.5, 0.0),
                ),
                NodeKind::Mesh {
                    geometry: Geometry::Box {
                        width: size.x,
                        height: size.y,
                        depth: size.z,
                    },
                    material: Material::matte(item.color),
                },
            );
        }
        FurnitureKind::Mirror => {
            graph.add(
                room,
                name,
                Transform::from_translation(
                    item.local_position + Vec3::new(0.0, size.y * 0.5, 0.0),
                ),
                NodeKind::Mesh {
                    geometry: Geometry::Box {
                        width: size.x,
                        height: size.y,
                        depth: size.z,
                    },
                    material: Material {
                        color: item.color,
                        emissive: 0.0,
                        specular: MIRROR_SPECULAR,
                    },
                },
            );
        }
        FurnitureKind::Lamp => {
            let lamp = graph.add(
                room,
                name.clone(),
                Transform::from_translation(item.local_position),
                NodeKind::Group,
            );
            let (shade_radius, total) = (size.x, size.y);
            let shade_height = total * LAMP_SHADE_FRACTION;
            let pole_height = (total - shade_height - LAMP_BASE_HEIGHT).max(0.0);
            let body = Material::matte(item.color);
            graph.add(
                lamp,
                format!("{name}/base"),
                Transform::from_translation(Vec3::new(0.0, LAMP_BASE_HEIGHT * 0.5, 0.0)),
                NodeKind::Mesh {
                    geometry: Geometry::Cylinder {
                        radius_top: shade_radius * 0.5,
                        radius_bottom: shade_radius * 0.5,
                        height: LAMP_BASE_HEIGHT,
                        segments: CURVE_SEGMENTS,
                    },
                    material: body,
                },
            );
            graph.add(
                lamp,
                format!("{name}/pole"),
                Transform::from_translation(Vec3::new(
                    0.0,
                    LAMP_BASE_HEIGHT + pole_height * 0.5,
                    0.0,
                )),
                NodeKind::Mesh {
                    geometry: Geometry::Cylinder {
                        radius_top: LAMP_POLE_RADIUS,
                        radius_bottom: LAMP_POLE_RADIUS,
                        height: pole_height,
                        segments: CURVE_SEGMENTS,
                    },
                    material: body,
                },
            );
            graph.add(
                lamp,
                format!("{name}/shade"),
                Transform::from_translation(Vec3::new(
                    0.0,
                    total - shade_height * 0.5,
                    0.0,
                )),
                NodeKind::Mesh {
                    geometry: Geometry::Cone {
                        radius: shade_radius,
                        height: shade_height,
                        segments: CURVE_SEGMENTS,
                    },
                    material: Material {
                        color: item.color.lighten(0.6),
                        emissive: LAMP_SHADE_EMISSIVE,
                        specular: SURFACE_SPECULAR,
                    },
                },
            );
        }
    }
}
