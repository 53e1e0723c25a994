// Host-side tests for the declarative scene builder and mesh baking.

use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use tour_core::constants::{CURVE_SEGMENTS, MIRROR_SPECULAR};
use tour_core::mesh::{bake_scene, tessellate, MeshData};
use tour_core::scene::{
    build_scene, AmbientLight, Color, FurnitureDescriptor, FurnitureKind, Geometry, Material,
    NodeKind, RoomDescriptor, SceneBuilder, SceneGraph,
};
use tour_core::tour::apartment_rooms;
use tour_core::TourConfig;

fn apartment() -> SceneGraph {
    build_scene(&apartment_rooms(), TourConfig::default().ambient_light())
}

fn world_position(scene: &SceneGraph, name: &str) -> Vec3 {
    let id = scene
        .find(name)
        .unwrap_or_else(|| panic!("missing node {name}"));
    scene.world_matrix(id).transform_point3(Vec3::ZERO)
}

fn placed_at(scene: &SceneGraph, name: &str, expected: [f32; 3]) -> bool {
    world_position(scene, name).abs_diff_eq(Vec3::from(expected), 1e-5)
}

fn hall() -> SceneGraph {
    build_scene(
        &[bare_room("Hall", Vec3::ZERO)],
        TourConfig::default().ambient_light(),
    )
}

fn bare_room(name: &str, origin: Vec3) -> RoomDescriptor {
    RoomDescriptor {
        name: name.to_string(),
        origin,
        yaw: 0.0,
        width: 4.0,
        depth: 6.0,
        height: 2.5,
        wall_color: Color::WHITE,
        floor_color: Color::from_hex(0x808080),
        lights: Vec::new(),
        furniture: Vec::new(),
    }
}

#[test]
fn same_descriptors_build_identical_graphs() {
    assert_eq!(apartment(), apartment());
}

#[test]
fn apartment_node_counts() {
    let scene = apartment();
    // root + ambient + rooms (group, 6 shell meshes, lights, furniture nodes)
    assert_eq!(scene.len(), 60);
    assert_eq!(scene.rooms().count(), 4);
    assert_eq!(scene.meshes().count(), 47);
    assert_eq!(scene.point_lights().count(), 4);
    assert!(scene.ambient().is_some());
}

#[test]
fn room_shell_has_no_front_wall() {
    let scene = hall();
    let room = scene.find("Hall").unwrap();
    let names: Vec<&str> = scene
        .children(room)
        .iter()
        .map(|id| scene.node(*id).unwrap().name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "Hall/floor",
            "Hall/ceiling",
            "Hall/wall-back",
            "Hall/wall-left",
            "Hall/wall-right",
            "Hall/baseboard",
        ]
    );
}

#[test]
fn rooms_are_offset_by_origin() {
    let scene = apartment();
    assert!(placed_at(&scene, "Kitchen/wall-back", [-11.0, 1.5, -4.0]));
    assert!(placed_at(&scene, "Bedroom/floor", [11.0, 0.0, 0.0]));
    assert!(placed_at(&scene, "Bathroom/ceiling", [21.0, 2.8, 0.0]));
}

#[test]
fn shell_surfaces_face_into_the_room() {
    let scene = hall();
    let normal = |name: &str| {
        let id = scene.find(name).unwrap();
        scene.world_matrix(id).transform_vector3(Vec3::Z)
    };
    assert!(normal("Hall/floor").abs_diff_eq(Vec3::Y, 1e-5));
    assert!(normal("Hall/ceiling").abs_diff_eq(Vec3::NEG_Y, 1e-5));
    assert!(normal("Hall/wall-back").abs_diff_eq(Vec3::Z, 1e-5));
    assert!(normal("Hall/wall-left").abs_diff_eq(Vec3::X, 1e-5));
    assert!(normal("Hall/wall-right").abs_diff_eq(Vec3::NEG_X, 1e-5));
}

#[test]
fn furniture_sits_on_its_local_position() {
    let scene = apartment();
    // Boxes are centred half their height above the base point.
    assert!(placed_at(&scene, "Living Room/furniture-0", [-1.5, 0.4, -3.0]));
    assert!(placed_at(&scene, "Bathroom/furniture-2", [22.5, 1.55, -3.48]));
    let mirror = scene.find("Bathroom/furniture-2").unwrap();
    match &scene.node(mirror).unwrap().kind {
        NodeKind::Mesh { material, .. } => assert_eq!(material.specular, MIRROR_SPECULAR),
        other => panic!("mirror is not a mesh: {other:?}"),
    }
}

#[test]
fn lamp_is_a_group_of_base_pole_and_glowing_shade() {
    let scene = apartment();
    let lamp = scene.find("Living Room/furniture-3").unwrap();
    assert!(matches!(scene.node(lamp).unwrap().kind, NodeKind::Group));
    assert_eq!(scene.children(lamp).len(), 3);
    let shade = scene.find("Living Room/furniture-3/shade").unwrap();
    match &scene.node(shade).unwrap().kind {
        NodeKind::Mesh {
            geometry: Geometry::Cone { .. },
            material,
        } => assert!(material.emissive > 0.0),
        other => panic!("unexpected shade {other:?}"),
    }
}

#[test]
fn builder_without_ambient_or_rooms_is_just_the_root() {
    let scene = SceneBuilder::new().build();
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.rooms().count(), 0);
    assert!(scene.ambient().is_none());
}

#[test]
fn yaw_rotates_room_contents() {
    let mut room = bare_room("Turned", Vec3::new(5.0, 0.0, 0.0));
    room.yaw = FRAC_PI_2;
    room.furniture.push(FurnitureDescriptor {
        kind: FurnitureKind::Box,
        dimensions: Vec3::new(1.0, 1.0, 1.0),
        color: Color::WHITE,
        local_position: Vec3::new(0.0, 0.0, -2.0),
    });
    let scene = SceneBuilder::new().room(room).build();
    // Local -Z turned by +90 degrees about Y points along -X.
    assert!(placed_at(&scene, "Turned/furniture-0", [3.0, 0.5, 0.0]));
}

#[test]
fn tessellation_counts() {
    let s = CURVE_SEGMENTS as usize;
    let plane = tessellate(&Geometry::Plane {
        width: 1.0,
        height: 1.0,
    });
    assert_eq!((plane.vertices.len(), plane.indices.len()), (4, 6));
    let cube = tessellate(&Geometry::Box {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    });
    assert_eq!((cube.vertices.len(), cube.indices.len()), (24, 36));
    let cylinder = tessellate(&Geometry::Cylinder {
        radius_top: 0.5,
        radius_bottom: 0.5,
        height: 1.0,
        segments: CURVE_SEGMENTS,
    });
    assert_eq!(
        (cylinder.vertices.len(), cylinder.indices.len()),
        (4 * s + 4, 12 * s)
    );
    let cone = tessellate(&Geometry::Cone {
        radius: 0.5,
        height: 1.0,
        segments: CURVE_SEGMENTS,
    });
    assert_eq!((cone.vertices.len(), cone.indices.len()), (3 * s + 3, 9 * s));
    let thin = tessellate(&Geometry::Cone {
        radius: 0.5,
        height: 1.0,
        segments: 1,
    });
    assert_eq!(thin.triangle_count(), 9);
}

#[test]
fn baked_scene_is_finite_and_indexed_in_range() {
    let mesh = bake_scene(&apartment());
    assert!(mesh.triangle_count() > 0);
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|i| *i < n));
    assert!(mesh
        .vertices
        .iter()
        .all(|v| v.position.iter().chain(&v.normal).all(|c| c.is_finite())));
}

#[test]
fn baked_wall_normals_follow_room_yaw() {
    let mut room = bare_room("Turned", Vec3::new(5.0, 0.0, 0.0));
    room.yaw = FRAC_PI_2;
    let mesh = bake_scene(&SceneBuilder::new().room(room).build());
    // floor and ceiling come first, four vertices each; then the back wall.
    let back_wall = &mesh.vertices[8..12];
    let centre = back_wall
        .iter()
        .map(|v| Vec3::from(v.position))
        .sum::<Vec3>()
        / 4.0;
    // Local +Z turned by +90 degrees about Y points along +X.
    assert!(centre.abs_diff_eq(Vec3::new(2.0, 1.25, 0.0), 1e-5));
    for v in back_wall {
        assert!(Vec3::from(v.normal).abs_diff_eq(Vec3::X, 1e-5));
    }
}

#[test]
fn appended_normals_stay_perpendicular_under_uneven_scale() {
    let plane = tessellate(&Geometry::Plane {
        width: 1.0,
        height: 1.0,
    });
    let stretch = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
    let transform = stretch * Mat4::from_quat(Quat::from_rotation_y(FRAC_PI_4));
    let mut mesh = MeshData::default();
    mesh.append(&plane, transform, &Material::matte(Color::WHITE));

    let p = |i: usize| Vec3::from(mesh.vertices[i].position);
    let across = p(1) - p(0);
    let up = p(3) - p(0);
    for v in &mesh.vertices {
        let n = Vec3::from(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.dot(across).abs() < 1e-5);
        assert!(n.dot(up).abs() < 1e-5);
    }
    let expected = Vec3::new(1.0, 0.0, 2.0).normalize();
    assert!(Vec3::from(mesh.vertices[0].normal).abs_diff_eq(expected, 1e-5));
}

#[test]
fn ambient_comes_from_config() {
    let ambient = AmbientLight {
        color: Color::from_hex(0xffffff),
        intensity: 0.5,
    };
    let scene = build_scene(&apartment_rooms(), ambient);
    assert_eq!(scene.ambient(), Some(ambient));
}
