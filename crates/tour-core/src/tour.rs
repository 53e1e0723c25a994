//! The authored apartment: rooms, furniture and the camera stops through them.
//!
//! Keyframes and room label buckets are both derived from one stop table, so
//! the label shown always matches the room the camera is heading into.
//! Changing the tour means editing these tables only.

use crate::constants::EYE_HEIGHT;
use crate::error::ConfigError;
use crate::path::{CameraPath, Keyframe};
use crate::scene::{
    Color, FurnitureDescriptor, FurnitureKind, PointLightDescriptor, RoomDescriptor,
};
use crate::scroll::RoomLabels;
use glam::Vec3;

/// One camera keyframe tagged with the room it belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TourStop {
    pub room: usize,
    pub position: Vec3,
    pub look_at: Vec3,
    pub t: f32,
}

const fn stop(room: usize, position: [f32; 3], look_at: [f32; 3], t: f32) -> TourStop {
    TourStop {
        room,
        position: Vec3::new(position[0], position[1], position[2]),
        look_at: Vec3::new(look_at[0], look_at[1], look_at[2]),
        t,
    }
}

const E: f32 = EYE_HEIGHT;

/// Living room → kitchen → bedroom → bathroom. Transitions are tagged with
/// the room being entered.
pub const APARTMENT_STOPS: &[TourStop] = &[
    stop(0, [0.0, E, 12.0], [0.0, E, 0.0], 0.0),
    stop(0, [0.0, E, 6.0], [0.0, E, 0.0], 0.12),
    stop(0, [0.0, 1.8, 1.5], [-2.0, 1.0, -3.0], 0.22),
    stop(1, [-5.0, 1.7, 8.0], [-11.0, 1.4, 0.0], 0.32),
    stop(1, [-11.0, E, 4.5], [-11.0, 1.2, -2.0], 0.45),
    stop(2, [0.0, 1.8, 9.0], [11.0, 1.4, 0.0], 0.58),
    stop(2, [11.0, E, 4.5], [11.0, 1.0, -2.0], 0.72),
    stop(3, [16.0, 1.8, 9.0], [22.0, 1.4, 0.0], 0.84),
    stop(3, [22.0, E, 3.5], [22.0, 1.2, -2.0], 1.0),
];

fn item(kind: FurnitureKind, dims: [f32; 3], hex: u32, at: [f32; 3]) -> FurnitureDescriptor {
    FurnitureDescriptor {
        kind,
        dimensions: Vec3::from(dims),
        color: Color::from_hex(hex),
        local_position: Vec3::from(at),
    }
}

fn light(at: [f32; 3], hex: u32, intensity: f32, range: f32) -> PointLightDescriptor {
    PointLightDescriptor {
        local_position: Vec3::from(at),
        color: Color::from_hex(hex),
        intensity,
        range,
    }
}

/// Rooms in tour order. All open toward +Z, facing the walkway the camera
/// uses between them.
pub fn apartment_rooms() -> Vec<RoomDescriptor> {
    use FurnitureKind::{Box, Lamp, Mirror};
    vec![
        RoomDescriptor {
            name: "Living Room".to_string(),
            origin: Vec3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            width: 10.0,
            depth: 8.0,
            height: 3.0,
            wall_color: Color::from_hex(0xe8dccb),
            floor_color: Color::from_hex(0x8b6b4a),
            lights: vec![light([0.0, 2.7, 0.0], 0xffe2b8, 1.2, 9.0)],
            furniture: vec![
                item(Box, [3.0, 0.8, 1.0], 0x4a5d73, [-1.5, 0.0, -3.0]),
                item(Box, [1.4, 0.45, 0.8], 0x5b4636, [-1.5, 0.0, -1.2]),
                item(Box, [2.2, 0.5, 0.45], 0x2f2f33, [2.6, 0.0, -3.6]),
                item(Lamp, [0.35, 1.6, 0.0], 0xd9c7a0, [-4.0, 0.0, -3.4]),
            ],
        },
        RoomDescriptor {
            name: "Kitchen".to_string(),
            origin: Vec3::new(-11.0, 0.0, 0.0),
            yaw: 0.0,
            width: 8.0,
            depth: 8.0,
            height: 3.0,
            wall_color: Color::from_hex(0xf2f0eb),
            floor_color: Color::from_hex(0x9a9a96),
            lights: vec![light([0.0, 2.7, -1.0], 0xf4f7ff, 1.3, 8.0)],
            furniture: vec![
                item(Box, [6.0, 0.9, 0.65], 0xdedad2, [0.0, 0.0, -3.6]),
                item(Box, [2.4, 0.9, 1.0], 0x3e4a52, [0.0, 0.0, -0.5]),
                item(Box, [0.9, 1.9, 0.7], 0xc8ccd0, [-3.4, 0.0, -3.5]),
                item(Lamp, [0.3, 1.5, 0.0], 0xb08d57, [3.5, 0.0, -3.5]),
            ],
        },
        RoomDescriptor {
            name: "Bedroom".to_string(),
            origin: Vec3::new(11.0, 0.0, 0.0),
            yaw: 0.0,
            width: 9.0,
            depth: 8.0,
            height: 3.0,
            wall_color: Color::from_hex(0xd7dfe6),
            floor_color: Color::from_hex(0x7a5c43),
            lights: vec![light([0.0, 2.6, -1.0], 0xffd9a8, 1.0, 8.0)],
            furniture: vec![
                item(Box, [2.0, 0.55, 2.2], 0xe9e4dc, [0.0, 0.0, -2.8]),
                item(Box, [2.2, 1.2, 0.1], 0x6b4f3a, [0.0, 0.0, -3.9]),
                item(Box, [0.5, 0.5, 0.4], 0x6b4f3a, [-1.5, 0.0, -3.6]),
                item(Box, [0.5, 0.5, 0.4], 0x6b4f3a, [1.5, 0.0, -3.6]),
                item(Lamp, [0.18, 0.55, 0.0], 0xe0c9a6, [1.5, 0.5, -3.6]),
                item(Mirror, [1.0, 1.6, 0.04], 0xcfd8dc, [3.2, 0.4, -3.97]),
            ],
        },
        RoomDescriptor {
            name: "Bathroom".to_string(),
            origin: Vec3::new(21.0, 0.0, 0.0),
            yaw: 0.0,
            width: 7.0,
            depth: 7.0,
            height: 2.8,
            wall_color: Color::from_hex(0xe3eef0),
            floor_color: Color::from_hex(0xbfc6c8),
            lights: vec![light([0.0, 2.5, -1.0], 0xf0f6ff, 1.1, 7.0)],
            furniture: vec![
                item(Box, [1.7, 0.55, 0.8], 0xf7f7f5, [-2.3, 0.0, -3.0]),
                item(Box, [1.2, 0.85, 0.5], 0x6d7b80, [1.5, 0.0, -3.2]),
                item(Mirror, [1.0, 0.9, 0.03], 0xdfe8ec, [1.5, 1.1, -3.48]),
            ],
        },
    ]
}

/// Rooms, path and labels of one walkthrough.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    pub rooms: Vec<RoomDescriptor>,
    pub path: CameraPath,
    pub labels: RoomLabels,
}

impl Tour {
    /// The built-in apartment.
    pub fn apartment() -> Result<Self, ConfigError> {
        Self::from_stops(apartment_rooms(), APARTMENT_STOPS)
    }

    /// Derive path and label buckets from a stop table.
    ///
    /// Stops must visit rooms in order, starting at room 0 and covering every
    /// room; room `r`'s label bucket starts at its first stop. Room names must
    /// be unique, since they name both the scene groups and the labels.
    pub fn from_stops(
        rooms: Vec<RoomDescriptor>,
        stops: &[TourStop],
    ) -> Result<Self, ConfigError> {
        for (i, room) in rooms.iter().enumerate() {
            if rooms[..i].iter().any(|r| r.name == room.name) {
                return Err(ConfigError::DuplicateRoom(room.name.clone()));
            }
        }
        let mut starts = Vec::with_capacity(rooms.len());
        for (index, s) in stops.iter().enumerate() {
            let next = starts.len();
            if next > 0 && s.room == next - 1 {
                continue;
            }
            if s.room != next || s.room >= rooms.len() {
                let expected = match next {
                    0 => "0".to_string(),
                    n => format!("{} or {}", n - 1, n),
                };
                return Err(ConfigError::RoomOrder {
                    index,
                    room: s.room,
                    expected,
                });
            }
            starts.push(s.t);
        }
        if starts.len() != rooms.len() {
            return Err(ConfigError::InvalidThresholds(format!(
                "stops cover {} of {} rooms",
                starts.len(),
                rooms.len()
            )));
        }
        let path = CameraPath::anchored(
            stops
                .iter()
                .map(|s| Keyframe::new(s.position, s.look_at, s.t))
                .collect(),
        )?;
        let labels = RoomLabels::new(rooms.iter().map(|r| r.name.clone()).collect(), starts)?;
        Ok(Self {
            rooms,
            path,
            labels,
        })
    }
}

