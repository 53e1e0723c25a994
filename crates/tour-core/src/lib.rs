pub mod camera;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod mesh;
pub mod path;
pub mod pose;
pub mod scene;
pub mod scroll;
pub mod tour;
pub mod viewport;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::Camera;
pub use config::TourConfig;
pub use context::TourContext;
pub use error::{ConfigError, TourError};
pub use lifecycle::Lifecycle;
pub use mesh::{bake_scene, tessellate, MeshData, Vertex};
pub use path::{interpolate, CameraPath, CameraPose, Keyframe};
pub use pose::{pose_slot, PoseReader, PoseWriter};
pub use scene::{build_scene, SceneBuilder, SceneGraph};
pub use scroll::{
    RoomLabels, ScrollBinder, ScrollMetrics, ScrollObserver, ScrollState, ScrollUpdate, Scrub,
    VirtualPage,
};
pub use tour::{Tour, TourStop, APARTMENT_STOPS};
pub use viewport::{Viewport, ViewportAdapter};
