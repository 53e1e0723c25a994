// Shared tuning constants used by both web and native frontends.

// Camera
pub const EYE_HEIGHT: f32 = 1.6; // standing eye level in metres
pub const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;
pub const DEFAULT_ZNEAR: f32 = 0.05;
pub const DEFAULT_ZFAR: f32 = 100.0;
pub const MIN_LOOK_DISTANCE_SQ: f32 = 1e-8; // eye/target closer than this cannot define a view

// Scroll scrub (first-order lag on progress)
pub const DEFAULT_SCRUB_TAU_SEC: f32 = 0.35;
pub const SCRUB_SNAP_EPSILON: f32 = 1e-4; // snap to target once this close
pub const MAX_SCRUB_STEP_SEC: f32 = 0.25; // long stalls (tab switch) are treated as this long

// Native virtual scroll page
pub const DEFAULT_VIRTUAL_PAGE_HEIGHT: f64 = 8000.0;
pub const DEFAULT_WHEEL_LINE_PX: f64 = 60.0;

// Scene construction
pub const BASEBOARD_HEIGHT: f32 = 0.12;
pub const BASEBOARD_DEPTH: f32 = 0.03;
pub const CURVE_SEGMENTS: u32 = 24; // radial segments for cylinders and cones
pub const LAMP_POLE_RADIUS: f32 = 0.025;
pub const LAMP_BASE_HEIGHT: f32 = 0.04;
pub const LAMP_SHADE_FRACTION: f32 = 0.25; // share of lamp height taken by the shade
pub const LAMP_SHADE_EMISSIVE: f32 = 0.8;
pub const MIRROR_SPECULAR: f32 = 0.95;
pub const SURFACE_SPECULAR: f32 = 0.08;

// Lighting
pub const MAX_POINT_LIGHTS: usize = 8; // fixed-size light array in the scene uniform
pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.35;
pub const DEFAULT_CLEAR_COLOR: [f32; 3] = [0.015, 0.016, 0.02];
