// DOM contract between the page and the walkthrough.

pub const CANVAS_ID: &str = "tour-canvas";
pub const PROGRESS_ID: &str = "tour-progress"; // width tracks scroll progress
pub const ROOM_LABEL_ID: &str = "tour-room-label";
pub const SECTION_SELECTOR: &str = ".tour-section[data-room]";
pub const SECTION_ROOM_ATTR: &str = "data-room";
pub const SECTION_ACTIVE_CLASS: &str = "active";

// Optional overrides read from the canvas element
pub const SCRUB_TAU_ATTR: &str = "data-scrub-tau";
pub const FOV_ATTR: &str = "data-fov";
