use thiserror::Error;

/// Authoring problems in the tour tables or settings.
///
/// These are detected while the tour is assembled and must stop startup; they
/// are never recovered at runtime.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("camera path needs at least two keyframes, got {0}")]
    TooFewKeyframes(usize),
    #[error("keyframe {index} has a non-finite position, look-at or t")]
    NonFiniteKeyframe { index: usize },
    #[error("keyframe {index} has t={t}, outside [0, 1]")]
    KeyframeOutOfRange { index: usize, t: f32 },
    #[error("camera path must start at t=0 and end at t=1 (got {first}..{last})")]
    UnanchoredEnds { first: f32, last: f32 },
    #[error("keyframe {index} repeats t={t} of the keyframe before it")]
    DuplicateT { index: usize, t: f32 },
    #[error("keyframe {index} has t={t}, not greater than the previous t={previous}")]
    NonMonotonic { index: usize, t: f32, previous: f32 },
    #[error("tour stop {index} refers to room {room}, expected {expected}")]
    RoomOrder {
        index: usize,
        room: usize,
        expected: String,
    },
    #[error("room name `{0}` is used more than once")]
    DuplicateRoom(String),
    #[error("invalid room label thresholds: {0}")]
    InvalidThresholds(String),
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Errors surfaced by the walkthrough to its caller.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    /// The output surface, adapter or device could not be created. There is
    /// no fallback rendering path, so this is fatal for the walkthrough.
    #[error("rendering surface unavailable: {0}")]
    ResourceAcquisition(String),
}

pub type Result<T> = std::result::Result<T, TourError>;
