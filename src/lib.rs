//! Skyhop - a side-scrolling flap-through-the-gates arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `host`: Boundary adapter for the render/input/audio collaborators
//! - `tuning`: Data-driven game balance

pub mod host;
pub mod sim;
pub mod tuning;

pub use host::{EventSink, Host, LogSink, SceneError, StepMode};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`].
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 1100.0;
    /// Vertical velocity set by a flap (units/s)
    pub const FLAP_IMPULSE: f32 = 320.0;
    /// Leftward scroll speed of obstacles and ground (units/s, 1.6 per frame at 60 Hz)
    pub const SCROLL_SPEED: f32 = 96.0;

    /// Seconds between gate spawns
    pub const SPAWN_INTERVAL: f32 = 2.6;
    /// Vertical gap between the two segments of a gate
    pub const OPENING_HEIGHT: f32 = 120.0;
    /// Max offset of the opening center from mid-screen, as a fraction of scene height
    pub const OPENING_JITTER: f32 = 0.1;
    /// Horizontal distance past the right edge where gates appear
    pub const SPAWN_MARGIN: f32 = 26.0;

    /// Obstacle segment size
    pub const SEGMENT_WIDTH: f32 = 52.0;
    pub const SEGMENT_HEIGHT: f32 = 320.0;

    /// Player size
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 26.0;
    /// Player start position as fractions of the scene size
    pub const START_X_FRACTION: f32 = 0.2;
    pub const START_Y_FRACTION: f32 = 0.5;

    /// Idle hover bob
    pub const HOVER_AMPLITUDE: f32 = 8.0;
    pub const HOVER_PERIOD: f32 = 0.2;

    /// Ground strip height used by hosts to derive the ground-top line
    pub const GROUND_HEIGHT: f32 = 64.0;
    /// Overlap between the two ground tiles when one wraps around
    pub const GROUND_SEAM_OVERLAP: f32 = 1.55;
}

/// True for finite values that are strictly positive
#[inline]
pub fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
