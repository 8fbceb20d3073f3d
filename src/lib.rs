//! Eist - a path-walking tile puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, turning, falling, interactions)
//! - `level`: Pre-parsed level geometry and level packs
//! - `tuning`: Data-driven physics constants
//! - `settings`: Player preferences
//! - `progress`: Best turns and level progress persistence
//! - `audio`: Event to sound cue mapping

pub mod audio;
pub mod error;
pub mod level;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{LadderError, LevelError, PersistError, SampleError};
pub use level::{LevelDef, LevelPack};
pub use progress::{Progress, ProgressStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Movement is expressed as distance per tick (speed / 60).
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default grid unit in pixels (half a tile)
    pub const DEFAULT_GRID_UNIT: f32 = 16.0;

    /// Full quarter turn, degrees
    pub const QUARTER_TURN: f32 = 90.0;
    /// Reversal, degrees
    pub const HALF_TURN: f32 = 180.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}
