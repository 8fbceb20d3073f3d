//! Data-driven physics constants
//!
//! Distances are expressed in grid units and converted to pixels through
//! [`Grid`](crate::sim::Grid) so levels can be rendered at any scale.

use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// Simulation tuning. Level geometry is tuned against these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Walking speed, grid units per second
    pub speed: f32,
    /// Distance of each ground sample point from the actor centre, per axis
    pub sample_offset: f32,
    /// Distance over which a turn visually completes (a quarter tile)
    pub rotation_radius: f32,
    /// Half extent of every entity detection area
    pub detection_half_extent: f32,
    /// Half length of a ladder bridge along its orientation
    pub ladder_half_length: f32,
    /// Last frame index of the fall animation
    pub fall_frames: u32,
    /// Ticks spent on each fall frame
    pub fall_frame_ticks: u32,
    /// Number of walk animation frames
    pub walk_frames: u32,
    /// Ticks spent on each walk frame
    pub walk_frame_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed: 4.0,
            sample_offset: 0.5,
            rotation_radius: 0.5,
            detection_half_extent: 0.5,
            ladder_half_length: 2.0,
            fall_frames: 8,
            fall_frame_ticks: 5,
            walk_frames: 4,
            walk_frame_ticks: 8,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "speed": 6.0 }"#).unwrap();
        assert_eq!(tuning.speed, 6.0);
        assert_eq!(tuning.fall_frames, Tuning::default().fall_frames);
    }

    #[test]
    fn test_rotation_radius_is_quarter_tile() {
        // A tile is two grid units
        assert_eq!(Tuning::default().rotation_radius * 4.0, 2.0);
    }
}
