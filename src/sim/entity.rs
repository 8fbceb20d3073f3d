//! Entity records
//!
//! Plain data: behaviour lives in the movement, turning, ground and
//! interaction modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::direction::{Direction, Orientation};
use super::grid::{Area, Grid, GridPos};
use super::turning::TurnState;
use crate::normalize_degrees;

/// The walking character
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Centre point, screen space
    pub pos: Vec2,
    pub direction: Direction,
    /// Active turn, if any
    pub turn: Option<TurnState>,
    pub moving: bool,
    /// Signed offset in degrees from the turn's target heading (0 when not turning)
    pub rotation: f32,
    pub keys: u32,
    /// Ground sample points, derived from `pos` and `direction`
    pub probes: [Vec2; 2],
    /// Walk animation frame
    pub frame: u32,
}

impl Actor {
    pub fn new(pos: Vec2, direction: Direction) -> Self {
        Self {
            pos,
            direction,
            turn: None,
            moving: true,
            rotation: 0.0,
            keys: 0,
            probes: [pos; 2],
            frame: 0,
        }
    }

    #[inline]
    pub fn is_turning(&self) -> bool {
        self.turn.is_some()
    }

    /// Heading the renderer should draw, degrees clockwise from Right
    pub fn heading(&self) -> f32 {
        let base = match &self.turn {
            Some(turn) => turn.target.degrees(),
            None => self.direction.degrees(),
        };
        normalize_degrees(base + self.rotation)
    }
}

/// Pose handed to the renderer each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorPose {
    pub pos: Vec2,
    pub direction: Direction,
    pub rotation: f32,
    pub heading: f32,
    pub frame: u32,
    pub falling_frame: Option<u32>,
}

/// Deflects the actor toward its own direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub pos: Vec2,
    pub area: Area,
    pub direction: Direction,
}

/// Opens with a key, otherwise bounces the actor back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub pos: Vec2,
    pub area: Area,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub pos: Vec2,
    pub area: Area,
}

/// Collectible; all of them open the exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub pos: Vec2,
    pub area: Area,
}

/// One end of the level's teleport pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teleport {
    pub pos: Vec2,
    pub area: Area,
}

/// Decoration, no gameplay effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ornament {
    pub pos: Vec2,
    pub area: Area,
    pub sprite: u32,
}

/// A place the ladder can be attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub pos: Vec2,
    pub area: Area,
    pub orientation: Orientation,
    /// Region the ladder makes walkable when attached here
    pub bridge: Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    pub pos: Vec2,
    pub area: Area,
}

/// Screen position and detection area of an entity at a grid point
pub fn place(grid: &Grid, at: GridPos, half_extent: f32) -> (Vec2, Area) {
    let pos = grid.to_screen(at);
    (pos, grid.area(pos, half_extent))
}

impl Slot {
    pub fn new(
        grid: &Grid,
        at: GridPos,
        orientation: Orientation,
        half_extent: f32,
        ladder_half_length: f32,
    ) -> Self {
        let (pos, area) = place(grid, at, half_extent);
        // Bridge spans the ladder length along its axis and one tile across
        let along = orientation.axis() * grid.px(ladder_half_length);
        let across = (Vec2::ONE - orientation.axis()) * grid.unit;
        Self {
            pos,
            area,
            orientation,
            bridge: Area::centered(pos, along + across),
        }
    }
}
