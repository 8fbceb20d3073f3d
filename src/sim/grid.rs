//! Board geometry
//!
//! Level geometry is placed on a grid whose quantum is the grid unit (half a
//! tile). Columns and rows are converted to screen space once at load time;
//! everything after that works on continuous positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_GRID_UNIT;

/// A column/row pair in grid units, relative to the board origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Grid to screen transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Size of one grid unit in pixels
    pub unit: f32,
    /// Screen position of column 0, row 0
    pub origin: Vec2,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_UNIT, Vec2::ZERO)
    }
}

impl Grid {
    pub fn new(unit: f32, origin: Vec2) -> Self {
        Self { unit, origin }
    }

    /// Tile edge length (two grid units)
    #[inline]
    pub fn tile(&self) -> f32 {
        self.unit * 2.0
    }

    /// Screen position of a grid point
    #[inline]
    pub fn to_screen(&self, pos: GridPos) -> Vec2 {
        self.origin + Vec2::new(pos.col as f32, pos.row as f32) * self.unit
    }

    /// Convert a length in grid units to pixels
    #[inline]
    pub fn px(&self, grid_units: f32) -> f32 {
        grid_units * self.unit
    }

    /// Centred detection area around a grid point
    pub fn area(&self, center: Vec2, half_extent: f32) -> Area {
        Area::centered(center, Vec2::splat(self.px(half_extent)))
    }
}

/// Axis-aligned rectangle used for point-in-area tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub min: Vec2,
    pub max: Vec2,
}

impl Area {
    pub fn centered(center: Vec2, half_size: Vec2) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Inclusive point test
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
