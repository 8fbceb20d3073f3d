//! Pre-parsed level geometry
//!
//! The level file format belongs to the loader; the simulation only sees the
//! entity lists and the start/exit pose below. Packs can also be stored as
//! JSON, and a small built-in pack is compiled in for the native runner.
//!
//! All positions are grid points. Each path tile is centred on its grid point
//! and spans one grid unit either side, so tiles on the outer columns and rows
//! reach the board edge. The rasterized walk mask pads the board with void to
//! keep stepping off such a tile a fall rather than a sampling error.

use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::sim::direction::{Direction, Orientation};
use crate::sim::grid::GridPos;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowDef {
    pub at: GridPos,
    pub direction: Direction,
}

/// Door or ladder slot placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedDef {
    pub at: GridPos,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrnamentDef {
    pub at: GridPos,
    #[serde(default)]
    pub sprite: u32,
}

/// One level, already parsed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDef {
    pub name: String,
    /// Board width, grid units
    pub cols: u32,
    /// Board height, grid units
    pub rows: u32,
    /// Walkable tiles
    pub path: Vec<GridPos>,
    pub start: GridPos,
    pub start_direction: Direction,
    pub exit: GridPos,
    /// Slot index the ladder starts on
    pub ladder: Option<usize>,
    pub arrows: Vec<ArrowDef>,
    pub doors: Vec<OrientedDef>,
    pub keys: Vec<GridPos>,
    pub artifacts: Vec<GridPos>,
    pub teleports: Vec<GridPos>,
    pub slots: Vec<OrientedDef>,
    pub ornaments: Vec<OrnamentDef>,
}

impl LevelDef {
    /// Check the geometry before any entity is built
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.cols < 2 || self.rows < 2 {
            return Err(LevelError::BoardTooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }

        let check = |what: &'static str, at: GridPos| -> Result<(), LevelError> {
            let inside = at.col > 0
                && at.row > 0
                && (at.col as i64) < self.cols as i64
                && (at.row as i64) < self.rows as i64;
            if inside {
                Ok(())
            } else {
                Err(LevelError::OutOfBoard {
                    what,
                    col: at.col,
                    row: at.row,
                    cols: self.cols,
                    rows: self.rows,
                })
            }
        };

        check("start", self.start)?;
        check("exit", self.exit)?;
        for &tile in &self.path {
            check("path tile", tile)?;
        }
        for arrow in &self.arrows {
            check("arrow", arrow.at)?;
        }
        for door in &self.doors {
            check("door", door.at)?;
        }
        for &key in &self.keys {
            check("key", key)?;
        }
        for &artifact in &self.artifacts {
            check("artifact", artifact)?;
        }
        for &teleport in &self.teleports {
            check("teleport", teleport)?;
        }
        for slot in &self.slots {
            check("slot", slot.at)?;
        }
        for ornament in &self.ornaments {
            check("ornament", ornament.at)?;
        }

        if !matches!(self.teleports.len(), 0 | 2) {
            return Err(LevelError::TeleportCount(self.teleports.len()));
        }
        if let Some(index) = self.ladder {
            if index >= self.slots.len() {
                return Err(LevelError::LadderSlot {
                    index,
                    len: self.slots.len(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered list of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    pub name: String,
    pub levels: Vec<LevelDef>,
}

impl LevelPack {
    pub fn new(name: impl Into<String>, levels: Vec<LevelDef>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyPack);
        }
        Ok(Self {
            name: name.into(),
            levels,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let pack: LevelPack = serde_json::from_str(json)?;
        Self::new(pack.name, pack.levels)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&LevelDef, LevelError> {
        self.levels.get(index).ok_or(LevelError::NoSuchLevel {
            index,
            len: self.levels.len(),
        })
    }
}

/// Straight run of path tiles, one per grid unit, endpoints included
pub fn path_run(from: GridPos, to: GridPos) -> Vec<GridPos> {
    let dc = (to.col - from.col).signum();
    let dr = (to.row - from.row).signum();
    let steps = (to.col - from.col).abs().max((to.row - from.row).abs());
    (0..=steps)
        .map(|i| GridPos::new(from.col + dc * i, from.row + dr * i))
        .collect()
}

/// Levels compiled into the binary
pub fn demo_pack() -> LevelPack {
    let first = LevelDef {
        name: "First Steps".into(),
        cols: 18,
        rows: 14,
        path: [
            path_run(GridPos::new(1, 2), GridPos::new(15, 2)),
            path_run(GridPos::new(14, 2), GridPos::new(14, 12)),
        ]
        .concat(),
        start: GridPos::new(2, 2),
        start_direction: Direction::Right,
        exit: GridPos::new(14, 11),
        arrows: vec![ArrowDef {
            at: GridPos::new(14, 2),
            direction: Direction::Down,
        }],
        artifacts: vec![GridPos::new(8, 2), GridPos::new(14, 6)],
        ornaments: vec![OrnamentDef {
            at: GridPos::new(4, 2),
            sprite: 1,
        }],
        ..Default::default()
    };

    let second = LevelDef {
        name: "Keys and Bridges".into(),
        cols: 18,
        rows: 12,
        path: [
            path_run(GridPos::new(1, 2), GridPos::new(11, 2)),
            path_run(GridPos::new(1, 8), GridPos::new(8, 8)),
            path_run(GridPos::new(12, 8), GridPos::new(16, 8)),
        ]
        .concat(),
        start: GridPos::new(2, 2),
        start_direction: Direction::Right,
        exit: GridPos::new(15, 8),
        ladder: Some(0),
        doors: vec![OrientedDef {
            at: GridPos::new(8, 2),
            orientation: Orientation::Vertical,
        }],
        keys: vec![GridPos::new(5, 2)],
        artifacts: vec![GridPos::new(7, 8)],
        teleports: vec![GridPos::new(11, 2), GridPos::new(3, 8)],
        slots: vec![OrientedDef {
            at: GridPos::new(10, 8),
            orientation: Orientation::Horizontal,
        }],
        ..Default::default()
    };

    LevelPack {
        name: "Demo".into(),
        levels: vec![first, second],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_pack_is_valid() {
        let pack = demo_pack();
        assert_eq!(pack.len(), 2);
        for level in &pack.levels {
            level.validate().unwrap();
        }
    }

    #[test]
    fn test_path_run() {
        let run = path_run(GridPos::new(3, 5), GridPos::new(3, 2));
        assert_eq!(
            run,
            vec![
                GridPos::new(3, 5),
                GridPos::new(3, 4),
                GridPos::new(3, 3),
                GridPos::new(3, 2)
            ]
        );
    }

    #[test]
    fn test_entity_on_board_edge_rejected() {
        let mut level = demo_pack().levels[0].clone();
        level.keys.push(GridPos::new(0, 4));
        assert!(matches!(
            level.validate(),
            Err(LevelError::OutOfBoard { what: "key", col: 0, .. })
        ));
    }

    #[test]
    fn test_single_teleport_rejected() {
        let mut level = demo_pack().levels[0].clone();
        level.teleports.push(GridPos::new(3, 2));
        assert!(matches!(level.validate(), Err(LevelError::TeleportCount(1))));
    }

    #[test]
    fn test_ladder_without_slot_rejected() {
        let mut level = demo_pack().levels[0].clone();
        level.ladder = Some(0);
        assert!(matches!(
            level.validate(),
            Err(LevelError::LadderSlot { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_pack_json() {
        let json = serde_json::to_string(&demo_pack()).unwrap();
        let pack = LevelPack::from_json(&json).unwrap();
        assert_eq!(pack, demo_pack());

        let empty = r#"{ "name": "none", "levels": [] }"#;
        assert!(matches!(LevelPack::from_json(empty), Err(LevelError::EmptyPack)));
    }
}
