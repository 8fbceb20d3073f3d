//! Signals emitted during a tick.
//! The presentation layer consumes these for sound, animation and persistence.

use glam::Vec2;

use super::direction::TurnKind;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Actor deflected by an arrow or door
    Turn { pos: Vec2, kind: TurnKind },
    /// Artifact picked up, more remain
    Artifact { pos: Vec2 },
    /// Final artifact picked up, the exit is open
    LastArtifact { pos: Vec2 },
    Key { pos: Vec2 },
    DoorUnlock { pos: Vec2 },
    DoorBounce { pos: Vec2 },
    /// Actor warped; `pos` is the arrival point
    Teleport { pos: Vec2 },
    /// Actor stepped off the path
    Fall { pos: Vec2 },
    /// Exit reached, next level queued
    LevelUp { pos: Vec2, next_level: usize },
    /// Turn count beat the stored best for the level
    NewBest { level: usize, turns: u32 },
    /// Fall animation finished, current level reloads
    Restart { level: usize },
    /// Exit drop finished, next level loads
    Advance { level: usize },
    /// Last level completed, play wraps to the first
    GameFinished,
    /// A ground sample failed; the actor was halted
    Halted { pos: Vec2 },
}

impl GameEvent {
    /// Source position for stereo balance, if the event has one
    pub fn position(&self) -> Option<Vec2> {
        match self {
            GameEvent::Turn { pos, .. }
            | GameEvent::Artifact { pos }
            | GameEvent::LastArtifact { pos }
            | GameEvent::Key { pos }
            | GameEvent::DoorUnlock { pos }
            | GameEvent::DoorBounce { pos }
            | GameEvent::Teleport { pos }
            | GameEvent::Fall { pos }
            | GameEvent::LevelUp { pos, .. }
            | GameEvent::Halted { pos } => Some(*pos),
            GameEvent::NewBest { .. }
            | GameEvent::Restart { .. }
            | GameEvent::Advance { .. }
            | GameEvent::GameFinished => None,
        }
    }
}
