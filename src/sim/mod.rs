//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (distance per tick, no delta time)
//! - Seeded RNG only
//! - Fixed resolution order (entity kind, then collection order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod direction;
pub mod entity;
pub mod event;
pub mod grid;
pub mod ground;
pub mod interact;
pub mod movement;
pub mod state;
pub mod tick;
pub mod turning;

pub use clock::{SimClock, Simulation};
pub use direction::{Direction, Orientation, TurnKind};
pub use entity::{Actor, ActorPose, Arrow, Artifact, Door, Exit, Key, Ornament, Slot, Teleport};
pub use event::GameEvent;
pub use grid::{Area, Grid, GridPos};
pub use ground::{Ground, GroundVerdict, WalkMask};
pub use state::{FallOutcome, LevelContext, Session};
pub use tick::{LadderCommand, TickInput, tick};
pub use turning::{TurnState, begin_turn, step_turn};
