//! Level session state
//!
//! Everything the tick mutates for one attempt at one level. A session is
//! built in one go from a [`LevelDef`] and replaced wholesale on restart or
//! advance; entity collections only ever shrink.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{
    Actor, ActorPose, Arrow, Artifact, Door, Exit, Key, Ornament, Slot, Teleport, place,
};
use super::ground::{FallTimer, WalkMask};
use super::grid::Grid;
use super::movement::{refresh_probes, step_length};
use crate::error::{LadderError, LevelError};
use crate::level::LevelDef;
use crate::tuning::Tuning;

/// What happens when the current fall animation ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallOutcome {
    /// Stepped off the path: reload this level
    #[default]
    Restart,
    /// Dropped through the exit: load the given level
    Advance { next_level: usize },
}

/// Where a session sits in its pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelContext {
    pub index: usize,
    pub count: usize,
    /// Stored best turn count for this level
    pub best_turns: Option<u32>,
    pub seed: u64,
}

impl LevelContext {
    /// Level played after this one, wrapping after the last
    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.count.max(1)
    }
}

/// State of one level attempt
#[derive(Debug, Clone)]
pub struct Session {
    pub context: LevelContext,
    pub grid: Grid,
    pub tuning: Tuning,
    pub actor: Actor,
    pub arrows: Vec<Arrow>,
    pub artifacts: Vec<Artifact>,
    pub ornaments: Vec<Ornament>,
    pub teleports: Vec<Teleport>,
    pub keys: Vec<Key>,
    pub slots: Vec<Slot>,
    pub doors: Vec<Door>,
    pub exit: Exit,
    /// Slot index holding the ladder
    pub ladder: Option<usize>,
    /// Deflections so far (arrows and door bounces)
    pub turns: u32,
    pub best_turns: Option<u32>,
    pub fall: FallTimer,
    pub fall_outcome: FallOutcome,
    /// Set while the actor's centre is still inside the door that bounced it
    pub door_suppressed: bool,
    /// Actor centre is on the attached ladder's bridge
    pub on_ladder: bool,
    /// A ground sample failed last tick; the actor resumes on the next one
    pub halted: bool,
    pub time_ticks: u64,
    pub ground: WalkMask,
    rng: Pcg32,
}

impl Session {
    /// Build a session, rasterizing the walk mask from the level's path tiles
    pub fn load(
        def: &LevelDef,
        context: LevelContext,
        grid: Grid,
        tuning: Tuning,
    ) -> Result<Self, LevelError> {
        let ground = WalkMask::from_tiles(def.cols, def.rows, &grid, def.path.iter().copied());
        Self::load_with_ground(def, context, grid, tuning, ground)
    }

    /// Build a session over an existing walk mask (e.g. decoded from the board image)
    pub fn load_with_ground(
        def: &LevelDef,
        context: LevelContext,
        grid: Grid,
        tuning: Tuning,
        ground: WalkMask,
    ) -> Result<Self, LevelError> {
        def.validate()?;

        let half = tuning.detection_half_extent;
        let arrows = def
            .arrows
            .iter()
            .map(|a| {
                let (pos, area) = place(&grid, a.at, half);
                Arrow {
                    pos,
                    area,
                    direction: a.direction,
                }
            })
            .collect();
        let doors = def
            .doors
            .iter()
            .map(|d| {
                let (pos, area) = place(&grid, d.at, half);
                Door {
                    pos,
                    area,
                    orientation: d.orientation,
                }
            })
            .collect();
        let keys = def
            .keys
            .iter()
            .map(|&at| {
                let (pos, area) = place(&grid, at, half);
                Key { pos, area }
            })
            .collect();
        let artifacts = def
            .artifacts
            .iter()
            .map(|&at| {
                let (pos, area) = place(&grid, at, half);
                Artifact { pos, area }
            })
            .collect();
        let teleports = def
            .teleports
            .iter()
            .map(|&at| {
                let (pos, area) = place(&grid, at, half);
                Teleport { pos, area }
            })
            .collect();
        let ornaments = def
            .ornaments
            .iter()
            .map(|o| {
                let (pos, area) = place(&grid, o.at, half);
                Ornament {
                    pos,
                    area,
                    sprite: o.sprite,
                }
            })
            .collect();
        let slots = def
            .slots
            .iter()
            .map(|s| Slot::new(&grid, s.at, s.orientation, half, tuning.ladder_half_length))
            .collect();
        let (exit_pos, exit_area) = place(&grid, def.exit, half);

        let mut actor = Actor::new(grid.to_screen(def.start), def.start_direction);
        refresh_probes(&mut actor, grid.px(tuning.sample_offset));

        log::info!(
            "Level {} '{}' loaded: {} arrows, {} artifacts, {} doors, {} keys",
            context.index + 1,
            def.name,
            def.arrows.len(),
            def.artifacts.len(),
            def.doors.len(),
            def.keys.len()
        );

        Ok(Self {
            context,
            grid,
            tuning,
            actor,
            arrows,
            artifacts,
            ornaments,
            teleports,
            keys,
            slots,
            doors,
            exit: Exit {
                pos: exit_pos,
                area: exit_area,
            },
            ladder: def.ladder,
            turns: 0,
            best_turns: context.best_turns,
            fall: FallTimer::default(),
            fall_outcome: FallOutcome::Restart,
            door_suppressed: false,
            on_ladder: false,
            halted: false,
            time_ticks: 0,
            ground,
            rng: Pcg32::seed_from_u64(context.seed ^ context.index as u64),
        })
    }

    /// The exit only accepts the actor once every artifact is collected
    pub fn exit_open(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn falling_frame(&self) -> Option<u32> {
        self.fall.frame()
    }

    /// Slot the ladder is attached to
    pub fn ladder_slot(&self) -> Option<&Slot> {
        self.ladder.and_then(|i| self.slots.get(i))
    }

    /// Attach the ladder to another slot, or detach it with `None`
    pub fn move_ladder(&mut self, to: Option<usize>) -> Result<(), LadderError> {
        if let Some(index) = to {
            if index >= self.slots.len() {
                return Err(LadderError::NoSuchSlot {
                    index,
                    len: self.slots.len(),
                });
            }
        }
        if self.on_ladder && to != self.ladder {
            return Err(LadderError::Occupied);
        }
        self.ladder = to;
        Ok(())
    }

    pub fn pose(&self) -> ActorPose {
        ActorPose {
            pos: self.actor.pos,
            direction: self.actor.direction,
            rotation: self.actor.rotation,
            heading: self.actor.heading(),
            frame: self.actor.frame,
            falling_frame: self.fall.frame(),
        }
    }

    /// Random sweep for reversals (cosmetic only)
    pub fn reverse_bias(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Walking distance per tick, pixels
    pub fn step(&self) -> f32 {
        step_length(&self.grid, &self.tuning)
    }

    /// Ground probe offset, pixels
    pub fn probe_offset(&self) -> f32 {
        self.grid.px(self.tuning.sample_offset)
    }

    /// Turn radius, pixels
    pub fn rotation_radius(&self) -> f32 {
        self.grid.px(self.tuning.rotation_radius)
    }

    /// Edge correction applied when one foot is off the path (half a grid unit)
    pub fn nudge_length(&self) -> f32 {
        self.grid.unit * 0.5
    }

    /// Teleport landing offset (one grid unit along travel)
    pub fn teleport_offset(&self, direction_unit: Vec2) -> Vec2 {
        direction_unit * self.grid.unit
    }
}
