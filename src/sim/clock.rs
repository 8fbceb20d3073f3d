//! Simulation clock and driver
//!
//! [`SimClock`] turns frames (or wall time) into fixed ticks and can be
//! stopped, e.g. while the window is minimised. [`Simulation`] owns the clock,
//! the level pack and the live [`Session`], runs ticks, and performs level
//! transitions and progress writes between them so no tick ever sees a
//! half-loaded level.

use super::entity::ActorPose;
use super::event::GameEvent;
use super::grid::Grid;
use super::state::{LevelContext, Session};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::LevelError;
use crate::level::LevelPack;
use crate::progress::ProgressStore;
use crate::tuning::Tuning;

/// Fixed-rate tick source
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    paused: bool,
    accumulator: f32,
    ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.accumulator = 0.0;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One tick per rendered frame. Returns whether a tick is due.
    pub fn frame(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.ticks += 1;
        true
    }

    /// Whole ticks due after `elapsed` seconds of wall time, capped at
    /// [`MAX_SUBSTEPS`]
    pub fn consume(&mut self, elapsed: f32) -> u32 {
        if self.paused {
            return 0;
        }
        self.accumulator += elapsed.clamp(0.0, 0.1);
        let mut due = 0;
        while self.accumulator >= SIM_DT && due < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            due += 1;
        }
        self.ticks += due as u64;
        due
    }
}

/// Tick driver for a whole pack
pub struct Simulation<P: ProgressStore> {
    pack: LevelPack,
    grid: Grid,
    tuning: Tuning,
    seed: u64,
    attempts: u64,
    clock: SimClock,
    session: Session,
    progress: P,
    /// Input waiting for the next due tick
    queued: Option<TickInput>,
}

impl<P: ProgressStore> Simulation<P> {
    /// Validate the pack and load the level `progress` says to resume on
    pub fn new(
        pack: LevelPack,
        grid: Grid,
        tuning: Tuning,
        progress: P,
        seed: u64,
    ) -> Result<Self, LevelError> {
        for level in &pack.levels {
            level.validate()?;
        }
        let index = progress.current_level().min(pack.len().saturating_sub(1));
        let session = Self::build(&pack, index, grid, &tuning, &progress, seed)?;
        Ok(Self {
            pack,
            grid,
            tuning,
            seed,
            attempts: 0,
            clock: SimClock::new(),
            session,
            progress,
            queued: None,
        })
    }

    fn build(
        pack: &LevelPack,
        index: usize,
        grid: Grid,
        tuning: &Tuning,
        progress: &P,
        seed: u64,
    ) -> Result<Session, LevelError> {
        let def = pack.get(index)?;
        let context = LevelContext {
            index,
            count: pack.len(),
            best_turns: progress.best_turns(index),
            seed,
        };
        Session::load(def, context, grid, tuning.clone())
    }

    /// Replace the session with a fresh attempt at `index`
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        self.attempts += 1;
        let seed = self.seed.wrapping_add(self.attempts);
        self.session = Self::build(&self.pack, index, self.grid, &self.tuning, &self.progress, seed)?;
        Ok(())
    }

    /// Reload the current level
    pub fn restart(&mut self) -> Result<(), LevelError> {
        self.load_level(self.session.context.index)
    }

    /// Run one tick for this rendered frame (nothing while paused)
    pub fn frame(&mut self, input: &TickInput) -> Result<Vec<GameEvent>, LevelError> {
        if !self.clock.frame() {
            return Ok(Vec::new());
        }
        self.run_tick(input)
    }

    /// Run as many ticks as `elapsed` seconds of wall time call for.
    ///
    /// A command in `input` applies to the first of them only. When no tick is
    /// due yet it is held until one is, and a newer command replaces it.
    pub fn update(&mut self, elapsed: f32, input: &TickInput) -> Result<Vec<GameEvent>, LevelError> {
        let due = self.clock.consume(elapsed);
        if input.ladder.is_some() {
            self.queued = Some(input.clone());
        }
        let mut events = Vec::new();
        for _ in 0..due {
            let input = self.queued.take().unwrap_or_default();
            events.extend(self.run_tick(&input)?);
        }
        Ok(events)
    }

    fn run_tick(&mut self, input: &TickInput) -> Result<Vec<GameEvent>, LevelError> {
        let mut events = tick(&mut self.session, input);
        let mut finished = false;
        let mut transition = None;

        for event in &events {
            match *event {
                GameEvent::NewBest { level, turns } => {
                    self.progress.set_best_turns(level, turns);
                }
                GameEvent::LevelUp { next_level, .. } => {
                    if next_level == 0 {
                        finished = true;
                    } else if next_level > self.progress.achieved_level() {
                        self.progress.set_achieved_level(next_level);
                    }
                    self.progress.set_current_level(next_level);
                }
                GameEvent::Restart { level } | GameEvent::Advance { level } => {
                    transition = Some(level);
                }
                // A board that keeps failing its samples would pin the actor forever
                GameEvent::Halted { .. } => {
                    let level = self.session.context.index;
                    log::warn!("Level {} halted on a bad ground sample, restarting", level + 1);
                    transition.get_or_insert(level);
                }
                _ => {}
            }
        }

        if finished {
            log::info!("Pack '{}' finished", self.pack.name);
            events.push(GameEvent::GameFinished);
        }
        if let Some(level) = transition {
            self.load_level(level)?;
        }
        Ok(events)
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn pose(&self) -> ActorPose {
        self.session.pose()
    }

    pub fn level_index(&self) -> usize {
        self.session.context.index
    }

    pub fn pack(&self) -> &LevelPack {
        &self.pack
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }
}
