//! Movement integrator
//!
//! Fixed-rate stepping: every tick moves the actor `speed / 60` along its
//! direction. There is no delta time; the clock guarantees the cadence.

use glam::Vec2;

use super::direction::Direction;
use super::entity::Actor;
use super::grid::Grid;
use crate::consts::TICKS_PER_SECOND;
use crate::tuning::Tuning;

/// Distance covered per tick, pixels
pub fn step_length(grid: &Grid, tuning: &Tuning) -> f32 {
    grid.px(tuning.speed) / TICKS_PER_SECOND as f32
}

/// Offsets of the two ground sample points from the actor centre.
///
/// Both points sit ahead of the actor, one on each side of its line of travel:
/// the two leading corners.
pub fn probe_offsets(direction: Direction, o: f32) -> [Vec2; 2] {
    match direction {
        Direction::Right => [Vec2::new(o, -o), Vec2::new(o, o)],
        Direction::Down => [Vec2::new(o, o), Vec2::new(-o, o)],
        Direction::Left => [Vec2::new(-o, o), Vec2::new(-o, -o)],
        Direction::Up => [Vec2::new(-o, -o), Vec2::new(o, -o)],
    }
}

/// Recompute the derived sample points
pub fn refresh_probes(actor: &mut Actor, offset: f32) {
    let [a, b] = probe_offsets(actor.direction, offset);
    actor.probes = [actor.pos + a, actor.pos + b];
}

/// Advance one tick. Returns false when the actor did not move
/// (stopped, or the turning state machine owns the position).
pub fn advance(actor: &mut Actor, step: f32, offset: f32) -> bool {
    if !actor.moving || actor.is_turning() {
        return false;
    }
    actor.pos += actor.direction.unit() * step;
    refresh_probes(actor, offset);
    true
}
