//! Turning state machine
//!
//! A turn starts when the actor touches a deflector and ends on the
//! deflector's own grid point. While turning, the actor keeps walking toward
//! that end point and `rotation` (the offset from the new heading) shrinks
//! linearly over the last `rotation_radius` of travel. Further away than the
//! radius the rotation holds at its starting extreme, so the actor swings into
//! the curve at the last moment.

use glam::Vec2;

use super::direction::{Direction, TurnKind};
use super::entity::Actor;
use super::movement::refresh_probes;

/// An in-progress turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnState {
    pub kind: TurnKind,
    /// Where the turn completes (the deflector's position)
    pub end_point: Vec2,
    /// Direction taken when the turn completes
    pub target: Direction,
    /// Sweep direction. Fixed for quarter turns, random for reversals.
    pub clockwise: bool,
}

/// Rotation offset from the target heading, degrees.
///
/// Clockwise sweeps start negative (the sprite still faces the old heading,
/// which is behind the target) and counter-clockwise sweeps start positive.
pub fn rotation_at(kind: TurnKind, clockwise: bool, remaining: f32, radius: f32) -> f32 {
    let fraction = if radius > 0.0 {
        (remaining / radius).clamp(0.0, 1.0)
    } else if remaining > 0.0 {
        1.0
    } else {
        0.0
    };
    let sign = if clockwise { -1.0 } else { 1.0 };
    sign * kind.sweep() * fraction
}

/// Distance left to the end point along the current axis of travel
fn remaining(actor: &Actor, end_point: Vec2) -> f32 {
    (end_point - actor.pos).dot(actor.direction.unit()).max(0.0)
}

/// Start a turn toward `end_point`.
///
/// `reverse_clockwise` picks the sweep of a reversal and is ignored for
/// quarter turns.
///
/// # Panics
///
/// If the actor is already turning. Deflectors are consumed or suppressed on
/// trigger, so a second turn can never legitimately overlap the first.
pub fn begin_turn(
    actor: &mut Actor,
    kind: TurnKind,
    end_point: Vec2,
    reverse_clockwise: bool,
    radius: f32,
) {
    assert!(
        actor.turn.is_none(),
        "begin_turn called while a turn is in progress"
    );
    let clockwise = match kind {
        TurnKind::None => return,
        TurnKind::Right => true,
        TurnKind::Left => false,
        TurnKind::Back => reverse_clockwise,
    };
    let target = actor.direction.turned(kind);
    actor.rotation = rotation_at(kind, clockwise, remaining(actor, end_point), radius);
    actor.turn = Some(TurnState {
        kind,
        end_point,
        target,
        clockwise,
    });
    log::debug!(
        "turn {:?}: {:?} -> {:?} at ({:.1}, {:.1})",
        kind,
        actor.direction,
        target,
        end_point.x,
        end_point.y
    );
}

/// Advance an in-progress turn by one tick.
///
/// Returns the new direction on the tick the turn completes.
pub fn step_turn(actor: &mut Actor, step: f32, radius: f32, probe_offset: f32) -> Option<Direction> {
    let turn = actor.turn?;

    if actor.moving {
        let delta = turn.end_point - actor.pos;
        let dist = delta.length();
        if dist <= step {
            actor.pos = turn.end_point;
        } else {
            actor.pos += delta / dist * step;
        }
    }

    if actor.pos == turn.end_point {
        actor.direction = turn.target;
        actor.rotation = 0.0;
        actor.turn = None;
        refresh_probes(actor, probe_offset);
        return Some(turn.target);
    }

    actor.rotation = rotation_at(
        turn.kind,
        turn.clockwise,
        remaining(actor, turn.end_point),
        radius,
    );
    refresh_probes(actor, probe_offset);
    None
}
