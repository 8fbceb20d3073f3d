//! Interaction resolver
//!
//! Runs after the actor's pose is final for the tick and tests its centre
//! against each entity kind in a fixed order: arrows, artifacts, ornaments,
//! teleports, keys, ladder, doors, exit, then the actor itself. Each stage
//! sees the collections as left by the previous ones. Hits are located first
//! and removed afterwards, so no collection is mutated while it is iterated.

use super::direction::TurnKind;
use super::event::GameEvent;
use super::movement::refresh_probes;
use super::state::{FallOutcome, Session};
use super::turning::begin_turn;

/// Resolve every interaction for one tick
pub fn resolve(session: &mut Session, events: &mut Vec<GameEvent>) {
    resolve_arrows(session, events);
    resolve_artifacts(session, events);
    // Ornaments are decorative
    resolve_teleports(session, events);
    resolve_keys(session, events);
    resolve_ladder(session);
    resolve_doors(session, events);
    resolve_exit(session, events);
    resolve_actor(session);
}

fn resolve_arrows(session: &mut Session, events: &mut Vec<GameEvent>) {
    if session.actor.is_turning() {
        return;
    }
    let center = session.actor.pos;
    let Some(index) = session.arrows.iter().position(|a| a.area.contains(center)) else {
        return;
    };
    let arrow = session.arrows.remove(index);
    let kind = TurnKind::between(session.actor.direction, arrow.direction);
    if kind == TurnKind::None {
        // Already heading the arrow's way: consumed without a deflection
        log::debug!("arrow at ({:.0}, {:.0}) passed straight", arrow.pos.x, arrow.pos.y);
        return;
    }

    let bias = session.reverse_bias();
    let radius = session.rotation_radius();
    begin_turn(&mut session.actor, kind, arrow.pos, bias, radius);
    session.turns += 1;
    events.push(GameEvent::Turn {
        pos: arrow.pos,
        kind,
    });
}

fn resolve_artifacts(session: &mut Session, events: &mut Vec<GameEvent>) {
    let center = session.actor.pos;
    let Some(index) = session.artifacts.iter().position(|a| a.area.contains(center)) else {
        return;
    };
    let artifact = session.artifacts.remove(index);
    if session.artifacts.is_empty() {
        log::info!("All artifacts collected, exit open");
        events.push(GameEvent::LastArtifact { pos: artifact.pos });
    } else {
        log::debug!("{} artifacts left", session.artifacts.len());
        events.push(GameEvent::Artifact { pos: artifact.pos });
    }
}

/// Move the actor to the partner of teleport `from`, one grid unit past it
/// along the actor's direction of travel. Returns the arrival point.
pub fn teleport(session: &mut Session, from: usize) -> Option<glam::Vec2> {
    if session.teleports.len() != 2 || from > 1 {
        return None;
    }
    let partner = session.teleports[1 - from].pos;
    let arrival = partner + session.teleport_offset(session.actor.direction.unit());
    let offset = session.probe_offset();
    session.actor.pos = arrival;
    refresh_probes(&mut session.actor, offset);
    Some(arrival)
}

fn resolve_teleports(session: &mut Session, events: &mut Vec<GameEvent>) {
    // The turning state machine owns the position mid-turn
    if session.teleports.len() != 2 || session.actor.is_turning() {
        return;
    }
    let center = session.actor.pos;
    let Some(from) = session.teleports.iter().position(|t| t.area.contains(center)) else {
        return;
    };
    if let Some(pos) = teleport(session, from) {
        log::debug!("teleported to ({:.0}, {:.0})", pos.x, pos.y);
        events.push(GameEvent::Teleport { pos });
    }
}

fn resolve_keys(session: &mut Session, events: &mut Vec<GameEvent>) {
    let center = session.actor.pos;
    let Some(index) = session.keys.iter().position(|k| k.area.contains(center)) else {
        return;
    };
    let key = session.keys.remove(index);
    session.actor.keys += 1;
    events.push(GameEvent::Key { pos: key.pos });
}

fn resolve_ladder(session: &mut Session) {
    let center = session.actor.pos;
    session.on_ladder = session
        .ladder_slot()
        .is_some_and(|slot| slot.bridge.contains(center));
}

fn resolve_doors(session: &mut Session, events: &mut Vec<GameEvent>) {
    let center = session.actor.pos;
    let Some(index) = session.doors.iter().position(|d| d.area.contains(center)) else {
        session.door_suppressed = false;
        return;
    };

    if session.actor.keys > 0 {
        let door = session.doors.remove(index);
        session.actor.keys -= 1;
        session.door_suppressed = false;
        log::debug!("door unlocked, {} keys left", session.actor.keys);
        events.push(GameEvent::DoorUnlock { pos: door.pos });
        return;
    }

    if session.door_suppressed || session.actor.is_turning() {
        return;
    }

    let end_point = session.doors[index].pos;
    let bias = session.reverse_bias();
    let radius = session.rotation_radius();
    begin_turn(&mut session.actor, TurnKind::Back, end_point, bias, radius);
    session.turns += 1;
    session.door_suppressed = true;
    events.push(GameEvent::Turn {
        pos: end_point,
        kind: TurnKind::Back,
    });
    events.push(GameEvent::DoorBounce { pos: end_point });
}

fn resolve_exit(session: &mut Session, events: &mut Vec<GameEvent>) {
    if !session.exit_open() || !session.exit.area.contains(session.actor.pos) {
        return;
    }

    let level = session.context.index;
    let turns = session.turns;
    if session.best_turns.is_none_or(|best| turns < best) {
        log::info!("New best for level {}: {} turns", level + 1, turns);
        session.best_turns = Some(turns);
        events.push(GameEvent::NewBest { level, turns });
    }

    let next_level = session.context.next_index();
    log::info!("Level {} complete in {} turns", level + 1, turns);
    events.push(GameEvent::LevelUp {
        pos: session.exit.pos,
        next_level,
    });

    // Drop through the exit before the next level loads
    session.actor.pos = session.exit.pos;
    session.actor.turn = None;
    session.actor.rotation = 0.0;
    session.fall_outcome = FallOutcome::Advance { next_level };
    session.fall.begin();
}

fn resolve_actor(session: &mut Session) {
    let actor = &mut session.actor;
    if !actor.moving {
        return;
    }
    let per_frame = session.tuning.walk_frame_ticks.max(1) as u64;
    let frames = session.tuning.walk_frames.max(1) as u64;
    actor.frame = ((session.time_ticks / per_frame) % frames) as u32;
}
