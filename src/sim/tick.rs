//! Fixed timestep simulation tick
//!
//! One tick runs, in order: fall animation (which locks control), movement,
//! turning, ground detection, interactions. A tick never suspends; the
//! caller observes either the state before it or the state after it.

use super::event::GameEvent;
use super::ground::{self, GroundVerdict};
use super::interact;
use super::movement::{self, refresh_probes};
use super::state::{FallOutcome, Session};
use super::turning;

/// Ladder command from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderCommand {
    Attach(usize),
    Detach,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub ladder: Option<LadderCommand>,
}

/// Advance the session by one fixed timestep and return the signals it raised
pub fn tick(session: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    session.time_ticks += 1;

    // A failed sample only stops the actor for the tick it happened on
    if session.halted {
        session.halted = false;
        session.actor.moving = true;
    }

    if let Some(command) = input.ladder {
        let to = match command {
            LadderCommand::Attach(slot) => Some(slot),
            LadderCommand::Detach => None,
        };
        if let Err(err) = session.move_ladder(to) {
            log::warn!("Ladder command {:?} rejected: {}", command, err);
        }
    }

    // Control is locked until the fall animation has run its course
    if session.fall.is_falling() {
        let frame_ticks = session.tuning.fall_frame_ticks;
        let max_frame = session.tuning.fall_frames;
        if session.fall.advance(frame_ticks, max_frame) {
            let level = session.context.index;
            events.push(match session.fall_outcome {
                FallOutcome::Restart => GameEvent::Restart { level },
                FallOutcome::Advance { next_level } => GameEvent::Advance { level: next_level },
            });
        }
        return events;
    }

    let step = session.step();
    let offset = session.probe_offset();
    let radius = session.rotation_radius();

    movement::advance(&mut session.actor, step, offset);
    turning::step_turn(&mut session.actor, step, radius, offset);

    if session.actor.moving {
        let verdict = ground::sample(
            &session.ground,
            &session.actor,
            session.ladder_slot(),
            session.nudge_length(),
        );
        match verdict {
            Err(err) => {
                log::warn!("Ground sample failed, halting actor: {}", err);
                session.actor.moving = false;
                session.halted = true;
                events.push(GameEvent::Halted {
                    pos: session.actor.pos,
                });
                return events;
            }
            Ok(GroundVerdict::OffPath) => {
                log::info!(
                    "Fell off the path at ({:.0}, {:.0}) facing {:?}",
                    session.actor.pos.x,
                    session.actor.pos.y,
                    session.actor.direction
                );
                session.fall_outcome = FallOutcome::Restart;
                session.fall.begin();
                events.push(GameEvent::Fall {
                    pos: session.actor.pos,
                });
                return events;
            }
            Ok(GroundVerdict::Edge { nudge }) => {
                session.actor.pos += nudge;
                refresh_probes(&mut session.actor, offset);
            }
            Ok(GroundVerdict::OnPath | GroundVerdict::Bridged) => {}
        }
    }

    interact::resolve(session, &mut events);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{ArrowDef, LevelDef, OrientedDef, path_run};
    use crate::sim::direction::{Direction, Orientation};
    use crate::sim::grid::{Grid, GridPos};
    use crate::sim::state::LevelContext;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn context(best_turns: Option<u32>) -> LevelContext {
        LevelContext {
            index: 0,
            count: 2,
            best_turns,
            seed: 42,
        }
    }

    fn load(def: &LevelDef, best_turns: Option<u32>) -> Session {
        Session::load(def, context(best_turns), Grid::default(), Tuning::default()).unwrap()
    }

    fn run_until<F>(session: &mut Session, max_ticks: u32, mut done: F) -> Vec<GameEvent>
    where
        F: FnMut(&Session, &[GameEvent]) -> bool,
    {
        let input = TickInput::default();
        let mut all = Vec::new();
        for _ in 0..max_ticks {
            let events = tick(session, &input);
            let stop = done(session, &events);
            all.extend(events);
            if stop {
                break;
            }
        }
        all
    }

    /// Corridor along row 1 that bends down at column 5
    fn bend_level() -> LevelDef {
        LevelDef {
            name: "bend".into(),
            cols: 10,
            rows: 12,
            path: [
                path_run(GridPos::new(1, 1), GridPos::new(6, 1)),
                path_run(GridPos::new(5, 1), GridPos::new(5, 10)),
            ]
            .concat(),
            start: GridPos::new(1, 1),
            start_direction: Direction::Right,
            exit: GridPos::new(5, 9),
            arrows: vec![ArrowDef {
                at: GridPos::new(5, 1),
                direction: Direction::Down,
            }],
            artifacts: vec![GridPos::new(5, 7)],
            ..Default::default()
        }
    }

    #[test]
    fn test_arrow_deflects_down() {
        let mut session = load(&bend_level(), None);
        let arrow_pos = session.arrows[0].pos;

        run_until(&mut session, 200, |s, _| {
            !s.actor.is_turning() && s.actor.direction == Direction::Down
        });

        assert_eq!(session.actor.direction, Direction::Down);
        assert_eq!(session.actor.pos, arrow_pos);
        assert_eq!(session.actor.rotation, 0.0);
        assert_eq!(session.turns, 1);
        assert!(session.arrows.is_empty());
        assert!(!session.fall.is_falling());
    }

    #[test]
    fn test_new_best_after_collecting_artifact() {
        let mut session = load(&bend_level(), Some(5));
        session.turns = 2;

        let events = run_until(&mut session, 600, |_, events| {
            events.iter().any(|e| matches!(e, GameEvent::Advance { .. }))
        });

        assert!(session.artifacts.is_empty());
        assert_eq!(session.turns, 3);
        assert_eq!(session.best_turns, Some(3));
        let new_best: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::NewBest { .. }))
            .collect();
        assert_eq!(new_best, vec![&GameEvent::NewBest { level: 0, turns: 3 }]);
        assert!(events.contains(&GameEvent::Advance { level: 1 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Fall { .. })));
    }

    #[test]
    fn test_walking_off_the_end_falls_and_restarts() {
        let mut def = bend_level();
        def.arrows.clear();
        let mut session = load(&def, None);

        let events = run_until(&mut session, 600, |_, events| {
            events.iter().any(|e| matches!(e, GameEvent::Restart { .. }))
        });

        let fall_at = events
            .iter()
            .position(|e| matches!(e, GameEvent::Fall { .. }))
            .unwrap();
        let restart_at = events
            .iter()
            .position(|e| matches!(e, GameEvent::Restart { level: 0 }))
            .unwrap();
        assert!(fall_at < restart_at);
        assert_eq!(session.falling_frame(), None);
        assert_eq!(session.turns, 0);
    }

    #[test]
    fn test_fall_runs_to_completion_on_solid_ground() {
        let mut def = bend_level();
        def.arrows.clear();
        let mut session = load(&def, None);

        run_until(&mut session, 600, |s, _| s.fall.is_falling());
        let fell_at = session.actor.pos;

        // Paint the whole board walkable: the animation still plays out
        session.ground.paint(Vec2::splat(-1.0e4), Vec2::splat(1.0e4), true);

        let input = TickInput::default();
        let frames = session.tuning.fall_frames;
        let per_frame = session.tuning.fall_frame_ticks;
        let mut seen = Vec::new();
        let mut restarted = false;
        for _ in 0..(frames + 2) * per_frame {
            let events = tick(&mut session, &input);
            if let Some(frame) = session.falling_frame() {
                seen.push(frame);
            }
            if events.contains(&GameEvent::Restart { level: 0 }) {
                restarted = true;
                break;
            }
        }
        assert!(restarted);
        assert_eq!(seen.last(), Some(&frames));
        assert_eq!(session.actor.pos, fell_at);
    }

    #[test]
    fn test_one_foot_off_is_nudged_back() {
        let mut def = bend_level();
        def.arrows.clear();
        let mut session = load(&def, None);
        let unit = session.grid.unit;
        // Drift downward so the lower probe hangs over the void below row 1
        session.actor.pos.y += unit * 0.6;
        let before = session.actor.pos;

        let events = tick(&mut session, &TickInput::default());
        assert!(events.is_empty());
        assert!(!session.fall.is_falling());
        assert_eq!(session.actor.pos.y, before.y - unit * 0.5);
    }

    #[test]
    fn test_ladder_bridges_gap_and_locks() {
        let def = LevelDef {
            name: "gap".into(),
            cols: 16,
            rows: 6,
            path: [
                path_run(GridPos::new(1, 2), GridPos::new(5, 2)),
                path_run(GridPos::new(9, 2), GridPos::new(14, 2)),
            ]
            .concat(),
            start: GridPos::new(2, 2),
            start_direction: Direction::Right,
            exit: GridPos::new(13, 2),
            ladder: Some(0),
            slots: vec![OrientedDef {
                at: GridPos::new(7, 2),
                orientation: Orientation::Horizontal,
            }],
            ..Default::default()
        };

        let mut session = load(&def, None);
        let events = run_until(&mut session, 400, |s, _| s.on_ladder);
        assert!(events.is_empty());

        let detach = TickInput {
            ladder: Some(LadderCommand::Detach),
        };
        tick(&mut session, &detach);
        assert_eq!(session.ladder, Some(0));

        let events = run_until(&mut session, 600, |_, events| {
            events.iter().any(|e| matches!(e, GameEvent::LevelUp { .. }))
        });
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Fall { .. })));

        // Without the ladder the same walk falls into the gap
        let mut session = load(&def, None);
        tick(&mut session, &detach);
        assert_eq!(session.ladder, None);
        let events = run_until(&mut session, 400, |s, _| s.fall.is_falling());
        assert!(events.iter().any(|e| matches!(e, GameEvent::Fall { .. })));
    }

    #[test]
    fn test_sampling_outside_board_halts() {
        let mut session = load(&bend_level(), None);
        let offset = session.probe_offset();
        session.actor.pos = Vec2::new(-100.0, -100.0);
        refresh_probes(&mut session.actor, offset);
        session.actor.moving = true;

        let events = tick(&mut session, &TickInput::default());
        assert!(!session.actor.moving);
        assert!(session.halted);
        assert!(matches!(events.as_slice(), [GameEvent::Halted { .. }]));

        // The next tick starts fresh: back on the path it walks on
        let start = session.grid.to_screen(GridPos::new(2, 1));
        session.actor.pos = start;
        refresh_probes(&mut session.actor, offset);
        let events = tick(&mut session, &TickInput::default());
        assert!(events.is_empty());
        assert!(session.actor.moving);
        assert!(!session.halted);
        assert!(session.actor.pos.x > start.x);
    }

    #[test]
    fn test_turn_counter_ignores_pickups() {
        let mut def = bend_level();
        def.arrows.clear();
        def.path = path_run(GridPos::new(1, 1), GridPos::new(8, 1));
        def.keys = vec![GridPos::new(3, 1)];
        def.artifacts = vec![GridPos::new(4, 1)];
        let mut session = load(&def, None);

        let events = run_until(&mut session, 300, |s, _| s.artifacts.is_empty());
        assert!(events.iter().any(|e| matches!(e, GameEvent::Key { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::LastArtifact { .. })));
        assert_eq!(session.turns, 0);
    }

    #[test]
    fn test_locked_door_turns_actor_back_off_the_edge() {
        let def = LevelDef {
            name: "door".into(),
            cols: 12,
            rows: 5,
            path: path_run(GridPos::new(1, 2), GridPos::new(10, 2)),
            start: GridPos::new(2, 2),
            start_direction: Direction::Right,
            exit: GridPos::new(10, 2),
            artifacts: vec![GridPos::new(9, 2)],
            doors: vec![OrientedDef {
                at: GridPos::new(6, 2),
                orientation: Orientation::Vertical,
            }],
            ..Default::default()
        };
        let mut session = load(&def, None);
        let door = session.doors[0].pos;
        let input = TickInput::default();

        let mut bounces = 0;
        let mut turned_back = false;
        let mut left_door = false;
        let mut fell = false;
        for _ in 0..1000 {
            let events = tick(&mut session, &input);
            bounces += events
                .iter()
                .filter(|e| matches!(e, GameEvent::DoorBounce { .. }))
                .count();
            if bounces > 0 && !turned_back && !session.actor.is_turning() {
                // The reversal completes on the door point, still inside its area
                turned_back = true;
                assert_eq!(session.actor.direction, Direction::Left);
                assert_eq!(session.actor.pos, door);
                assert_eq!(session.actor.rotation, 0.0);
                assert!(session.door_suppressed);
            }
            if turned_back && !session.door_suppressed {
                left_door = true;
            }
            if events.iter().any(|e| matches!(e, GameEvent::Fall { .. })) {
                // Falling starts on the tick the feet leave the path
                assert_eq!(session.falling_frame(), Some(0));
                fell = true;
                break;
            }
        }

        assert!(turned_back);
        assert!(left_door);
        assert!(fell);
        assert_eq!(bounces, 1);
        assert_eq!(session.turns, 1);
        assert_eq!(session.doors.len(), 1);
        assert!(session.actor.pos.x < session.grid.unit * 0.5);

        let events = run_until(&mut session, 200, |_, events| {
            events.contains(&GameEvent::Restart { level: 0 })
        });
        assert!(events.contains(&GameEvent::Restart { level: 0 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Halted { .. })));
    }
}
