//! Cardinal directions and turn kinds
//!
//! Screen space has y pointing down, so clockwise means increasing heading:
//! Right = 0°, Down = 90°, Left = 180°, Up = 270°.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HALF_TURN, QUARTER_TURN};

/// Direction of travel (also selects the falling sprite set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// 90° clockwise
    pub fn clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// 90° counter-clockwise
    pub fn counter_clockwise(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Direction that results from applying a turn
    pub fn turned(self, kind: TurnKind) -> Self {
        match kind {
            TurnKind::None => self,
            TurnKind::Right => self.clockwise(),
            TurnKind::Left => self.counter_clockwise(),
            TurnKind::Back => self.opposite(),
        }
    }

    /// Unit step in screen space
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Up => Vec2::NEG_Y,
        }
    }

    /// Heading in degrees, clockwise from Right
    pub fn degrees(self) -> f32 {
        self.index() as f32 * QUARTER_TURN
    }
}

/// Deflection applied by an arrow or a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurnKind {
    #[default]
    None,
    Right,
    Left,
    Back,
}

impl TurnKind {
    /// Turn that takes `from` onto `to`
    pub fn between(from: Direction, to: Direction) -> Self {
        if to == from.clockwise() {
            TurnKind::Right
        } else if to == from.counter_clockwise() {
            TurnKind::Left
        } else if to == from.opposite() {
            TurnKind::Back
        } else {
            TurnKind::None
        }
    }

    /// Total sweep of the turn, degrees
    pub fn sweep(self) -> f32 {
        match self {
            TurnKind::None => 0.0,
            TurnKind::Right | TurnKind::Left => QUARTER_TURN,
            TurnKind::Back => HALF_TURN,
        }
    }
}

/// Orientation of doors and ladder slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit vector along the orientation
    pub fn axis(self) -> Vec2 {
        match self {
            Orientation::Horizontal => Vec2::X,
            Orientation::Vertical => Vec2::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    #[test]
    fn test_clockwise_cycle() {
        assert_eq!(Direction::Right.clockwise(), Direction::Down);
        assert_eq!(Direction::Down.clockwise(), Direction::Left);
        assert_eq!(Direction::Left.clockwise(), Direction::Up);
        assert_eq!(Direction::Up.clockwise(), Direction::Right);
    }

    #[test]
    fn test_between() {
        assert_eq!(TurnKind::between(Direction::Right, Direction::Down), TurnKind::Right);
        assert_eq!(TurnKind::between(Direction::Right, Direction::Up), TurnKind::Left);
        assert_eq!(TurnKind::between(Direction::Up, Direction::Down), TurnKind::Back);
        assert_eq!(TurnKind::between(Direction::Left, Direction::Left), TurnKind::None);
    }

    #[test]
    fn test_unit_matches_heading() {
        for dir in Direction::ALL {
            let rad = dir.degrees().to_radians();
            let expected = Vec2::new(rad.cos(), rad.sin());
            assert!((dir.unit() - expected).length() < 1e-5);
        }
    }

    proptest! {
        #[test]
        fn quarter_turns_change_direction_and_cancel(dir in any_direction()) {
            let right = dir.turned(TurnKind::Right);
            let left = dir.turned(TurnKind::Left);
            prop_assert_ne!(right, dir);
            prop_assert_ne!(left, dir);
            prop_assert_eq!(right.turned(TurnKind::Left), dir);
            prop_assert_eq!(left.turned(TurnKind::Right), dir);
        }

        #[test]
        fn turn_back_is_opposite(dir in any_direction()) {
            let back = dir.turned(TurnKind::Back);
            prop_assert_eq!(back.unit(), -dir.unit());
            prop_assert_eq!(back.turned(TurnKind::Back), dir);
        }

        #[test]
        fn between_inverts_turned(dir in any_direction(), to in any_direction()) {
            prop_assert_eq!(dir.turned(TurnKind::between(dir, to)), to);
        }
    }
}
