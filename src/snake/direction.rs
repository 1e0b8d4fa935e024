use serde::{Deserialize, Serialize};

/// Heading of a snake segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnakeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SnakeDirection {
    /// Only quarter turns are allowed; reversing or repeating is not a turn.
    #[must_use]
    pub const fn can_change(self, new: SnakeDirection) -> bool {
        self.is_vertical() != new.is_vertical()
    }

    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, SnakeDirection::Up | SnakeDirection::Down)
    }

    /// Cell offset for one step; y grows downward.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            SnakeDirection::Up => (0, -1),
            SnakeDirection::Down => (0, 1),
            SnakeDirection::Left => (-1, 0),
            SnakeDirection::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_change() {
        use SnakeDirection::*;

        assert!(Up.can_change(Left));
        assert!(Up.can_change(Right));
        assert!(Left.can_change(Down));
        assert!(!Up.can_change(Down));
        assert!(!Up.can_change(Up));
        assert!(!Right.can_change(Left));
    }

    #[test]
    fn test_delta() {
        assert_eq!(SnakeDirection::Up.delta(), (0, -1));
        assert_eq!(SnakeDirection::Right.delta(), (1, 0));
    }
}
