use std::fmt;

/// Which half of a migration's change description is running.
///
/// A change description receives one of the two values and gates
/// direction-specific logic through [`Direction::up`] and [`Direction::down`]
/// instead of branching on a raw boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn is_up(self) -> bool {
        matches!(self, Direction::Up)
    }

    pub fn is_down(self) -> bool {
        matches!(self, Direction::Down)
    }

    /// Run `f` only when migrating forward.
    pub fn up<R>(self, f: impl FnOnce() -> R) -> Option<R> {
        if self.is_up() {
            Some(f())
        } else {
            None
        }
    }

    /// Run `f` only when rolling back.
    ///
    /// This is where a change description hooks the irreversible guard:
    /// `direction.down(|| schema.irreversible("drops data"))`.
    pub fn down<R>(self, f: impl FnOnce() -> R) -> Option<R> {
        if self.is_down() {
            Some(f())
        } else {
            None
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Direction::Up"),
            Direction::Down => write!(f, "Direction::Down"),
        }
    }
}
