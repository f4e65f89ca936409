//! Plain value types shared by the maze generator, the game session and the terminal shell.

use std::collections::BTreeSet;

/// State of a single grid cell.
///
/// This enumeration holds the only information a maze stores about each of its cells. The
/// generator starts from a grid made entirely of walls and opens cells as it carves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell.
    ///
    /// This variant represents a wall. The outer ring of every generated maze is made of these,
    /// and the player can never stand on one.
    Wall,
    /// Walkable cell.
    ///
    /// This variant represents either a carved room or the passage joining two rooms.
    Open,
}

impl Cell {
    /// Returns the character used for this cell in the text rendering of a grid.
    pub const fn to_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
        }
    }
}

/// Coordinates of a cell in a grid, with `x` growing to the right and `y` growing downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    /// Cell in which the player starts and from which carving begins.
    pub const START: Self = Self::new(1, 1);

    /// Builds a position from its column and row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position displaced by the given signed offsets.
    ///
    /// Returns [`None`] when the result would have a negative coordinate. Upper bounds are not
    /// checked here since they depend on the grid the position is used with.
    pub const fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self::new(x, y))
    }

    /// Returns the neighbouring position one cell away in the given direction.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

/// Directional move request.
///
/// The declaration order is the order in which simultaneous requests are evaluated within a tick;
/// the derived [`Ord`] relies on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column zero.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions in evaluation order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the unit `(dx, dy)` displacement of this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Terminal condition of a game session.
///
/// This enumeration is always derived from the player and goal positions and never stored, so
/// moving off the goal after reaching it puts the session back into [`SessionState::Playing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Game in progress.
    ///
    /// This variant represents a session whose player has not reached the goal yet, or has walked
    /// off it again.
    Playing,
    /// Goal reached.
    ///
    /// This variant represents a session whose player stands on the goal. The interface shows the
    /// win message while the session stays in this state.
    Won,
}

/// Input gathered during one tick of the game loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Whether a fresh maze was requested during the tick.
    pub regenerate: bool,
    /// Directions requested during the tick, iterated in evaluation order.
    pub directions: BTreeSet<Direction>,
}

impl TickInput {
    /// Records a directional request.
    ///
    /// This function inserts the direction into the set of the tick. Repeated requests for the
    /// same direction, such as the press and the repeats of a held key, collapse into one.
    pub fn request(&mut self, direction: Direction) {
        let _ = self.directions.insert(direction);
    }

    /// Returns whether the tick carries no request at all.
    pub fn is_empty(&self) -> bool {
        !self.regenerate && self.directions.is_empty()
    }
}
