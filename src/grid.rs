//! Maze grid storage and dimension validation.
//!
//! This module contains the [`Grid`] type holding the wall/open state of every cell of a maze and
//! the [`Dimensions`] type that guarantees a grid can be carved into a perfect maze.

use std::fmt::{self, Display};

use color_eyre::eyre::{ensure, Result};

use crate::types::{Cell, Position};

/// Smallest side length a maze grid may have: one room surrounded by its wall ring.
pub(crate) const MIN_SIDE: usize = 3;

/// Validated width and height of a maze grid.
///
/// Carving only yields an enclosed, fully connected maze on grids whose sides are odd and at least
/// three cells long. Holding a value of this type proves both conditions hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
}

impl Dimensions {
    /// Validates a width and height pair.
    ///
    /// # Errors
    ///
    /// This function returns a configuration error if either side is even or shorter than three
    /// cells.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_side("width", width)?;
        check_side("height", height)?;

        Ok(Self { width, height })
    }

    /// Validates the dimensions of a square grid.
    ///
    /// # Errors
    ///
    /// This function returns a configuration error under the same conditions as
    /// [`Dimensions::new`].
    pub fn square(side: usize) -> Result<Self> {
        Self::new(side, side)
    }

    /// Returns the number of columns.
    pub const fn width(self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub const fn height(self) -> usize {
        self.height
    }

    /// Returns the total number of cells.
    pub const fn area(self) -> usize {
        self.width * self.height
    }
}

/// Checks a single side length against the carving preconditions.
fn check_side(name: &str, value: usize) -> Result<()> {
    ensure!(
        value >= MIN_SIDE,
        "maze {name} must be at least {MIN_SIDE}, got {value}"
    );
    ensure!(value % 2 == 1, "maze {name} must be odd, got {value}");

    Ok(())
}

/// Rectangular matrix of wall and open cells.
///
/// Cells are stored row by row. The type exposes no public mutators: grids are produced whole by
/// the maze generator and replaced, never patched, on regeneration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Size of the grid.
    dimensions: Dimensions,
    /// Cell states in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid in which every cell is a wall.
    ///
    /// This function creates the starting point of carving. The generator opens rooms and
    /// passages in it until every room is connected.
    pub(crate) fn walled(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![Cell::Wall; dimensions.area()],
        }
    }

    /// Returns the size of the grid.
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the number of columns.
    pub const fn width(&self) -> usize {
        self.dimensions.width
    }

    /// Returns the number of rows.
    pub const fn height(&self) -> usize {
        self.dimensions.height
    }

    /// Converts a position into an index into the cell storage, if it lies inside the grid.
    const fn index(&self, position: Position) -> Option<usize> {
        if position.x < self.dimensions.width && position.y < self.dimensions.height {
            Some(position.y * self.dimensions.width + position.x)
        } else {
            None
        }
    }

    /// Returns the state of the cell at `position`, or [`None`] when it lies outside the grid.
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Returns whether `position` lies inside the grid and is walkable.
    pub fn is_open(&self, position: Position) -> bool {
        self.get(position) == Some(Cell::Open)
    }

    /// Returns whether `position` lies strictly inside the outer wall ring.
    ///
    /// This function bounds the carving walk: cells on the ring are never opened, which keeps
    /// every generated maze enclosed.
    pub const fn is_interior(&self, position: Position) -> bool {
        position.x > 0
            && position.y > 0
            && position.x < self.dimensions.width - 1
            && position.y < self.dimensions.height - 1
    }

    /// Overwrites the cell at `position`.
    ///
    /// This function silently ignores positions outside the grid. It is only reachable from
    /// inside the crate, which keeps grids read-only for the interface.
    pub(crate) fn set(&mut self, position: Position, cell: Cell) {
        if let Some(slot) = self
            .index(position)
            .and_then(|index| self.cells.get_mut(index))
        {
            *slot = cell;
        }
    }

    /// Iterates over every cell with its position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = self.dimensions.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Position::new(index % width, index / width), *cell))
    }

    /// Iterates over the positions of every cell in the given state.
    pub fn positions_of(&self, state: Cell) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(move |(_, cell)| *cell == state)
            .map(|(position, _)| position)
    }

    /// Returns the number of walkable cells.
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Open).count()
    }

    /// Builds a grid from rows of `#` (wall) and `.` (open) characters.
    ///
    /// Rows are not validated against the carving preconditions beyond what [`Dimensions`]
    /// enforces, so hand-written layouts may contain open border cells.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let dimensions = Dimensions::new(width, height).expect("test grid has valid dimensions");

        let mut grid = Self::walled(dimensions);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "test grid rows must share one width");
            for (x, byte) in row.bytes().enumerate() {
                if byte == b'.' {
                    grid.set(Position::new(x, y), Cell::Open);
                }
            }
        }

        grid
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dimensions.width) {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
