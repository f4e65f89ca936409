//! Perfect maze generation by randomized depth-first carving.
//!
//! Carving starts at [`Position::START`] and walks the grid two cells at a time, so every carved
//! room sits on odd coordinates and every passage between two rooms is exactly one cell wide. The
//! walk is the classic recursive backtracker expressed with an explicit stack: each frame keeps the
//! shuffled step vectors of its cell and a cursor into them, which reproduces the recursive visit
//! order (and its consumption of randomness) without tying the depth to the call stack.

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, seq::SliceRandom as _, Rng, SeedableRng as _};
use tracing::{debug, trace};

use crate::{
    grid::{Dimensions, Grid},
    types::{Cell, Position},
};

/// Step vectors between neighbouring rooms, before shuffling.
const CARVE_STEPS: [(isize, isize); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// One pending cell of the depth-first walk.
struct CarveFrame {
    /// Room being carved from.
    cell: Position,
    /// Step vectors in the order they are tried from this room.
    steps: [(isize, isize); 4],
    /// Index of the next step vector to try.
    next: usize,
}

/// Builder of perfect mazes driven by a random source.
///
/// The random source is injected so that mazes can be reproduced from a seed; by default it is a
/// [`StdRng`] seeded from the operating system.
#[derive(Debug, Clone)]
pub struct MazeGenerator<R = StdRng> {
    /// Source of the shuffles that decide the shape of each maze.
    rng: R,
}

impl MazeGenerator {
    /// Creates a generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Creates a generator whose mazes are fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Creates a generator drawing its randomness from `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Carves a new perfect maze of the given size.
    ///
    /// The outer ring of the returned grid is entirely [`Cell::Wall`] and the open cells form a
    /// spanning tree reachable from [`Position::START`].
    pub fn generate(&mut self, dimensions: Dimensions) -> Grid {
        let mut grid = Grid::walled(dimensions);
        let mut stack = vec![self.enter(&mut grid, Position::START)];

        while let Some(frame) = stack.last_mut() {
            let Some((dx, dy)) = frame.steps.get(frame.next).copied() else {
                let _ = stack.pop();
                continue;
            };
            frame.next += 1;
            let cell = frame.cell;

            let Some(neighbour) = cell.offset(dx, dy) else {
                continue;
            };
            if !grid.is_interior(neighbour) || grid.get(neighbour) != Some(Cell::Wall) {
                continue;
            }

            if let Some(passage) = cell.offset(dx / 2, dy / 2) {
                grid.set(passage, Cell::Open);
            }
            let child = self.enter(&mut grid, neighbour);
            stack.push(child);
        }

        debug!(
            width = dimensions.width(),
            height = dimensions.height(),
            open_cells = grid.open_count(),
            "maze generated"
        );
        trace!("carved maze:\n{grid}");

        grid
    }

    /// Validates raw dimensions and carves a maze of that size.
    ///
    /// # Errors
    ///
    /// This function returns a configuration error if either side is even or shorter than three
    /// cells.
    pub fn generate_with(&mut self, width: usize, height: usize) -> Result<Grid> {
        Ok(self.generate(Dimensions::new(width, height)?))
    }

    /// Opens `cell` and prepares its frame with a freshly shuffled set of step vectors.
    fn enter(&mut self, grid: &mut Grid, cell: Position) -> CarveFrame {
        grid.set(cell, Cell::Open);

        let mut steps = CARVE_STEPS;
        steps.shuffle(&mut self.rng);

        CarveFrame {
            cell,
            steps,
            next: 0,
        }
    }
}
