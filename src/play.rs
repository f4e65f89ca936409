//! Game session state and movement rules.

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, Rng};
use tracing::{info, trace};

use crate::{
    carving::MazeGenerator,
    grid::{Dimensions, Grid},
    types::{Direction, Position, SessionState, TickInput},
};

/// One playthrough of a square maze: the current grid, the player and the goal.
///
/// The session is the only owner of its grid and positions. The rendering side reads them through
/// the accessors and changes them only through [`GameSession::try_move`],
/// [`GameSession::regenerate`] and [`GameSession::apply_tick`].
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    /// Source of fresh grids.
    generator: MazeGenerator<R>,
    /// Validated size of every grid this session carves.
    dimensions: Dimensions,
    /// Current maze.
    grid: Grid,
    /// Where the player stands.
    player: Position,
    /// Where the player is heading; fixed for the lifetime of the session.
    goal: Position,
}

impl<R: Rng> GameSession<R> {
    /// Starts a session on a freshly carved `size` by `size` maze.
    ///
    /// The player starts at [`Position::START`] and the goal sits in the opposite corner room at
    /// `(size - 2, size - 2)`.
    ///
    /// # Errors
    ///
    /// This function returns a configuration error if `size` is even or smaller than three.
    pub fn new(size: usize, generator: MazeGenerator<R>) -> Result<Self> {
        Ok(Self::with_dimensions(Dimensions::square(size)?, generator))
    }

    /// Starts a session on a maze of already validated dimensions.
    ///
    /// This function cannot fail, since [`Dimensions`] already guarantees a carvable grid. The goal
    /// sits in the room at `(width - 2, height - 2)`.
    pub fn with_dimensions(dimensions: Dimensions, mut generator: MazeGenerator<R>) -> Self {
        let grid = generator.generate(dimensions);
        let goal = Position::new(dimensions.width() - 2, dimensions.height() - 2);

        info!(
            width = dimensions.width(),
            height = dimensions.height(),
            "session started"
        );

        Self {
            generator,
            dimensions,
            grid,
            player: Position::START,
            goal,
        }
    }

    /// Returns the current maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the side length of the maze.
    pub const fn size(&self) -> usize {
        self.dimensions.width()
    }

    /// Returns the player's position.
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Returns the goal's position.
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Returns whether the player stands on the goal.
    pub fn is_won(&self) -> bool {
        self.player == self.goal
    }

    /// Returns the state derived from the current positions.
    pub fn state(&self) -> SessionState {
        if self.is_won() {
            SessionState::Won
        } else {
            SessionState::Playing
        }
    }

    /// Moves the player one cell in `direction` if the target cell is inside the grid and open.
    ///
    /// Blocked moves leave the player where it is. The return value only reports whether the move
    /// happened; a blocked move is not an error.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        match self.player.step(direction) {
            Some(target) if self.grid.is_open(target) => {
                trace!(?direction, x = target.x, y = target.y, "player moved");
                self.player = target;
                true
            }
            _ => {
                trace!(?direction, "move blocked");
                false
            }
        }
    }

    /// Replaces the maze with a freshly carved one and puts the player back on the start cell.
    pub fn regenerate(&mut self) {
        self.grid = self.generator.generate(self.dimensions);
        self.player = Position::START;

        info!("maze regenerated");
    }

    /// Applies one tick of input and returns the resulting state.
    ///
    /// A regeneration request is honoured first. Directional requests are then tried one after the
    /// other in [`Direction::ALL`] order, each from wherever the previous one left the player.
    ///
    /// Requests are not checked against the position the tick started from, so two perpendicular
    /// requests never carry the player diagonally onto a wall cell. They may move the player two
    /// cells in one tick, one validated step at a time.
    pub fn apply_tick(&mut self, input: &TickInput) -> SessionState {
        if input.regenerate {
            self.regenerate();
        }
        for direction in &input.directions {
            let _ = self.try_move(*direction);
        }

        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carving::tests::assert_perfect_maze;

    /// Corridor maze with a single turn, used by most movement tests.
    ///
    /// ```text
    /// #####
    /// #...#
    /// ###.#
    /// #...#
    /// #####
    /// ```
    fn corridor_rows() -> [&'static str; 5] {
        ["#####", "#...#", "###.#", "#...#", "#####"]
    }

    /// Builds a seeded session and swaps in a hand-written grid.
    fn session_with(rows: &[&str]) -> GameSession {
        let grid = Grid::from_rows(rows);
        let mut session = GameSession::new(grid.width(), MazeGenerator::seeded(99))
            .expect("test grid has a valid size");
        session.grid = grid;
        session
    }

    #[test]
    fn test_new_session_initial_state() {
        let session =
            GameSession::new(21, MazeGenerator::seeded(1)).expect("21 is a valid size");

        assert_eq!(session.size(), 21);
        assert_eq!(session.player(), Position::new(1, 1));
        assert_eq!(session.goal(), Position::new(19, 19));
        assert_eq!(session.state(), SessionState::Playing);
        assert_perfect_maze(session.grid());
    }

    #[test]
    fn test_new_session_rejects_even_size() {
        let result = GameSession::new(20, MazeGenerator::seeded(1));

        assert!(result.is_err(), "even sizes must be rejected");
    }

    #[test]
    fn test_with_dimensions_matches_new() {
        let dimensions = Dimensions::square(13).expect("13 is a valid size");

        let validated = GameSession::with_dimensions(dimensions, MazeGenerator::seeded(6));
        let unvalidated = GameSession::new(13, MazeGenerator::seeded(6)).expect("valid size");

        assert_eq!(validated.grid(), unvalidated.grid());
        assert_eq!(validated.goal(), Position::new(11, 11));
        assert_eq!(validated.player(), Position::START);
    }

    #[test]
    fn test_goal_is_open_in_generated_maze() {
        let session = GameSession::new(9, MazeGenerator::seeded(4)).expect("valid size");

        assert!(session.grid().is_open(session.goal()), "goal must be walkable");
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let mut session = session_with(&corridor_rows());

        assert!(!session.try_move(Direction::Left), "(0, 1) is a wall");
        assert!(!session.try_move(Direction::Up), "(1, 0) is a wall");
        assert!(!session.try_move(Direction::Down), "(1, 2) is a wall");
        assert_eq!(session.player(), Position::new(1, 1));
    }

    #[test]
    fn test_move_into_open_cell() {
        let mut session = session_with(&corridor_rows());

        assert!(session.try_move(Direction::Right), "(2, 1) is open");
        assert_eq!(session.player(), Position::new(2, 1));
    }

    #[test]
    fn test_move_out_of_bounds_is_noop() {
        let mut session = session_with(&["#####", "....#", "#.###", "#...#", "#####"]);
        session.player = Position::new(0, 1);

        assert!(!session.try_move(Direction::Left), "x would leave the grid");
        assert_eq!(session.player(), Position::new(0, 1));

        assert!(session.try_move(Direction::Right), "back into the maze");
        assert_eq!(session.player(), Position::new(1, 1));
    }

    #[test]
    fn test_walk_to_goal_wins() {
        let mut session = session_with(&corridor_rows());

        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ] {
            assert!(session.try_move(direction), "{direction:?} should be open");
        }

        assert_eq!(session.player(), session.goal());
        assert!(session.is_won(), "player stands on the goal");
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn test_moving_after_win_is_allowed() {
        let mut session = session_with(&corridor_rows());
        session.player = session.goal();
        assert!(session.is_won(), "session starts on the goal");

        assert!(session.try_move(Direction::Left), "winning does not block moves");
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn test_regenerate_resets_player() {
        let mut session = session_with(&corridor_rows());
        session.player = session.goal();
        assert!(session.is_won(), "session starts on the goal");

        session.regenerate();

        assert!(!session.is_won(), "regeneration leaves the goal");
        assert_eq!(session.player(), Position::START);
        assert_eq!(session.goal(), Position::new(3, 3), "goal is fixed");
        assert_perfect_maze(session.grid());
    }

    #[test]
    fn test_successive_regenerations_stay_perfect() {
        let mut session = GameSession::new(15, MazeGenerator::from_entropy()).expect("valid size");

        for _ in 0..5 {
            session.regenerate();
            assert_perfect_maze(session.grid());
            assert_eq!(session.grid().width(), 15);
        }
    }

    #[test]
    fn test_tick_applies_directions_sequentially() {
        let mut session = session_with(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
        session.player = Position::new(3, 1);

        let mut input = TickInput::default();
        input.request(Direction::Left);
        input.request(Direction::Down);

        // Down first to (3, 2), then Left from there into the wall at (2, 2).
        let state = session.apply_tick(&input);

        assert_eq!(session.player(), Position::new(3, 2));
        assert_eq!(state, SessionState::Playing);
    }

    #[test]
    fn test_tick_perpendicular_moves_chain() {
        let mut session = session_with(&corridor_rows());
        session.player = Position::new(2, 1);

        let mut input = TickInput::default();
        input.request(Direction::Right);
        input.request(Direction::Down);

        // Down is blocked from (2, 1); Right then reaches (3, 1).
        let _ = session.apply_tick(&input);
        assert_eq!(session.player(), Position::new(3, 1));

        // Down now succeeds to (3, 2), and Right is blocked from there.
        let _ = session.apply_tick(&input);
        assert_eq!(session.player(), Position::new(3, 2));
    }

    #[test]
    fn test_tick_never_lands_on_diagonal_wall() {
        let mut session = session_with(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
        session.player = Position::new(1, 3);

        let mut input = TickInput::default();
        input.request(Direction::Up);
        input.request(Direction::Right);

        // Both (1, 2) and (2, 3) are open but the diagonal (2, 2) is a wall. Up is taken first and
        // Right is then blocked from (1, 2).
        let _ = session.apply_tick(&input);

        assert_eq!(session.player(), Position::new(1, 2));
        assert!(session.grid().is_open(session.player()), "player stands on an open cell");
    }

    #[test]
    fn test_tick_opposite_directions() {
        let mut session = session_with(&corridor_rows());
        session.player = Position::new(2, 1);

        let mut input = TickInput::default();
        input.request(Direction::Left);
        input.request(Direction::Right);

        // Left to (1, 1), then Right back to (2, 1).
        let _ = session.apply_tick(&input);
        assert_eq!(session.player(), Position::new(2, 1));
    }

    #[test]
    fn test_tick_regenerates_before_moving() {
        let mut session = GameSession::new(11, MazeGenerator::seeded(8)).expect("valid size");
        session.player = Position::new(5, 5);

        let mut input = TickInput {
            regenerate: true,
            ..TickInput::default()
        };
        input.request(Direction::Up);
        input.request(Direction::Left);

        let state = session.apply_tick(&input);

        // Up and Left from the start cell both hit the border ring.
        assert_eq!(session.player(), Position::START);
        assert_eq!(state, SessionState::Playing);
    }

    #[test]
    fn test_tick_reaching_goal_reports_won() {
        let mut session = session_with(&corridor_rows());
        session.player = Position::new(3, 2);

        let mut input = TickInput::default();
        input.request(Direction::Down);

        assert_eq!(session.apply_tick(&input), SessionState::Won);
    }

    #[test]
    fn test_empty_tick_changes_nothing() {
        let mut session = session_with(&corridor_rows());
        let before = session.grid().clone();

        let state = session.apply_tick(&TickInput::default());

        assert_eq!(state, SessionState::Playing);
        assert_eq!(session.player(), Position::START);
        assert_eq!(session.grid(), &before);
    }
}
