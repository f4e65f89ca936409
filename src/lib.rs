//! Terminal maze game.
//!
//! Each round carves a perfect maze, one with exactly one path between any two open cells, by
//! randomized depth-first carving. The player walks it from the top-left room to the goal in the
//! opposite corner. The maze logic ([`MazeGenerator`] and [`GameSession`]) knows nothing about
//! the terminal; [`App`] wraps it in a Ratatui interface.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod carving;
mod cli;
mod events;
mod grid;
mod logging;
mod play;
mod types;
mod ui;

pub use app::App;
pub use carving::MazeGenerator;
pub use cli::Config;
pub use grid::{Dimensions, Grid};
pub use logging::init as init_logging;
pub use play::GameSession;
pub use types::{Cell, Direction, Position, SessionState, TickInput};
