//! Command-line configuration of the game.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::Result;

use crate::grid::Dimensions;

/// Default side length of the maze grid.
pub(crate) const DEFAULT_SIZE: u16 = 21;

/// Largest accepted side length. Larger grids would not fit any terminal and take long to carve.
pub(crate) const MAX_SIZE: u16 = 999;

/// Default number of game ticks per second.
pub(crate) const DEFAULT_FPS: u64 = 60;

/// Walk a freshly carved maze from the top-left room to the goal in the opposite corner.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Side length of the square maze grid; must be odd and between 3 and 999.
    #[arg(
        long,
        default_value_t = DEFAULT_SIZE,
        value_parser = clap::value_parser!(u16).range(3..=i64::from(MAX_SIZE))
    )]
    pub size: u16,

    /// Seed for reproducible mazes. A random seed is used when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Game ticks per second.
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u64).range(1..))]
    pub fps: u64,

    /// Write diagnostic logs to this file. Filtering follows `RUST_LOG` and defaults to `info`.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            fps: DEFAULT_FPS,
            log_file: None,
        }
    }
}

impl Config {
    /// Checks that the configured size can be carved into a maze.
    ///
    /// # Errors
    ///
    /// This function returns a configuration error if the size is even or smaller than three.
    pub fn validate(&self) -> Result<Dimensions> {
        Dimensions::square(self.size.into())
    }

    /// Returns the duration of one game tick.
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / u32::try_from(self.fps.max(1)).unwrap_or(u32::MAX)
    }
}
