//! Core application state and the game loop.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    carving::MazeGenerator,
    cli::Config,
    events::{self, RepeatFilter},
    play::GameSession,
    types::{SessionState, TickInput},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state from which Ratatui renders every frame and which Crossterm key
/// events are folded into once per tick.
#[derive(Debug)]
pub struct App {
    /// Application exit flag.
    ///
    /// This field is set to `true` when the user asks to quit; the loop in [`App::run`] stops
    /// before the next frame.
    pub(crate) exit: bool,
    /// Game being played.
    ///
    /// This field holds the maze, the player and the goal. The interface only reads it and hands
    /// it one [`TickInput`] per tick.
    pub(crate) session: GameSession,
    /// Duration of one tick of the game loop.
    pub(crate) frame_time: Duration,
    /// Filter for regenerate presses.
    ///
    /// This field is [`None`] while the terminal tags key repeats itself, and holds a
    /// [`RepeatFilter`] otherwise.
    pub(crate) repeat_filter: Option<RepeatFilter>,
}

impl App {
    /// Creates the application and carves the first maze.
    ///
    /// # Errors
    ///
    /// This function returns a configuration error if the configured size cannot be carved into a
    /// maze.
    pub fn new(config: &Config) -> Result<Self> {
        let dimensions = config.validate()?;
        let generator = config
            .seed
            .map_or_else(MazeGenerator::from_entropy, MazeGenerator::seeded);

        info!(size = config.size, seed = ?config.seed, fps = config.fps, "starting game");

        Ok(Self {
            exit: false,
            session: GameSession::with_dimensions(dimensions, generator),
            frame_time: config.frame_time(),
            repeat_filter: Some(RepeatFilter::default()),
        })
    }

    /// Returns the game being played.
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    /// Runs the main loop of the application.
    ///
    /// Each iteration draws a frame, gathers the input of one tick and applies it to the session.
    /// The loop continues until the exit flag is set, after which the function returns to the call
    /// site. Key event kinds are requested from the terminal for the duration of the loop.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let reports_kinds = events::enable_key_event_kinds()?;
        if reports_kinds {
            self.repeat_filter = None;
        }

        let result = self.game_loop(terminal);

        if reports_kinds {
            events::disable_key_event_kinds()?;
        }
        info!("game closed");

        result
    }

    /// Draws frames and applies ticks until the exit flag is set.
    fn game_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            let input = events::handle_events(self)?;
            let _ = self.tick(&input);
        }

        Ok(())
    }

    /// Applies one tick of input to the session and returns the resulting state.
    pub(crate) fn tick(&mut self, input: &TickInput) -> SessionState {
        let before = self.session.state();
        let after = self.session.apply_tick(input);

        if before == SessionState::Playing && after == SessionState::Won {
            info!("goal reached");
        }

        after
    }
}
