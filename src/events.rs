//! Keyboard input handling for the game loop.

use std::{
    io,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use ratatui::crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use tracing::debug;

use crate::{
    types::{Direction, TickInput},
    App,
};

/// Shortest quiet period after which a regenerate press counts as a new press on terminals that
/// cannot tell key repeats apart from presses.
///
/// Auto-repeat usually starts 250 to 660 milliseconds after the initial press, so the gap sits
/// above that range.
pub(crate) const REPEAT_GAP: Duration = Duration::from_millis(700);

/// Filter for regenerate presses on terminals that report key repeats as fresh presses.
///
/// Without keyboard enhancement, a held key arrives again and again as [`KeyEventKind::Press`].
/// This filter accepts a press only after the key has been quiet for [`REPEAT_GAP`]. Every press
/// restarts the gap, accepted or not, so holding the key down regenerates exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RepeatFilter {
    /// Time of the most recent regenerate press, whether it was accepted or not.
    last_press: Option<Instant>,
}

impl RepeatFilter {
    /// Records a press at `now` and returns whether it starts a new press of the key.
    pub(crate) fn accept(&mut self, now: Instant) -> bool {
        let fresh = if let Some(last) = self.last_press {
            now.saturating_duration_since(last) >= REPEAT_GAP
        } else {
            true
        };
        self.last_press = Some(now);

        fresh
    }
}

/// Asks the terminal to tag key events as presses, repeats or releases.
///
/// Returns whether the terminal took the request. When it did, the flags must be popped again with
/// [`disable_key_event_kinds`] before the terminal is restored.
///
/// # Errors
///
/// This function returns an error if the request cannot be written to the terminal.
pub(crate) fn enable_key_event_kinds() -> Result<bool> {
    let supported = terminal::supports_keyboard_enhancement().unwrap_or_else(|err| {
        debug!(%err, "keyboard enhancement query failed");
        false
    });

    if supported {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    debug!(supported, "key event kinds");

    Ok(supported)
}

/// Restores the keyboard reporting mode changed by [`enable_key_event_kinds`].
///
/// # Errors
///
/// This function returns an error if the request cannot be written to the terminal.
pub(crate) fn disable_key_event_kinds() -> Result<()> {
    execute!(io::stdout(), PopKeyboardEnhancementFlags)?;

    Ok(())
}

/// Collects the input of one tick.
///
/// This function polls for keyboard events until the tick's frame time has elapsed, which also
/// paces the game loop. Every key event is folded into the returned [`TickInput`]; quitting is
/// recorded on the application directly and ends the tick early.
pub(crate) fn handle_events(app: &mut App) -> Result<TickInput> {
    let mut input = TickInput::default();
    let deadline = Instant::now() + app.frame_time;

    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        if !event::poll(remaining)? {
            break;
        }
        if let Event::Key(key) = event::read()? {
            handle_key_event(app, &mut input, key);
        }
        if app.exit {
            break;
        }
    }

    Ok(input)
}

/// Folds a single key event into the application and the pending tick input.
///
/// Held movement keys keep requesting their direction, while the regenerate key only reacts to the
/// initial press. Release events are ignored.
///
/// Terminals that report event kinds mark held keys as [`KeyEventKind::Repeat`]. Other terminals
/// send plain presses, which the application's [`RepeatFilter`] thins out for the regenerate key.
pub(crate) fn handle_key_event(app: &mut App, input: &mut TickInput, key: KeyEvent) {
    let repeated = match key.kind {
        KeyEventKind::Press => false,
        KeyEventKind::Repeat => true,
        KeyEventKind::Release => return,
    };

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.exit = true,
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Char('r') if !repeated => {
            let fresh = if let Some(filter) = app.repeat_filter.as_mut() {
                filter.accept(Instant::now())
            } else {
                true
            };
            if fresh {
                input.regenerate = true;
            } else {
                debug!("regenerate key repeat ignored");
            }
        }
        code => {
            if let Some(direction) = direction_for(code) {
                input.request(direction);
            }
        }
    }

    if app.exit {
        debug!("quit requested");
    }
}

/// Maps movement keys to directions: arrows, vim-style `hjkl` and `wasd`.
pub(crate) const fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k' | 'w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j' | 's') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h' | 'a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l' | 'd') => Some(Direction::Right),
        _ => None,
    }
}
