//! User interface rendering for the game screen.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::Grid,
    types::{Cell, Position, SessionState},
    App,
};

/// Terminal columns used to draw one maze cell, which keeps cells roughly square.
const CELL_WIDTH: u16 = 2;

/// Rows taken by the status block: its top border and the status line.
const STATUS_HEIGHT: u16 = 2;

/// Key bindings shown in the status block's title.
pub(crate) const CONTROLS: &str = "(arrows / hjkl / wasd) move / (r) regenerate / (q) quit";

/// Status line shown while the goal has not been reached.
pub(crate) const PLAYING_TEXT: &str = "Reach the red goal";

/// Status line shown while the player stands on the goal.
pub(crate) const WON_TEXT: &str = "YOU WIN! Press (r) for a new maze";

/// Renders the game screen from the state stored in the [`App`] structure.
///
/// The maze is drawn centered on a [`Canvas`], with the goal and the player painted over it, and
/// a status block with the controls and the win message sits below it.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app.session();
    let grid = session.grid();

    let maze_width = u16::try_from(grid.width())?.saturating_mul(CELL_WIDTH);
    let maze_height = u16::try_from(grid.height())?;

    let overall_layout =
        Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
            .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    let maze_area = center_vertically(maze_content_area, maze_height)?;
    let maze_area = center_horizontally(maze_area, maze_width)?;
    let status_area = center_horizontally(
        status_full_area,
        maze_width.max(u16::try_from(CONTROLS.len())?),
    )?;

    // Pre-compute canvas coordinates to handle errors before the paint closure
    let walls: Vec<Position> = grid.positions_of(Cell::Wall).collect();
    let wall_coords = to_canvas_coords(&walls, grid)?;
    let goal_coords = to_canvas_coords(&[session.goal()], grid)?;
    let player_coords = to_canvas_coords(&[session.player()], grid)?;

    let maze = Canvas::default()
        .x_bounds([0., f64::from(maze_width) - 1.])
        .y_bounds([0., f64::from(maze_height) - 1.])
        .marker(Marker::Block)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &goal_coords,
                color: Color::Red,
            });
            ctx.draw(&Points {
                coords: &player_coords,
                color: Color::Yellow,
            });
        });

    frame.render_widget(maze, maze_area);

    let status_block = Block::bordered()
        .title(CONTROLS)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_inner = status_block.inner(status_area);

    let status = match session.state() {
        SessionState::Playing => Line::styled(PLAYING_TEXT, Style::default().fg(Color::Green)),
        SessionState::Won => Line::styled(
            WON_TEXT,
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
    };

    frame.render_widget(status_block, status_area);
    frame.render_widget(status.centered(), status_inner);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Returns a band of `height` rows centered vertically in `area`.
fn center_vertically(area: Rect, height: u16) -> Result<Rect> {
    Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered band from vertical layout")
}

/// Returns a band of `width` columns centered horizontally in `area`.
fn center_horizontally(area: Rect, width: u16) -> Result<Rect> {
    Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered band from horizontal layout")
}

/// Transforms grid positions into canvas coordinates.
///
/// Each cell becomes [`CELL_WIDTH`] horizontally adjacent points, one per terminal column. Rows
/// are flipped because the canvas grows upwards while the grid grows downwards: a cell at
/// `(x, y)` maps to the points `(2x, h - 1 - y)` and `(2x + 1, h - 1 - y)`.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn to_canvas_coords(positions: &[Position], grid: &Grid) -> Result<Vec<(f64, f64)>> {
    let top = f64::from(u16::try_from(grid.height())?) - 1.;
    let mut coords = Vec::with_capacity(positions.len() * usize::from(CELL_WIDTH));

    for position in positions {
        let column = f64::from(u16::try_from(position.x)?) * f64::from(CELL_WIDTH);
        let row = top - f64::from(u16::try_from(position.y)?);
        for offset in 0..CELL_WIDTH {
            coords.push((column + f64::from(offset), row));
        }
    }

    Ok(coords)
}
