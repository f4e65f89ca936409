//! Diagnostic tracing for the game.
//!
//! The terminal interface owns stdout and stderr while the game runs, so diagnostics only go to a
//! file named on the command line. Without one no subscriber is installed and every event is
//! discarded.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr as _};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Installs the global tracing subscriber writing to `path`, if one is given.
///
/// Reads the `RUST_LOG` environment variable and falls back to the `info` level when it is unset
/// or invalid.
///
/// # Errors
///
/// This function returns an error if the log file cannot be created or a global subscriber has
/// already been installed.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()?;

    Ok(())
}
