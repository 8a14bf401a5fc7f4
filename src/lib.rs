//! Spotify Connect remote control for the terminal.
//!
//! This library provides the building blocks of the `spotcon` binary: an
//! interactive command loop that dispatches typed commands to handlers, a
//! resolver that turns "play 3" or "play yellow" into something Spotify can
//! play, and a thin gateway to the Spotify Web API.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `cli` - Command handlers and the canonical command table
//! - `command` - Command registry, specifications and parsed invocations
//! - `config` - Configuration management and environment variables
//! - `display` - Text rendering of API responses
//! - `error` - The crate-wide error type
//! - `management` - Token persistence and the last-search cache
//! - `repl` - The dispatcher and the interactive loop
//! - `resolver` - Reference resolution for playback
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API gateway
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod management;
pub mod repl;
pub mod resolver;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::CliError;

/// A convenient Result type alias for operations that may fail.
///
/// All fallible operations in the crate report a [`CliError`], which the
/// command loop turns into a single printed line.
pub type Res<T> = std::result::Result<T, CliError>;

/// Name used as token 0 when a REPL line is handed to the command parser.
pub const PROGRAM_NAME: &str = "spotcon";

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("You are logged in as: {}", user.id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used while establishing a session, before the command loop starts.
/// Everything that happens inside the loop is reported with [`warning!`].
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Recoverable command failures are reported through this macro so the
/// prompt can reappear right after.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
