//! Error type shared by the command loop, the reference resolver and the
//! Spotify gateway.
//!
//! Every variant except the ones raised while establishing a session is
//! recoverable: the dispatcher prints it and keeps reading commands.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("command name or alias '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("no previous search results, run 'search' first")]
    NoSearchResults,

    #[error("result {index} does not exist, the last search returned {len} of that kind")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no {kind} matching '{query}' was found")]
    NoMatchFound { kind: String, query: String },

    #[error("no devices are active, please begin playback first")]
    NoActiveDevice,

    #[error("Spotify API error ({status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read input: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),
}

impl CliError {
    /// Errors caused by how a command was typed; the dispatcher follows
    /// these with the command's help text.
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::InvalidArgument(_))
    }
}
