use flexi_logger::FlexiLoggerError;
use std::io;
use thiserror::Error;

/// Failure talking to the media player. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP {0} - {1}")]
    Http(u16, String),

    #[error("{0}")]
    Protocol(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid duration: {hours}:{minutes}:{seconds}")]
pub struct InvalidDuration {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

// Durations only ever come from the server.
impl From<InvalidDuration> for RemoteError {
    fn from(error: InvalidDuration) -> Self {
        RemoteError::Protocol(error.to_string())
    }
}

/// Rejected rebind: the requested code already belongs to `owner`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Key \"{key}\" is bound to \"{owner}\"")]
pub struct Conflict {
    pub owner: String,
    pub key: String,
}

#[derive(Error, Debug)]
pub enum App {
    #[error("{0}")]
    Remote(#[from] RemoteError),
    #[error("I/O operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to replace config file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("Logger initialization error: {0}")]
    Logger(#[from] FlexiLoggerError),
    #[error("Environment variable error")]
    EnvVar(#[from] std::env::VarError),
    #[error("{0}")]
    Conflict(#[from] Conflict),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
