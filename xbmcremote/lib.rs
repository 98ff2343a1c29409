//! Core of a keyboard-driven XBMC/Kodi remote: the JSON-RPC client and
//! playback commands, plus the options file and key binding registry that
//! drive them.

pub mod app;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod keys;
pub mod time;
pub mod validate;

pub use app::{AppState, KeyOutcome};
pub use client::{RemoteClient, Rpc};
pub use commands::{Command, CommandSet};
pub use error::{App, Conflict, RemoteError};
