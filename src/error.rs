use std::io;
use thiserror::Error;

/// Error type for node operations.
#[derive(Error, Debug)]
pub enum NodeError {
    /// The UDP socket could not be resolved or bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: String,
        /// The underlying IO error.
        source: io::Error,
    },

    /// IO error from socket or thread operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A thread pool was requested with zero threads.
    #[error("Thread pool size must be at least 1")]
    InvalidPoolSize,

    /// The thread pool backend failed to build.
    #[error("Thread pool error: {0}")]
    Pool(String),

    /// No response arrived before the client timeout.
    #[error("Timed out waiting for a response")]
    Timeout,
}

/// Error reported to the sender of a malformed or failed command.
///
/// The `Display` text of each variant is part of the wire protocol.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// PUT without both a key and a value.
    #[error("Invalid PUT format")]
    InvalidPut,

    /// GET with anything other than exactly one key.
    #[error("Invalid GET format")]
    InvalidGet,

    /// DELETE with anything other than exactly one key.
    #[error("Invalid DELETE format")]
    InvalidDelete,

    /// GET on a key that is not in the store.
    #[error("Key not found")]
    KeyNotFound,

    /// The verb is not PUT, GET or DELETE.
    #[error("Unknown command")]
    UnknownCommand,
}

/// Result type alias for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;
