/*!
error module defines the error types used in aspath-graph.
*/
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AsGraphError {
    /// The control socket could not be reached.
    ///
    /// ## Occurs during:
    ///  - Connecting to the routing daemon endpoint
    #[error("unable to connect to {}: {source}", .path.display())]
    ConnectionError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The command could not be written to the control socket.
    ///
    /// ## Occurs during:
    ///  - Sending the control command
    #[error("unable to send command: {0}")]
    WriteError(#[source] io::Error),
    /// A general IO error triggered while reading the response stream.
    #[error("unable to read response: {0}")]
    ReadError(#[source] io::Error),
    /// The peer did not send anything within the configured read timeout.
    #[error("no data received within {0:?}")]
    TimeoutError(std::time::Duration),
    /// A complete line of the response was not valid UTF-8.
    ///
    /// ## Occurs during:
    ///  - Reassembling response chunks into lines
    #[error("invalid UTF-8 in response line: {0}")]
    DecodeError(#[from] std::string::FromUtf8Error),
    /// A saved dump could not be opened.
    #[error("unable to open input {path}: {source}")]
    InputError {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Error for a single marker line whose payload is not a list of AS numbers.
///
/// Recoverable: the offending line is skipped and extraction continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid AS number {token:?} in line {line:?}")]
pub struct PathParseError {
    pub token: String,
    pub line: String,
}
