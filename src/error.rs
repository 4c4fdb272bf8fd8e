//! Unified error type for the TUIO host library.
//!
//! Guard-rejected events are not errors (the state machine drops them);
//! everything here is either a programmer error at the API boundary, a
//! malformed payload, bad configuration, or a failure of the driver
//! thread itself.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Error {
    /// An event was posted by name and the name is not in the fixed set.
    UnknownEventKind(String),
    /// A relay payload could not be encoded or decoded.
    Payload(postcard::Error),
    /// Configuration is invalid.
    Config(&'static str),
    /// Configuration could not be parsed.
    ConfigParse(serde_json::Error),
    /// The driver thread could not be created.
    Spawn(std::io::Error),
    /// The driver thread panicked before reaching the terminal state.
    DriverPanicked,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEventKind(kind) => write!(f, "unknown event kind: {kind:?}"),
            Self::Payload(e) => write!(f, "payload: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::ConfigParse(e) => write!(f, "config parse: {e}"),
            Self::Spawn(e) => write!(f, "driver spawn: {e}"),
            Self::DriverPanicked => write!(f, "driver thread panicked"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Payload(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<postcard::Error> for Error {
    fn from(e: postcard::Error) -> Self {
        Self::Payload(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigParse(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
