//! Errors surfaced by the print bridge

use crate::ffi::{CallError, LoadError, MarshalError};
use thiserror::Error;

/// Failure of a single printf call
#[derive(Debug, Error)]
pub enum PrintError {
    /// More arguments than there are entry points
    #[error("unsupported arity: {n} arguments, the bridge accepts at most {max}")]
    UnsupportedArity { n: usize, max: usize },

    /// An argument or the format could not be forwarded
    #[error("marshalling error: {0}")]
    Marshalling(#[from] MarshalError),

    /// The native routine or its output failed
    #[error("native error: {0}")]
    Native(#[from] NativeError),
}

/// Failures owned by the native side, passed through unmasked
#[derive(Debug, Error)]
pub enum NativeError {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Render(#[from] CallError),

    #[error("write to output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LoadError> for PrintError {
    fn from(e: LoadError) -> Self {
        PrintError::Native(e.into())
    }
}

impl From<CallError> for PrintError {
    fn from(e: CallError) -> Self {
        PrintError::Native(e.into())
    }
}

impl From<std::io::Error> for PrintError {
    fn from(e: std::io::Error) -> Self {
        PrintError::Native(e.into())
    }
}
