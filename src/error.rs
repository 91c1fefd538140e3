//! Error types for HF2 encoding, decoding and the file collaborators.

use std::io;
use std::path::PathBuf;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// The container header could not be accepted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("not an HF2 container (bad magic)")]
    BadMagic,

    #[error("unsupported HF2 method {0}")]
    UnsupportedMethod(u8),

    #[error("container too small for an HF2 header: {len} bytes")]
    TruncatedHeader { len: usize },
}

/// The packed bitstream did not decode to the declared length.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("bitstream ended after {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },

    #[error("invalid code in bitstream at bit {position}")]
    CorruptStream { position: u64 },
}

/// The AutoSafe policy refused to emit a container.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("compression does not reduce size ({input} bytes -> {output} bytes)")]
    NotReducible { input: u64, output: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("file not accepted for compression: {}", .0.display())]
    NotAdmitted(PathBuf),

    /// Internal invariant: every input byte has a code in the table built from it.
    #[error("no code for byte {0}")]
    MissingCode(u8),

    /// Internal invariant: no code may exceed 64 bits.
    #[error("code for byte {symbol} is {len} bits long")]
    CodeTooLong { symbol: u8, len: usize },
}

impl Error {
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            Error::Format(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<&StreamError> {
        match self {
            Error::Stream(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_reducible(&self) -> bool {
        matches!(self, Error::Policy(PolicyError::NotReducible { .. }))
    }
}
