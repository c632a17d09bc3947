use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when loading, projecting or saving a torrent.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The torrent file contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// A required field is missing from the torrent file.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field has an invalid value or type.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// The info dictionary has both `length` and `files`, or neither.
    #[error("info dictionary must contain exactly one of `length` or `files`")]
    AmbiguousFileMode,

    /// A field holds a value that does not fit a bencode integer.
    #[error("integer overflow in field: {0}")]
    IntegerOverflow(&'static str),

    /// An info hash string is not 40 hex characters.
    #[error("invalid info hash: {0}")]
    InvalidInfoHash(String),

    /// Reading or writing the torrent file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetainfoError {
    /// Returns `true` for I/O failures ("bad file") as opposed to content
    /// that could not be parsed ("bad content").
    pub fn is_io_error(&self) -> bool {
        matches!(self, MetainfoError::Io(_))
            || matches!(self, MetainfoError::Bencode(BencodeError::Io(_)))
    }

    /// Returns `true` if the bytes were readable but not a valid torrent.
    pub fn is_format_error(&self) -> bool {
        !self.is_io_error()
    }
}
