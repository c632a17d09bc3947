use thiserror::Error;

/// Errors produced while decoding or encoding bencode.
///
/// Every syntax error carries the byte offset at which decoding stopped.
#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("unexpected end of input at offset {offset}, expected {expected}")]
    UnexpectedEof {
        offset: usize,
        expected: &'static str,
    },

    #[error("malformed integer at offset {offset}: {reason}")]
    MalformedInteger { offset: usize, reason: &'static str },

    #[error("malformed byte string length at offset {offset}")]
    MalformedLength { offset: usize },

    #[error("dictionary key at offset {offset} is not a byte string")]
    MalformedKey { offset: usize },

    #[error("duplicate dictionary key at offset {offset}")]
    DuplicateKey { offset: usize },

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("trailing data after value at offset {offset}")]
    TrailingData { offset: usize },

    #[error("nesting too deep at offset {offset}")]
    NestingTooDeep { offset: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    /// Returns the input offset of a syntax error, or `None` for I/O errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            BencodeError::UnexpectedEof { offset, .. }
            | BencodeError::MalformedInteger { offset, .. }
            | BencodeError::MalformedLength { offset }
            | BencodeError::MalformedKey { offset }
            | BencodeError::DuplicateKey { offset }
            | BencodeError::UnexpectedChar { offset, .. }
            | BencodeError::TrailingData { offset }
            | BencodeError::NestingTooDeep { offset } => Some(*offset),
            BencodeError::Io(_) => None,
        }
    }
}
