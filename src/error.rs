use std::{io, sync::Arc};

use packed_struct::PackingError;
use thiserror::Error;

/// The bytes were read but do not describe a valid ILDA stream
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Header magic {found:?} is not \"ILDA\"")]
    MagicMismatch { found: [u8; 4] },

    #[error("Unsupported format code {0}")]
    UnsupportedFormat(u8),

    #[error("Color index {index} is outside of the active {len} entry palette")]
    ColorIndexOutOfRange { index: u8, len: usize },

    #[error("Malformed record: {0:?}")]
    Malformed(PackingError),
}

impl From<PackingError> for FormatError {
    fn from(err: PackingError) -> Self {
        FormatError::Malformed(err)
    }
}

/// Anything that stops a decoder. The first one is final for the decoder
/// that hit it.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Stream ended in the middle of a header or record")]
    ShortRead,

    #[error("Failed to read the stream: {0}")]
    Io(Arc<io::Error>),
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::ShortRead,
            _ => DecodeError::Io(Arc::new(err)),
        }
    }
}

impl DecodeError {
    pub fn is_format(&self) -> bool {
        matches!(self, DecodeError::Format(_))
    }
}
