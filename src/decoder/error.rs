use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("end of buffer")]
    Eof,
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),
    #[error("invalid MessagePack byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },
    #[error("values nested deeper than {0} levels")]
    DepthLimit(usize),
    #[error("extension type {tag}: expected {expected} byte payload, got {actual}")]
    InvalidExtension {
        tag: i8,
        expected: usize,
        actual: usize,
    },
    #[error("{0} is not supported by a read-only decoder")]
    Unsupported(&'static str),
}
