mod decoder;
mod error;
mod ext;

pub use decoder::ByteDecoder;
pub use error::DecodeError;
pub use ext::{Extension, TimestampExt, TIMESTAMP_EXT_TAG};
