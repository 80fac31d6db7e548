use std::convert::TryInto;

use super::error::DecodeError;
use crate::model::{EventTime, Value};

/// Extension type Fluent Bit uses for event timestamps.
pub const TIMESTAMP_EXT_TAG: i8 = 0;

/// Decoder for one MessagePack extension type.
pub trait Extension {
    fn tag(&self) -> i8;

    fn decode(&self, data: &[u8]) -> Result<Value, DecodeError>;

    fn encode(&self, _value: &Value) -> Result<Vec<u8>, DecodeError> {
        Err(DecodeError::Unsupported("extension encoding"))
    }
}

pub struct TimestampExt;

impl Extension for TimestampExt {
    fn tag(&self) -> i8 {
        TIMESTAMP_EXT_TAG
    }

    fn decode(&self, data: &[u8]) -> Result<Value, DecodeError> {
        let buf = data
            .try_into()
            .map_err(|_| DecodeError::InvalidExtension {
                tag: TIMESTAMP_EXT_TAG,
                expected: EventTime::WIRE_LEN,
                actual: data.len(),
            })?;
        Ok(Value::Time(EventTime::from_be_bytes(buf)))
    }
}
