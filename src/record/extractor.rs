use std::convert::TryFrom;
use std::fmt;

use crate::decoder::ByteDecoder;
use crate::model::{Kind, Map, RecordTime, Value};

/// Outcome of pulling one record off a decoder.
///
/// The integer codes are stable; hosts that cross an FFI boundary switch on
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    DecodeFailed,
    WrongArity,
    PayloadNotMapping,
    MalformedTimestampSequence,
    UnrecognizedTimestampType,
    WrongShape,
}

impl Status {
    pub fn code(&self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::DecodeFailed => -1,
            Status::WrongArity => -2,
            Status::PayloadNotMapping => -3,
            Status::MalformedTimestampSequence => -4,
            Status::UnrecognizedTimestampType => -5,
            Status::WrongShape => -6,
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == Status::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            Status::Ok => "ok",
            Status::DecodeFailed => "value could not be decoded",
            Status::WrongArity => "log record is not a [timestamp, record] pair",
            Status::PayloadNotMapping => "log record payload is not a map",
            Status::MalformedTimestampSequence => "timestamp sequence has fewer than 2 elements",
            Status::UnrecognizedTimestampType => "timestamp has an unrecognized type",
            Status::WrongShape => "top-level value is neither a map nor an array",
        };
        f.write_str(msg)
    }
}

/// Decodes the next value and classifies it as a record.
///
/// A bare map is a metrics record and comes back with `RecordTime::Zero`.
/// A `[timestamp, map]` pair is a log record. Every failure yields
/// `RecordTime::Zero` and no record.
pub fn get_record(dec: &mut ByteDecoder) -> (Status, RecordTime, Option<Map>) {
    let value = match dec.decode_next() {
        Ok(value) => value,
        Err(_) => return (Status::DecodeFailed, RecordTime::Zero, None),
    };

    match extract_record(value) {
        Ok((time, record)) => (Status::Ok, time, Some(record)),
        Err(status) => (status, RecordTime::Zero, None),
    }
}

/// Classifies an already decoded top-level value.
pub fn extract_record(value: Value) -> Result<(RecordTime, Map), Status> {
    match value.into_kind() {
        Kind::Mapping(record) => Ok((RecordTime::Zero, record)),
        Kind::OrderedSequence(items) => {
            let [head, payload] = <[Value; 2]>::try_from(items).map_err(|_| Status::WrongArity)?;
            let time = resolve_time(head)?;
            match payload.into_kind() {
                Kind::Mapping(record) => Ok((time, record)),
                _ => Err(Status::PayloadNotMapping),
            }
        }
        Kind::UnsignedInteger(_) | Kind::ExtensionTimestamp(_) | Kind::Other(_) => {
            Err(Status::WrongShape)
        }
    }
}

// Three generations of Fluent Bit put different things at the head of a log
// record: a bare integer, the event time extension, and (since v2) an array
// of [event time, metadata map].
fn resolve_time(head: Value) -> Result<RecordTime, Status> {
    match head.into_kind() {
        Kind::ExtensionTimestamp(t) => Ok(RecordTime::Event(t)),
        Kind::UnsignedInteger(n) => Ok(RecordTime::Unix(n)),
        Kind::OrderedSequence(items) if items.len() < 2 => {
            Err(Status::MalformedTimestampSequence)
        }
        Kind::OrderedSequence(items) => match items.into_iter().next().map(Value::into_kind) {
            Some(Kind::ExtensionTimestamp(t)) => Ok(RecordTime::Event(t)),
            Some(Kind::UnsignedInteger(n)) => Ok(RecordTime::Unix(n)),
            _ => Err(Status::UnrecognizedTimestampType),
        },
        Kind::Mapping(_) | Kind::Other(_) => Err(Status::UnrecognizedTimestampType),
    }
}
