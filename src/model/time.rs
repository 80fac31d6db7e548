use std::fmt;

use chrono::prelude::*;
use serde::{Serialize, Serializer};

const MICROS_PER_SEC: u32 = 1_000_000;

/// Fluent Bit event time: seconds and microseconds since the Unix epoch.
///
/// On the wire it travels as an 8-byte extension payload, seconds first,
/// both halves big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EventTime {
    secs: u32,
    micros: u32,
}

impl EventTime {
    pub const WIRE_LEN: usize = 8;

    pub fn new(secs: u32, micros: u32) -> Self {
        Self { secs, micros }
    }

    pub fn from_be_bytes(buf: [u8; Self::WIRE_LEN]) -> Self {
        Self {
            secs: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            micros: u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
        }
    }

    pub fn to_be_bytes(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0u8; Self::WIRE_LEN];
        buf[..4].copy_from_slice(&self.secs.to_be_bytes());
        buf[4..].copy_from_slice(&self.micros.to_be_bytes());
        buf
    }

    #[inline]
    pub fn secs(&self) -> u32 {
        self.secs
    }

    #[inline]
    pub fn micros(&self) -> u32 {
        self.micros
    }

    // Producers are not required to keep micros below one second.
    fn normalized(&self) -> (i64, u32) {
        (
            self.secs as i64 + (self.micros / MICROS_PER_SEC) as i64,
            self.micros % MICROS_PER_SEC,
        )
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let (secs, micros) = self.normalized();
        DateTime::from_timestamp(secs, micros * 1000)
    }

    pub fn timestamp_millis(&self) -> i64 {
        let (secs, micros) = self.normalized();
        secs * 1000 + (micros / 1000) as i64
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.secs as f64 + self.micros as f64 / MICROS_PER_SEC as f64
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (secs, micros) = self.normalized();
        write!(f, "{}.{:06}", secs, micros)
    }
}

impl Serialize for EventTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_secs_f64())
    }
}

/// Timestamp resolved from the head of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTime {
    /// Metrics records carry no timestamp.
    Zero,
    Event(EventTime),
    /// Legacy integer timestamp; the unit is up to the producer.
    Unix(u64),
}

impl RecordTime {
    pub fn is_zero(&self) -> bool {
        matches!(self, RecordTime::Zero)
    }

    pub fn event_time(&self) -> Option<EventTime> {
        match self {
            RecordTime::Event(t) => Some(*t),
            _ => None,
        }
    }
}

impl Default for RecordTime {
    fn default() -> Self {
        RecordTime::Zero
    }
}

impl fmt::Display for RecordTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordTime::Zero => write!(f, "0"),
            RecordTime::Event(t) => write!(f, "{}", t),
            RecordTime::Unix(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for RecordTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordTime::Zero => serializer.serialize_u64(0),
            RecordTime::Event(t) => t.serialize(serializer),
            RecordTime::Unix(n) => serializer.serialize_u64(*n),
        }
    }
}
