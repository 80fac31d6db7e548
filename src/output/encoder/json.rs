use serde::Serialize;

use super::encoder::Encoder;
use crate::error::Result;
use crate::model::{Map, RecordTime};
use crate::record::Event;

#[derive(Serialize)]
struct LogRepr<'a> {
    timestamp: &'a RecordTime,
    record: &'a Map,
}

/// One JSON object per event. Metrics documents keep their wire field names.
pub struct JSONEncoder {}

impl JSONEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for JSONEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for JSONEncoder {
    fn encode(&self, event: &Event) -> Result<Option<Vec<u8>>> {
        match event {
            Event::Log(timestamp, record) => serde_json::to_vec(&LogRepr { timestamp, record }),
            Event::Metrics(doc) => serde_json::to_vec(doc),
        }
        .map(Some)
        .map_err(|e| ("JSON serialization failed", e).into())
    }
}
