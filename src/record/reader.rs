use tracing::{debug, warn};

use super::extractor::extract_record;
use crate::convert::to_metrics_document;
use crate::decoder::ByteDecoder;
use crate::error::Result;
use crate::model::{Map, MetricsDocument, RecordTime};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Log(RecordTime, Map),
    Metrics(MetricsDocument),
}

/// Iterates over every record of a chunk.
///
/// Records with an unexpected shape are logged and skipped. A wire-level
/// decode failure ends the iteration since the decoder cannot resync.
pub struct RecordReader {
    decoder: ByteDecoder,
    record_no: usize,
    skipped: usize,
    failed: bool,
}

impl RecordReader {
    pub fn new(decoder: ByteDecoder) -> Self {
        Self {
            decoder,
            record_no: 0,
            skipped: 0,
            failed: false,
        }
    }

    /// Number of records skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl std::iter::Iterator for RecordReader {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed || self.decoder.is_empty() {
                return None;
            }

            self.record_no += 1;
            let offset = self.decoder.position();

            let value = match self.decoder.decode_next() {
                Ok(value) => value,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };

            match extract_record(value) {
                Ok((RecordTime::Zero, record)) => {
                    debug!(record = self.record_no, offset, "metrics record");
                    return Some(Ok(Event::Metrics(to_metrics_document(&record))));
                }
                Ok((time, record)) => {
                    return Some(Ok(Event::Log(time, record)));
                }
                Err(status) => {
                    warn!(
                        record = self.record_no,
                        offset,
                        code = status.code(),
                        "skipping record: {}",
                        status
                    );
                    self.skipped += 1;
                    continue;
                }
            }
        }
    }
}
