//! Decoder for the MessagePack records Fluent Bit hands to output plugins.
//!
//! A chunk is a sequence of top-level values. Each one is either a log record,
//! `[timestamp, {fields}]`, or a cmetrics snapshot, a bare map. Snapshots
//! convert into a [`model::MetricsDocument`] that renders as Prometheus text.
//!
//! ```
//! use flbdecode::decoder::ByteDecoder;
//! use flbdecode::record::{get_record, Status};
//!
//! // [1700000000, {"a": 1}]
//! let mut dec = ByteDecoder::new(&[0x92, 0xce, 0x65, 0x53, 0xf1, 0x00, 0x81, 0xa1, b'a', 0x01]);
//! let (status, _time, record) = get_record(&mut dec);
//! assert_eq!(Status::Ok, status);
//! assert_eq!(1, record.map_or(0, |r| r.len()));
//! ```

pub mod cliopt;
pub mod convert;
pub mod decoder;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod record;
