use crate::error::Result;
use crate::record::Event;

pub trait Encoder {
    /// Returns `None` for events the encoder has no representation for.
    fn encode(&self, event: &Event) -> Result<Option<Vec<u8>>>;
}
