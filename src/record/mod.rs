mod extractor;
mod reader;

pub use extractor::{extract_record, get_record, Status};
pub use reader::{Event, RecordReader};
