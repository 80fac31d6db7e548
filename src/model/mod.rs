mod metrics;
mod time;
mod value;

pub use metrics::*;
pub use time::*;
pub use value::*;
