mod encoder;
mod json;
mod prometheus;

pub use encoder::Encoder;
pub use json::JSONEncoder;
pub use prometheus::{render, PrometheusEncoder};
