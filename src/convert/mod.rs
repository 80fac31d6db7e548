mod coerce;
mod metrics;

pub use metrics::to_metrics_document;
