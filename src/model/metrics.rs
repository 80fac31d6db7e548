use std::fmt;

use serde::{Serialize, Serializer};

use super::value::{Map, Value};

/// A cmetrics snapshot as emitted by Fluent Bit metrics inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsDocument {
    pub meta: DocumentMeta,
    pub metrics: Vec<MetricSeries>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentMeta {
    pub cmetrics: Map,
    pub external: Map,
    pub processing: Processing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Processing {
    pub static_labels: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSeries {
    pub meta: SeriesMeta,
    pub values: Vec<SamplePoint>,
}

impl MetricSeries {
    /// `namespace_subsystem_name`, empty parts included.
    pub fn full_name(&self) -> String {
        let opts = &self.meta.opts;
        format!("{}_{}_{}", opts.namespace, opts.subsystem, opts.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesMeta {
    pub aggregation_type: AggregationType,
    /// Label names; sample label values are matched by position.
    pub labels: Vec<String>,
    pub opts: MetricOpts,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub ver: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricOpts {
    #[serde(rename = "desc")]
    pub description: String,
    pub name: String,
    #[serde(rename = "ns")]
    pub namespace: String,
    #[serde(rename = "ss")]
    pub subsystem: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SamplePoint {
    /// Identity of the label combination.
    pub hash: i64,
    pub labels: Vec<String>,
    #[serde(rename = "ts")]
    pub timestamp: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationType {
    Unspecified,
    Delta,
    Cumulative,
    Unknown(i64),
}

impl AggregationType {
    pub fn code(&self) -> i64 {
        match self {
            AggregationType::Unspecified => 0,
            AggregationType::Delta => 1,
            AggregationType::Cumulative => 2,
            AggregationType::Unknown(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationType::Unspecified => "unspecified",
            AggregationType::Delta => "delta",
            AggregationType::Cumulative => "cumulative",
            AggregationType::Unknown(_) => "",
        }
    }
}

impl From<i64> for AggregationType {
    fn from(code: i64) -> Self {
        match code {
            0 => AggregationType::Unspecified,
            1 => AggregationType::Delta,
            2 => AggregationType::Cumulative,
            code => AggregationType::Unknown(code),
        }
    }
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::Unspecified
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AggregationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Untyped,
    Unknown(i64),
}

impl MetricType {
    pub fn code(&self) -> i64 {
        match self {
            MetricType::Counter => 0,
            MetricType::Gauge => 1,
            MetricType::Histogram => 2,
            MetricType::Summary => 3,
            MetricType::Untyped => 4,
            MetricType::Unknown(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
            MetricType::Summary => "summary",
            MetricType::Untyped => "untyped",
            MetricType::Unknown(_) => "",
        }
    }
}

impl From<i64> for MetricType {
    fn from(code: i64) -> Self {
        match code {
            0 => MetricType::Counter,
            1 => MetricType::Gauge,
            2 => MetricType::Histogram,
            3 => MetricType::Summary,
            4 => MetricType::Untyped,
            code => MetricType::Unknown(code),
        }
    }
}

impl Default for MetricType {
    fn default() -> Self {
        MetricType::Counter
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MetricType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
