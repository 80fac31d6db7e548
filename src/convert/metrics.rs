use super::coerce::{items, to_f64, to_i64, to_string};
use crate::model::{
    DocumentMeta, Map, MetricOpts, MetricSeries, MetricsDocument, Processing, SamplePoint,
    SeriesMeta, Value,
};

/// Maps a decoded metrics record onto a `MetricsDocument`.
///
/// Conversion never fails. Keys match exactly or, failing that, ignoring
/// ASCII case. Missing or unconvertible fields fall back to their defaults:
///
/// | field                           | wire key(s)          | default |
/// |---------------------------------|----------------------|---------|
/// | `meta.cmetrics`, `meta.external`| same                 | empty   |
/// | `meta.processing.static_labels` | same                 | `[]`    |
/// | `metrics[].meta.aggregation_type` | same               | 0       |
/// | `metrics[].meta.labels`         | same                 | `[]`    |
/// | `metrics[].meta.opts.*`         | `desc`, `name`, `ns`, `ss` | `""` |
/// | `metrics[].meta.type`           | `type`               | 0       |
/// | `metrics[].meta.ver`            | same                 | 0       |
/// | `metrics[].values[].hash`       | same                 | 0       |
/// | `metrics[].values[].labels`     | same                 | `[]`    |
/// | `metrics[].values[].timestamp`  | `ts`                 | 0       |
/// | `metrics[].values[].value`      | same                 | 0.0     |
///
/// A list element that is not a map becomes a default entry in place, and an
/// unconvertible label becomes `""`, so positions are preserved. Bad input
/// therefore loses data silently.
pub fn to_metrics_document(record: &Map) -> MetricsDocument {
    MetricsDocument {
        meta: object(record, "meta").map(document_meta).unwrap_or_default(),
        metrics: objects(record, "metrics", metric_series),
    }
}

fn document_meta(meta: &Map) -> DocumentMeta {
    DocumentMeta {
        cmetrics: object(meta, "cmetrics").cloned().unwrap_or_default(),
        external: object(meta, "external").cloned().unwrap_or_default(),
        processing: object(meta, "processing")
            .map(processing)
            .unwrap_or_default(),
    }
}

fn processing(processing: &Map) -> Processing {
    Processing {
        static_labels: field(processing, &["static_labels"])
            .map(|v| items(v).into_iter().cloned().collect())
            .unwrap_or_default(),
    }
}

fn metric_series(series: &Map) -> MetricSeries {
    MetricSeries {
        meta: object(series, "meta").map(series_meta).unwrap_or_default(),
        values: objects(series, "values", sample_point),
    }
}

fn series_meta(meta: &Map) -> SeriesMeta {
    SeriesMeta {
        aggregation_type: int(meta, &["aggregation_type"]).into(),
        labels: strings(meta, &["labels"]),
        opts: object(meta, "opts").map(metric_opts).unwrap_or_default(),
        metric_type: int(meta, &["type"]).into(),
        ver: int(meta, &["ver"]),
    }
}

fn metric_opts(opts: &Map) -> MetricOpts {
    MetricOpts {
        description: string(opts, &["desc", "description"]),
        name: string(opts, &["name"]),
        namespace: string(opts, &["ns", "namespace"]),
        subsystem: string(opts, &["ss", "subsystem"]),
    }
}

fn sample_point(sample: &Map) -> SamplePoint {
    SamplePoint {
        hash: int(sample, &["hash"]),
        labels: strings(sample, &["labels"]),
        timestamp: int(sample, &["ts", "timestamp"]),
        value: float(sample, &["value"]),
    }
}

fn field<'a>(map: &'a Map, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| map.get_ignore_case(name))
}

fn object<'a>(map: &'a Map, name: &str) -> Option<&'a Map> {
    field(map, &[name]).and_then(Value::as_map)
}

fn objects<T, F>(map: &Map, name: &str, convert: F) -> Vec<T>
where
    T: Default,
    F: Fn(&Map) -> T,
{
    field(map, &[name])
        .map(|v| {
            items(v)
                .into_iter()
                .map(|item| item.as_map().map(&convert).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

fn int(map: &Map, names: &[&str]) -> i64 {
    field(map, names).and_then(to_i64).unwrap_or_default()
}

fn float(map: &Map, names: &[&str]) -> f64 {
    field(map, names).and_then(to_f64).unwrap_or_default()
}

fn string(map: &Map, names: &[&str]) -> String {
    field(map, names).and_then(to_string).unwrap_or_default()
}

fn strings(map: &Map, names: &[&str]) -> Vec<String> {
    field(map, names)
        .map(|v| {
            items(v)
                .into_iter()
                .map(|item| to_string(item).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}
