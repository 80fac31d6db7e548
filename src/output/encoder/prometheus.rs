use std::fmt::Write;

use super::encoder::Encoder;
use crate::error::Result;
use crate::model::{MetricsDocument, SamplePoint};
use crate::record::Event;

// # HELP fluentbit_input_bytes_total Number of input bytes.
// # TYPE fluentbit_input_bytes_total counter
// fluentbit_input_bytes_total{name=cpu.0} 1024
//
// Label values go out unquoted and unescaped; existing consumers of this
// output parse it that way.
pub fn render(doc: &MetricsDocument) -> String {
    let mut out = String::new();

    for series in &doc.metrics {
        let name = series.full_name();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "# HELP {} {}", name, series.meta.opts.description);
        let _ = writeln!(out, "# TYPE {} {}", name, series.meta.metric_type);

        for sample in &series.values {
            out.push_str(&name);
            out.push('{');
            write_labels(&mut out, &series.meta.labels, sample);
            out.push_str("} ");
            write_value(&mut out, sample.value);
            out.push('\n');
        }
    }

    out
}

// Label values pair up with names by position. A sample with too few values
// gets empty ones; surplus values are dropped.
fn write_labels(out: &mut String, names: &[String], sample: &SamplePoint) {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let value = sample.labels.get(i).map(String::as_str).unwrap_or("");
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }
}

fn write_value(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "+Inf" } else { "-Inf" });
    } else {
        let _ = write!(out, "{:.0}", value);
    }
}

pub struct PrometheusEncoder {}

impl PrometheusEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for PrometheusEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for PrometheusEncoder {
    fn encode(&self, event: &Event) -> Result<Option<Vec<u8>>> {
        match event {
            Event::Metrics(doc) if !doc.metrics.is_empty() => {
                let text = render(doc);
                Ok(Some(text.trim_end_matches('\n').as_bytes().to_vec()))
            }
            Event::Metrics(_) | Event::Log(..) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Map, MetricSeries, MetricType, RecordTime};

    fn series(labels: &[&str], samples: Vec<(Vec<&str>, f64)>) -> MetricSeries {
        let mut series = MetricSeries::default();
        series.meta.opts.namespace = "ns".into();
        series.meta.opts.subsystem = "ss".into();
        series.meta.opts.name = "myname".into();
        series.meta.opts.description = "d".into();
        series.meta.labels = labels.iter().map(|s| s.to_string()).collect();
        series.values = samples
            .into_iter()
            .map(|(labels, value)| SamplePoint {
                labels: labels.into_iter().map(String::from).collect(),
                value,
                ..Default::default()
            })
            .collect();
        series
    }

    fn doc(metrics: Vec<MetricSeries>) -> MetricsDocument {
        MetricsDocument {
            metrics,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_counter() {
        let doc = doc(vec![series(&["region"], vec![(vec!["us"], 42.4)])]);
        assert_eq!(
            "# HELP ns_ss_myname d\n# TYPE ns_ss_myname counter\nns_ss_myname{region=us} 42\n",
            render(&doc)
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = doc(vec![
            series(&["a", "b"], vec![(vec!["1", "2"], 1.0), (vec!["3", "4"], 2.0)]),
            series(&[], vec![(vec![], 3.0)]),
        ]);
        assert_eq!(render(&doc), render(&doc));
    }

    #[test]
    fn test_render_multiple_labels_and_series() {
        let mut gauge = series(&[], vec![(vec![], 0.4)]);
        gauge.meta.metric_type = MetricType::Gauge;
        gauge.meta.opts.name = "g".into();

        let doc = doc(vec![
            series(&["a", "b"], vec![(vec!["x", "y"], 1.4), (vec!["z", "w"], 2.6)]),
            gauge,
        ]);

        let expected = concat!(
            "# HELP ns_ss_myname d\n",
            "# TYPE ns_ss_myname counter\n",
            "ns_ss_myname{a=x,b=y} 1\n",
            "ns_ss_myname{a=z,b=w} 3\n",
            "# HELP ns_ss_g d\n",
            "# TYPE ns_ss_g gauge\n",
            "ns_ss_g{} 0\n",
        );
        assert_eq!(expected, render(&doc));
    }

    #[test]
    fn test_render_rounding() {
        #[rustfmt::skip]
        let tests = [
            (42.4, "42"),
            (42.6, "43"),
            (-0.6, "-1"),
            (1e21, "1000000000000000000000"),
            (f64::NAN, "NaN"),
            (f64::INFINITY, "+Inf"),
            (f64::NEG_INFINITY, "-Inf"),
        ];

        for (value, expected) in &tests {
            let mut out = String::new();
            write_value(&mut out, *value);
            assert_eq!(*expected, out, "while formatting {}", value);
        }
    }

    #[test]
    fn test_render_unknown_type() {
        let mut s = series(&[], vec![]);
        s.meta.metric_type = MetricType::Unknown(42);
        assert_eq!(
            "# HELP ns_ss_myname d\n# TYPE ns_ss_myname \n",
            render(&doc(vec![s]))
        );
    }

    #[test]
    fn test_render_label_count_mismatch() {
        let doc = doc(vec![series(
            &["a", "b"],
            vec![(vec!["1"], 1.0), (vec!["1", "2", "3"], 1.0)],
        )]);
        assert_eq!(
            concat!(
                "# HELP ns_ss_myname d\n",
                "# TYPE ns_ss_myname counter\n",
                "ns_ss_myname{a=1,b=} 1\n",
                "ns_ss_myname{a=1,b=2} 1\n",
            ),
            render(&doc)
        );
    }

    #[test]
    fn test_encoder() -> Result<()> {
        let encoder = PrometheusEncoder::new();
        let event = Event::Metrics(doc(vec![series(&["region"], vec![(vec!["us"], 1.0)])]));
        assert_eq!(
            Some(b"# HELP ns_ss_myname d\n# TYPE ns_ss_myname counter\nns_ss_myname{region=us} 1".to_vec()),
            encoder.encode(&event)?
        );
        assert_eq!(None, encoder.encode(&Event::Log(RecordTime::Unix(1), Map::new()))?);
        assert_eq!(None, encoder.encode(&Event::Metrics(doc(vec![])))?);
        Ok(())
    }
}
