//! OTLP JSON span formatter.
//!
//! Each exported batch becomes one `ExportTraceServiceRequest` JSON document:
//!
//! ```json
//! {
//!   "resourceSpans": [{
//!     "resource": {"attributes": [{"key": "service.name", "value": {"stringValue": "reelfeed"}}]},
//!     "scopeSpans": [{"scope": {"name": "reelfeed"}, "spans": [...]}]
//!   }]
//! }
//! ```

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{Duration, SystemTime};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRequest<'a> {
    resource_spans: Vec<ResourceSpans<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans<'a> {
    resource: OtlpResource,
    scope_spans: Vec<ScopeSpans<'a>>,
}

#[derive(Serialize)]
struct OtlpResource {
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct ScopeSpans<'a> {
    scope: Scope<'a>,
    spans: Vec<OtlpSpan<'a>>,
}

#[derive(Serialize)]
struct Scope<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpSpan<'a> {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: &'a str,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<OtlpEvent<'a>>,
    links: Vec<OtlpLink>,
    status: OtlpStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpEvent<'a> {
    time_unix_nano: String,
    name: &'a str,
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpLink {
    trace_id: String,
    span_id: String,
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct OtlpStatus {
    code: u8,
    message: String,
}

#[derive(Debug, PartialEq, Serialize)]
struct Attribute {
    key: String,
    value: AnyValue,
}

/// OTLP `AnyValue`; 64-bit integers are strings in OTLP JSON.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
enum AnyValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            Value::Array(_) => Self::StringValue(value.to_string()),
        }
    }
}

fn attributes(values: &[KeyValue]) -> Vec<Attribute> {
    values
        .iter()
        .map(|kv| Attribute { key: kv.key.to_string(), value: AnyValue::from(&kv.value) })
        .collect()
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> OtlpStatus {
    match status {
        Status::Unset => OtlpStatus { code: 0, message: String::new() },
        Status::Ok => OtlpStatus { code: 1, message: String::new() },
        Status::Error { description } => OtlpStatus { code: 2, message: description.to_string() },
    }
}

/// Formats span batches as OTLP JSON lines.
pub struct SpanFormatter {
    resource: Resource,
    scope: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Serializes `batch` as a single-line OTLP JSON document.
    pub fn format_batch(&self, batch: &[SpanData]) -> serde_json::Result<String> {
        let resource = OtlpResource {
            attributes: self
                .resource
                .iter()
                .map(|(key, value)| Attribute { key: key.to_string(), value: AnyValue::from(value) })
                .collect(),
        };

        let request = ExportRequest {
            resource_spans: vec![ResourceSpans {
                resource,
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: self.scope },
                    spans: batch.iter().map(Self::format_span).collect(),
                }],
            }],
        };

        serde_json::to_string(&request)
    }

    fn format_span(span: &SpanData) -> OtlpSpan<'_> {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        OtlpSpan {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: &span.name,
            kind: kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: attributes(&span.attributes),
            events: span.events.iter().map(Self::format_event).collect(),
            links: span.links.iter().map(Self::format_link).collect(),
            status: status(&span.status),
        }
    }

    fn format_event(event: &Event) -> OtlpEvent<'_> {
        OtlpEvent {
            time_unix_nano: unix_nanos(event.timestamp),
            name: &event.name,
            attributes: attributes(&event.attributes),
        }
    }

    fn format_link(link: &Link) -> OtlpLink {
        OtlpLink {
            trace_id: format!("{:032x}", link.span_context.trace_id()),
            span_id: format!("{:016x}", link.span_context.span_id()),
            attributes: attributes(&link.attributes),
        }
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("scope", &self.scope).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_use_otlp_json_shapes() {
        let values = attributes(&[
            KeyValue::new("controller", 7_i64),
            KeyValue::new("looping", true),
            KeyValue::new("reel", "scarf"),
        ]);
        let json = serde_json::to_string(&values).unwrap();

        assert_eq!(
            json,
            r#"[{"key":"controller","value":{"intValue":"7"}},{"key":"looping","value":{"boolValue":true}},{"key":"reel","value":{"stringValue":"scarf"}}]"#
        );
    }

    #[test]
    fn empty_batch_still_carries_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "reelfeed")]);
        let line = SpanFormatter::new(resource, "reelfeed").format_batch(&[]).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(doc["resourceSpans"][0]["scopeSpans"][0]["scope"]["name"], "reelfeed");
        assert!(doc["resourceSpans"][0]["resource"]["attributes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|attr| attr["value"]["stringValue"] == "reelfeed"));
    }

    #[test]
    fn times_before_epoch_clamp_to_zero() {
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH), "0");
    }
}
