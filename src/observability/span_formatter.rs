//! OTLP JSON span formatter.
//!
//! Converts OpenTelemetry span data into OTLP JSON documents that trace
//! collectors and viewers can ingest:
//!
//! ```json
//! {
//!   "resourceSpans": [{
//!     "resource": { "attributes": [{"key": "service.name", "value": {"stringValue": "PatientRegistry"}}] },
//!     "scopeSpans": [{ "scope": {"name": "PatientRegistry"}, "spans": [...] }]
//!   }]
//! }
//! ```

use super::init::SERVICE_NAME;
use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Formats span batches as OTLP JSON.
///
/// Holds the resource (service name, version, API base URL) that is stamped
/// on every exported batch.
pub struct SpanFormatter {
    /// Resource metadata for every batch.
    resource: Resource,
}

impl SpanFormatter {
    /// Creates a formatter for the given resource.
    ///
    /// # Parameters
    ///
    /// * `resource` - Resource metadata included in every batch
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// Formats a batch as one OTLP document.
    ///
    /// # Parameters
    ///
    /// * `batch` - Finished spans to format
    ///
    /// # Returns
    ///
    /// A JSON value with one `resourceSpans` entry holding one scope with
    /// every span in `batch`.
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| attribute(k.as_str(), v))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": SERVICE_NAME },
                    "spans": spans
                }]
            }]
        })
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish_non_exhaustive()
    }
}

/// Nanoseconds since the epoch, as the decimal string OTLP expects.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (status_code, status_message) = format_status(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent_span_id,
        "name": span.name,
        "kind": span_kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": { "code": status_code, "message": status_message },
    })
}

const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": attribute_value(value) })
}

fn attributes(kvs: &[KeyValue]) -> Vec<JsonValue> {
    kvs.iter().map(|kv| attribute(kv.key.as_str(), &kv.value)).collect()
}

/// OTLP `AnyValue`. Integers are strings; arrays fall back to their debug form.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

fn format_status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_values() {
        assert_eq!(attribute_value(&Value::I64(201)), json!({ "intValue": "201" }));
        assert_eq!(attribute_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(
            attribute("http.method", &Value::from("POST")),
            json!({ "key": "http.method", "value": { "stringValue": "POST" } })
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(format_status(&Status::Ok), (1, String::new()));
        assert_eq!(
            format_status(&Status::error("HTTP error! status: 500")),
            (2, "HTTP error! status: 500".to_string())
        );
    }

    #[test]
    fn test_batch_carries_resource() {
        let formatter = SpanFormatter::new(Resource::new(vec![KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]));
        let doc = formatter.format_batch(&[]);
        let scope = &doc["resourceSpans"][0]["scopeSpans"][0];
        assert_eq!(scope["scope"]["name"], SERVICE_NAME);
        assert_eq!(scope["spans"], json!([]));
        let attrs = doc["resourceSpans"][0]["resource"]["attributes"]
            .as_array()
            .unwrap();
        assert!(attrs.iter().any(|a| a["value"]["stringValue"] == SERVICE_NAME));
    }
}
