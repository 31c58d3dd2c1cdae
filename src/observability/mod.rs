//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans from `tracing` macros go through the OpenTelemetry SDK to a custom
//! exporter that appends OTLP JSON lines to a rotating file:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON Files
//! ```
//!
//! Traces land in `~/.local/share/zellij/patient-registry/patient-registry-otlp.json`.
//! Every API request carries its span identity in the web request context,
//! so the response handling span joins the trace of the user action that
//! caused it.
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `"debug"` or `"patient_registry::api=trace"`), default
//! `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::FileWriter;
pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
