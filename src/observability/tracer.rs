//! Tracer provider backed by a file exporter.
//!
//! The plugin sandbox has no collector to talk to, so spans are exported
//! synchronously as one OTLP JSON document per batch, one batch per line.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// File-based OpenTelemetry span exporter.
///
/// Writes every exported batch as one OTLP JSON line, carrying the plugin's
/// resource attributes (service name, version and API base URL).
#[derive(Debug)]
struct FileSpanExporter {
    /// Rotating writer for the trace file.
    writer: FileWriter,
    /// OTLP JSON formatter.
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports fail.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates a new file-based span exporter.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Path to the JSON trace file
    /// * `resource` - Resource metadata stamped on every batch
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Formats `batch` and appends it as a single line.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the line was written
    /// - `Err(TraceError)` if the exporter is shut down or the write fails
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("exporter is shut down"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    /// Exports a batch of spans to the file.
    ///
    /// The write happens before the returned future is polled.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(std::future::ready(self.write_batch(&batch)))
    }

    /// Stops further exports. The file handle closes on drop.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    // Resource is fixed at construction.
    fn set_resource(&mut self, _res: &Resource) {}
}

/// Creates a tracer provider with file-based export.
///
/// The provider uses the simple (non-batched) strategy, so each span is
/// written as soon as it ends.
///
/// # Parameters
///
/// * `file_path` - Path to the JSON trace file
/// * `resource` - Resource metadata (service name, version, API base URL)
///
/// # Returns
///
/// A configured `TracerProvider` ready for `tracing-opentelemetry`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
