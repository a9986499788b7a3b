//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing → tracing-opentelemetry → SDK tracer provider → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `<data dir>/reelfeed-otlp.json` (see
//! [`crate::infrastructure::get_data_dir`]). The file rotates at 10 MB and the
//! three newest backups are kept. The level comes from `trace_level`
//! (default `info`).
//!
//! ```rust
//! use reelfeed::observability::init_tracing;
//! use reelfeed::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing is active");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// Service and instrumentation scope name on every exported span.
pub(crate) const SERVICE_NAME: &str = "reelfeed";

/// Trace file name inside the data directory.
pub(crate) const TRACE_FILE: &str = "reelfeed-otlp.json";
