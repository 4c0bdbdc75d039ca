//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/notekeeper/notekeeper-otlp.json`
//! (seen as `/host/...` from inside the sandbox), rotated at 10MB with three
//! backups. The level comes from the `trace_level` plugin option.
//!
//! Store calls carry a [`TraceContext`] through the web-request round trip so
//! that handling a result is linked to the span that issued the call.

mod file_writer;
mod init;
mod propagation;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
pub use propagation::TraceContext;
