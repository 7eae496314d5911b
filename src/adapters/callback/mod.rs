//! Report Sink Adapters
//!
//! - **HttpReportSink** - JSON POST to the evaluator endpoint
//! - **RecordingReportSink** - In-memory sink with failure injection for tests

mod http_report_sink;
mod recording_sink;

pub use http_report_sink::HttpReportSink;
pub use recording_sink::RecordingReportSink;
