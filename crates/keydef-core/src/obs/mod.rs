//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Engine code records through `sink::record` only; counters live in
//! `metrics` and are read back through `metrics_report`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
