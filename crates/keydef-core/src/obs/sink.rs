//! Metrics sink boundary.
//!
//! Engine logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{error::KeyDefError, obs::metrics};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Compile { parts: u64 },
    CompileRejected,
    Compare,
    CompareWithKey,
    Extract { bytes: u64 },
    Merge { parts: u64 },
    KeyValidationFailed,
    MalformedInput,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread's metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            let ops = &mut m.ops;
            match event {
                MetricsEvent::Compile { parts } => {
                    ops.compile_calls = ops.compile_calls.saturating_add(1);
                    ops.parts_compiled = ops.parts_compiled.saturating_add(parts);
                }
                MetricsEvent::CompileRejected => {
                    ops.compile_calls = ops.compile_calls.saturating_add(1);
                    ops.compile_rejected = ops.compile_rejected.saturating_add(1);
                }
                MetricsEvent::Compare => ops.compare_calls = ops.compare_calls.saturating_add(1),
                MetricsEvent::CompareWithKey => {
                    ops.compare_with_key_calls = ops.compare_with_key_calls.saturating_add(1);
                }
                MetricsEvent::Extract { bytes } => {
                    ops.extract_calls = ops.extract_calls.saturating_add(1);
                    ops.extract_bytes = ops.extract_bytes.saturating_add(bytes);
                }
                MetricsEvent::Merge { parts } => {
                    ops.merge_calls = ops.merge_calls.saturating_add(1);
                    ops.merge_parts = ops.merge_parts.saturating_add(parts);
                }
                MetricsEvent::KeyValidationFailed => {
                    ops.key_validation_failures = ops.key_validation_failures.saturating_add(1);
                }
                MetricsEvent::MalformedInput => {
                    ops.malformed_inputs = ops.malformed_inputs.saturating_add(1);
                }
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`,
        //   which restores the previous slot on every exit, unwinding included.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // - Only a shared reference is materialized, matching the original borrow.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Record the rejection class of a failed operation.
pub(crate) fn record_error(err: &KeyDefError) {
    if err.is_key_validation() {
        record(MetricsEvent::KeyValidationFailed);
    } else if err.is_malformed_input() {
        record(MetricsEvent::MalformedInput);
    }
}

/// Snapshot the current metrics state.
///
/// `window_start_ms` filters by window start (`EventState::window_start_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope and `Guard`
    //   restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    // - The lifetime is erased, but access stays shared.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
